//! Business logic services for the storefront.
//!
//! # Services
//!
//! - [`auth`] - Session identity: sign-in, sign-up, sign-out, restore
//! - [`products`] - Farmer product submissions
//! - [`scope`] - Cancellation of in-flight requests
//!
//! Every user-triggered operation resolves to an [`Outcome`]: the value it
//! produced, a one-line notice for the toast area, and the route to show next.

pub mod auth;
pub mod products;
pub mod scope;

use crate::navigation::Route;

/// The result of a completed user operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    /// Value produced by the operation.
    pub value: T,
    /// Notice to show the user.
    pub notice: String,
    /// Where the user should go next.
    pub redirect: Route,
}

impl<T> Outcome<T> {
    pub(crate) fn new(value: T, notice: impl Into<String>, redirect: Route) -> Self {
        Self {
            value,
            notice: notice.into(),
            redirect,
        }
    }
}
