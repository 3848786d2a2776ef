//! Authentication error types.

use thiserror::Error;

use crate::error::Surface;
use crate::services::scope::Cancelled;
use crate::storage::StorageError;
use crate::validation::FieldError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field is missing or malformed.
    #[error("{0}")]
    Validation(FieldError),

    /// Credentials rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The initiating view abandoned the request.
    #[error("sign-in request cancelled")]
    Cancelled,

    /// A newer request (or a sign-out) replaced this one.
    #[error("sign-in request superseded by a newer one")]
    Superseded,

    /// The session record could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub(crate) fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(FieldError::new(field, message))
    }

    /// Where a UI should show this error.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        match self {
            Self::Validation(err) => Surface::Inline { field: err.field },
            Self::InvalidCredentials | Self::Storage(_) => Surface::Banner,
            Self::Cancelled | Self::Superseded => Surface::Silent,
        }
    }
}

impl From<Cancelled> for AuthError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}
