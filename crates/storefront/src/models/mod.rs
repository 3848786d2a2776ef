//! Domain models for the storefront.
//!
//! These types are validated domain objects. Records read back from local
//! storage go through the same validation as freshly constructed values.

pub mod identity;
pub mod product;

pub use identity::{Identity, IdentityError};
pub use product::{PLACEHOLDER_IMAGE, Product, SubmittedProduct};
