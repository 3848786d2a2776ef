//! Product submission error types.

use thiserror::Error;

use crate::error::Surface;
use crate::services::scope::Cancelled;
use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Errors that can occur while submitting a product.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The caller is not signed in as a farmer.
    #[error("Only farmers can add products")]
    Forbidden,

    /// One or more form fields are invalid.
    #[error("invalid product: {0}")]
    Validation(ValidationErrors),

    #[error("product submission cancelled")]
    Cancelled,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ProductError {
    /// Where a UI should show this error.
    ///
    /// Validation failures cite the first invalid field; the full list is in
    /// the error itself.
    #[must_use]
    pub fn surface(&self) -> Surface {
        match self {
            Self::Validation(errors) => errors
                .fields()
                .next()
                .map_or(Surface::Banner, |field| Surface::Inline { field }),
            Self::Forbidden | Self::Storage(_) => Surface::Banner,
            Self::Cancelled => Surface::Silent,
        }
    }
}

impl From<Cancelled> for ProductError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
