//! Unified error handling.
//!
//! Every service has its own error enum. `AppError` wraps them for callers
//! that drive several services, and [`Surface`] tells a UI where to show an
//! error: next to a form field, as a banner, or not at all.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::products::ProductError;
use crate::storage::StorageError;

/// Where an error belongs in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Next to the named form field.
    Inline { field: &'static str },
    /// A top-level banner.
    Banner,
    /// Not shown; the request was abandoned by its caller.
    Silent,
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Product submission failed.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Where a UI should show this error.
    #[must_use]
    pub fn surface(&self) -> Surface {
        match self {
            Self::Auth(e) => e.surface(),
            Self::Product(e) => e.surface(),
            Self::Storage(_) | Self::Config(_) => Surface::Banner,
        }
    }

    /// Whether the error should be dropped without telling the user.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.surface() == Surface::Silent
    }
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, AppError>;
