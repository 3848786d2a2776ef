//! Integration tests for Farmerty.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p farmerty-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Sign-in, sign-up, sign-out and restore across restarts
//! - `catalog_browse` - Filtering the seeded catalog
//! - `add_product` - Farmer submissions through the application state
//!
//! Every test gets its own [`TestContext`]: a temporary directory holding
//! the storage file, and an [`AppState`] over it with no simulated latency.

use std::path::PathBuf;

use tempfile::TempDir;

use farmerty_core::Role;
use farmerty_storefront::config::{LatencyConfig, SignInRole, StorefrontConfig};
use farmerty_storefront::state::AppState;
use farmerty_storefront::storage::StorageError;

/// An isolated application over a throwaway storage file.
pub struct TestContext {
    // Removed on drop.
    _dir: TempDir,
    config: StorefrontConfig,
    pub state: AppState,
}

impl TestContext {
    /// A context whose sign-ins are consumers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the temporary store cannot be created.
    pub fn new() -> Result<Self, StorageError> {
        Self::with_sign_in_role(Role::Consumer)
    }

    /// A context whose sign-ins always get `role`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the temporary store cannot be created.
    pub fn with_sign_in_role(role: Role) -> Result<Self, StorageError> {
        let dir = TempDir::new()?;
        let config = StorefrontConfig {
            storage_path: dir.path().join("storage.json"),
            latency: LatencyConfig::none(),
            sign_in_role: SignInRole::Fixed(role),
        };
        let state = AppState::new(config.clone())?;
        Ok(Self {
            _dir: dir,
            config,
            state,
        })
    }

    /// The storage file backing this context.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.config.storage_path.clone()
    }

    /// A fresh application over the same storage file, as after a restart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage file cannot be reopened.
    pub fn restart(&self) -> Result<AppState, StorageError> {
        AppState::new(self.config.clone())
    }
}
