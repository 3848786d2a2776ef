//! Application context shared by every caller.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::auth::SessionManager;
use crate::services::products::ProductService;
use crate::storage::{FileStorage, LocalStorage, StorageError};

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one
/// [`SessionManager`]; all session mutations go through it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: Arc<dyn LocalStorage>,
    session: SessionManager,
    products: ProductService,
    catalog: Catalog,
}

impl AppState {
    /// Create the application state backed by the configured storage file.
    ///
    /// Any persisted session is restored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage file cannot be opened.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.storage_path)?;
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    /// Create the application state over an existing store.
    ///
    /// Any persisted session is restored.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn LocalStorage>) -> Self {
        let session = SessionManager::new(
            storage.clone(),
            config.sign_in_role.policy(),
            config.latency.auth(),
        );
        session.restore();

        let products = ProductService::new(storage.clone(), config.latency.add_product);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                session,
                products,
                catalog: Catalog::seeded(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the local store.
    #[must_use]
    pub fn storage(&self) -> &dyn LocalStorage {
        self.inner.storage.as_ref()
    }

    /// Get a reference to the session manager.
    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    /// Get a reference to the product submission service.
    #[must_use]
    pub fn products(&self) -> &ProductService {
        &self.inner.products
    }

    /// Get a reference to the seed catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmerty_core::Role;

    use super::*;
    use crate::config::{LatencyConfig, SignInRole};
    use crate::storage::{MemoryStorage, keys};

    #[test]
    fn test_restores_session_on_construction() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                keys::CURRENT_USER,
                r#"{"id":"f1","email":"a@b.com","name":"Green Valley Farm","role":"farmer"}"#,
            )
            .unwrap();

        let config = StorefrontConfig {
            latency: LatencyConfig::none(),
            sign_in_role: SignInRole::Fixed(Role::Consumer),
            ..StorefrontConfig::default()
        };
        let state = AppState::with_storage(config, storage);

        let identity = state.session().current().unwrap();
        assert_eq!(identity.name(), "Green Valley Farm");
        assert_eq!(state.catalog().products().len(), 8);
    }

    #[test]
    fn test_clones_share_session() {
        let state = AppState::with_storage(StorefrontConfig::default(), Arc::new(MemoryStorage::new()));
        let clone = state.clone();
        assert!(std::ptr::eq(state.session(), clone.session()));
    }
}
