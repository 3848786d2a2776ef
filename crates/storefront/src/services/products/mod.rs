//! Farmer product submissions.

mod draft;
mod error;

pub use draft::{MIN_DESCRIPTION_LENGTH, MIN_NAME_LENGTH, ProductDraft, ValidProduct};
pub use error::ProductError;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::instrument;

use farmerty_core::ProductId;

use crate::models::{Identity, SubmittedProduct};
use crate::navigation::Route;
use crate::services::Outcome;
use crate::services::scope::{CancelToken, simulate_latency};
use crate::storage::LocalStorage;
use crate::storage::products::ProductRepository;

/// Default simulated round-trip time of a submission.
pub const DEFAULT_ADD_PRODUCT_LATENCY: Duration = Duration::from_millis(1000);

/// Service for the Add-Product flow.
pub struct ProductService {
    storage: Arc<dyn LocalStorage>,
    latency: Duration,
}

impl ProductService {
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>, latency: Duration) -> Self {
        Self { storage, latency }
    }

    /// Submit a product on behalf of `identity`.
    ///
    /// # Errors
    ///
    /// - `ProductError::Forbidden` unless `identity` is a farmer
    /// - `ProductError::Validation` listing every invalid field
    /// - `ProductError::Cancelled` if `token` fires during the request
    /// - `ProductError::Storage` if the list cannot be updated
    #[instrument(skip_all, fields(product = %draft.name.trim()))]
    pub async fn add_product(
        &self,
        identity: Option<&Identity>,
        draft: &ProductDraft,
        token: &CancelToken,
    ) -> Result<Outcome<SubmittedProduct>, ProductError> {
        let farmer = identity
            .filter(|identity| identity.role().can_list_products())
            .ok_or(ProductError::Forbidden)?;

        let valid = draft.validate()?;
        simulate_latency(self.latency, token).await?;

        let product = SubmittedProduct {
            id: ProductId::generate(),
            name: valid.name,
            price: valid.price,
            unit: valid.unit,
            description: valid.description,
            image_url: valid.image_url,
            farmer_id: farmer.id().clone(),
            farmer_name: farmer.name().to_owned(),
            created_at: Utc::now(),
        };

        ProductRepository::new(self.storage.as_ref()).append(product.clone())?;
        tracing::info!(product_id = %product.id, farmer_id = %product.farmer_id, "Product added");

        Ok(Outcome::new(
            product,
            "Product added successfully!",
            Route::Browse,
        ))
    }

    /// Every submitted product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Storage` if the stored list is unreadable or
    /// malformed.
    pub fn submitted_products(&self) -> Result<Vec<SubmittedProduct>, ProductError> {
        Ok(ProductRepository::new(self.storage.as_ref()).list()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmerty_core::{Email, Role, UserId};

    use super::*;
    use crate::error::Surface;
    use crate::services::scope::RequestScope;
    use crate::storage::{MemoryStorage, keys};

    fn identity(role: Role) -> Identity {
        Identity::new(
            UserId::new("f9"),
            Email::parse("hello@greenvalley.farm").unwrap(),
            "Green Valley Farm",
            role,
        )
        .unwrap()
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Purple Kale".to_string(),
            price: "3.25".to_string(),
            unit: "bunch".to_string(),
            description: "Tender leaves, great raw.".to_string(),
            image_url: String::new(),
        }
    }

    fn service() -> (Arc<MemoryStorage>, ProductService) {
        let storage = Arc::new(MemoryStorage::new());
        (
            storage.clone(),
            ProductService::new(storage, DEFAULT_ADD_PRODUCT_LATENCY),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_farmer_adds_product() {
        let (_, service) = service();
        let farmer = identity(Role::Farmer);

        let outcome = service
            .add_product(Some(&farmer), &draft(), &CancelToken::never())
            .await
            .unwrap();

        assert_eq!(outcome.notice, "Product added successfully!");
        assert_eq!(outcome.redirect, Route::Browse);
        assert_eq!(outcome.value.farmer_id, UserId::new("f9"));
        assert_eq!(outcome.value.farmer_name, "Green Valley Farm");
        assert!(outcome.value.has_placeholder_image());

        let listed = service.submitted_products().unwrap();
        assert_eq!(listed, vec![outcome.value]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submissions_append_in_order() {
        let (_, service) = service();
        let farmer = identity(Role::Farmer);

        for name in ["Purple Kale", "Sweet Corn"] {
            let mut d = draft();
            d.name = name.to_string();
            service
                .add_product(Some(&farmer), &d, &CancelToken::never())
                .await
                .unwrap();
        }

        let names: Vec<_> = service
            .submitted_products()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Purple Kale", "Sweet Corn"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consumers_and_guests_are_refused() {
        let (storage, service) = service();
        let consumer = identity(Role::Consumer);

        let err = service
            .add_product(Some(&consumer), &draft(), &CancelToken::never())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Forbidden));
        assert_eq!(err.to_string(), "Only farmers can add products");
        assert_eq!(err.surface(), Surface::Banner);

        let err = service
            .add_product(None, &draft(), &CancelToken::never())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Forbidden));
        assert!(storage.get_item(keys::SUBMITTED_PRODUCTS).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_draft_is_not_stored() {
        let (_, service) = service();
        let mut d = draft();
        d.description = "Too short".to_string();

        let err = service
            .add_product(Some(&identity(Role::Farmer)), &d, &CancelToken::never())
            .await
            .unwrap_err();
        assert_eq!(err.surface(), Surface::Inline { field: "description" });
        assert!(service.submitted_products().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submission_is_not_stored() {
        let (_, service) = service();
        let scope = RequestScope::new();
        scope.cancel();

        let err = service
            .add_product(Some(&identity(Role::Farmer)), &draft(), &scope.token())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Cancelled));
        assert!(service.submitted_products().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_cancelled_mid_wait() {
        let (storage, service) = service();
        let service = Arc::new(service);
        let scope = RequestScope::new();
        let token = scope.token();

        let task = {
            let service = service.clone();
            tokio::spawn(async move {
                let farmer = identity(Role::Farmer);
                service.add_product(Some(&farmer), &draft(), &token).await
            })
        };
        tokio::time::sleep(DEFAULT_ADD_PRODUCT_LATENCY / 2).await;
        assert!(!task.is_finished());

        scope.cancel();
        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, ProductError::Cancelled));
        assert!(service.submitted_products().unwrap().is_empty());
        assert!(storage.get_item(keys::SUBMITTED_PRODUCTS).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unstorable_price_is_rejected() {
        let (_, service) = service();
        let farmer = identity(Role::Farmer);

        for price in ["79228162514264337593543950335", "0.123456789012345678"] {
            let mut d = draft();
            d.price = price.to_string();
            let err = service
                .add_product(Some(&farmer), &d, &CancelToken::never())
                .await
                .unwrap_err();
            assert_eq!(err.surface(), Surface::Inline { field: "price" }, "{price}");
        }

        let outcome = service
            .add_product(Some(&farmer), &draft(), &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(service.submitted_products().unwrap(), vec![outcome.value]);
    }

    #[test]
    fn test_malformed_list_is_storage_error() {
        let (storage, service) = service();
        storage
            .set_item(keys::SUBMITTED_PRODUCTS, "{\"not\":\"a list\"}")
            .unwrap();
        assert!(matches!(
            service.submitted_products(),
            Err(ProductError::Storage(_))
        ));
    }
}
