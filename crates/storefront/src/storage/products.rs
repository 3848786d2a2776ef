//! Persistence for farmer-submitted products.
//!
//! The list is stored as a single JSON array under
//! [`keys::SUBMITTED_PRODUCTS`] and only ever appended to.

use super::{LocalStorage, StorageError, keys};
use crate::models::SubmittedProduct;

/// Repository for submitted products.
pub struct ProductRepository<'a> {
    storage: &'a dyn LocalStorage,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(storage: &'a dyn LocalStorage) -> Self {
        Self { storage }
    }

    /// All submitted products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DataCorruption` if the stored list is malformed.
    pub fn list(&self) -> Result<Vec<SubmittedProduct>, StorageError> {
        let Some(raw) = self.storage.get_item(keys::SUBMITTED_PRODUCTS)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::DataCorruption(format!("invalid submitted product list: {e}"))
        })
    }

    /// Append `product` to the list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or written.
    pub fn append(&self, product: SubmittedProduct) -> Result<(), StorageError> {
        let mut products = self.list()?;
        products.push(product);
        let raw = serde_json::to_string(&products)?;
        self.storage.set_item(keys::SUBMITTED_PRODUCTS, &raw)
    }
}
