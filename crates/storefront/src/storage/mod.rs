//! Durable local key-value storage.
//!
//! Everything the storefront persists lives behind the [`LocalStorage`]
//! trait: a flat map from string keys to JSON-encoded string values, scoped
//! to one installation. Access is synchronous and last-write-wins; there are
//! no transactions.
//!
//! # Keys
//!
//! - [`keys::CURRENT_USER`] - the signed-in identity record
//! - [`keys::SUBMITTED_PRODUCTS`] - products added by farmers
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local, used by tests and ephemeral runs
//! - [`FileStorage`] - a single JSON file, rewritten on every mutation

mod file;
mod memory;
pub mod products;
pub mod session;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(test)]
pub use memory::FailingStorage;

use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Key for the signed-in identity.
    pub const CURRENT_USER: &str = "farmerty_user";

    /// Key for the list of farmer-submitted products.
    pub const SUBMITTED_PRODUCTS: &str = "farmerty_products";
}

/// Errors that can occur while reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error from a file-backed store.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is present but malformed.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// A string-keyed, string-valued persistent store.
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
