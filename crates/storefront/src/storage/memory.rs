//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{LocalStorage, StorageError};

/// Process-local storage. Contents vanish when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LockPoisoned` if a writer panicked.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned)?
            .len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LockPoisoned` if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::LockPoisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::LockPoisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// A [`MemoryStorage`] whose writes can be made to fail, as on a full disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_writes: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl FailingStorage {
    /// Make every later `set_item` and `remove_item` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

#[cfg(test)]
impl LocalStorage for FailingStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.remove_item(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("k").unwrap().is_none());

        storage.set_item("k", "1").unwrap();
        storage.set_item("k", "2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len().unwrap(), 1);

        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn test_failing_storage_rejects_writes_only() {
        let storage = FailingStorage::default();
        storage.set_item("k", "1").unwrap();

        storage.fail_writes(true);
        assert!(matches!(storage.set_item("k", "2"), Err(StorageError::Io(_))));
        assert!(matches!(storage.remove_item("k"), Err(StorageError::Io(_))));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("1"));
    }
}
