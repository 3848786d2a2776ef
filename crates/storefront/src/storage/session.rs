//! Persistence for the signed-in identity.

use super::{LocalStorage, StorageError, keys};
use crate::models::Identity;

/// Repository for the persisted session record.
pub struct SessionRepository<'a> {
    storage: &'a dyn LocalStorage,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(storage: &'a dyn LocalStorage) -> Self {
        Self { storage }
    }

    /// Load the persisted identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DataCorruption` if a record exists but does not
    /// describe a valid identity.
    pub fn load(&self) -> Result<Option<Identity>, StorageError> {
        let Some(raw) = self.storage.get_item(keys::CURRENT_USER)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            StorageError::DataCorruption(format!("invalid session record: {e}"))
        })
    }

    /// Persist `identity` as the current session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn save(&self, identity: &Identity) -> Result<(), StorageError> {
        let raw = serde_json::to_string(identity)?;
        self.storage.set_item(keys::CURRENT_USER, &raw)
    }

    /// Remove the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(keys::CURRENT_USER)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmerty_core::{Email, Role, UserId};

    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_save_load_clear() {
        let storage = MemoryStorage::new();
        let repo = SessionRepository::new(&storage);
        assert!(repo.load().unwrap().is_none());

        let identity = Identity::new(
            UserId::new("abc"),
            Email::parse("a@b.com").unwrap(),
            "a",
            Role::Consumer,
        )
        .unwrap();
        repo.save(&identity).unwrap();
        assert_eq!(repo.load().unwrap(), Some(identity));

        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_none());
        assert!(storage.get_item(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_load_rejects_malformed_record() {
        let storage = MemoryStorage::new();
        storage
            .set_item(keys::CURRENT_USER, r#"{"id":"x","email":"bad","name":"x","role":"farmer"}"#)
            .unwrap();

        let repo = SessionRepository::new(&storage);
        assert!(matches!(repo.load(), Err(StorageError::DataCorruption(_))));
    }
}
