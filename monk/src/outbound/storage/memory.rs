//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{StorageBackend, StorageError, StorageKey};

/// Storage held in process memory; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a raw document.
    pub fn with_document(self, key: StorageKey, contents: impl Into<String>) -> Self {
        self.lock().insert(key, contents.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StorageKey, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, contents: &str) -> Result<(), StorageError> {
        self.lock().insert(key, contents.to_owned());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.lock().remove(&key);
        Ok(())
    }
}
