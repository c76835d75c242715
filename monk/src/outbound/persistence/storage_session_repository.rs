//! Session snapshot stored as the `monkUser` document.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::outbound::storage::{StorageBackend, StorageError, StorageKey};

/// Storage-backed implementation of the session port.
#[derive(Clone)]
pub struct StorageSessionRepository<B> {
    backend: Arc<B>,
}

impl<B> StorageSessionRepository<B> {
    /// Create a repository over `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

fn map_storage_error(error: StorageError) -> SessionRepositoryError {
    SessionRepositoryError::storage(error.to_string())
}

#[async_trait]
impl<B: StorageBackend> SessionRepository for StorageSessionRepository<B> {
    async fn load(&self) -> Result<Option<User>, SessionRepositoryError> {
        let Some(raw) = self
            .backend
            .read(StorageKey::Session)
            .map_err(map_storage_error)?
        else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SessionRepositoryError::malformed(err.to_string()))
    }

    async fn save(&self, user: &User) -> Result<(), SessionRepositoryError> {
        let contents = serde_json::to_string_pretty(user)
            .map_err(|err| SessionRepositoryError::storage(format!("serialise session: {err}")))?;
        self.backend
            .write(StorageKey::Session, &contents)
            .map_err(map_storage_error)
    }

    async fn clear(&self) -> Result<(), SessionRepositoryError> {
        self.backend
            .remove(StorageKey::Session)
            .map_err(map_storage_error)
    }
}
