//! Friendships stored as the `monkFriends` document.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{FriendshipRepository, FriendshipRepositoryError};
use crate::domain::{Friendship, FriendshipId, UserId};
use crate::outbound::storage::{StorageBackend, StorageError, StorageKey};

use super::json_collection::{load_collection, store_collection};

/// Storage-backed implementation of the friendship port.
#[derive(Clone)]
pub struct StorageFriendshipRepository<B> {
    backend: Arc<B>,
}

impl<B> StorageFriendshipRepository<B> {
    /// Create a repository over `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

fn map_storage_error(error: StorageError) -> FriendshipRepositoryError {
    FriendshipRepositoryError::storage(error.to_string())
}

impl<B: StorageBackend> StorageFriendshipRepository<B> {
    fn load(&self) -> Result<Vec<Friendship>, FriendshipRepositoryError> {
        load_collection(&*self.backend, StorageKey::Friendships).map_err(map_storage_error)
    }

    fn store(&self, friendships: &[Friendship]) -> Result<(), FriendshipRepositoryError> {
        store_collection(&*self.backend, StorageKey::Friendships, friendships)
            .map_err(map_storage_error)
    }
}

#[async_trait]
impl<B: StorageBackend> FriendshipRepository for StorageFriendshipRepository<B> {
    async fn list_involving(
        &self,
        user: &UserId,
    ) -> Result<Vec<Friendship>, FriendshipRepositoryError> {
        let mut friendships = self.load()?;
        friendships.retain(|friendship| friendship.involves(user));
        Ok(friendships)
    }

    async fn find(
        &self,
        id: &FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipRepositoryError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|friendship| friendship.id() == *id))
    }

    async fn insert(&self, friendship: &Friendship) -> Result<(), FriendshipRepositoryError> {
        let mut friendships = self.load()?;
        friendships.push(friendship.clone());
        self.store(&friendships)
    }

    async fn save(&self, friendship: &Friendship) -> Result<bool, FriendshipRepositoryError> {
        let mut friendships = self.load()?;
        let Some(slot) = friendships
            .iter_mut()
            .find(|stored| stored.id() == friendship.id())
        else {
            return Ok(false);
        };
        *slot = friendship.clone();
        self.store(&friendships)?;
        Ok(true)
    }

    async fn delete(&self, id: &FriendshipId) -> Result<bool, FriendshipRepositoryError> {
        let mut friendships = self.load()?;
        let before = friendships.len();
        friendships.retain(|stored| stored.id() != *id);
        if friendships.len() == before {
            return Ok(false);
        }
        self.store(&friendships)?;
        Ok(true)
    }
}
