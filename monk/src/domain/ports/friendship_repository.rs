//! Port for friendship records.

use async_trait::async_trait;

use crate::domain::{Friendship, FriendshipId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by friendship adapters.
    pub enum FriendshipRepositoryError {
        /// Durable storage could not be read or written.
        Storage { message: String } => "friendship storage failed: {message}",
    }
}

/// Durable collection of friendships.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Friendships where `user` is either the requester or the addressee.
    async fn list_involving(
        &self,
        user: &UserId,
    ) -> Result<Vec<Friendship>, FriendshipRepositoryError>;

    /// Look up a friendship by id.
    async fn find(&self, id: &FriendshipId)
    -> Result<Option<Friendship>, FriendshipRepositoryError>;

    /// Append a new friendship.
    async fn insert(&self, friendship: &Friendship) -> Result<(), FriendshipRepositoryError>;

    /// Replace the stored friendship with the same id. Returns `false` if absent.
    async fn save(&self, friendship: &Friendship) -> Result<bool, FriendshipRepositoryError>;

    /// Remove the friendship with `id`. Returns `false` if absent.
    async fn delete(&self, id: &FriendshipId) -> Result<bool, FriendshipRepositoryError>;
}

/// Fixture store with no friendships.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFriendshipRepository;

#[async_trait]
impl FriendshipRepository for FixtureFriendshipRepository {
    async fn list_involving(
        &self,
        _user: &UserId,
    ) -> Result<Vec<Friendship>, FriendshipRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(
        &self,
        _id: &FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _friendship: &Friendship) -> Result<(), FriendshipRepositoryError> {
        Ok(())
    }

    async fn save(&self, _friendship: &Friendship) -> Result<bool, FriendshipRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: &FriendshipId) -> Result<bool, FriendshipRepositoryError> {
        Ok(false)
    }
}
