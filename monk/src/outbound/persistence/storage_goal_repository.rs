//! Goal ledger stored as the `monkGoals` document.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{GoalRepository, GoalRepositoryError};
use crate::domain::{Goal, GoalId, UserId};
use crate::outbound::storage::{StorageBackend, StorageError, StorageKey};

use super::json_collection::{load_collection, store_collection};

/// Storage-backed implementation of the goal ledger port.
#[derive(Clone)]
pub struct StorageGoalRepository<B> {
    backend: Arc<B>,
}

impl<B> StorageGoalRepository<B> {
    /// Create a repository over `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

fn map_storage_error(error: StorageError) -> GoalRepositoryError {
    GoalRepositoryError::storage(error.to_string())
}

impl<B: StorageBackend> StorageGoalRepository<B> {
    fn load(&self) -> Result<Vec<Goal>, GoalRepositoryError> {
        load_collection(&*self.backend, StorageKey::Goals).map_err(map_storage_error)
    }

    fn store(&self, goals: &[Goal]) -> Result<(), GoalRepositoryError> {
        store_collection(&*self.backend, StorageKey::Goals, goals)
            .map_err(map_storage_error)
    }
}

#[async_trait]
impl<B: StorageBackend> GoalRepository for StorageGoalRepository<B> {
    async fn append(&self, goals: &[Goal]) -> Result<(), GoalRepositoryError> {
        let mut stored = self.load()?;
        stored.extend_from_slice(goals);
        self.store(&stored)
    }

    async fn list_for(&self, owner: &UserId) -> Result<Vec<Goal>, GoalRepositoryError> {
        let mut goals = self.load()?;
        goals.retain(|goal| goal.owner() == owner);
        Ok(goals)
    }

    async fn find(&self, id: &GoalId) -> Result<Option<Goal>, GoalRepositoryError> {
        Ok(self.load()?.into_iter().find(|goal| goal.id() == *id))
    }

    async fn save(&self, goal: &Goal) -> Result<bool, GoalRepositoryError> {
        let mut goals = self.load()?;
        let Some(slot) = goals.iter_mut().find(|stored| stored.id() == goal.id()) else {
            return Ok(false);
        };
        *slot = goal.clone();
        self.store(&goals)?;
        Ok(true)
    }
}
