//! Port for the goal ledger.

use async_trait::async_trait;

use crate::domain::{Goal, GoalId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by goal ledger adapters.
    pub enum GoalRepositoryError {
        /// Durable storage could not be read or written.
        Storage { message: String } => "goal ledger storage failed: {message}",
    }
}

/// Durable collection of goals across all users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Append goals in order with a single write.
    async fn append(&self, goals: &[Goal]) -> Result<(), GoalRepositoryError>;

    /// Goals owned by `owner`, in insertion order.
    async fn list_for(&self, owner: &UserId) -> Result<Vec<Goal>, GoalRepositoryError>;

    /// Look up a goal by id.
    async fn find(&self, id: &GoalId) -> Result<Option<Goal>, GoalRepositoryError>;

    /// Replace the stored goal with the same id. Returns `false` if absent.
    async fn save(&self, goal: &Goal) -> Result<bool, GoalRepositoryError>;
}

/// Fixture ledger with no goals that discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGoalRepository;

#[async_trait]
impl GoalRepository for FixtureGoalRepository {
    async fn append(&self, _goals: &[Goal]) -> Result<(), GoalRepositoryError> {
        Ok(())
    }

    async fn list_for(&self, _owner: &UserId) -> Result<Vec<Goal>, GoalRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: &GoalId) -> Result<Option<Goal>, GoalRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _goal: &Goal) -> Result<bool, GoalRepositoryError> {
        Ok(false)
    }
}
