//! Goal ledger service.
//!
//! Goals reference their owner by id only. Completion is one-way; repeating
//! it, or completing an unknown goal, changes nothing.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{GoalRepository, GoalRepositoryError};
use crate::domain::{
    DomainError, Goal, GoalId, GoalKind, GoalSeed, GoalSummary, GoalTitle, GoalValidationError,
    UserId,
};

/// Service that creates, completes, and lists goals.
#[derive(Clone)]
pub struct GoalLedger<G> {
    goals: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<G> GoalLedger<G> {
    /// Create a ledger over the given repository.
    pub fn new(goals: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self { goals, clock }
    }
}

impl<G> GoalLedger<G>
where
    G: GoalRepository,
{
    /// Create one open goal per non-blank title, short then medium then long.
    pub async fn seed(&self, owner: &UserId, titles: &GoalSeed) -> Result<Vec<Goal>, DomainError> {
        let now = self.clock.utc();
        let goals: Vec<Goal> = titles
            .titles()
            .map(|(kind, title)| Goal::open(GoalId::random(), owner.clone(), title, kind, now))
            .collect();
        if goals.is_empty() {
            return Ok(goals);
        }

        self.goals.append(&goals).await.map_err(map_goal_error)?;
        debug!(user_id = %owner, count = goals.len(), "seeded goals");
        Ok(goals)
    }

    /// Add a single open goal.
    pub async fn add(
        &self,
        owner: &UserId,
        title: &str,
        kind: GoalKind,
    ) -> Result<Goal, DomainError> {
        let title = GoalTitle::new(title).map_err(map_validation_error)?;
        let goal = Goal::open(GoalId::random(), owner.clone(), title, kind, self.clock.utc());
        self.goals
            .append(std::slice::from_ref(&goal))
            .await
            .map_err(map_goal_error)?;
        info!(user_id = %owner, goal_id = %goal.id(), kind = %kind, "goal added");
        Ok(goal)
    }

    /// Mark a goal completed.
    ///
    /// Returns the goal only when this call completed it. Unknown ids and
    /// goals that were already complete yield `None`.
    pub async fn complete(&self, id: &GoalId) -> Result<Option<Goal>, DomainError> {
        let Some(goal) = self.goals.find(id).await.map_err(map_goal_error)? else {
            debug!(goal_id = %id, "ignoring completion of unknown goal");
            return Ok(None);
        };
        let Some(completed) = goal.complete(self.clock.utc()) else {
            debug!(goal_id = %id, "goal already completed");
            return Ok(None);
        };

        if !self.goals.save(&completed).await.map_err(map_goal_error)? {
            return Ok(None);
        }
        info!(goal_id = %id, user_id = %completed.owner(), "goal completed");
        Ok(Some(completed))
    }

    /// Goals owned by `owner` in insertion order, optionally of one kind.
    pub async fn list_for(
        &self,
        owner: &UserId,
        kind: Option<GoalKind>,
    ) -> Result<Vec<Goal>, DomainError> {
        let mut goals = self.goals.list_for(owner).await.map_err(map_goal_error)?;
        if let Some(kind) = kind {
            goals.retain(|goal| goal.kind() == kind);
        }
        Ok(goals)
    }

    /// Totals per kind and completed count for `owner`.
    pub async fn summary(&self, owner: &UserId) -> Result<GoalSummary, DomainError> {
        let goals = self.list_for(owner, None).await?;
        Ok(GoalSummary::from_goals(&goals))
    }
}

fn map_goal_error(error: GoalRepositoryError) -> DomainError {
    match error {
        GoalRepositoryError::Storage { message } => {
            DomainError::service_unavailable(format!("goal ledger unavailable: {message}"))
        }
    }
}

fn map_validation_error(error: GoalValidationError) -> DomainError {
    DomainError::invalid_request(error.to_string()).with_details(serde_json::json!({
        "field": "title",
    }))
}
