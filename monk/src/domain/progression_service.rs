//! Applies progression events and persists the result.
//!
//! Every event takes the identity explicitly. The updated identity is written
//! to the account registry and to the session snapshot so a later restore
//! sees the new stats.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::session_service::{map_account_error, map_session_error};
use crate::domain::ports::{AccountRepository, GoalRepository, SessionRepository};
use crate::domain::{
    DomainError, GoalId, GoalLedger, User, apply_focus_minutes, apply_goal_completion,
};

/// Records focus sessions and goal completions.
#[derive(Clone)]
pub struct ProgressionService<A, G, S> {
    accounts: Arc<A>,
    ledger: GoalLedger<G>,
    session: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<A, G, S> ProgressionService<A, G, S> {
    /// Create a new service with the given repositories.
    pub fn new(accounts: Arc<A>, goals: Arc<G>, session: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            ledger: GoalLedger::new(goals, Arc::clone(&clock)),
            session,
            clock,
        }
    }
}

impl<A, G, S> ProgressionService<A, G, S>
where
    A: AccountRepository,
    G: GoalRepository,
    S: SessionRepository,
{
    /// Credit a finished focus session of `minutes` to `user`.
    pub async fn record_focus(&self, user: &User, minutes: u32) -> Result<User, DomainError> {
        let updated = apply_focus_minutes(user, minutes);
        let updated = self.persist(user, updated).await?;
        info!(
            user_id = %user.id(),
            minutes,
            experience = updated.progress().experience,
            level = updated.level(),
            "focus session recorded"
        );
        Ok(updated)
    }

    /// Complete one of `user`'s goals and award the completion bonus.
    ///
    /// The bonus is only granted when this call moves the goal from open to
    /// completed. Unknown goals, goals already completed, and goals owned by
    /// someone else leave `user` unchanged.
    pub async fn complete_goal(&self, user: &User, goal_id: &GoalId) -> Result<User, DomainError> {
        let owned = self
            .ledger
            .list_for(user.id(), None)
            .await?
            .into_iter()
            .any(|goal| goal.id() == *goal_id);
        if !owned {
            return Ok(user.clone());
        }
        if self.ledger.complete(goal_id).await?.is_none() {
            return Ok(user.clone());
        }

        let updated = self.persist(user, apply_goal_completion(user)).await?;
        info!(
            user_id = %user.id(),
            goal_id = %goal_id,
            goals_completed = updated.progress().goals_completed,
            level = updated.level(),
            "goal bonus awarded"
        );
        Ok(updated)
    }

    async fn persist(&self, original: &User, updated: User) -> Result<User, DomainError> {
        let updated = updated.touched(self.clock.utc());
        let stored = self
            .accounts
            .update(&updated)
            .await
            .map_err(map_account_error)?;
        if !stored {
            warn!(user_id = %original.id(), "identity missing from registry; progress not saved");
            return Ok(original.clone());
        }
        self.session
            .save(&updated)
            .await
            .map_err(map_session_error)?;
        Ok(updated)
    }
}
