//! Account registry service: registration and identity updates.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::session_service::{map_account_error, map_session_error};
use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, GoalRepository, SessionRepository,
};
use crate::domain::{
    DomainError, GoalLedger, Password, Progress, RegisteredAccount, RegistrationOutcome,
    RegistrationRejection, RegistrationRequest, ScreenTime, User, UserDraft, UserId,
};

/// Registers new accounts and keeps stored identities current.
#[derive(Clone)]
pub struct AccountService<A, G, S> {
    accounts: Arc<A>,
    ledger: GoalLedger<G>,
    session: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<A, G, S> AccountService<A, G, S> {
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

impl<A, G, S> AccountService<A, G, S>
where
    A: AccountRepository,
    G: GoalRepository,
    S: SessionRepository,
{
    /// Register a new account, seed its goals, and sign it in.
    ///
    /// Validation failures and duplicate emails come back as
    /// [`RegistrationOutcome::Rejected`] with nothing written.
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationOutcome, DomainError> {
        let validated = match request.validate() {
            Ok(validated) => validated,
            Err(rejection) => {
                info!(code = rejection.code(), "registration rejected");
                return Ok(RegistrationOutcome::Rejected(rejection));
            }
        };

        let existing = self
            .accounts
            .find_by_email(&validated.email)
            .await
            .map_err(map_account_error)?;
        if existing.is_some() {
            info!(code = "email_in_use", "registration rejected");
            return Ok(RegistrationOutcome::Rejected(
                RegistrationRejection::EmailInUse,
            ));
        }

        let now = self.clock.utc();
        let user = User::new(UserDraft {
            id: UserId::random(),
            email: validated.email,
            display_name: validated.display_name,
            country: validated.country,
            is_email_confirmed: false,
            created_at: now,
            updated_at: now,
            progress: Progress::default(),
            screen_time: ScreenTime {
                daily_goal_minutes: Some(validated.daily_screen_time_goal),
                current_minutes: Some(0),
            },
        });
        let account = RegisteredAccount {
            user: user.clone(),
            password: Password::new(validated.password.as_str()),
        };

        match self.accounts.insert(&account).await {
            Ok(()) => {}
            Err(AccountRepositoryError::DuplicateEmail { .. }) => {
                return Ok(RegistrationOutcome::Rejected(
                    RegistrationRejection::EmailInUse,
                ));
            }
            Err(error) => return Err(map_account_error(error)),
        }

        self.ledger.seed(user.id(), &validated.goals).await?;
        self.session.save(&user).await.map_err(map_session_error)?;
        info!(user_id = %user.id(), country = %user.country(), "account registered");
        Ok(RegistrationOutcome::Registered(user))
    }

    /// Replace the stored identity, keeping its password.
    ///
    /// Returns `false` when no account with that id exists.
    pub async fn update(&self, user: &User) -> Result<bool, DomainError> {
        let updated = self.accounts.update(user).await.map_err(map_account_error)?;
        if !updated {
            warn!(user_id = %user.id(), "update skipped for unregistered identity");
        }
        Ok(updated)
    }
}
