//! Session store: who is signed in.
//!
//! The session holds a password-free snapshot of one identity. Login looks
//! the identity up in the account registry; failures are silent so callers
//! cannot tell an unknown email from a wrong password.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, SessionRepository, SessionRepositoryError,
};
use crate::domain::{Email, DomainError, LoginCredentials, User};

/// Session service over the account registry and the session snapshot.
#[derive(Clone)]
pub struct SessionService<A, S> {
    accounts: Arc<A>,
    session: Arc<S>,
}

impl<A, S> SessionService<A, S> {
    /// Create a new service with the given repositories.
    pub fn new(accounts: Arc<A>, session: Arc<S>) -> Self {
        Self { accounts, session }
    }
}

impl<A, S> SessionService<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    /// Load the persisted snapshot.
    ///
    /// A snapshot that cannot be parsed is cleared and treated as signed out.
    pub async fn restore(&self) -> Result<Option<User>, DomainError> {
        match self.session.load().await {
            Ok(user) => Ok(user),
            Err(SessionRepositoryError::Malformed { message }) => {
                warn!(%message, "discarding malformed session snapshot");
                self.session.clear().await.map_err(map_session_error)?;
                Ok(None)
            }
            Err(error) => Err(map_session_error(error)),
        }
    }

    /// Sign in with an email and password.
    ///
    /// Returns the signed-in user, or `None` on any credential mismatch. The
    /// snapshot is left untouched when sign-in fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<User>, DomainError> {
        let Ok(credentials) = LoginCredentials::try_from_parts(email, password) else {
            debug!("login attempted with blank credentials");
            return Ok(None);
        };
        let Ok(email) = Email::new(credentials.email()) else {
            return Ok(None);
        };

        let account = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(map_account_error)?;
        let Some(account) = account.filter(|found| found.password.matches(credentials.password()))
        else {
            debug!("login rejected");
            return Ok(None);
        };

        let user = account.into_user();
        self.session.save(&user).await.map_err(map_session_error)?;
        info!(user_id = %user.id(), "user signed in");
        Ok(Some(user))
    }

    /// Sign out. Signing out twice is harmless.
    pub async fn logout(&self) -> Result<(), DomainError> {
        self.session.clear().await.map_err(map_session_error)?;
        debug!("session cleared");
        Ok(())
    }

    /// Overwrite the snapshot with a fresher copy of the identity.
    pub async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.session.save(user).await.map_err(map_session_error)
    }
}

pub(crate) fn map_session_error(error: SessionRepositoryError) -> DomainError {
    match error {
        SessionRepositoryError::Storage { message } => {
            DomainError::service_unavailable(format!("session storage unavailable: {message}"))
        }
        SessionRepositoryError::Malformed { message } => {
            DomainError::internal(format!("session snapshot unreadable: {message}"))
        }
    }
}

pub(crate) fn map_account_error(error: AccountRepositoryError) -> DomainError {
    match error {
        AccountRepositoryError::Storage { message } => {
            DomainError::service_unavailable(format!("account registry unavailable: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { email } => {
            DomainError::conflict(format!("an account already exists for {email}"))
        }
    }
}
