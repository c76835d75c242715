//! Port for the account registry.

use async_trait::async_trait;

use crate::domain::{Email, RegisteredAccount, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account registry adapters.
    pub enum AccountRepositoryError {
        /// Durable storage could not be read or written.
        Storage { message: String } => "account registry storage failed: {message}",
        /// An account with this email already exists.
        DuplicateEmail { email: String } => "an account already exists for {email}",
    }
}

/// Durable collection of registered accounts.
///
/// Email lookups are exact byte comparisons. Records that fail to parse are
/// skipped by adapters, never surfaced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch the account registered under `email`.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<RegisteredAccount>, AccountRepositoryError>;

    /// Append a new account.
    ///
    /// Fails with [`AccountRepositoryError::DuplicateEmail`] when the email is
    /// already registered; the stored collection is left untouched.
    async fn insert(&self, account: &RegisteredAccount) -> Result<(), AccountRepositoryError>;

    /// Replace the stored identity with the same id, keeping its password.
    ///
    /// Returns `false` when no account has that id.
    async fn update(&self, user: &User) -> Result<bool, AccountRepositoryError>;

    /// All registered identities, passwords stripped, in registration order.
    async fn list(&self) -> Result<Vec<User>, AccountRepositoryError>;
}

/// Fixture registry that holds no accounts and accepts every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRepository;

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn find_by_email(
        &self,
        _email: &Email,
    ) -> Result<Option<RegisteredAccount>, AccountRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _account: &RegisteredAccount) -> Result<(), AccountRepositoryError> {
        Ok(())
    }

    async fn update(&self, _user: &User) -> Result<bool, AccountRepositoryError> {
        Ok(false)
    }

    async fn list(&self) -> Result<Vec<User>, AccountRepositoryError> {
        Ok(Vec::new())
    }
}
