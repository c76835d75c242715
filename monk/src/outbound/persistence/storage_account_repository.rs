//! Account registry stored as the `monkUsers` document.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Email, RegisteredAccount, User};
use crate::outbound::storage::{StorageBackend, StorageError, StorageKey};

use super::json_collection::{load_collection, store_collection};
use super::models::AccountRecord;

/// Storage-backed implementation of the account registry port.
#[derive(Clone)]
pub struct StorageAccountRepository<B> {
    backend: Arc<B>,
}

impl<B> StorageAccountRepository<B> {
    /// Create a repository over `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

fn map_storage_error(error: StorageError) -> AccountRepositoryError {
    AccountRepositoryError::storage(error.to_string())
}

impl<B: StorageBackend> StorageAccountRepository<B> {
    fn load(&self) -> Result<Vec<AccountRecord>, AccountRepositoryError> {
        load_collection(&*self.backend, StorageKey::Accounts).map_err(map_storage_error)
    }

    fn store(&self, records: &[AccountRecord]) -> Result<(), AccountRepositoryError> {
        store_collection(&*self.backend, StorageKey::Accounts, records)
            .map_err(map_storage_error)
    }
}

#[async_trait]
impl<B: StorageBackend> AccountRepository for StorageAccountRepository<B> {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<RegisteredAccount>, AccountRepositoryError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|record| record.user.email() == email)
            .map(RegisteredAccount::from))
    }

    async fn insert(&self, account: &RegisteredAccount) -> Result<(), AccountRepositoryError> {
        let mut records = self.load()?;
        if records
            .iter()
            .any(|record| record.user.email() == account.user.email())
        {
            return Err(AccountRepositoryError::duplicate_email(
                account.user.email().as_ref(),
            ));
        }
        records.push(AccountRecord::from(account));
        self.store(&records)
    }

    async fn update(&self, user: &User) -> Result<bool, AccountRepositoryError> {
        let mut records = self.load()?;
        let Some(record) = records
            .iter_mut()
            .find(|record| record.user.id() == user.id())
        else {
            return Ok(false);
        };
        record.user = user.clone();
        self.store(&records)?;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<User>, AccountRepositoryError> {
        Ok(self.load()?.into_iter().map(|record| record.user).collect())
    }
}
