//! Stored record shapes that differ from domain types.

use serde::{Deserialize, Serialize};

use crate::domain::{Password, RegisteredAccount, User};

/// Account registry entry: the identity fields plus `password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AccountRecord {
    #[serde(flatten)]
    pub user: User,
    pub password: Password,
}

impl From<AccountRecord> for RegisteredAccount {
    fn from(value: AccountRecord) -> Self {
        Self {
            user: value.user,
            password: value.password,
        }
    }
}

impl From<&RegisteredAccount> for AccountRecord {
    fn from(value: &RegisteredAccount) -> Self {
        Self {
            user: value.user.clone(),
            password: value.password.clone(),
        }
    }
}
