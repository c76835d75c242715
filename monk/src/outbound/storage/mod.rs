//! Durable key/value storage for the persisted layout.
//!
//! Each [`StorageKey`] names one JSON document. Backends are synchronous and
//! replace whole documents; read-modify-write happens in the repositories.

mod directory;
mod memory;

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

pub use directory::DirectoryStorage;
pub use memory::MemoryStorage;

/// Document names in the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Registered accounts with their passwords.
    Accounts,
    /// The signed-in identity, without password.
    Session,
    /// All goals.
    Goals,
    /// All friendships.
    Friendships,
}

impl StorageKey {
    /// Every key, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Accounts, Self::Session, Self::Goals, Self::Friendships];

    /// Stored name of the document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "monkUsers",
            Self::Session => "monkUser",
            Self::Goals => "monkGoals",
            Self::Friendships => "monkFriends",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage root could not be created or opened.
    #[error("failed to open storage at {path}: {message}")]
    Open { path: Utf8PathBuf, message: String },
    /// A document exists but could not be read.
    #[error("failed to read {key}: {message}")]
    Read { key: StorageKey, message: String },
    /// A document could not be written or removed.
    #[error("failed to write {key}: {message}")]
    Write { key: StorageKey, message: String },
}

/// Whole-document key/value store.
pub trait StorageBackend: Send + Sync {
    /// Raw document for `key`, or `None` if it has never been written.
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the document for `key`.
    fn write(&self, key: StorageKey, contents: &str) -> Result<(), StorageError>;

    /// Delete the document for `key`. Removing a missing document succeeds.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StorageKey::Accounts, "monkUsers")]
    #[case(StorageKey::Session, "monkUser")]
    #[case(StorageKey::Goals, "monkGoals")]
    #[case(StorageKey::Friendships, "monkFriends")]
    fn keys_use_stored_names(#[case] key: StorageKey, #[case] expected: &str) {
        assert_eq!(key.to_string(), expected);
    }

    #[rstest]
    fn write_error_names_the_key() {
        let error = StorageError::Write {
            key: StorageKey::Goals,
            message: "disk full".to_owned(),
        };
        assert_eq!(error.to_string(), "failed to write monkGoals: disk full");
    }
}
