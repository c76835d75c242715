//! Port for the persisted session snapshot.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session snapshot adapters.
    pub enum SessionRepositoryError {
        /// Durable storage could not be read or written.
        Storage { message: String } => "session storage failed: {message}",
        /// A snapshot exists but cannot be parsed.
        Malformed { message: String } => "session snapshot is malformed: {message}",
    }
}

/// Holds at most one signed-in identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Read the snapshot; `Ok(None)` when nobody is signed in.
    async fn load(&self) -> Result<Option<User>, SessionRepositoryError>;

    /// Overwrite the snapshot.
    async fn save(&self, user: &User) -> Result<(), SessionRepositoryError>;

    /// Remove the snapshot. Clearing an empty session succeeds.
    async fn clear(&self) -> Result<(), SessionRepositoryError>;
}

/// Fixture session that never holds anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionRepository;

#[async_trait]
impl SessionRepository for FixtureSessionRepository {
    async fn load(&self) -> Result<Option<User>, SessionRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _user: &User) -> Result<(), SessionRepositoryError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_session_stays_empty() {
        let repo = FixtureSessionRepository;
        repo.clear().await.expect("clear");
        assert!(repo.load().await.expect("load").is_none());
    }
}
