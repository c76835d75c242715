//! Port listing the other identities a user can compare against.

use async_trait::async_trait;

use crate::domain::Peer;

use super::define_port_error;

define_port_error! {
    /// Errors raised by peer directory adapters.
    pub enum PeerDirectoryError {
        /// Peers could not be loaded or generated.
        Unavailable { message: String } => "peer directory unavailable: {message}",
    }
}

/// Read-only source of peer summaries for leaderboards and search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeerDirectory: Send + Sync {
    /// All known peers. Order is stable between calls.
    async fn peers(&self) -> Result<Vec<Peer>, PeerDirectoryError>;
}

/// Fixture directory returning a fixed list.
#[derive(Debug, Default, Clone)]
pub struct FixturePeerDirectory {
    peers: Vec<Peer>,
}

impl FixturePeerDirectory {
    /// Serve `peers` verbatim.
    pub fn new(peers: Vec<Peer>) -> Self {
        Self { peers }
    }
}

#[async_trait]
impl PeerDirectory for FixturePeerDirectory {
    async fn peers(&self) -> Result<Vec<Peer>, PeerDirectoryError> {
        Ok(self.peers.clone())
    }
}
