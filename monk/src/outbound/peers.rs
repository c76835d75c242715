//! Peer directory backed by deterministic example data.
//!
//! Generated peers give leaderboards and friend search something to show
//! without a remote service. Accounts registered locally are listed ahead of
//! the generated peers so they can befriend and outrank each other.

use std::collections::HashSet;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use example_data::{
    ExamplePeerSeed, GenerationError, RegistryError, SeedDefinition, SeedRegistry,
    generate_example_peers,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{AccountRepository, PeerDirectory, PeerDirectoryError};
use crate::domain::{Peer, PeerProgress, UserId, level_for};

/// Errors raised while preparing the example peer directory.
#[derive(Debug, Error)]
pub enum PeerSourceError {
    /// Registry file could not be read.
    #[error("failed to read peer registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Registry parsing or seed lookup failed.
    #[error("peer registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Peer generation failed.
    #[error("peer generation error: {0}")]
    Generation(#[from] GenerationError),
    /// Seed name must not be empty.
    #[error("peer seed name must not be empty")]
    EmptySeedName,
}

/// Read a seed registry through a capability handle on its parent directory.
pub fn load_registry(path: &Utf8Path) -> Result<SeedRegistry, PeerSourceError> {
    let read_error = |source: io::Error| PeerSourceError::RegistryRead {
        path: path.to_owned(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(file_name).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}

/// Peer directory combining local accounts with generated peers.
#[derive(Clone)]
pub struct ExampleDataPeerDirectory<A> {
    accounts: Arc<A>,
    generated: Vec<Peer>,
}

impl<A> ExampleDataPeerDirectory<A> {
    /// A directory listing local accounts only.
    pub fn local_only(accounts: Arc<A>) -> Self {
        Self {
            accounts,
            generated: Vec::new(),
        }
    }

    /// Generate peers for `seed_name`, optionally overriding its peer count.
    pub fn from_registry(
        registry: &SeedRegistry,
        seed_name: &str,
        count: Option<usize>,
        accounts: Arc<A>,
    ) -> Result<Self, PeerSourceError> {
        let seed_name = seed_name.trim();
        if seed_name.is_empty() {
            return Err(PeerSourceError::EmptySeedName);
        }
        let definition = registry.find_seed(seed_name)?;
        let definition = match count {
            Some(count) => {
                SeedDefinition::new(definition.name().to_owned(), definition.seed(), count)
            }
            None => definition.clone(),
        };
        let generated: Vec<Peer> = generate_example_peers(registry, &definition)?
            .into_iter()
            .map(peer_from_seed)
            .collect();
        info!(
            seed_key = definition.name(),
            peer_count = generated.len(),
            "example peers generated"
        );
        Ok(Self {
            accounts,
            generated,
        })
    }

    /// Generated peers only, in generation order.
    pub fn generated(&self) -> &[Peer] {
        &self.generated
    }
}

fn peer_from_seed(seed: ExamplePeerSeed) -> Peer {
    Peer {
        id: UserId::from_uuid(seed.id),
        display_name: seed.display_name,
        email: seed.email,
        country: seed.country,
        progress: PeerProgress {
            level: level_for(seed.experience),
            experience: seed.experience,
            total_minutes: seed.total_minutes,
            goals_completed: seed.goals_completed,
        },
    }
}

#[async_trait]
impl<A: AccountRepository> PeerDirectory for ExampleDataPeerDirectory<A> {
    async fn peers(&self) -> Result<Vec<Peer>, PeerDirectoryError> {
        let accounts = self
            .accounts
            .list()
            .await
            .map_err(|err| PeerDirectoryError::unavailable(err.to_string()))?;
        let mut seen = HashSet::new();
        let peers: Vec<Peer> = accounts
            .iter()
            .map(Peer::from)
            .chain(self.generated.iter().cloned())
            .filter(|peer| seen.insert(peer.id.clone()))
            .collect();
        debug!(
            local = accounts.len(),
            total = peers.len(),
            "peer directory listed"
        );
        Ok(peers)
    }
}
