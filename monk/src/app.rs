//! Service wiring shared by the binary and integration tests.
//!
//! Every repository shares one storage backend; the peer directory reads the
//! same account registry so locally registered users appear as peers.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{MonkSettings, PeerRegistry};
use crate::domain::ports::PeerDirectory;
use crate::domain::{
    AccountService, DomainError, FriendsService, GoalLedger, LeaderboardService, ProgressionService,
    SessionService, User,
};
use crate::outbound::peers::{ExampleDataPeerDirectory, PeerSourceError, load_registry};
use crate::outbound::persistence::{
    StorageAccountRepository, StorageFriendshipRepository, StorageGoalRepository,
    StorageSessionRepository,
};
use crate::outbound::storage::{DirectoryStorage, StorageBackend, StorageError};

/// Peer directory wired over a storage-backed account registry.
pub type StoragePeerDirectory<B> = ExampleDataPeerDirectory<StorageAccountRepository<B>>;

/// Fully wired application over directory storage.
pub type DirectoryMonk = Monk<DirectoryStorage, StoragePeerDirectory<DirectoryStorage>>;

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },
    /// Durable storage could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Example peers could not be prepared.
    #[error(transparent)]
    Peers(#[from] PeerSourceError),
}

/// Services sharing one storage backend and one peer directory.
pub struct Monk<B, P> {
    pub session: SessionService<StorageAccountRepository<B>, StorageSessionRepository<B>>,
    pub accounts: AccountService<
        StorageAccountRepository<B>,
        StorageGoalRepository<B>,
        StorageSessionRepository<B>,
    >,
    pub goals: GoalLedger<StorageGoalRepository<B>>,
    pub progression: ProgressionService<
        StorageAccountRepository<B>,
        StorageGoalRepository<B>,
        StorageSessionRepository<B>,
    >,
    pub leaderboard: LeaderboardService<P, StorageFriendshipRepository<B>>,
    pub friends: FriendsService<StorageFriendshipRepository<B>, P>,
}

impl<B, P> Monk<B, P>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    /// Wire every service over `backend` and `peers`.
    pub fn new(backend: Arc<B>, peers: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        let accounts = Arc::new(StorageAccountRepository::new(Arc::clone(&backend)));
        let session = Arc::new(StorageSessionRepository::new(Arc::clone(&backend)));
        let goals = Arc::new(StorageGoalRepository::new(Arc::clone(&backend)));
        let friendships = Arc::new(StorageFriendshipRepository::new(backend));

        Self {
            session: SessionService::new(Arc::clone(&accounts), Arc::clone(&session)),
            accounts: AccountService::new(
                Arc::clone(&accounts),
                Arc::clone(&goals),
                Arc::clone(&session),
                Arc::clone(&clock),
            ),
            goals: GoalLedger::new(Arc::clone(&goals), Arc::clone(&clock)),
            progression: ProgressionService::new(accounts, goals, session, Arc::clone(&clock)),
            leaderboard: LeaderboardService::new(Arc::clone(&peers), Arc::clone(&friendships)),
            friends: FriendsService::new(friendships, peers, clock),
        }
    }

    /// The signed-in identity, or an unauthorized error.
    pub async fn current_user(&self) -> Result<User, DomainError> {
        self.session
            .restore()
            .await?
            .ok_or_else(|| DomainError::unauthorized("Please log in first"))
    }
}

impl<B: StorageBackend> Monk<B, StoragePeerDirectory<B>> {
    /// Wire services with peers generated from `settings`' registry and seed.
    pub fn with_example_peers(
        backend: Arc<B>,
        settings: &MonkSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StartupError> {
        Self::with_peer_registry(
            backend,
            &settings.peer_registry(),
            settings.peer_seed_name(),
            settings.peer_count,
            clock,
        )
    }

    /// Wire services with peers generated from `registry`.
    ///
    /// A missing bundled registry leaves only local accounts as peers; a
    /// configured registry that cannot be read fails startup.
    pub fn with_peer_registry(
        backend: Arc<B>,
        registry: &PeerRegistry,
        seed_name: &str,
        count: Option<usize>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StartupError> {
        let accounts = Arc::new(StorageAccountRepository::new(Arc::clone(&backend)));
        let path = utf8(registry.path().to_path_buf())?;
        let peers = match (load_registry(&path), registry) {
            (Ok(seeds), _) => {
                ExampleDataPeerDirectory::from_registry(&seeds, seed_name, count, accounts)?
            }
            (Err(err @ PeerSourceError::RegistryRead { .. }), PeerRegistry::Bundled(_)) => {
                warn!(
                    error = %err,
                    "bundled peer registry unavailable; listing local accounts only"
                );
                ExampleDataPeerDirectory::local_only(accounts)
            }
            (Err(err), _) => return Err(err.into()),
        };
        Ok(Self::new(backend, Arc::new(peers), clock))
    }
}

/// Open directory storage and wire the application from `settings`.
pub fn open(settings: &MonkSettings, clock: Arc<dyn Clock>) -> Result<DirectoryMonk, StartupError> {
    let root = utf8(settings.storage_dir())?;
    let backend = Arc::new(DirectoryStorage::open(&root)?);
    info!(storage = %root, "storage opened");
    Monk::with_example_peers(backend, settings, clock)
}

fn utf8(path: std::path::PathBuf) -> Result<Utf8PathBuf, StartupError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| StartupError::NonUtf8Path {
        path: path.display().to_string(),
    })
}
