//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to reach durable storage and peer
//! data. Each trait exposes a typed error generated by
//! [`define_port_error!`] so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod friendship_repository;
mod goal_repository;
mod peer_directory;
mod session_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{
    AccountRepository, AccountRepositoryError, FixtureAccountRepository,
};
#[cfg(test)]
pub use friendship_repository::MockFriendshipRepository;
pub use friendship_repository::{
    FixtureFriendshipRepository, FriendshipRepository, FriendshipRepositoryError,
};
#[cfg(test)]
pub use goal_repository::MockGoalRepository;
pub use goal_repository::{FixtureGoalRepository, GoalRepository, GoalRepositoryError};
#[cfg(test)]
pub use peer_directory::MockPeerDirectory;
pub use peer_directory::{FixturePeerDirectory, PeerDirectory, PeerDirectoryError};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{
    FixtureSessionRepository, SessionRepository, SessionRepositoryError,
};
