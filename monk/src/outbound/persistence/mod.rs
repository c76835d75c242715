//! Repositories over a [`StorageBackend`](crate::outbound::storage::StorageBackend).
//!
//! # Architecture
//!
//! - **Whole-document writes**: every mutation reads the full collection,
//!   changes it in memory, and writes it back.
//! - **Forgiving reads**: collection entries that fail to parse are skipped
//!   with a warning; a document that is not a JSON array reads as empty.
//! - **Internal records**: stored shapes that differ from domain types live
//!   in `models.rs` and never leave this module.

mod json_collection;
mod models;
mod storage_account_repository;
mod storage_friendship_repository;
mod storage_goal_repository;
mod storage_session_repository;

pub use storage_account_repository::StorageAccountRepository;
pub use storage_friendship_repository::StorageFriendshipRepository;
pub use storage_goal_repository::StorageGoalRepository;
pub use storage_session_repository::StorageSessionRepository;
