//! Gamified focus and goal tracking core.
//!
//! Users register with at least one goal, run focus sessions that earn
//! experience, complete goals for a bonus, and compare their progress with
//! peers on a leaderboard. State lives behind a pluggable
//! [`outbound::storage::StorageBackend`]; the [`inbound::cli`] adapter drives
//! the services from the command line.

pub mod app;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
pub mod test_support;
