//! Outbound adapters implementing domain ports.
//!
//! - **storage**: key/value backends holding one JSON document per key
//!   (in-memory, or a directory with atomic file replacement).
//! - **persistence**: repositories that map the stored documents to domain
//!   types.
//! - **peers**: peer directory built from deterministic example data plus the
//!   local account registry.
//!
//! Adapters translate between domain types and stored representations. They
//! contain no business logic.

pub mod peers;
pub mod persistence;
pub mod storage;
