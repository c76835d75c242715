//! Deterministic example leaderboard peers for demonstration purposes.
//!
//! This crate generates believable, reproducible peer records from a JSON
//! seed registry. The records populate leaderboards and friend searches when
//! no remote directory is available. It is independent of the `monk` domain
//! types so either side can evolve without a dependency cycle.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic peer generation using named seeds
//! - Display name and country code validation matching the domain rules
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_peers};
//!
//! let json = r#"{
//!     "version": 1,
//!     "countryCodes": ["GB", "US"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "peerCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let peers = generate_example_peers(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(peers.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_peers;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::ExamplePeerSeed;
pub use validation::{
    DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, is_valid_country_code, is_valid_display_name,
};
