//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `MONK_*` environment variables or a configuration file.
//! Command-line arguments belong to the `monk` binary's own parser, so
//! settings are loaded from the program name alone.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "quiet-heron";
const DEFAULT_STORAGE_DIR: &str = ".monk";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("peers.json")
}

/// Where the example peer registry is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerRegistry {
    /// Registry shipped with the crate. Peers are optional when it is absent.
    Bundled(PathBuf),
    /// Registry named in settings. It must be readable.
    Configured(PathBuf),
}

impl PeerRegistry {
    /// Path to the registry file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Bundled(path) | Self::Configured(path) => path,
        }
    }
}

/// Settings controlling storage, logging, and example peers.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MONK")]
pub struct MonkSettings {
    /// Directory holding one JSON document per storage key.
    pub storage_dir: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub log_json: bool,
    /// Seed name used to generate leaderboard peers.
    pub peer_seed_name: Option<String>,
    /// Optional override for the number of generated peers.
    pub peer_count: Option<usize>,
    /// Optional registry path override.
    pub peer_registry_path: Option<PathBuf>,
}

impl MonkSettings {
    /// Load settings from the environment and configuration files only.
    pub fn load_ambient() -> Result<Self, String> {
        Self::load_from_iter([OsString::from("monk")]).map_err(|err| err.to_string())
    }

    /// Return the configured storage directory, falling back to `.monk`.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    /// Return the configured seed name, falling back to the default.
    pub fn peer_seed_name(&self) -> &str {
        self.peer_seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the bundled one.
    pub fn peer_registry_path(&self) -> PathBuf {
        self.peer_registry().path().to_path_buf()
    }

    /// Return the registry source, distinguishing an explicit path from the
    /// bundled default.
    pub fn peer_registry(&self) -> PeerRegistry {
        self.peer_registry_path.clone().map_or_else(
            || PeerRegistry::Bundled(default_registry_path()),
            PeerRegistry::Configured,
        )
    }
}
