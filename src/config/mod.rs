//! Configuration loading.
//!
//! Lookup order: an explicit path, then `wordgraph.yaml` in the working
//! directory, then `config.yaml` in the per-user config directory. The
//! first file found wins; with none, defaults apply. CLI flags are layered
//! on top by the caller.

pub mod schema;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Result, WordGraphError};

pub use schema::{TextConfig, WalkConfig, WordGraphConfig};

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wordgraph.yaml";

/// Per-user config file, e.g. `~/.config/wordgraph/config.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wordgraph").map(|dirs| dirs.config_dir().join("config.yaml"))
}

impl WordGraphConfig {
    /// Parse a config file. A missing explicit file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WordGraphError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: WordGraphConfig = serde_yaml::from_str(&contents)
            .map_err(|e| WordGraphError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve configuration using the lookup order described above.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::load(&path);
            }
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }
}
