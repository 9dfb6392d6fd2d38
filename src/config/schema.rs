//! Configuration data structures for wordgraph.
//!
//! Defines the YAML config format. Every field has a default, so an empty
//! file (or no file at all) yields a working configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cancel::DEFAULT_STOP_COMMAND;
use crate::types::EmptyTokenPolicy;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordGraphConfig {
    /// Config format version (currently "1.0").
    #[serde(default = "default_version")]
    pub version: String,

    /// Seed for every random choice (bridge picks, walks). `None` draws
    /// from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Input text handling.
    #[serde(default)]
    pub text: TextConfig,

    /// Random walk settings.
    #[serde(default)]
    pub walk: WalkConfig,
}

impl Default for WordGraphConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            seed: None,
            text: TextConfig::default(),
            walk: WalkConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// TextConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Whether pure-punctuation tokens join or break adjacency.
    #[serde(default)]
    pub empty_token_policy: EmptyTokenPolicy,
}

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// File the walked path is written to, one word per line.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Line that stops a running walk (case-insensitive).
    #[serde(default = "default_stop_command")]
    pub stop_command: String,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            stop_command: default_stop_command(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_version() -> String {
    "1.0".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("random_walk_output.txt")
}

fn default_stop_command() -> String {
    DEFAULT_STOP_COMMAND.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
