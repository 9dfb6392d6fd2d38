//! Error types for wordgraph.
//!
//! Query outcomes (missing vertex, disconnected words, empty graph) and hard
//! failures (I/O, config) share one enum so callers can use `?` throughout,
//! while [`WordGraphError::is_query_outcome`] keeps them distinguishable.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum WordGraphError {
    /// One or both queried words are not vertices of the graph.
    #[error("No {} in the graph!", .missing.join(" or "))]
    VertexNotFound { missing: Vec<String> },

    /// Both words exist but no directed path connects them.
    #[error("The words \"{from}\" and \"{to}\" are not connected.")]
    NoPath { from: String, to: String },

    /// A random walk was requested on a graph with no vertices.
    #[error("The graph is empty.")]
    EmptyGraph,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WordGraphError {
    /// Build a [`WordGraphError::VertexNotFound`] from the words that failed
    /// the membership check.
    pub fn missing<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::VertexNotFound {
            missing: words.into_iter().map(Into::into).collect(),
        }
    }

    /// True for the recoverable "no result" outcomes of a graph query, as
    /// opposed to I/O or configuration failures.
    pub fn is_query_outcome(&self) -> bool {
        matches!(
            self,
            Self::VertexNotFound { .. } | Self::NoPath { .. } | Self::EmptyGraph
        )
    }
}

impl From<serde_yaml::Error> for WordGraphError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WordGraphError>;
