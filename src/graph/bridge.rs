//! Bridge words: single-hop intermediaries `w` with edges `a → w → b`.

use serde::Serialize;

use crate::error::{Result, WordGraphError};
use crate::graph::store::WordGraph;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome of a bridge query with every case kept distinct, for callers
/// that need to present it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BridgeQuery {
    Found {
        from: String,
        to: String,
        words: Vec<String>,
    },
    NoBridges {
        from: String,
        to: String,
    },
    VertexMissing {
        missing: Vec<String>,
    },
}

impl BridgeQuery {
    /// Bridge words, empty unless [`BridgeQuery::Found`].
    pub fn words(&self) -> &[String] {
        match self {
            Self::Found { words, .. } => words,
            _ => &[],
        }
    }
}

impl std::fmt::Display for BridgeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found { from, to, words } => write!(
                f,
                "The bridge words from {from} to {to} are: {}",
                words.join(", ")
            ),
            Self::NoBridges { from, to } => write!(f, "No bridge words from {from} to {to}!"),
            Self::VertexMissing { missing } => {
                write!(f, "No {} in the graph!", missing.join(" or "))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// BridgeFinder
// ---------------------------------------------------------------------------

/// Bridge-word lookups against a built graph.
pub struct BridgeFinder<'a> {
    graph: &'a WordGraph,
}

impl<'a> BridgeFinder<'a> {
    pub fn new(graph: &'a WordGraph) -> Self {
        Self { graph }
    }

    /// All words `w` with `from → w` and `w → to`, in ascending order.
    ///
    /// Fails with [`WordGraphError::VertexNotFound`] before any traversal if
    /// either word is absent. An empty vector means both exist but nothing
    /// bridges them.
    pub fn find_bridges(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let missing = self.missing(from, to);
        if !missing.is_empty() {
            return Err(WordGraphError::missing(missing));
        }
        Ok(self.bridges(from, to))
    }

    /// Tagged form of [`BridgeFinder::find_bridges`].
    pub fn query(&self, from: &str, to: &str) -> BridgeQuery {
        let missing = self.missing(from, to);
        if !missing.is_empty() {
            return BridgeQuery::VertexMissing {
                missing: missing.into_iter().map(String::from).collect(),
            };
        }
        let words = self.bridges(from, to);
        if words.is_empty() {
            BridgeQuery::NoBridges {
                from: from.to_string(),
                to: to.to_string(),
            }
        } else {
            BridgeQuery::Found {
                from: from.to_string(),
                to: to.to_string(),
                words,
            }
        }
    }

    fn missing<'w>(&self, from: &'w str, to: &'w str) -> Vec<&'w str> {
        let mut missing = Vec::new();
        for word in [from, to] {
            if !self.graph.has_vertex(word) && !missing.contains(&word) {
                missing.push(word);
            }
        }
        missing
    }

    fn bridges(&self, from: &str, to: &str) -> Vec<String> {
        let bridges: Vec<String> = self
            .graph
            .successors(from)
            .keys()
            .filter(|mid| self.graph.weight(mid, to).is_some())
            .cloned()
            .collect();
        tracing::debug!(from, to, count = bridges.len(), "bridge lookup");
        bridges
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
