//! Core domain types for wordgraph.

use serde::{Deserialize, Serialize};

/// Occurrence count of one word directly following another. Always ≥ 1.
pub type Weight = u32;

/// Sum of edge weights along a path.
pub type Distance = u64;

// ---------------------------------------------------------------------------
// EmptyTokenPolicy
// ---------------------------------------------------------------------------

/// What a token that normalizes to nothing does to adjacency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTokenPolicy {
    /// Skip it; the words on either side become adjacent.
    #[default]
    Join,
    /// Treat it as a boundary; no edge is created across it.
    Break,
}

impl EmptyTokenPolicy {
    /// Parse from a loose string (case-insensitive, surrounding whitespace ignored).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "join" | "skip" => Some(Self::Join),
            "break" | "split" => Some(Self::Break),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Break => "break",
        }
    }
}

impl std::fmt::Display for EmptyTokenPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Edge / GraphStats
// ---------------------------------------------------------------------------

/// A directed, weighted word adjacency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: Weight,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}

/// Aggregate statistics about a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
    /// Sum of all edge weights, i.e. the number of observed bigrams.
    pub total_weight: u64,
}

// ---------------------------------------------------------------------------
// WeightedPath
// ---------------------------------------------------------------------------

/// A path through the graph together with its accumulated edge weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedPath {
    pub vertices: Vec<String>,
    pub distance: Distance,
}

impl WeightedPath {
    pub fn source(&self) -> &str {
        &self.vertices[0]
    }

    pub fn target(&self) -> &str {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

impl std::fmt::Display for WeightedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shortest path: {}\nPath length: {}",
            self.vertices.join(" -> "),
            self.distance
        )
    }
}
