//! Word adjacency graphs built from free-form text.
//!
//! Vertices are normalized words; an edge `a → b` weighs how often `b`
//! directly followed `a`. On top of the graph sit four queries: bridge words,
//! bridge-word text generation, weighted shortest paths and cancellable
//! random walks.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod indexer;
pub mod observability;
pub mod types;

pub use cancel::CancellationToken;
pub use error::{Result, WordGraphError};
pub use graph::WordGraph;
