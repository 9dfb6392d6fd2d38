//! The word adjacency graph and the queries that run on it.

pub mod augment;
pub mod bridge;
pub mod shortest;
pub mod store;
pub mod walk;

pub use augment::TextAugmenter;
pub use bridge::{BridgeFinder, BridgeQuery};
pub use shortest::ShortestPathSolver;
pub use store::{WordGraph, WordGraphBuilder};
pub use walk::{RandomWalker, StopReason, WalkOutcome};
