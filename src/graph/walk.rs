//! Random walks over a [`WordGraph`].
//!
//! A walk starts at a random vertex and keeps following a random outgoing
//! edge. It ends when the current vertex has no outgoing edges, when the
//! chosen edge was already traversed earlier in the same walk, or when the
//! caller cancels it. Edges are tracked, not vertices: reaching a vertex a
//! second time through a different edge is fine.

use std::collections::HashSet;
use std::io::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::error::{Result, WordGraphError};
use crate::graph::store::WordGraph;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Why a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// The cancellation token was tripped.
    UserStopped,
    /// The current vertex has no outgoing edges.
    DeadEnd,
    /// The chosen edge had already been traversed.
    RepeatedEdge,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserStopped => "user-stopped",
            Self::DeadEnd => "dead-end",
            Self::RepeatedEdge => "repeated-edge",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::UserStopped => "stopped by user",
            Self::DeadEnd => "reached a word with no successors",
            Self::RepeatedEdge => "edge repeated",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visited vertices of a finished walk and why it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOutcome {
    pub path: Vec<String>,
    pub reason: StopReason,
}

impl WalkOutcome {
    /// One-line human readable report.
    pub fn summary(&self) -> String {
        format!(
            "Random walk complete ({}). Path: {}",
            self.reason.describe(),
            self.path.join(" -> ")
        )
    }
}

/// Write `path` to `sink`, one vertex per line.
pub fn write_path<W: Write + ?Sized>(path: &[String], sink: &mut W) -> Result<()> {
    for vertex in path {
        writeln!(sink, "{vertex}")?;
    }
    sink.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// RandomWalker
// ---------------------------------------------------------------------------

pub struct RandomWalker<'g> {
    graph: &'g WordGraph,
}

impl<'g> RandomWalker<'g> {
    pub fn new(graph: &'g WordGraph) -> Self {
        Self { graph }
    }

    /// Walk from a uniformly random vertex, then write the path to `sink`.
    ///
    /// Fails with [`WordGraphError::EmptyGraph`] when there is nothing to
    /// start from. `cancel` is polled once before every step.
    pub fn walk<R, W>(
        &self,
        cancel: &CancellationToken,
        rng: &mut R,
        sink: &mut W,
    ) -> Result<WalkOutcome>
    where
        R: Rng + ?Sized,
        W: Write + ?Sized,
    {
        let count = self.graph.vertex_count();
        if count == 0 {
            return Err(WordGraphError::EmptyGraph);
        }
        let start = self
            .graph
            .vertices()
            .nth(rng.random_range(0..count))
            .ok_or(WordGraphError::EmptyGraph)?;
        self.walk_from(start, cancel, rng, sink)
    }

    /// Like [`RandomWalker::walk`] but starting from `start`.
    pub fn walk_from<R, W>(
        &self,
        start: &str,
        cancel: &CancellationToken,
        rng: &mut R,
        sink: &mut W,
    ) -> Result<WalkOutcome>
    where
        R: Rng + ?Sized,
        W: Write + ?Sized,
    {
        let start = self
            .graph
            .vertex(start)
            .ok_or_else(|| WordGraphError::missing([start]))?;
        let outcome = self.step_until_stopped(start, cancel, rng);
        tracing::info!(
            start,
            steps = outcome.path.len() - 1,
            reason = %outcome.reason,
            "random walk finished"
        );
        write_path(&outcome.path, sink)?;
        Ok(outcome)
    }

    fn step_until_stopped<R: Rng + ?Sized>(
        &self,
        start: &'g str,
        cancel: &CancellationToken,
        rng: &mut R,
    ) -> WalkOutcome {
        let mut traversed: HashSet<(&'g str, &'g str)> = HashSet::new();
        let mut path = vec![start.to_string()];
        let mut current = start;

        let reason = loop {
            if cancel.is_cancelled() {
                break StopReason::UserStopped;
            }
            let successors = self.graph.successors(current);
            if successors.is_empty() {
                break StopReason::DeadEnd;
            }
            let pick = rng.random_range(0..successors.len());
            let Some(next) = successors.keys().nth(pick) else {
                break StopReason::DeadEnd;
            };
            if !traversed.insert((current, next.as_str())) {
                break StopReason::RepeatedEdge;
            }
            path.push(next.clone());
            current = next.as_str();
        };

        WalkOutcome { path, reason }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn lines(sink: &[u8]) -> Vec<String> {
        String::from_utf8(sink.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn empty_graph_is_an_error() {
        let g = WordGraph::default();
        let mut sink: Vec<u8> = Vec::new();
        let err = RandomWalker::new(&g)
            .walk(&CancellationToken::new(), &mut rng(1), &mut sink)
            .unwrap_err();
        assert!(matches!(err, WordGraphError::EmptyGraph));
        assert!(sink.is_empty());
    }

    #[test]
    fn dead_end_stops_walk() {
        let g = WordGraph::from_words(["a", "b", "c"]);
        let mut sink: Vec<u8> = Vec::new();
        let out = RandomWalker::new(&g)
            .walk_from("a", &CancellationToken::new(), &mut rng(3), &mut sink)
            .unwrap();
        assert_eq!(out.path, vec!["a", "b", "c"]);
        assert_eq!(out.reason, StopReason::DeadEnd);
        assert_eq!(lines(&sink), vec!["a", "b", "c"]);
    }

    #[test]
    fn repeated_edge_stops_walk_but_vertex_may_repeat() {
        // s -> a -> b -> a, then a -> b again
        let g = WordGraph::from_words(["s", "a", "b", "a"]);
        let mut sink: Vec<u8> = Vec::new();
        let out = RandomWalker::new(&g)
            .walk_from("s", &CancellationToken::new(), &mut rng(5), &mut sink)
            .unwrap();
        assert_eq!(out.path, vec!["s", "a", "b", "a"]);
        assert_eq!(out.reason, StopReason::RepeatedEdge);
    }

    #[test]
    fn self_loop_repeats_immediately() {
        let g = WordGraph::from_words(["very", "very"]);
        let out = RandomWalker::new(&g)
            .walk(&CancellationToken::new(), &mut rng(0), &mut std::io::sink())
            .unwrap();
        assert_eq!(out.path, vec!["very", "very"]);
        assert_eq!(out.reason, StopReason::RepeatedEdge);
    }

    #[test]
    fn pre_cancelled_walk_takes_no_step() {
        let g = WordGraph::from_words(["a", "b", "c", "a"]);
        let token = CancellationToken::new();
        token.cancel();
        let mut sink: Vec<u8> = Vec::new();
        let out = RandomWalker::new(&g).walk(&token, &mut rng(9), &mut sink).unwrap();
        assert_eq!(out.reason, StopReason::UserStopped);
        assert_eq!(out.path.len(), 1);
        assert_eq!(lines(&sink), out.path);
    }

    /// Trips `token` once `draws` random numbers have been taken, which
    /// stands in for a stop command arriving while the walk is running.
    struct CancelAfter {
        inner: StdRng,
        draws: usize,
        token: CancellationToken,
    }

    impl CancelAfter {
        fn tick(&mut self) {
            if self.draws > 0 {
                self.draws -= 1;
                if self.draws == 0 {
                    self.token.cancel();
                }
            }
        }
    }

    impl RngCore for CancelAfter {
        fn next_u32(&mut self) -> u32 {
            self.tick();
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.tick();
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.tick();
            self.inner.fill_bytes(dst);
        }
    }

    #[test]
    fn cancel_during_walk_keeps_steps_taken() {
        // a -> {b, c}, b -> a: every vertex but c has a choice to draw for
        let g = WordGraph::from_words(["a", "b", "a", "c"]);
        let token = CancellationToken::new();
        let mut tripping = CancelAfter {
            inner: rng(4),
            draws: 1,
            token: token.clone(),
        };
        let mut sink: Vec<u8> = Vec::new();
        let out = RandomWalker::new(&g)
            .walk_from("a", &token, &mut tripping, &mut sink)
            .unwrap();

        assert_eq!(out.reason, StopReason::UserStopped);
        assert_eq!(out.path.len(), 2);
        assert_eq!(out.path[0], "a");
        assert!(g.weight("a", &out.path[1]).is_some());
        assert_eq!(lines(&sink), out.path);
    }

    #[test]
    fn unknown_start_is_reported() {
        let g = WordGraph::from_words(["a", "b"]);
        let err = RandomWalker::new(&g)
            .walk_from("zzz", &CancellationToken::new(), &mut rng(1), &mut std::io::sink())
            .unwrap_err();
        assert!(matches!(err, WordGraphError::VertexNotFound { .. }));
    }

    #[test]
    fn seeded_walks_are_reproducible() {
        let text = "the cat sat on the mat and the dog sat on the cat while the bird sang";
        let g = WordGraph::from_words(text.split(' '));
        let walker = RandomWalker::new(&g);
        let token = CancellationToken::new();
        let a = walker.walk(&token, &mut rng(42), &mut std::io::sink()).unwrap();
        let b = walker.walk(&token, &mut rng(42), &mut std::io::sink()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_vertices_are_real_edges() {
        let text = "a b c a c b a b b c c a";
        let g = WordGraph::from_words(text.split(' '));
        let walker = RandomWalker::new(&g);
        for seed in 0..50 {
            let out = walker
                .walk(&CancellationToken::new(), &mut rng(seed), &mut std::io::sink())
                .unwrap();
            for pair in out.path.windows(2) {
                assert!(g.weight(&pair[0], &pair[1]).is_some(), "{pair:?} is not an edge");
            }
            assert!(out.path.len() <= g.edge_count() + 1);
        }
    }

    #[test]
    fn summary_mentions_path_and_reason() {
        let out = WalkOutcome {
            path: vec!["a".into(), "b".into()],
            reason: StopReason::DeadEnd,
        };
        assert_eq!(
            out.summary(),
            "Random walk complete (reached a word with no successors). Path: a -> b"
        );
    }

    #[test]
    fn stop_reason_serializes_kebab_case() {
        let json = serde_json::to_string(&StopReason::RepeatedEdge).unwrap();
        assert_eq!(json, "\"repeated-edge\"");
    }
}
