//! Weighted shortest paths (Dijkstra) over a [`WordGraph`].
//!
//! Edge weights are bigram counts, so the "shortest" path is the one through
//! the least frequent adjacencies. All weights are ≥ 1, which is what
//! Dijkstra needs.
//!
//! Queue entries are ordered by `(distance, insertion sequence)`. Among
//! equally distant vertices the one enqueued first is settled first, so for
//! a given graph the reconstructed path is always the same one.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{Result, WordGraphError};
use crate::graph::store::WordGraph;
use crate::types::{Distance, WeightedPath};

/// Settled distances and predecessor links from one source.
struct Settled<'g> {
    distance: HashMap<&'g str, Distance>,
    predecessor: HashMap<&'g str, &'g str>,
}

impl<'g> Settled<'g> {
    /// Walk predecessor links back from `target` to the source and reverse.
    fn path_to(&self, target: &'g str) -> Option<WeightedPath> {
        let distance = *self.distance.get(target)?;
        let mut vertices = vec![target.to_string()];
        let mut at = target;
        while let Some(&prev) = self.predecessor.get(at) {
            vertices.push(prev.to_string());
            at = prev;
        }
        vertices.reverse();
        Some(WeightedPath { vertices, distance })
    }
}

pub struct ShortestPathSolver<'g> {
    graph: &'g WordGraph,
}

impl<'g> ShortestPathSolver<'g> {
    pub fn new(graph: &'g WordGraph) -> Self {
        Self { graph }
    }

    /// Shortest path from `from` to `to` and its total weight.
    ///
    /// Errors: [`WordGraphError::VertexNotFound`] if either word is absent,
    /// [`WordGraphError::NoPath`] if `to` is unreachable. A word to itself is
    /// the single-vertex path of length 0.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<WeightedPath> {
        self.require(&[from, to])?;
        let settled = self.run(from);
        let target = self.vertex(to);
        match target.and_then(|t| settled.path_to(t)) {
            Some(path) => {
                tracing::debug!(from, to, distance = path.distance, hops = path.hops(), "shortest path");
                Ok(path)
            }
            None => Err(WordGraphError::NoPath {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Shortest paths from `from` to every other reachable vertex, ordered by
    /// distance and then by target word.
    pub fn shortest_paths_from(&self, from: &str) -> Result<Vec<WeightedPath>> {
        self.require(&[from])?;
        let settled = self.run(from);
        let mut paths: Vec<WeightedPath> = settled
            .distance
            .keys()
            .filter(|&&v| v != from)
            .filter_map(|&v| settled.path_to(v))
            .collect();
        paths.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.target().cmp(b.target()))
        });
        tracing::debug!(from, reachable = paths.len(), "single-source shortest paths");
        Ok(paths)
    }

    fn require(&self, words: &[&str]) -> Result<()> {
        let mut missing: Vec<&str> = Vec::new();
        for &w in words {
            if !self.graph.has_vertex(w) && !missing.contains(&w) {
                missing.push(w);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WordGraphError::missing(missing))
        }
    }

    fn vertex(&self, word: &str) -> Option<&'g str> {
        self.graph.vertex(word)
    }

    fn run(&self, source: &str) -> Settled<'g> {
        let mut settled = Settled {
            distance: HashMap::new(),
            predecessor: HashMap::new(),
        };
        let Some(source) = self.vertex(source) else {
            return settled;
        };

        let mut seq: u64 = 0;
        let mut queue: BinaryHeap<Reverse<(Distance, u64, &'g str)>> = BinaryHeap::new();
        settled.distance.insert(source, 0);
        queue.push(Reverse((0, seq, source)));

        while let Some(Reverse((dist, _, u))) = queue.pop() {
            // Stale entry: a shorter route to `u` was already settled.
            if settled.distance.get(u).is_some_and(|&best| dist > best) {
                continue;
            }
            for (v, &w) in self.graph.successors(u) {
                let candidate = dist + Distance::from(w);
                let improves = settled
                    .distance
                    .get(v.as_str())
                    .map_or(true, |&current| candidate < current);
                if improves {
                    settled.distance.insert(v.as_str(), candidate);
                    settled.predecessor.insert(v.as_str(), u);
                    seq += 1;
                    queue.push(Reverse((candidate, seq, v.as_str())));
                }
            }
        }
        settled
    }
}
