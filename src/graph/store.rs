//! In-memory word adjacency graph.
//!
//! A graph is assembled with a [`WordGraphBuilder`] and frozen by
//! [`WordGraphBuilder::finish`]. The resulting [`WordGraph`] exposes only
//! read operations, so every query algorithm can borrow it freely.
//!
//! Both the outer and inner maps are `BTreeMap`s: iteration is sorted, which
//! keeps bridge listings stable and makes seeded random walks reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::indexer::tokenizer::{self, Token};
use crate::types::{Edge, EmptyTokenPolicy, GraphStats, Weight};

/// Successor → weight map of a single vertex.
pub type Successors = BTreeMap<String, Weight>;

static NO_SUCCESSORS: Successors = BTreeMap::new();

// ---------------------------------------------------------------------------
// WordGraphBuilder
// ---------------------------------------------------------------------------

/// Single-pass graph construction over a token stream.
#[derive(Debug, Default)]
pub struct WordGraphBuilder {
    adjacency: BTreeMap<String, Successors>,
    vertices: BTreeSet<String>,
    policy: EmptyTokenPolicy,
    last: Option<String>,
    skipped: usize,
}

impl WordGraphBuilder {
    pub fn new(policy: EmptyTokenPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Record one observation of `to` directly after `from`.
    ///
    /// Both words are normalized first. Creates the edge with weight 1 or
    /// increments an existing one. A word that normalizes to nothing is
    /// ignored.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = tokenizer::normalize(from);
        let to = tokenizer::normalize(to);
        if from.is_empty() || to.is_empty() {
            tracing::trace!("ignoring edge with empty endpoint");
            return;
        }
        self.insert_edge(from, to);
    }

    fn insert_edge(&mut self, from: String, to: String) {
        self.vertices.insert(from.clone());
        self.vertices.insert(to.clone());
        *self
            .adjacency
            .entry(from)
            .or_default()
            .entry(to)
            .or_insert(0) += 1;
    }

    /// Feed the next token of the stream.
    pub fn push(&mut self, token: Token) {
        match token {
            Token::Word(word) => self.push_word(word),
            Token::Gap => {
                self.skipped += 1;
                if self.policy == EmptyTokenPolicy::Break {
                    self.last = None;
                }
            }
        }
    }

    /// Feed the next already-normalized, non-empty word of the stream.
    pub fn push_word(&mut self, word: String) {
        match self.last.take() {
            Some(prev) => self.insert_edge(prev, word.clone()),
            // A lone word is still a vertex.
            None => {
                self.vertices.insert(word.clone());
            }
        }
        self.last = Some(word);
    }

    pub fn extend<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        for token in tokens {
            self.push(token);
        }
    }

    /// Freeze the graph. No further mutation is possible after this point.
    pub fn finish(self) -> WordGraph {
        let graph = WordGraph {
            adjacency: self.adjacency,
            vertices: self.vertices,
        };
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            skipped_tokens = self.skipped,
            policy = %self.policy,
            "word graph built"
        );
        graph
    }
}

// ---------------------------------------------------------------------------
// WordGraph
// ---------------------------------------------------------------------------

/// Directed weighted graph of word adjacencies. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGraph {
    adjacency: BTreeMap<String, Successors>,
    vertices: BTreeSet<String>,
}

impl WordGraph {
    /// Build from an iterator of normalized, non-empty words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = WordGraphBuilder::default();
        for word in words {
            builder.push_word(word.into());
        }
        builder.finish()
    }

    /// Build from a token stream under the given empty-token policy.
    pub fn from_tokens<I>(tokens: I, policy: EmptyTokenPolicy) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        let mut builder = WordGraphBuilder::new(policy);
        builder.extend(tokens);
        builder.finish()
    }

    /// Tokenize and build from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, policy: EmptyTokenPolicy) -> Result<Self> {
        let tokens = tokenizer::read_tokens(reader)?;
        Ok(Self::from_tokens(tokens, policy))
    }

    /// Tokenize and build from a text file.
    pub fn from_file(path: &Path, policy: EmptyTokenPolicy) -> Result<Self> {
        let tokens = tokenizer::read_file_tokens(path)?;
        let graph = Self::from_tokens(tokens, policy);
        tracing::info!(
            path = %path.display(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "loaded text"
        );
        Ok(graph)
    }

    /// A word is a vertex if it was ever seen, as predecessor or successor.
    pub fn has_vertex(&self, word: &str) -> bool {
        self.vertices.contains(word)
    }

    /// The graph-owned copy of `word`, if it is a vertex.
    pub fn vertex(&self, word: &str) -> Option<&str> {
        self.vertices.get(word).map(String::as_str)
    }

    /// Outgoing edges of `word`; empty when it has none or is absent.
    pub fn successors(&self, word: &str) -> &Successors {
        self.adjacency.get(word).unwrap_or(&NO_SUCCESSORS)
    }

    /// Weight of the `from → to` edge, if it exists.
    pub fn weight(&self, from: &str, to: &str) -> Option<Weight> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.iter().map(String::as_str)
    }

    /// All edges, sorted by source then target.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(from, succ)| {
            succ.iter().map(move |(to, &weight)| Edge {
                from: from.clone(),
                to: to.clone(),
                weight,
            })
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            total_weight: self
                .adjacency
                .values()
                .flat_map(BTreeMap::values)
                .map(|&w| u64::from(w))
                .sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
