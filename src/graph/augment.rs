//! Text generation by bridge-word insertion.
//!
//! Every pair of adjacent input words that has at least one bridge word in
//! the graph gets one of them, chosen uniformly at random, inserted between
//! the pair. Nothing else about the input changes.

use rand::Rng;

use crate::graph::bridge::BridgeFinder;
use crate::graph::store::WordGraph;
use crate::indexer::tokenizer;

pub struct TextAugmenter<'a> {
    finder: BridgeFinder<'a>,
}

impl<'a> TextAugmenter<'a> {
    pub fn new(graph: &'a WordGraph) -> Self {
        Self {
            finder: BridgeFinder::new(graph),
        }
    }

    /// Rewrite `sentence`, returning the words single-space joined.
    ///
    /// Input words go through the same normalization as graph construction,
    /// so `"Seek, NEW"` looks up `seek` and `new`.
    pub fn augment<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
        self.augment_words(&tokenizer::words(sentence), rng).join(" ")
    }

    /// Word-level form of [`TextAugmenter::augment`].
    pub fn augment_words<R: Rng + ?Sized>(&self, words: &[String], rng: &mut R) -> Vec<String> {
        let mut out = Vec::with_capacity(words.len() * 2);
        let mut inserted = 0usize;

        for (i, word) in words.iter().enumerate() {
            out.push(word.clone());
            let Some(next) = words.get(i + 1) else {
                break;
            };
            // Missing vertices simply mean no insertion.
            let Ok(bridges) = self.finder.find_bridges(word, next) else {
                continue;
            };
            if bridges.is_empty() {
                continue;
            }
            let pick = rng.random_range(0..bridges.len());
            out.push(bridges[pick].clone());
            inserted += 1;
        }

        tracing::debug!(words = words.len(), inserted, "augmented text");
        out
    }
}
