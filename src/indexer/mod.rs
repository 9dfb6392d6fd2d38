//! Input side: turn raw text into the normalized word stream the graph is
//! built from.

pub mod tokenizer;

pub use tokenizer::{normalize, read_file_tokens, read_tokens, tokenize_line, words, Token};
