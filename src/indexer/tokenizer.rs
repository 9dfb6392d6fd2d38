//! Text → word stream.
//!
//! Raw text is split on whitespace and each piece is normalized: every
//! character outside `A-Za-z` is stripped and the rest lowercased. A piece
//! that normalizes to nothing (pure punctuation such as `--` or `1999`) is
//! reported as [`Token::Gap`] so the graph builder can decide whether it
//! separates its neighbours.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

/// One whitespace-delimited piece of input after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A non-empty normalized word.
    Word(String),
    /// A piece that normalized to the empty string.
    Gap,
}

impl Token {
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            Token::Gap => None,
        }
    }
}

fn non_alpha() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^A-Za-z]+").expect("static pattern compiles"))
}

/// Lowercase `raw` and strip every non-ASCII-letter character.
///
/// `"Hello,"` → `"hello"`, `"don't"` → `"dont"`, `"--"` → `""`.
pub fn normalize(raw: &str) -> String {
    non_alpha().replace_all(raw, "").to_ascii_lowercase()
}

/// Split one line into normalized tokens.
pub fn tokenize_line(line: &str) -> impl Iterator<Item = Token> + '_ {
    line.split_whitespace().map(|piece| {
        let word = normalize(piece);
        if word.is_empty() {
            Token::Gap
        } else {
            Token::Word(word)
        }
    })
}

/// Tokenize everything readable from `reader`. Line breaks are not token
/// boundaries of their own: the last word of one line is adjacent to the
/// first word of the next.
pub fn read_tokens<R: BufRead>(reader: R) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        tokens.extend(tokenize_line(&line?));
    }
    Ok(tokens)
}

/// Tokenize a file on disk.
pub fn read_file_tokens(path: &Path) -> Result<Vec<Token>> {
    let file = File::open(path)?;
    read_tokens(BufReader::new(file))
}

/// Normalized words of `text`, gaps dropped.
pub fn words(text: &str) -> Vec<String> {
    tokenize_line(text)
        .filter_map(|t| match t {
            Token::Word(w) => Some(w),
            Token::Gap => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use test_case::test_case;

    #[test_case("Hello", "hello" ; "lowercases")]
    #[test_case("world.", "world" ; "strips trailing punctuation")]
    #[test_case("don't", "dont" ; "strips inner apostrophe")]
    #[test_case("well-known", "wellknown" ; "joins hyphenated")]
    #[test_case("--", "" ; "pure punctuation")]
    #[test_case("1999", "" ; "digits only")]
    #[test_case("café", "caf" ; "non ascii letters stripped")]
    fn normalize_cases(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn tokenize_line_marks_gaps() {
        let tokens: Vec<Token> = tokenize_line("To be -- or not").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Word("to".into()),
                Token::Word("be".into()),
                Token::Gap,
                Token::Word("or".into()),
                Token::Word("not".into()),
            ]
        );
    }

    #[test]
    fn read_tokens_spans_lines() {
        let input = Cursor::new("The quick\n\n  brown FOX!\n");
        let tokens = read_tokens(input).unwrap();
        let words: Vec<&str> = tokens.iter().filter_map(Token::as_word).collect();
        assert_eq!(words, vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn read_file_tokens_missing_file_is_io_error() {
        let err = read_file_tokens(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, crate::error::WordGraphError::Io(_)));
    }

    #[test]
    fn words_drops_gaps() {
        assert_eq!(words("  A  ... b c!  "), vec!["a", "b", "c"]);
    }
}
