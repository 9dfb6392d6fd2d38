//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::EmptyTokenPolicy;

/// Build a word adjacency graph from a text file and query it.
#[derive(Parser, Debug, Clone)]
#[command(name = "wordgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Word adjacency graphs: bridge words, shortest paths and random walks")]
pub struct Cli {
    /// Verbosity level (-v verbose, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub format: OutputFormat,

    /// Config file (defaults to ./wordgraph.yaml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for random choices; overrides the config file
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// How pure-punctuation tokens affect adjacency: join or break
    #[arg(long, value_parser = parse_policy, global = true)]
    pub empty_tokens: Option<EmptyTokenPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Effective verbosity: 0 quiet, 1 normal, higher is chattier.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show vertex, edge and bigram counts
    Stats(SourceArgs),

    /// List every edge with its weight
    Edges(SourceArgs),

    /// Find bridge words between two words
    Bridge(BridgeArgs),

    /// Insert bridge words into a sentence
    Generate(GenerateArgs),

    /// Shortest path between two words, or from one word to all others
    Path(PathArgs),

    /// Random walk; type the stop command on stdin to end it early
    Walk(WalkArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Text file to build the graph from
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct BridgeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    pub word1: String,
    pub word2: String,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Sentence to augment
    #[arg(required = true, num_args = 1..)]
    pub sentence: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    pub from: String,
    /// Omit to list paths to every reachable word
    pub to: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct WalkArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Where to write the path; overrides the config file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Start from this word instead of a random one
    #[arg(long)]
    pub from: Option<String>,

    /// Do not listen on stdin for the stop command
    #[arg(long)]
    pub no_listen: bool,
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// Pretty-printed JSON
    Json,
}

fn parse_policy(s: &str) -> Result<EmptyTokenPolicy, String> {
    EmptyTokenPolicy::from_str_loose(s)
        .ok_or_else(|| format!("unknown policy '{s}', expected 'join' or 'break'"))
}
