//! Command execution for the wordgraph CLI.
//!
//! Query outcomes that are not failures (missing word, no path, empty graph)
//! are printed like any other result and the command still succeeds. Only
//! I/O and config problems surface as errors.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::cancel::{CancellationToken, StopListener};
use crate::cli::args::{
    BridgeArgs, Cli, Command, GenerateArgs, OutputFormat, PathArgs, SourceArgs, WalkArgs,
};
use crate::config::WordGraphConfig;
use crate::error::{Result, WordGraphError};
use crate::graph::{BridgeFinder, RandomWalker, ShortestPathSolver, TextAugmenter, WordGraph};

/// Everything a command needs besides its own arguments.
pub struct Context<W: Write> {
    pub config: WordGraphConfig,
    pub format: OutputFormat,
    pub out: W,
    /// Source of stop commands for `walk`; `None` disables the listener.
    pub stop_input: Option<Box<dyn BufRead + Send>>,
    rng: StdRng,
}

impl<W: Write> Context<W> {
    pub fn new(config: WordGraphConfig, format: OutputFormat, out: W) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            format,
            out,
            stop_input: None,
            rng,
        }
    }

    pub fn with_stop_input(mut self, input: Box<dyn BufRead + Send>) -> Self {
        self.stop_input = Some(input);
        self
    }

    fn emit<T: Serialize>(&mut self, value: &T, human: impl FnOnce() -> String) -> Result<()> {
        match self.format {
            OutputFormat::Human => writeln!(self.out, "{}", human())?,
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?,
        }
        Ok(())
    }

    /// Print a query outcome, or pass any other error through.
    fn emit_outcome(&mut self, err: WordGraphError) -> Result<()> {
        if !err.is_query_outcome() {
            return Err(err);
        }
        let kind = match &err {
            WordGraphError::VertexNotFound { .. } => "vertex_not_found",
            WordGraphError::NoPath { .. } => "no_path",
            _ => "empty_graph",
        };
        let message = err.to_string();
        self.emit(
            &serde_json::json!({ "status": kind, "message": message }),
            || message.clone(),
        )
    }
}

/// Merge CLI overrides into the loaded configuration.
pub fn resolve_config(cli: &Cli) -> Result<WordGraphConfig> {
    let mut config = WordGraphConfig::discover(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(policy) = cli.empty_tokens {
        config.text.empty_token_policy = policy;
    }
    Ok(config)
}

/// Run the parsed command.
pub fn execute<W: Write>(command: &Command, ctx: &mut Context<W>) -> Result<()> {
    match command {
        Command::Stats(args) => stats(args, ctx),
        Command::Edges(args) => edges(args, ctx),
        Command::Bridge(args) => bridge(args, ctx),
        Command::Generate(args) => generate(args, ctx),
        Command::Path(args) => path(args, ctx),
        Command::Walk(args) => walk(args, ctx),
    }
}

fn load<W: Write>(source: &SourceArgs, ctx: &Context<W>) -> Result<WordGraph> {
    WordGraph::from_file(&source.file, ctx.config.text.empty_token_policy)
}

/// Normalize a word argument. One with no letters at all is kept as typed,
/// so "not in the graph" messages name what the user actually entered.
fn query_word(raw: &str) -> String {
    let word = crate::indexer::normalize(raw);
    if word.is_empty() {
        raw.to_string()
    } else {
        word
    }
}

fn stats<W: Write>(args: &SourceArgs, ctx: &mut Context<W>) -> Result<()> {
    let stats = load(args, ctx)?.stats();
    ctx.emit(&stats, || {
        format!(
            "Vertices: {}\nEdges: {}\nBigrams: {}",
            stats.vertices, stats.edges, stats.total_weight
        )
    })
}

fn edges<W: Write>(args: &SourceArgs, ctx: &mut Context<W>) -> Result<()> {
    let graph = load(args, ctx)?;
    let edges: Vec<_> = graph.edges().collect();
    ctx.emit(&edges, || {
        edges
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn bridge<W: Write>(args: &BridgeArgs, ctx: &mut Context<W>) -> Result<()> {
    let graph = load(&args.source, ctx)?;
    let word1 = query_word(&args.word1);
    let word2 = query_word(&args.word2);
    let result = BridgeFinder::new(&graph).query(&word1, &word2);
    ctx.emit(&result, || result.to_string())
}

fn generate<W: Write>(args: &GenerateArgs, ctx: &mut Context<W>) -> Result<()> {
    let graph = load(&args.source, ctx)?;
    let sentence = args.sentence.join(" ");
    let text = TextAugmenter::new(&graph).augment(&sentence, &mut ctx.rng);
    ctx.emit(&serde_json::json!({ "input": sentence, "output": text }), || {
        text.clone()
    })
}

fn path<W: Write>(args: &PathArgs, ctx: &mut Context<W>) -> Result<()> {
    let graph = load(&args.source, ctx)?;
    let solver = ShortestPathSolver::new(&graph);
    let from = query_word(&args.from);

    match &args.to {
        Some(to) => match solver.shortest_path(&from, &query_word(to)) {
            Ok(found) => ctx.emit(&found, || found.to_string()),
            Err(e) => ctx.emit_outcome(e),
        },
        None => match solver.shortest_paths_from(&from) {
            Ok(paths) if paths.is_empty() => ctx.emit(&paths, || {
                format!("No words are reachable from {from}.")
            }),
            Ok(paths) => ctx.emit(&paths, || {
                paths
                    .iter()
                    .map(|p| format!("{} ({})", p.vertices.join(" -> "), p.distance))
                    .collect::<Vec<_>>()
                    .join("\n")
            }),
            Err(e) => ctx.emit_outcome(e),
        },
    }
}

#[derive(Serialize)]
struct WalkReport<'a> {
    #[serde(flatten)]
    outcome: &'a crate::graph::WalkOutcome,
    output_path: &'a Path,
}

fn walk<W: Write>(args: &WalkArgs, ctx: &mut Context<W>) -> Result<()> {
    let graph = load(&args.source, ctx)?;
    let output_path: PathBuf = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.config.walk.output_path.clone());

    let token = CancellationToken::new();
    let listener = match (args.no_listen, ctx.stop_input.take()) {
        (false, Some(input)) => {
            eprintln!(
                "Type '{}' to stop the traversal:",
                ctx.config.walk.stop_command
            );
            Some(StopListener::spawn(
                input,
                ctx.config.walk.stop_command.clone(),
                token.clone(),
            )?)
        }
        _ => None,
    };

    // Buffer the path so a walk that never starts leaves the old file alone.
    let mut buffer: Vec<u8> = Vec::new();
    let walker = RandomWalker::new(&graph);
    let result = match args.from.as_deref() {
        Some(start) => walker.walk_from(&query_word(start), &token, &mut ctx.rng, &mut buffer),
        None => walker.walk(&token, &mut ctx.rng, &mut buffer),
    };
    // The walk is over either way; release the listener before reporting.
    if let Some(listener) = listener {
        listener.shutdown();
    }

    match result {
        Ok(outcome) => {
            std::fs::write(&output_path, &buffer)?;
            let report = WalkReport {
                outcome: &outcome,
                output_path: &output_path,
            };
            ctx.emit(&report, || {
                format!(
                    "{}\nOutput written to {}",
                    outcome.summary(),
                    output_path.display()
                )
            })
        }
        Err(e) => ctx.emit_outcome(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use clap::Parser;
    use std::io::Cursor;
    use tempfile::TempDir;

    const TEXT: &str = "To explore strange new worlds,\nTo seek out new life and new civilizations?";

    fn run(args: &[&str], dir: &TempDir) -> String {
        let file = dir.path().join("input.txt");
        std::fs::write(&file, TEXT).unwrap();
        let mut argv = vec!["wordgraph".to_string()];
        for a in args {
            argv.push(a.replace("{file}", file.to_str().unwrap()));
        }
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut config = WordGraphConfig::default();
        config.seed = Some(1);
        config.walk.output_path = dir.path().join("walk.txt");
        let mut ctx = Context::new(config, cli.format, Vec::new());
        execute(&cli.command, &mut ctx).unwrap();
        String::from_utf8(ctx.out).unwrap()
    }

    #[test]
    fn stats_counts_graph() {
        let dir = TempDir::new().unwrap();
        let out = run(&["stats", "{file}"], &dir);
        assert!(out.contains("Vertices: 10"), "{out}");
        assert!(out.contains("Bigrams: 12"), "{out}");
    }

    #[test]
    fn bridge_outcomes_are_distinct() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            run(&["bridge", "{file}", "seek", "new"], &dir).trim(),
            "The bridge words from seek to new are: out"
        );
        assert_eq!(
            run(&["bridge", "{file}", "to", "new"], &dir).trim(),
            "No bridge words from to to new!"
        );
        assert_eq!(
            run(&["bridge", "{file}", "warp", "new"], &dir).trim(),
            "No warp in the graph!"
        );
    }

    #[test]
    fn path_reports_no_path_without_failing() {
        let dir = TempDir::new().unwrap();
        let out = run(&["path", "{file}", "civilizations", "to"], &dir);
        assert!(out.contains("not connected"), "{out}");
    }

    #[test]
    fn path_json_output() {
        let dir = TempDir::new().unwrap();
        let out = run(&["-f", "json", "path", "{file}", "to", "life"], &dir);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["distance"], 4);
        assert_eq!(value["vertices"][0], "to");
    }

    #[test]
    fn walk_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let out = run(&["walk", "{file}", "--from", "civilizations", "--no-listen"], &dir);
        assert!(out.contains("Path: civilizations"), "{out}");
        let written = std::fs::read_to_string(dir.path().join("walk.txt")).unwrap();
        assert_eq!(written, "civilizations\n");
    }

    #[test]
    fn walk_from_unknown_word_keeps_previous_output() {
        let dir = TempDir::new().unwrap();
        let previous = dir.path().join("walk.txt");
        std::fs::write(&previous, "previous\nwalk\n").unwrap();
        let out = run(&["walk", "{file}", "--from", "warp", "--no-listen"], &dir);
        assert_eq!(out.trim(), "No warp in the graph!");
        assert_eq!(std::fs::read_to_string(&previous).unwrap(), "previous\nwalk\n");
    }

    #[test]
    fn walk_on_empty_graph_keeps_previous_output() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("blank.txt");
        std::fs::write(&file, "... !!! ---").unwrap();
        let previous = dir.path().join("walk.txt");
        std::fs::write(&previous, "previous\nwalk\n").unwrap();

        let cli = Cli::try_parse_from(["wordgraph", "walk", file.to_str().unwrap(), "--no-listen"])
            .unwrap();
        let mut config = WordGraphConfig::default();
        config.walk.output_path = previous.clone();
        let mut ctx = Context::new(config, OutputFormat::Human, Vec::new());
        execute(&cli.command, &mut ctx).unwrap();

        assert_eq!(String::from_utf8(ctx.out).unwrap(), "The graph is empty.\n");
        assert_eq!(std::fs::read_to_string(&previous).unwrap(), "previous\nwalk\n");
    }

    #[test]
    fn letterless_word_is_reported_as_typed() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            run(&["bridge", "{file}", "123", "new"], &dir).trim(),
            "No 123 in the graph!"
        );
        let out = run(&["path", "{file}", "to", "42"], &dir);
        assert_eq!(out.trim(), "No 42 in the graph!");
    }

    #[test]
    fn walk_with_stop_input_finishes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("input.txt");
        std::fs::write(&file, TEXT).unwrap();
        let cli = Cli::try_parse_from(["wordgraph", "walk", file.to_str().unwrap()]).unwrap();
        let mut config = WordGraphConfig::default();
        config.seed = Some(11);
        config.walk.output_path = dir.path().join("walk.txt");
        let mut ctx = Context::new(config, OutputFormat::Json, Vec::new())
            .with_stop_input(Box::new(Cursor::new("")));
        execute(&cli.command, &mut ctx).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&ctx.out).unwrap();
        assert!(value["path"].as_array().is_some_and(|p| !p.is_empty()));
        assert!(value["output_path"].as_str().unwrap().ends_with("walk.txt"));
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let cli = Cli::try_parse_from(["wordgraph", "stats", "/no/such/file.txt"]).unwrap();
        let mut ctx = Context::new(WordGraphConfig::default(), OutputFormat::Human, Vec::new());
        let err = execute(&cli.command, &mut ctx).unwrap_err();
        assert!(matches!(err, WordGraphError::Io(_)));
    }
}
