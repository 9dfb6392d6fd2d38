//! wordgraph CLI binary.

use std::io::{self, BufReader};
use std::process;

use clap::Parser;
use wordgraph::cli::{execute, resolve_config, Cli, Context};
use wordgraph::observability::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let result = resolve_config(&cli).and_then(|config| {
        let stdout = io::stdout().lock();
        let mut ctx = Context::new(config, cli.format, stdout)
            .with_stop_input(Box::new(BufReader::new(io::stdin())));
        execute(&cli.command, &mut ctx)
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
