//! Structured logging setup.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a CLI verbosity level
/// (0 = quiet, 1 = normal, 2 = verbose, 3+ = debug).
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "wordgraph=error",
        1 => "wordgraph=warn",
        2 => "wordgraph=info",
        3 => "wordgraph=debug",
        _ => "wordgraph=trace",
    }
}

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// `RUST_LOG` wins when set; otherwise the directive for `verbosity` is
/// used. Subsequent calls are silently ignored by `tracing_subscriber`.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
