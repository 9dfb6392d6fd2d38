//! Command line front end.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{execute, resolve_config, Context};
