//! CLI module for lexdict
//!
//! Provides command-line interface for:
//! - serve: open the dictionary and serve it over HTTP
//! - query: answer a single request in-process and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{load_config, query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
