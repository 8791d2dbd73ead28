//! CLI argument definitions using clap
//!
//! Commands:
//! - lexdict serve [--config <path>] [--port <port>] [--database <path>]
//! - lexdict query [--config <path>] [--database <path>] <request>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lexdict - A read-only multilingual dictionary over HTTP
#[derive(Parser, Debug)]
#[command(name = "lexdict")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP dictionary server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite dictionary file (overrides the config file)
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Answer a single request, e.g. "/tla/byid?id=1", and exit
    Query {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// SQLite dictionary file (overrides the config file)
        #[arg(long)]
        database: Option<PathBuf>,

        /// Request path with query string
        request: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
