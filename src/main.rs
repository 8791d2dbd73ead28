//! lexdict CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and prints any error to
//! stderr before exiting non-zero. All logic lives in [`lexdict::cli`].

use lexdict::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
