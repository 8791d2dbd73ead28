//! # HTTP Server Module
//!
//! Process-level shell around the REST API: configuration and the
//! listening server.

pub mod config;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::HttpServer;
