//! HTTP Server Configuration
//!
//! Configuration for the HTTP server: bind address, dictionary database
//! location and the per-request query deadline. Loaded from a JSON file in
//! which every field is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dictionary::sqlite::DEFAULT_READERS;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 30000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite dictionary file (default: "data/dictionary.sqlite")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Deadline for a single storage query in milliseconds (default: 5000)
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Read-only connections opened on the database (default: 4)
    #[serde(default = "default_read_connections")]
    pub read_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    30000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/dictionary.sqlite")
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_read_connections() -> usize {
    DEFAULT_READERS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            query_timeout_ms: default_query_timeout_ms(),
            read_connections: default_read_connections(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "query_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.read_connections == 0 {
            return Err(ConfigError::Invalid(
                "read_connections must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 30000);
        assert_eq!(config.database_path, PathBuf::from("data/dictionary.sqlite"));
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.read_connections, 4);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ServerConfig::from_json(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.query_timeout_ms, 5000);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ServerConfig::from_json(r#"{"query_timeout_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_read_connections_rejected() {
        let err = ServerConfig::from_json(r#"{"read_connections": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config = ServerConfig::from_json(r#"{"read_connections": 8}"#).unwrap();
        assert_eq!(config.read_connections, 8);
    }

    #[test]
    fn test_malformed_json() {
        let err = ServerConfig::from_json("{port: 1}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexdict.json");
        std::fs::write(
            &path,
            r#"{"host": "127.0.0.1", "database_path": "/srv/dict.sqlite"}"#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:30000");
        assert_eq!(config.database_path, PathBuf::from("/srv/dict.sqlite"));
    }
}
