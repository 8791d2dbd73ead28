//! CLI command implementations
//!
//! Both commands open the dictionary read-only through the same
//! [`SqliteStore`] and answer through the same [`DictionaryHandler`], so a
//! one-shot `query` behaves exactly like the HTTP server.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::Query;
use axum::http::Uri;
use tracing::{info, warn};

use crate::dictionary::SqliteStore;
use crate::http_server::{HttpServer, ServerConfig};
use crate::observability;
use crate::rest_api::{first_values, DictionaryHandler};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    observability::init_logging(cli.verbose);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            database,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(port) = port {
                config.port = port;
            }
            apply_database_override(&mut config, database);
            serve(config)
        }
        Command::Query {
            config,
            database,
            request,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_database_override(&mut config, database);
            let body = query(&config, &request)?;

            let mut stdout = io::stdout();
            writeln!(stdout, "{body}")?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Load the config file if one was given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> CliResult<ServerConfig> {
    match path {
        Some(path) => Ok(ServerConfig::load(path)?),
        None => Ok(ServerConfig::default()),
    }
}

fn apply_database_override(config: &mut ServerConfig, database: Option<PathBuf>) {
    if let Some(database) = database {
        config.database_path = database;
    }
}

/// Open the dictionary database and report tables it lacks
fn open_store(config: &ServerConfig) -> CliResult<SqliteStore> {
    let store =
        SqliteStore::open_read_only_with_readers(&config.database_path, config.read_connections)?;
    for language in store.missing_tables()? {
        warn!(
            %language,
            database = %config.database_path.display(),
            "dictionary table missing; requests for this language will fail"
        );
    }
    Ok(store)
}

/// Serve the dictionary over HTTP until interrupted
pub fn serve(config: ServerConfig) -> CliResult<()> {
    let store = open_store(&config)?;
    info!(
        database = %config.database_path.display(),
        readers = store.reader_count(),
        "dictionary opened"
    );

    let server = HttpServer::new(config, Arc::new(store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Answer one request target such as `/tla/byid?id=1`, returning the JSON body
pub fn query(config: &ServerConfig, request: &str) -> CliResult<String> {
    let uri: Uri = request
        .parse()
        .map_err(|e| CliError::io_error(format!("Invalid request '{}': {}", request, e)))?;
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map_err(|e| CliError::io_error(format!("Invalid query string: {}", e)))?;
    let params = first_values(pairs);

    let store = open_store(config)?;
    let handler = DictionaryHandler::with_timeout(Arc::new(store), config.query_timeout());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    let response = rt
        .block_on(handler.dispatch(uri.path(), &params))
        .map_err(|e| CliError::request_failed(e.status_code().as_u16(), e.to_string()))?;

    response
        .to_json()
        .map_err(|e| CliError::request_failed(e.status_code().as_u16(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use rusqlite::Connection;

    fn create_test_config() -> (tempfile::TempDir, ServerConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "
            CREATE TABLE tla (id INTEGER PRIMARY KEY, entry TEXT NOT NULL,
                `short_meaning` TEXT, meaning TEXT, examples TEXT, comments TEXT);
            CREATE TABLE chinese (id INTEGER PRIMARY KEY, entry TEXT NOT NULL,
                `short_meaning` TEXT, meaning TEXT, examples TEXT, comments TEXT);
            INSERT INTO tla (id, entry, `short_meaning`) VALUES (1, 'ABC', 'Always Be Closing');
            ",
        )
        .unwrap();
        drop(conn);

        let config = ServerConfig {
            database_path: path,
            ..Default::default()
        };
        (dir, config)
    }

    #[test]
    fn test_query_by_id() {
        let (_dir, config) = create_test_config();
        let body = query(&config, "/tla/byid?id=1").unwrap();
        assert_eq!(
            body,
            r#"{"id":1,"string_id":"","entry":"ABC","short_meaning":"Always Be Closing","meaning":"","examples":"","comments":""}"#
        );
    }

    #[test]
    fn test_query_by_substring_translation() {
        let (_dir, config) = create_test_config();
        let body = query(&config, "/tla/bysubstring?substr=Closing&type=translation").unwrap();
        assert_eq!(
            body,
            r#"{"1":{"entry":"ABC","short_meaning":"Always Be Closing"}}"#
        );
    }

    #[test]
    fn test_query_decodes_parameters() {
        let (_dir, config) = create_test_config();
        let body = query(&config, "/tla/bysubstring?substr=Be%20Clo&type=translation").unwrap();
        assert!(body.contains("\"1\""));
    }

    #[test]
    fn test_query_decodes_path_and_keeps_first_value() {
        let (_dir, config) = create_test_config();
        let body = query(&config, "/t%6Ca/byid?id=1&id=2").unwrap();
        assert!(body.contains(r#""entry":"ABC""#));
    }

    #[test]
    fn test_query_client_error() {
        let (_dir, config) = create_test_config();
        let err = query(&config, "/tla/byid?id=x").unwrap_err();
        assert_eq!(err.message(), "HTTP 400: Bad id: x.");
    }

    #[test]
    fn test_query_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            database_path: dir.path().join("absent.sqlite"),
            ..Default::default()
        };
        let err = query(&config, "/tla/byid?id=1").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::StorageError);
    }

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None).unwrap(), ServerConfig::default());
    }
}
