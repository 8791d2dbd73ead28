//! # Lexical Store
//!
//! The read-only accessor seam between request handling and storage.
//! Handlers only ever hold a `LexicalStore`; the SQLite implementation
//! serves production and [`InMemoryStore`](super::InMemoryStore) serves
//! isolated tests.

use std::time::Instant;

use thiserror::Error;

use super::entry::{EntrySummary, LexicalEntry, SearchField};
use super::language::Language;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failures. All of them are fatal to the request, never to the process.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The storage file could not be opened
    #[error("Failed to open dictionary storage: {0}")]
    Open(String),

    /// Statement preparation or execution failed
    #[error("Query failed: {0}")]
    Query(String),

    /// The request deadline passed while the query was running
    #[error("Query interrupted: deadline exceeded")]
    DeadlineExceeded,

    /// A previous holder of the connection panicked
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Read-only access to per-language lexical tables
pub trait LexicalStore: Send + Sync {
    /// Exact lookup by primary key.
    ///
    /// `Ok(None)` means no row has this id.
    fn get_by_id(
        &self,
        language: Language,
        id: i64,
        deadline: Instant,
    ) -> StoreResult<Option<LexicalEntry>>;

    /// Every row whose `field` contains `substring`.
    ///
    /// The substring is matched literally; `%` and `_` are not wildcards.
    /// No limit is applied.
    fn search_by_substring(
        &self,
        language: Language,
        substring: &str,
        field: SearchField,
        deadline: Instant,
    ) -> StoreResult<Vec<EntrySummary>>;
}
