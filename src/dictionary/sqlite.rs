//! # SQLite Lexical Store
//!
//! Production [`LexicalStore`] over a single SQLite database holding one
//! table per [`Language`]. A fixed set of read-only connections is opened
//! up front; each query checks out whichever connection is idle, so up to
//! that many reads run at once.
//!
//! Every statement runs under the caller's deadline: a progress handler
//! interrupts the statement once the deadline has passed.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::time::Instant;

use rusqlite::ffi::ErrorCode;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::debug;

use super::entry::{EntrySummary, LexicalEntry, SearchField};
use super::language::Language;
use super::sanitize::LikePattern;
use super::store::{LexicalStore, StoreError, StoreResult};

/// VM instructions between deadline checks
const PROGRESS_STEPS: i32 = 1000;

/// Read-only connections opened by [`SqliteStore::open_read_only`]
pub const DEFAULT_READERS: usize = 4;

/// Lexical store backed by SQLite
#[derive(Clone)]
pub struct SqliteStore {
    readers: Arc<[Mutex<Connection>]>,
    next: Arc<AtomicUsize>,
}

impl SqliteStore {
    /// Open an existing dictionary database read-only with
    /// [`DEFAULT_READERS`] connections.
    pub fn open_read_only(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_read_only_with_readers(path, DEFAULT_READERS)
    }

    /// Open an existing dictionary database read-only with `readers`
    /// connections (at least one).
    pub fn open_read_only_with_readers(
        path: impl AsRef<Path>,
        readers: usize,
    ) -> StoreResult<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;

        let connections = (0..readers.max(1))
            .map(|_| {
                Connection::open_with_flags(path, flags)
                    .map(Mutex::new)
                    .map_err(|e| StoreError::Open(format!("{}: {e}", path.display())))
            })
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Self {
            readers: connections.into(),
            next: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Wrap an already open connection as the only reader.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            readers: vec![Mutex::new(conn)].into(),
            next: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of connections queries are spread over
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Take an idle connection, or wait on one in rotation if all are busy.
    fn checkout(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        for reader in self.readers.iter() {
            match reader.try_lock() {
                Ok(conn) => return Ok(conn),
                Err(TryLockError::WouldBlock) => continue,
                Err(TryLockError::Poisoned(_)) => return Err(StoreError::LockPoisoned),
            }
        }

        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        self.readers[idx]
            .lock()
            .map_err(|_| StoreError::LockPoisoned)
    }

    /// Supported languages whose table does not exist in this database.
    pub fn missing_tables(&self) -> StoreResult<Vec<Language>> {
        let conn = self.checkout()?;
        let mut missing = Vec::new();
        for language in Language::ALL {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    params![language.table_name()],
                    |row| row.get(0),
                )
                .map_err(map_query_error)?;
            if count == 0 {
                missing.push(language);
            }
        }
        Ok(missing)
    }

    /// Run `f` on the connection with the deadline installed.
    fn with_deadline<T, F>(&self, deadline: Instant, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.checkout()?;
        if Instant::now() >= deadline {
            return Err(StoreError::DeadlineExceeded);
        }

        conn.progress_handler(PROGRESS_STEPS, Some(move || Instant::now() >= deadline));
        let result = f(&*conn);
        conn.progress_handler(0, None::<fn() -> bool>);

        result.map_err(map_query_error)
    }
}

impl LexicalStore for SqliteStore {
    fn get_by_id(
        &self,
        language: Language,
        id: i64,
        deadline: Instant,
    ) -> StoreResult<Option<LexicalEntry>> {
        let sql = format!(
            "SELECT id, entry, `short_meaning`, meaning, examples, comments FROM {} WHERE id = ?1",
            language.table_name()
        );

        self.with_deadline(deadline, |conn| {
            conn.query_row(&sql, params![id], row_to_entry).optional()
        })
    }

    fn search_by_substring(
        &self,
        language: Language,
        substring: &str,
        field: SearchField,
        deadline: Instant,
    ) -> StoreResult<Vec<EntrySummary>> {
        let pattern = LikePattern::contains(substring);
        let sql = format!(
            "SELECT id, entry, `short_meaning` FROM {} WHERE {} LIKE ?1 ESCAPE '\\' ORDER BY id",
            language.table_name(),
            field.column()
        );
        debug!(
            table = language.table_name(),
            %field,
            pattern = %pattern.to_sql_literal(),
            "substring query"
        );

        self.with_deadline(deadline, |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![pattern.as_str()], |row| {
                Ok(EntrySummary {
                    id: row.get(0)?,
                    entry: text_column(row, 1)?,
                    short_meaning: text_column(row, 2)?,
                })
            })?;
            rows.collect()
        })
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<LexicalEntry> {
    Ok(LexicalEntry {
        id: row.get(0)?,
        entry: text_column(row, 1)?,
        short_meaning: text_column(row, 2)?,
        meaning: text_column(row, 3)?,
        examples: text_column(row, 4)?,
        comments: text_column(row, 5)?,
    })
}

/// Read a column as text. NULL becomes the empty string.
///
/// Text and blob values must be valid UTF-8; anything else fails the row
/// with a conversion error instead of being rewritten.
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    let utf8 = |bytes: &[u8], ty: Type| {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(e)))
    };

    match row.get_ref(idx)? {
        ValueRef::Null => Ok(String::new()),
        ValueRef::Integer(i) => Ok(i.to_string()),
        ValueRef::Real(f) => Ok(f.to_string()),
        ValueRef::Text(bytes) => utf8(bytes, Type::Text),
        ValueRef::Blob(bytes) => utf8(bytes, Type::Blob),
    }
}

fn map_query_error(err: rusqlite::Error) -> StoreError {
    match err.sqlite_error_code() {
        Some(ErrorCode::OperationInterrupted) => StoreError::DeadlineExceeded,
        _ => StoreError::Query(err.to_string()),
    }
}
