//! # Dictionary Module
//!
//! Storage-facing half of the service: the supported languages, the
//! lexical entry model, query text sanitization and the read-only
//! [`LexicalStore`] accessor with its SQLite and in-memory implementations.

pub mod entry;
pub mod language;
pub mod memory;
pub mod sanitize;
pub mod sqlite;
pub mod store;

pub use entry::{EntrySummary, LexicalEntry, SearchField};
pub use language::{Language, UnsupportedLanguage};
pub use memory::{InMemoryStore, StoredRow};
pub use sanitize::{escape_like, sanitize, LikePattern};
pub use sqlite::SqliteStore;
pub use store::{LexicalStore, StoreError, StoreResult};
