//! # In-Memory Lexical Store
//!
//! A [`LexicalStore`] kept entirely in memory, for tests and tooling.
//! Matching follows SQLite's default `LIKE` behaviour: containment, with
//! ASCII letters compared case-insensitively.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Instant;

use super::entry::{EntrySummary, LexicalEntry, SearchField};
use super::language::Language;
use super::store::{LexicalStore, StoreError, StoreResult};

/// A row as provisioned into storage, with nullable optional columns
#[derive(Debug, Clone, Default)]
pub struct StoredRow {
    pub id: i64,
    pub entry: String,
    pub short_meaning: Option<String>,
    pub meaning: Option<String>,
    pub examples: Option<String>,
    pub comments: Option<String>,
}

impl StoredRow {
    /// A row with only the headword and gloss set
    pub fn new(id: i64, entry: impl Into<String>, short_meaning: Option<&str>) -> Self {
        Self {
            id,
            entry: entry.into(),
            short_meaning: short_meaning.map(str::to_string),
            ..Default::default()
        }
    }

    fn normalize(&self) -> LexicalEntry {
        LexicalEntry {
            id: self.id,
            entry: self.entry.clone(),
            short_meaning: self.short_meaning.clone().unwrap_or_default(),
            meaning: self.meaning.clone().unwrap_or_default(),
            examples: self.examples.clone().unwrap_or_default(),
            comments: self.comments.clone().unwrap_or_default(),
        }
    }
}

/// In-memory lexical store
#[derive(Default)]
pub struct InMemoryStore {
    /// language -> id -> row
    tables: RwLock<HashMap<Language, BTreeMap<i64, StoredRow>>>,

    /// When set, every query fails as if storage were unreachable
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a row in a language table
    pub fn insert(&self, language: Language, row: StoredRow) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(language).or_default().insert(row.id, row);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_row(self, language: Language, row: StoredRow) -> Self {
        self.insert(language, row);
        self
    }

    /// Make subsequent queries fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, deadline: Instant) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Query("storage unavailable".to_string()));
        }
        if Instant::now() >= deadline {
            return Err(StoreError::DeadlineExceeded);
        }
        Ok(())
    }
}

impl LexicalStore for InMemoryStore {
    fn get_by_id(
        &self,
        language: Language,
        id: i64,
        deadline: Instant,
    ) -> StoreResult<Option<LexicalEntry>> {
        self.check_available(deadline)?;
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;

        Ok(tables
            .get(&language)
            .and_then(|table| table.get(&id))
            .map(StoredRow::normalize))
    }

    fn search_by_substring(
        &self,
        language: Language,
        substring: &str,
        field: SearchField,
        deadline: Instant,
    ) -> StoreResult<Vec<EntrySummary>> {
        self.check_available(deadline)?;
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;

        let needle = substring.to_ascii_lowercase();
        let Some(table) = tables.get(&language) else {
            return Ok(Vec::new());
        };

        Ok(table
            .values()
            .map(StoredRow::normalize)
            .filter(|entry| {
                field
                    .value_of(entry)
                    .to_ascii_lowercase()
                    .contains(&needle)
            })
            .map(|entry| EntrySummary::from(&entry))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(30)
    }

    fn create_test_store() -> InMemoryStore {
        InMemoryStore::new()
            .with_row(
                Language::Tla,
                StoredRow::new(1, "ABC", Some("Always Be Closing")),
            )
            .with_row(Language::Tla, StoredRow::new(2, "XYZ", None))
            .with_row(Language::Chinese, StoredRow::new(1, "ni3 hao3", Some("hello")))
    }

    #[test]
    fn test_get_normalizes_nulls() {
        let store = create_test_store();
        let entry = store.get_by_id(Language::Tla, 2, deadline()).unwrap().unwrap();
        assert_eq!(entry.short_meaning, "");
        assert_eq!(entry.meaning, "");
    }

    #[test]
    fn test_search_is_ascii_case_insensitive() {
        let store = create_test_store();
        let rows = store
            .search_by_substring(Language::Tla, "ab", SearchField::Entry, deadline())
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
    }

    #[test]
    fn test_search_empty_table() {
        let store = InMemoryStore::new();
        let rows = store
            .search_by_substring(Language::Chinese, "a", SearchField::Entry, deadline())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unavailable() {
        let store = create_test_store();
        store.set_unavailable(true);
        assert!(matches!(
            store.get_by_id(Language::Tla, 1, deadline()),
            Err(StoreError::Query(_))
        ));

        store.set_unavailable(false);
        assert!(store.get_by_id(Language::Tla, 1, deadline()).is_ok());
    }
}
