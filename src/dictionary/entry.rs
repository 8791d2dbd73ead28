//! # Lexical Entries
//!
//! Rows as handed out by a [`LexicalStore`](super::LexicalStore). Optional
//! columns are plain `String`s here: a NULL in storage has already become
//! an empty string by the time one of these values exists.

use std::fmt;

/// A complete row of a language table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexicalEntry {
    pub id: i64,
    /// Headword or transliteration
    pub entry: String,
    /// Short gloss
    pub short_meaning: String,
    pub meaning: String,
    pub examples: String,
    pub comments: String,
}

/// The `{id, entry, short_meaning}` projection used by substring search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntrySummary {
    pub id: i64,
    pub entry: String,
    pub short_meaning: String,
}

impl From<&LexicalEntry> for EntrySummary {
    fn from(entry: &LexicalEntry) -> Self {
        Self {
            id: entry.id,
            entry: entry.entry.clone(),
            short_meaning: entry.short_meaning.clone(),
        }
    }
}

/// Column a substring search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// The headword (`entry` column)
    Entry,
    /// The gloss (`short_meaning` column)
    ShortMeaning,
}

impl SearchField {
    /// Column reference as written in SQL
    pub fn column(&self) -> &'static str {
        match self {
            SearchField::Entry => "entry",
            SearchField::ShortMeaning => "`short_meaning`",
        }
    }

    /// Pick this field's value out of an entry
    pub fn value_of<'a>(&self, entry: &'a LexicalEntry) -> &'a str {
        match self {
            SearchField::Entry => &entry.entry,
            SearchField::ShortMeaning => &entry.short_meaning,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Entry => f.write_str("entry"),
            SearchField::ShortMeaning => f.write_str("short_meaning"),
        }
    }
}
