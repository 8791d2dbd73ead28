//! # Response Formatting
//!
//! Wire shapes of the dictionary API and their JSON serialization.

use std::collections::BTreeMap;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::errors::{RestError, RestResult};
use crate::dictionary::{EntrySummary, LexicalEntry};

/// Full record returned by `byid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullRecord {
    pub id: i64,
    /// Secondary textual key. Never populated, kept for client compatibility.
    pub string_id: String,
    pub entry: String,
    pub short_meaning: String,
    pub meaning: String,
    pub examples: String,
    pub comments: String,
}

impl From<LexicalEntry> for FullRecord {
    fn from(entry: LexicalEntry) -> Self {
        Self {
            id: entry.id,
            string_id: String::new(),
            entry: entry.entry,
            short_meaning: entry.short_meaning,
            meaning: entry.meaning,
            examples: entry.examples,
            comments: entry.comments,
        }
    }
}

/// Outcome of a `byid` lookup. `NotFound` serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByIdResponse {
    Found(FullRecord),
    NotFound,
}

impl From<Option<LexicalEntry>> for ByIdResponse {
    fn from(entry: Option<LexicalEntry>) -> Self {
        match entry {
            Some(entry) => ByIdResponse::Found(entry.into()),
            None => ByIdResponse::NotFound,
        }
    }
}

impl Serialize for ByIdResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ByIdResponse::Found(record) => record.serialize(serializer),
            ByIdResponse::NotFound => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Abbreviated record returned by `bysubstring`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviatedRecord {
    pub entry: String,
    pub short_meaning: String,
}

/// Substring matches keyed by the decimal rendering of each row id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstringMatches(pub BTreeMap<String, AbbreviatedRecord>);

impl SubstringMatches {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&AbbreviatedRecord> {
        self.0.get(&id.to_string())
    }
}

impl FromIterator<EntrySummary> for SubstringMatches {
    fn from_iter<I: IntoIterator<Item = EntrySummary>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|row| {
                    (
                        row.id.to_string(),
                        AbbreviatedRecord {
                            entry: row.entry,
                            short_meaning: row.short_meaning,
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Successful result of a dispatched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryResponse {
    ById(ByIdResponse),
    BySubstring(SubstringMatches),
}

impl DictionaryResponse {
    /// Serialize to the JSON response body
    pub fn to_json(&self) -> RestResult<String> {
        let body = match self {
            DictionaryResponse::ById(found) => serde_json::to_string(found),
            DictionaryResponse::BySubstring(matches) => serde_json::to_string(matches),
        };
        body.map_err(|e| RestError::Internal(format!("Failed to serialize response: {e}")))
    }
}

impl IntoResponse for DictionaryResponse {
    fn into_response(self) -> Response {
        match self.to_json() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}
