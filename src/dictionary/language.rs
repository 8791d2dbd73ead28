//! # Supported Languages
//!
//! The closed set of dictionaries this service can answer for. Each
//! language owns exactly one backing table whose name is a static string,
//! so client text never reaches table-name position in a query.

use std::fmt;
use std::str::FromStr;

/// A dictionary language with its own lexical table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    /// Three-letter acronyms
    Tla,
    /// Chinese
    Chinese,
}

impl Language {
    /// Every supported language, in declaration order
    pub const ALL: [Language; 2] = [Language::Tla, Language::Chinese];

    /// Identifier used in request paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tla => "tla",
            Language::Chinese => "chinese",
        }
    }

    /// Name of the backing table.
    ///
    /// Identical to the path identifier, but kept separate so the SQL layer
    /// only ever formats this value into statements.
    pub fn table_name(&self) -> &'static str {
        match self {
            Language::Tla => "tla",
            Language::Chinese => "chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a path segment names no supported dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLanguage(pub String);

impl fmt::Display for UnsupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dictionary {} is not available.", self.0)
    }
}

impl std::error::Error for UnsupportedLanguage {}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}
