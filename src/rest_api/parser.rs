//! # Request Parser
//!
//! Turns a request path and its query parameters into validated,
//! strongly-typed lookups. Nothing downstream of this module sees raw
//! client text except the search substring itself.

use std::collections::HashMap;
use std::str::FromStr;

use super::errors::{RestError, RestResult};
use crate::dictionary::{Language, SearchField};

/// Search type used when `type` is absent
pub const DEFAULT_SEARCH_TYPE: SearchType = SearchType::Transliteration;

/// Dictionary operation named by the second path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `byid`
    ById,
    /// `bysubstring`
    BySubstring,
}

impl FromStr for Route {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byid" => Ok(Route::ById),
            "bysubstring" => Ok(Route::BySubstring),
            _ => Err(RestError::BadRoute(s.to_string())),
        }
    }
}

/// The `{language}/{route}` part of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTarget {
    pub language: Language,
    pub route: Route,
}

impl RequestTarget {
    /// Parse a request path such as `/tla/byid`.
    ///
    /// The path is percent-decoded first, so `%2F` separates segments like
    /// `/` does. Surrounding slashes are ignored. Segments after the route
    /// are ignored.
    pub fn parse(path: &str) -> RestResult<Self> {
        let decoded = urlencoding::decode(path)
            .map_err(|_| RestError::MalformedPath(path.to_string()))?;
        let path = decoded.trim_matches('/');
        let mut segments = path.split('/');

        let (Some(language), Some(route)) = (segments.next(), segments.next()) else {
            return Err(RestError::InvalidUrlSuffix(path.to_string()));
        };

        let language = language.parse::<Language>()?;
        let route = route.parse::<Route>()?;

        Ok(Self { language, route })
    }
}

/// What a substring search matches against, as named by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Match the headword
    Transliteration,
    /// Match the short gloss
    Translation,
}

impl SearchType {
    /// Column this search type matches against
    pub fn field(&self) -> SearchField {
        match self {
            SearchType::Transliteration => SearchField::Entry,
            SearchType::Translation => SearchField::ShortMeaning,
        }
    }
}

impl FromStr for SearchType {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transliteration" => Ok(SearchType::Transliteration),
            "translation" => Ok(SearchType::Translation),
            _ => Err(RestError::WrongSearchType(s.to_string())),
        }
    }
}

/// Parameters of a `byid` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByIdParams {
    pub id: i64,
}

impl ByIdParams {
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let raw = non_empty(params, "id").ok_or(RestError::MissingId)?;
        let id = raw
            .parse()
            .map_err(|_| RestError::BadId(raw.to_string()))?;
        Ok(Self { id })
    }
}

/// Parameters of a `bysubstring` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringParams {
    pub substring: String,
    pub search_type: SearchType,
}

impl SubstringParams {
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let substring = non_empty(params, "substr").ok_or(RestError::MissingSubstring)?;
        let search_type = match non_empty(params, "type") {
            Some(value) => value.parse()?,
            None => DEFAULT_SEARCH_TYPE,
        };

        Ok(Self {
            substring: substring.to_string(),
            search_type,
        })
    }
}

/// Collapse query pairs into a map, keeping the first value of a
/// repeated key.
pub fn first_values<I>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut params = HashMap::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

/// A parameter's value, treating empty as absent
fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
