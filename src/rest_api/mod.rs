//! # Dictionary REST API Module
//!
//! Request-facing half of the service: path routing, parameter
//! validation, dispatch to a [`LexicalStore`](crate::dictionary::LexicalStore)
//! and shaping of the JSON responses.
//!
//! # Endpoints
//!
//! - `GET /{language}/byid?id={int}`
//! - `GET /{language}/bysubstring?substr={text}&type={transliteration|translation}`

pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{RestError, RestResult};
pub use handler::{DictionaryHandler, DEFAULT_QUERY_TIMEOUT};
pub use parser::{first_values, ByIdParams, RequestTarget, Route, SearchType, SubstringParams};
pub use response::{
    AbbreviatedRecord, ByIdResponse, DictionaryResponse, FullRecord, SubstringMatches,
};
pub use server::DictionaryServer;
