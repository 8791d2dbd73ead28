//! lexdict - A read-only multilingual lexical dictionary over HTTP
//!
//! Clients look entries up by numeric id or search them by substring of the
//! headword or its short gloss. Each supported language is one table in a
//! SQLite database.

pub mod cli;
pub mod dictionary;
pub mod http_server;
pub mod observability;
pub mod rest_api;
