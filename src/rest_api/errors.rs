//! # REST API Errors
//!
//! Error types for the REST API module.
//!
//! Client errors answer 400 with a plain-text diagnostic. Server errors
//! answer 500 with an empty body; the cause is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::dictionary::{StoreError, UnsupportedLanguage};

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path does not percent-decode to UTF-8
    #[error("Malformed URL path: {0}")]
    MalformedPath(String),

    /// Path has fewer than two segments
    #[error("Invalid URL suffix: {0}")]
    InvalidUrlSuffix(String),

    /// First path segment is not a supported language
    #[error("{0}")]
    DictionaryNotAvailable(#[from] UnsupportedLanguage),

    /// Second path segment is not an operation
    #[error("Bad route: {0}.")]
    BadRoute(String),

    /// `id` parameter absent or empty
    #[error("No id provided.")]
    MissingId,

    /// `id` parameter is not an integer
    #[error("Bad id: {0}.")]
    BadId(String),

    /// `substr` parameter absent or empty
    #[error("No substring provided.")]
    MissingSubstring,

    /// `type` parameter has an unknown value
    #[error("Wrong type: must be \"transliteration\" or \"translation\"")]
    WrongSearchType(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Query execution failed
    #[error("Storage error: {0}")]
    Storage(StoreError),

    /// Query did not finish before the request deadline
    #[error("Query timed out")]
    Timeout,

    /// Anything else that went wrong while producing a response
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::MalformedPath(_)
            | RestError::InvalidUrlSuffix(_)
            | RestError::DictionaryNotAvailable(_)
            | RestError::BadRoute(_)
            | RestError::MissingId
            | RestError::BadId(_)
            | RestError::MissingSubstring
            | RestError::WrongSearchType(_) => StatusCode::BAD_REQUEST,

            RestError::Storage(_) | RestError::Timeout | RestError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DeadlineExceeded => RestError::Timeout,
            other => RestError::Storage(other),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            debug!(status = status.as_u16(), error = %self, "rejected request");
            (status, self.to_string()).into_response()
        } else {
            error!(status = status.as_u16(), error = %self, "request failed");
            status.into_response()
        }
    }
}
