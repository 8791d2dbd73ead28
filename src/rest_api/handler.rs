//! # REST API Handler
//!
//! Validates dictionary requests and runs them against a [`LexicalStore`].
//!
//! Store calls are blocking. Each one runs on the blocking pool under a
//! request deadline that is both enforced here and handed to the store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::errors::{RestError, RestResult};
use super::parser::{ByIdParams, RequestTarget, Route, SubstringParams};
use super::response::{ByIdResponse, DictionaryResponse, SubstringMatches};
use crate::dictionary::{Language, LexicalStore, StoreResult};

/// Query timeout used when none is configured
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Request handler over an injected store
pub struct DictionaryHandler<S: LexicalStore> {
    store: Arc<S>,
    query_timeout: Duration,
}

impl<S: LexicalStore + 'static> DictionaryHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_timeout(store, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<S>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Route a request path and its query parameters to an operation.
    pub async fn dispatch(
        &self,
        path: &str,
        query: &HashMap<String, String>,
    ) -> RestResult<DictionaryResponse> {
        let target = RequestTarget::parse(path)?;
        match target.route {
            Route::ById => {
                let params = ByIdParams::parse(query)?;
                let found = self.by_id(target.language, params).await?;
                Ok(DictionaryResponse::ById(found))
            }
            Route::BySubstring => {
                let params = SubstringParams::parse(query)?;
                let matches = self.by_substring(target.language, params).await?;
                Ok(DictionaryResponse::BySubstring(matches))
            }
        }
    }

    /// Look up one entry by id
    pub async fn by_id(&self, language: Language, params: ByIdParams) -> RestResult<ByIdResponse> {
        debug!(%language, id = params.id, "lookup by id");
        let entry = self
            .run_query(move |store, deadline| store.get_by_id(language, params.id, deadline))
            .await?;
        Ok(entry.into())
    }

    /// Find every entry whose selected field contains the substring
    pub async fn by_substring(
        &self,
        language: Language,
        params: SubstringParams,
    ) -> RestResult<SubstringMatches> {
        let field = params.search_type.field();
        debug!(%language, %field, substring = %params.substring, "lookup by substring");
        let rows = self
            .run_query(move |store, deadline| {
                store.search_by_substring(language, &params.substring, field, deadline)
            })
            .await?;
        Ok(rows.into_iter().collect())
    }

    async fn run_query<T, F>(&self, query: F) -> RestResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&S, Instant) -> StoreResult<T> + Send + 'static,
    {
        let deadline = Instant::now() + self.query_timeout;
        let store = Arc::clone(&self.store);
        let task = tokio::task::spawn_blocking(move || query(&*store, deadline));

        match tokio::time::timeout(self.query_timeout, task).await {
            Ok(Ok(result)) => result.map_err(RestError::from),
            Ok(Err(join_err)) => Err(RestError::Internal(format!(
                "Query task failed: {join_err}"
            ))),
            Err(_) => Err(RestError::Timeout),
        }
    }
}
