//! # REST API HTTP Server
//!
//! Axum router for the dictionary endpoints.
//!
//! The whole path is parsed by [`RequestTarget`](super::parser::RequestTarget)
//! rather than by axum's route table, so every malformed path gets a
//! diagnostic naming the offending segment instead of a bare 404.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::Uri,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::errors::RestError;
use super::handler::DictionaryHandler;
use super::parser::first_values;
use super::response::DictionaryResponse;
use crate::dictionary::LexicalStore;

/// REST API server state
pub struct DictionaryServer<S: LexicalStore> {
    handler: Arc<DictionaryHandler<S>>,
}

impl<S: LexicalStore + 'static> DictionaryServer<S> {
    pub fn new(store: Arc<S>, query_timeout: Duration) -> Self {
        Self {
            handler: Arc::new(DictionaryHandler::with_timeout(store, query_timeout)),
        }
    }

    /// Build the Axum router.
    ///
    /// Every response, including errors, allows any origin.
    pub fn router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .fallback(dispatch_handler::<S>)
            .with_state(self.handler)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }
}

/// Shared state type
type ServerState<S> = Arc<DictionaryHandler<S>>;

/// Single entry point for every request path
async fn dispatch_handler<S: LexicalStore + 'static>(
    State(handler): State<ServerState<S>>,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<DictionaryResponse, RestError> {
    handler.dispatch(uri.path(), &first_values(pairs)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{InMemoryStore, Language, StoredRow};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_store() -> Arc<InMemoryStore> {
        Arc::new(
            InMemoryStore::new()
                .with_row(
                    Language::Tla,
                    StoredRow::new(1, "ABC", Some("Always Be Closing")),
                )
                .with_row(Language::Tla, StoredRow::new(2, "XYZ", None)),
        )
    }

    fn create_test_router(store: Arc<InMemoryStore>) -> Router {
        DictionaryServer::new(store, Duration::from_secs(5)).router()
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let request = Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "https://example.org")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        let status = response.status();
        let allow_origin = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, allow_origin, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_by_id_end_to_end() {
        let router = create_test_router(create_test_store());
        let (status, origin, body) = get(router, "/tla/byid?id=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(
            body,
            r#"{"id":1,"string_id":"","entry":"ABC","short_meaning":"Always Be Closing","meaning":"","examples":"","comments":""}"#
        );
    }

    #[tokio::test]
    async fn test_by_id_missing_row() {
        let router = create_test_router(create_test_store());
        let (status, _, body) = get(router, "/tla/byid?id=404").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn test_by_substring_end_to_end() {
        let router = create_test_router(create_test_store());
        let (status, origin, body) =
            get(router, "/tla/bysubstring?substr=AB&type=transliteration").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(
            body,
            r#"{"1":{"entry":"ABC","short_meaning":"Always Be Closing"}}"#
        );
    }

    #[tokio::test]
    async fn test_client_errors_are_plain_text_with_cors() {
        let cases = [
            ("/tla", "Invalid URL suffix: tla"),
            ("/klingon/byid?id=1", "Dictionary klingon is not available."),
            ("/tla/lookup", "Bad route: lookup."),
            ("/tla/byid", "No id provided."),
            ("/tla/byid?id=", "No id provided."),
            ("/tla/byid?id=one", "Bad id: one."),
            ("/tla/bysubstring", "No substring provided."),
            ("/tla/bysubstring?substr=", "No substring provided."),
            (
                "/tla/bysubstring?substr=A&type=meaning",
                "Wrong type: must be \"transliteration\" or \"translation\"",
            ),
        ];

        for (uri, message) in cases {
            let router = create_test_router(create_test_store());
            let (status, origin, body) = get(router, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(origin.as_deref(), Some("*"), "{uri}");
            assert_eq!(body, message, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_percent_encoded_path() {
        for uri in ["/t%6Ca/byid?id=1", "/tla%2Fbyid?id=1"] {
            let router = create_test_router(create_test_store());
            let (status, origin, body) = get(router, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(origin.as_deref(), Some("*"), "{uri}");
            assert!(body.contains(r#""entry":"ABC""#), "{uri}");
        }

        let router = create_test_router(create_test_store());
        let (status, _, body) = get(router, "/kl%69ngon/byid?id=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Dictionary klingon is not available.");
    }

    #[tokio::test]
    async fn test_repeated_parameter_uses_first_value() {
        let router = create_test_router(create_test_store());
        let (status, _, body) = get(router, "/tla/byid?id=1&id=x").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""id":1"#));

        let router = create_test_router(create_test_store());
        let (status, _, body) = get(
            router,
            "/tla/bysubstring?substr=AB&substr=zzz&type=transliteration&type=bogus",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"1":{"entry":"ABC","short_meaning":"Always Be Closing"}}"#
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_empty_500() {
        let store = create_test_store();
        store.set_unavailable(true);

        for uri in ["/tla/byid?id=1", "/tla/bysubstring?substr=A"] {
            let router = create_test_router(Arc::clone(&store));
            let (status, origin, body) = get(router, uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(origin.as_deref(), Some("*"), "{uri}");
            assert!(body.is_empty(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_json_content_type() {
        let router = create_test_router(create_test_store());
        let request = Request::builder()
            .uri("/tla/bysubstring?substr=Z")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let store = create_test_store();
        let uri = "/tla/bysubstring?substr=&type=translation";
        let first = get(create_test_router(Arc::clone(&store)), uri).await;
        let second = get(create_test_router(Arc::clone(&store)), uri).await;
        assert_eq!(first, second);

        let uri = "/tla/bysubstring?substr=a";
        let first = get(create_test_router(Arc::clone(&store)), uri).await;
        let second = get(create_test_router(store), uri).await;
        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(first, second);
    }
}
