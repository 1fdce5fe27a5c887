//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_handler, get_list_elem_handler, get_map_elem_value_handler, keys_handler, remove_handler,
    set_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /set` - Store a value under a key with a TTL
/// - `GET /get/:key` - Retrieve a whole value
/// - `GET /getListElem/:key/:index` - Retrieve one element of a list value
/// - `GET /getMapElemValue/:key/:mapKey` - Retrieve one entry of a map value
/// - `DELETE /remove/:key` - Delete a key
/// - `GET /keys` - List all keys
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", post(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/getListElem/:key/:index", get(get_list_elem_handler))
        .route("/getMapElemValue/:key/:mapKey", get(get_map_elem_value_handler))
        .route("/remove/:key", delete(remove_handler))
        .route("/keys", get(keys_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tokio::sync::watch;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let cache = Cache::new(Duration::from_secs(3600), shutdown_rx);
        create_router(AppState::new(cache))
    }

    #[tokio::test]
    async fn test_keys_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/keys").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/set")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello","ttl":"1h"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/get/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_elem_bad_index() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/getListElem/key/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_json_bad_request() {
        let uris = [
            ("GET", "/get/%FF"),
            ("GET", "/getListElem/%FF/0"),
            ("GET", "/getMapElemValue/key/%FF"),
            ("DELETE", "/remove/%FF"),
        ];

        for (method, uri) in uris {
            let response = create_test_app()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert!(json["error"].is_string(), "{}: {}", uri, json);
        }
    }

    #[tokio::test]
    async fn test_remove_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/remove/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
