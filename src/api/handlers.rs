//! API Handlers
//!
//! HTTP request handlers translating each endpoint into one cache call.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::Cache;
use crate::error::ApiError;
use crate::models::{KeysResponse, SetRequest, ValueResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

fn invalid_request(rejection: impl std::fmt::Display) -> ApiError {
    ApiError::InvalidRequest(rejection.to_string())
}

/// Handler for POST /set
///
/// Stores a value under a key with the given TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    req: Result<Json<SetRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = req.map_err(|rejection| invalid_request(rejection.body_text()))?;

    debug!(
        "Set key '{}' and value '{}' with ttl '{}'",
        req.key, req.value, req.ttl.0
    );
    state.cache.set(req.key, req.value, req.ttl.0).await?;

    Ok(StatusCode::OK)
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ValueResponse>> {
    let Path(key) = key.map_err(|rejection| invalid_request(rejection.body_text()))?;

    let value = state.cache.get(&key).await?;
    Ok(Json(ValueResponse::new(value)))
}

/// Handler for GET /getListElem/:key/:index
pub async fn get_list_elem_handler(
    State(state): State<AppState>,
    params: Result<Path<(String, i64)>, PathRejection>,
) -> ApiResult<Json<ValueResponse>> {
    let Path((key, index)) = params.map_err(|rejection| invalid_request(rejection.body_text()))?;

    let value = state.cache.get_list_elem(&key, index).await?;
    Ok(Json(ValueResponse::new(value)))
}

/// Handler for GET /getMapElemValue/:key/:mapKey
pub async fn get_map_elem_value_handler(
    State(state): State<AppState>,
    params: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Json<ValueResponse>> {
    let Path((key, map_key)) =
        params.map_err(|rejection| invalid_request(rejection.body_text()))?;

    let value = state.cache.get_map_elem_value(&key, &map_key).await?;
    Ok(Json(ValueResponse::new(value)))
}

/// Handler for DELETE /remove/:key
///
/// Succeeds whether or not the key existed.
pub async fn remove_handler(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(key) = key.map_err(|rejection| invalid_request(rejection.body_text()))?;

    state.cache.remove(&key).await;
    Ok(StatusCode::OK)
}

/// Handler for GET /keys
///
/// Lists every key held, including expired ones that were not reaped yet.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys().await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Value;
    use crate::error::CacheError;
    use chrono::Duration;
    use std::time::Duration as StdDuration;
    use tokio::sync::watch;

    fn test_state() -> AppState {
        // The sender is dropped at once; the reaper is never started in these tests.
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        AppState::new(Cache::new(StdDuration::from_secs(3600), shutdown_rx))
    }

    fn set_request(key: &str, value: serde_json::Value, ttl: Duration) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value,
            ttl: ttl.into(),
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = set_request("test_key", serde_json::json!("test_value"), Duration::hours(1));
        let result = set_handler(State(state.clone()), Ok(Json(req))).await;
        assert_eq!(result.unwrap(), StatusCode::OK);

        let response = get_handler(State(state), Ok(Path("test_key".to_string())))
            .await
            .unwrap();
        assert_eq!(response.value, Value::from("test_value"));
    }

    #[tokio::test]
    async fn test_set_invalid_value_type() {
        let state = test_state();

        let req = set_request("key", serde_json::json!(12), Duration::hours(1));
        let result = set_handler(State(state), Ok(Json(req))).await;
        assert!(matches!(
            result,
            Err(ApiError::Cache(CacheError::InvalidValueType))
        ));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Ok(Path("nonexistent".to_string()))).await;
        assert!(matches!(
            result,
            Err(ApiError::Cache(CacheError::ElementNotFound))
        ));
    }

    #[tokio::test]
    async fn test_list_and_map_handlers() {
        let state = test_state();
        let list = set_request("list", serde_json::json!(["a", "b"]), Duration::hours(1));
        let map = set_request("map", serde_json::json!({"k": "v"}), Duration::hours(1));
        set_handler(State(state.clone()), Ok(Json(list))).await.unwrap();
        set_handler(State(state.clone()), Ok(Json(map))).await.unwrap();

        let response = get_list_elem_handler(State(state.clone()), Ok(Path(("list".to_string(), 1))))
            .await
            .unwrap();
        assert_eq!(response.value, Value::from("b"));

        let response = get_map_elem_value_handler(
            State(state.clone()),
            Ok(Path(("map".to_string(), "k".to_string()))),
        )
        .await
        .unwrap();
        assert_eq!(response.value, Value::from("v"));

        let result = get_list_elem_handler(State(state), Ok(Path(("list".to_string(), -1)))).await;
        assert!(matches!(
            result,
            Err(ApiError::Cache(CacheError::IndexOutOfRange))
        ));
    }

    #[tokio::test]
    async fn test_remove_and_keys_handler() {
        let state = test_state();

        let req = set_request("to_remove", serde_json::json!("value"), Duration::hours(1));
        set_handler(State(state.clone()), Ok(Json(req))).await.unwrap();
        assert_eq!(keys_handler(State(state.clone())).await.keys, vec!["to_remove"]);

        let status = remove_handler(State(state.clone()), Ok(Path("to_remove".to_string()))).await;
        assert_eq!(status.unwrap(), StatusCode::OK);
        assert!(keys_handler(State(state.clone())).await.keys.is_empty());

        // Removing an absent key still succeeds.
        let status = remove_handler(State(state), Ok(Path("to_remove".to_string()))).await;
        assert_eq!(status.unwrap(), StatusCode::OK);
    }
}
