//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use thiserror::Error;

// == Cache Error Enum ==
/// Every failure the cache can report to a caller.
///
/// None of these are fatal; the store is left untouched whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Set received a value outside the text / list / map shapes
    #[error("invalid value type")]
    InvalidValueType,

    /// Key was never set, was removed, or has already been reaped
    #[error("element not found in cache")]
    ElementNotFound,

    /// Key is still present but its expiration time has passed
    #[error("element has already expired and will be removed on cache cleaning")]
    ElementExpired,

    /// List access on a value that is not a list
    #[error("value is not a slice")]
    NotSliceValue,

    /// Map access on a value that is not a map
    #[error("value is not a map")]
    NotMapValue,

    #[error("slice index out of range")]
    IndexOutOfRange,

    #[error("element not found in map")]
    MapElementNotFound,

    /// The reaper of this cache was already started once
    #[error("cache reaper has already been started")]
    ReaperAlreadyStarted,
}

impl CacheError {
    // == Wire Codes ==
    /// Stable identifier sent alongside the message so remote callers can
    /// rebuild the typed error.
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::InvalidValueType => "invalid_value_type",
            CacheError::ElementNotFound => "element_not_found",
            CacheError::ElementExpired => "element_expired",
            CacheError::NotSliceValue => "not_slice_value",
            CacheError::NotMapValue => "not_map_value",
            CacheError::IndexOutOfRange => "index_out_of_range",
            CacheError::MapElementNotFound => "map_element_not_found",
            CacheError::ReaperAlreadyStarted => "reaper_already_started",
        }
    }

    /// Inverse of [`CacheError::code`].
    pub fn from_code(code: &str) -> Option<Self> {
        let err = match code {
            "invalid_value_type" => CacheError::InvalidValueType,
            "element_not_found" => CacheError::ElementNotFound,
            "element_expired" => CacheError::ElementExpired,
            "not_slice_value" => CacheError::NotSliceValue,
            "not_map_value" => CacheError::NotMapValue,
            "index_out_of_range" => CacheError::IndexOutOfRange,
            "map_element_not_found" => CacheError::MapElementNotFound,
            "reaper_already_started" => CacheError::ReaperAlreadyStarted,
            _ => return None,
        };
        Some(err)
    }

    /// HTTP status used when this error is returned by the API.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::ElementNotFound
            | CacheError::ElementExpired
            | CacheError::MapElementNotFound => StatusCode::NOT_FOUND,
            CacheError::InvalidValueType
            | CacheError::NotSliceValue
            | CacheError::NotMapValue
            | CacheError::IndexOutOfRange => StatusCode::BAD_REQUEST,
            CacheError::ReaperAlreadyStarted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Conversions into `Value` that cannot fail still go through `TryInto`.
impl From<std::convert::Infallible> for CacheError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::from_error(&self));
        (self.status_code(), body).into_response()
    }
}

// == API Error ==
/// Failures surfaced by the HTTP layer: cache errors plus requests the
/// extractors could not decode.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Cache(err) => err.into_response(),
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
