//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::Value;
use crate::error::CacheError;

/// Response body for every value read (get, list element, map element)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueResponse {
    pub value: Value,
}

impl ValueResponse {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

/// Response body for GET /keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable message
    pub error: String,
    /// Machine readable error kind, see [`CacheError::code`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Creates an ErrorResponse without an error kind
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn from_error(err: &CacheError) -> Self {
        Self {
            error: err.to_string(),
            code: Some(err.code().to_string()),
        }
    }

    /// Rebuilds the typed cache error, if the response carried a known kind.
    pub fn cache_error(&self) -> Option<CacheError> {
        self.code.as_deref().and_then(CacheError::from_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_response_serialize() {
        let resp = ValueResponse::new(Value::List(vec!["a".into(), "b".into()]));
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"value":["a","b"]}"#);
    }

    #[test]
    fn test_keys_response_serialize() {
        let resp = KeysResponse::new(vec!["k1".to_string()]);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"keys":["k1"]}"#);
    }

    #[test]
    fn test_error_response_from_error() {
        let resp = ErrorResponse::from_error(&CacheError::ElementExpired);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("element_expired"));
        assert!(json.contains("has already expired"));
        assert_eq!(resp.cache_error(), Some(CacheError::ElementExpired));
    }

    #[test]
    fn test_error_response_without_code() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Something went wrong"}"#);

        let back: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cache_error(), None);
    }
}
