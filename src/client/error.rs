//! Error types for the cache client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::error::CacheError;

/// Errors that can occur when using the cache client.
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with one of the cache's own errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Connection, timeout or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response that did not carry a known cache error
    #[error("Error response '{message}', status code: '{status}'")]
    Status { status: StatusCode, message: String },

    /// The server address does not form a usable base URL
    #[error("Invalid server address: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the cache error kind, if this is one.
    pub fn cache_error(&self) -> Option<&CacheError> {
        match self {
            Error::Cache(err) => Some(err),
            _ => None,
        }
    }
}
