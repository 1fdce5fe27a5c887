//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. They are
//! shared by the server handlers and the remote client.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{SetRequest, Ttl};
pub use responses::{ErrorResponse, KeysResponse, ValueResponse};
