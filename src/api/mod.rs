//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /set` - Store a value under a key with a TTL
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /getListElem/:key/:index` - Retrieve a list element
//! - `GET /getMapElemValue/:key/:mapKey` - Retrieve a map element
//! - `DELETE /remove/:key` - Delete a key
//! - `GET /keys` - List all keys

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
