//! Memory Cache - An in-memory TTL cache server
//!
//! Stores text, list and map values under string keys with an expiration,
//! exposed over a small HTTP API. Expired entries are unreadable immediately
//! and physically removed by a background reaper.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, Value};
pub use config::Config;
pub use error::CacheError;
