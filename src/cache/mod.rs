//! Cache Module
//!
//! In-memory key-value storage with TTL expiration for text, list and map values.

mod entry;
mod shared;
mod store;
mod value;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::Cache;
pub use store::CacheStore;
pub use value::Value;
