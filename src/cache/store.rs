//! Cache Store Module
//!
//! The key → entry map and all lookups against it. Locking is layered on top by
//! [`Cache`](crate::cache::Cache); everything here assumes exclusive or shared
//! access has already been granted.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheEntry, Value};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Key-value storage with TTL support.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a value under `key`, replacing any previous entry wholesale.
    ///
    /// The value is validated before the map is touched, so a rejected value
    /// leaves the previous entry for `key` in place.
    pub fn set<V>(&mut self, key: impl Into<String>, value: V, ttl: Duration) -> Result<()>
    where
        V: TryInto<Value>,
        CacheError: From<V::Error>,
    {
        let value = value.try_into()?;
        self.insert(key.into(), value, ttl);
        Ok(())
    }

    // == Insert ==
    /// Stores an already validated value, replacing any previous entry.
    pub fn insert(&mut self, key: String, value: Value, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl, Utc::now());
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Distinguishes a key that is absent from one that is present but past
    /// its expiration and not yet reaped.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.get_at(key, Utc::now())
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Result<&Value> {
        let entry = self.entries.get(key).ok_or(CacheError::ElementNotFound)?;
        if entry.is_expired_at(now) {
            return Err(CacheError::ElementExpired);
        }
        Ok(&entry.value)
    }

    // == Get List Element ==
    /// Returns element `index` of the list stored under `key`.
    pub fn get_list_elem(&self, key: &str, index: i64) -> Result<&Value> {
        let items = self.get(key)?.as_list().ok_or(CacheError::NotSliceValue)?;
        usize::try_from(index)
            .ok()
            .and_then(|index| items.get(index))
            .ok_or(CacheError::IndexOutOfRange)
    }

    // == Get Map Element ==
    /// Returns the value stored under `map_key` in the dict stored under `key`.
    pub fn get_map_elem_value(&self, key: &str, map_key: &str) -> Result<&Value> {
        let map = self.get(key)?.as_dict().ok_or(CacheError::NotMapValue)?;
        map.get(map_key).ok_or(CacheError::MapElementNotFound)
    }

    // == Remove ==
    /// Removes an entry by key. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Keys ==
    /// Snapshot of every key physically present, expired or not.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Cleanup Expired ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of entries physically held, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
