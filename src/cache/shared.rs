//! Shared Cache Handle
//!
//! Puts a [`CacheStore`] behind a single reader/writer lock and owns its reaper.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStore, Value};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

#[derive(Debug)]
enum ReaperSlot {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}

/// Thread-safe cache handle.
///
/// Cloning is cheap; all clones share the same map and reaper. Reads take the
/// shared lock, writes the exclusive one, and the lock is the only await point
/// in every accessor.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<RwLock<CacheStore>>,
    cleaning_interval: Duration,
    shutdown: watch::Receiver<bool>,
    reaper: Arc<Mutex<ReaperSlot>>,
}

impl Cache {
    /// Creates an empty cache.
    ///
    /// The reaper is not running until [`Cache::start`] is called. It stops once
    /// `shutdown` turns `true` or its sender is dropped.
    pub fn new(cleaning_interval: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
            cleaning_interval,
            shutdown,
            reaper: Arc::new(Mutex::new(ReaperSlot::Idle)),
        }
    }

    // == Reaper Lifecycle ==
    /// Starts the background reaper.
    ///
    /// A cache has exactly one reaper: a second call fails with
    /// [`CacheError::ReaperAlreadyStarted`], even after the first one stopped.
    pub async fn start(&self) -> Result<()> {
        let mut slot = self.reaper.lock().await;
        if !matches!(*slot, ReaperSlot::Idle) {
            return Err(CacheError::ReaperAlreadyStarted);
        }

        let handle = spawn_reaper(
            self.store.clone(),
            self.cleaning_interval,
            self.shutdown.clone(),
        );
        *slot = ReaperSlot::Running(handle);
        Ok(())
    }

    /// Waits for the reaper to exit after the shutdown signal fired.
    ///
    /// Returns immediately when the reaper was never started or was already joined.
    pub async fn stopped(&self) {
        let mut slot = self.reaper.lock().await;
        if let ReaperSlot::Running(handle) = &mut *slot {
            if let Err(e) = handle.await {
                debug!("Reaper task ended abnormally: {}", e);
            }
            *slot = ReaperSlot::Stopped;
        }
    }

    // == Accessors ==
    /// Stores `value` under `key` for `ttl`. See [`CacheStore::set`].
    pub async fn set<V>(&self, key: impl Into<String>, value: V, ttl: chrono::Duration) -> Result<()>
    where
        V: TryInto<Value>,
        CacheError: From<V::Error>,
    {
        // Validate outside the lock.
        let value: Value = value.try_into()?;
        self.store.write().await.insert(key.into(), value, ttl);
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Value> {
        self.store.read().await.get(key).cloned()
    }

    pub async fn get_list_elem(&self, key: &str, index: i64) -> Result<Value> {
        self.store.read().await.get_list_elem(key, index).cloned()
    }

    pub async fn get_map_elem_value(&self, key: &str, map_key: &str) -> Result<Value> {
        self.store
            .read()
            .await
            .get_map_elem_value(key, map_key)
            .cloned()
    }

    /// Removes `key`; absent keys are ignored.
    pub async fn remove(&self, key: &str) {
        self.store.write().await.remove(key);
    }

    /// Every key currently held, including expired ones not yet reaped.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    /// Number of entries physically held.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
