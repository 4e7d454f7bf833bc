//! Shared Cache Module
//!
//! Cloneable async handle over a single [`CacheStore`] used by request
//! handlers and the background sweep.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Thread-safe handle to one cache store.
///
/// Every method holds the lock for the whole operation, so no caller ever
/// observes a partially applied update.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for SharedCache<V> {
    fn default() -> Self {
        Self::new(CacheStore::new())
    }
}

impl<V> SharedCache<V> {
    /// Wraps an existing store.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Stores `value` under `key` for `ttl_ms` milliseconds.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl_ms: u64) {
        let key = key.into();
        debug!(key = %key, ttl_ms, "cache set");
        self.inner.write().await.set(key, value, ttl_ms);
    }

    /// Stores `value` unless the cache was invalidated since `generation`.
    pub async fn set_if_generation(
        &self,
        key: impl Into<String>,
        value: V,
        ttl_ms: u64,
        generation: u64,
    ) -> bool {
        let key = key.into();
        let written = self
            .inner
            .write()
            .await
            .set_if_generation(key.as_str(), value, ttl_ms, generation);
        if written {
            debug!(key = %key, ttl_ms, "cache set");
        } else {
            debug!(key = %key, "cache set skipped, invalidated during fetch");
        }
        written
    }

    /// Current invalidation generation.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation()
    }

    /// Removes the entry under exactly `key`.
    pub async fn remove(&self, key: &str) -> bool {
        self.inner.write().await.remove(key)
    }

    /// Removes entries whose key contains `pattern`, or all entries.
    pub async fn invalidate(&self, pattern: Option<&str>) -> usize {
        let removed = self.inner.write().await.invalidate(pattern);
        info!(
            pattern = pattern.unwrap_or("*"),
            removed, "cache invalidated"
        );
        removed
    }

    /// Sweeps stale entries, returning how many were removed.
    pub async fn cleanup(&self) -> usize {
        self.inner.write().await.cleanup()
    }

    /// Number of entries physically held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// True when the store holds nothing.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Runs `f` with exclusive access to the underlying store.
    pub(crate) async fn with_store<R>(&self, f: impl FnOnce(&mut CacheStore<V>) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut *guard)
    }
}

impl<V: Clone> SharedCache<V> {
    /// Returns the live value for `key`. Write-locks because a stale hit is
    /// deleted on the spot.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }
}

impl<V: Serialize> SharedCache<V> {
    /// Snapshot of the store's occupancy.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}
