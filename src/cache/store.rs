//! Cache Store Module
//!
//! Key-value map with per-entry TTL. Staleness is enforced twice: a read
//! that meets a stale entry drops it, and `cleanup` sweeps every stale entry.
//! Either way a stale entry is never returned.
//!
//! Every `remove` and `invalidate` bumps a generation counter. A writer that
//! read the generation before a slow fetch can use `set_if_generation` so an
//! invalidation issued during the fetch is not undone by the write.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// TTL cache over values of type `V`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Bumped on every explicit removal or invalidation
    generation: u64,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            generation: 0,
        }
    }

    // == Set ==
    /// Stores a value under `key` for `ttl_ms` milliseconds.
    ///
    /// An existing entry under the same key is replaced and its clock reset.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_ms: u64) {
        self.set_at(key, value, ttl_ms, current_timestamp_ms());
    }

    /// Same as [`CacheStore::set`] with an explicit creation time.
    pub fn set_at(&mut self, key: impl Into<String>, value: V, ttl_ms: u64, now: u64) {
        self.entries
            .insert(key.into(), CacheEntry::with_created_at(value, ttl_ms, now));
    }

    /// Stores the value only if no removal or invalidation happened since
    /// `generation` was read. Returns whether the value was written.
    pub fn set_if_generation(
        &mut self,
        key: impl Into<String>,
        value: V,
        ttl_ms: u64,
        generation: u64,
    ) -> bool {
        if self.generation != generation {
            return false;
        }
        self.set(key, value, ttl_ms);
        true
    }

    // == Generation ==
    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Remove ==
    /// Removes the entry under exactly `key`, live or not.
    ///
    /// Returns true if an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.generation += 1;
        self.entries.remove(key).is_some()
    }

    // == Invalidate ==
    /// Removes entries by key substring, or everything when `pattern` is None.
    ///
    /// Matching is a plain substring test, not a glob or regex.
    /// Returns the number of entries removed.
    pub fn invalidate(&mut self, pattern: Option<&str>) -> usize {
        self.generation += 1;
        let before = self.entries.len();
        match pattern {
            None => self.entries.clear(),
            Some(pattern) => self.entries.retain(|key, _| !key.contains(pattern)),
        }
        before - self.entries.len()
    }

    // == Cleanup Expired ==
    /// Removes all entries stale as of now.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        self.cleanup_at(current_timestamp_ms())
    }

    /// Same as [`CacheStore::cleanup`] evaluated at `now`.
    pub fn cleanup_at(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Contains ==
    /// Returns true if `key` holds an entry that is live at `now`.
    ///
    /// Does not remove stale entries.
    pub fn contains_live_at(&self, key: &str, now: u64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Length ==
    /// Returns the number of entries physically held, including stale ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// A stale entry is removed and reported as absent. A hit does not
    /// extend the entry's lifetime.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Same as [`CacheStore::get`] evaluated at `now`.
    pub fn get_at(&mut self, key: &str, now: u64) -> Option<V> {
        let expired = self.entries.get(key)?.is_expired_at(now);
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }
}

impl<V: Serialize> CacheStore<V> {
    // == Stats ==
    /// Returns a snapshot of occupancy as of now. Never mutates the store.
    pub fn stats(&self) -> CacheStats {
        self.stats_at(current_timestamp_ms())
    }

    /// Same as [`CacheStore::stats`] evaluated at `now`.
    pub fn stats_at(&self, now: u64) -> CacheStats {
        let mut stats = CacheStats::new();
        for (key, entry) in &self.entries {
            let value_bytes = serde_json::to_vec(&entry.value)
                .map(|bytes| bytes.len())
                .unwrap_or(0);
            stats.record_entry(entry.is_expired_at(now), key.len() + value_bytes);
        }
        stats
    }
}
