//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time-to-live in milliseconds, measured from `created_at`
    pub ttl_ms: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_ms` - TTL in milliseconds
    pub fn new(value: V, ttl_ms: u64) -> Self {
        Self::with_created_at(value, ttl_ms, current_timestamp_ms())
    }

    /// Creates a cache entry with an explicit creation timestamp.
    pub fn with_created_at(value: V, ttl_ms: u64, created_at: u64) -> Self {
        Self {
            value,
            created_at,
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is still live when exactly `ttl_ms` has
    /// elapsed, and expired one millisecond later. A `now` earlier than
    /// `created_at` counts as zero elapsed time.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.age_ms_at(now) > self.ttl_ms
    }

    // == Age ==
    /// Returns the milliseconds elapsed since creation as of `now`.
    pub fn age_ms_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds as of `now`, or 0 once expired.
    pub fn ttl_remaining_ms_at(&self, now: u64) -> u64 {
        self.ttl_ms.saturating_sub(self.age_ms_at(now))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A system clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), 60_000);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.ttl_ms, 60_000);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_created_at_is_now() {
        let before = current_timestamp_ms();
        let entry = CacheEntry::new(1u32, 1_000);
        let after = current_timestamp_ms();

        assert!(entry.created_at >= before);
        assert!(entry.created_at <= after);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::with_created_at("v", 300_000, 1_000);

        // Exactly ttl elapsed: still live
        assert!(!entry.is_expired_at(301_000));
        // One millisecond later: stale
        assert!(entry.is_expired_at(301_001));
    }

    #[test]
    fn test_zero_ttl_expires_after_one_ms() {
        let entry = CacheEntry::with_created_at("v", 0, 5_000);

        assert!(!entry.is_expired_at(5_000));
        assert!(entry.is_expired_at(5_001));
    }

    #[test]
    fn test_clock_behind_creation_keeps_entry_live() {
        let entry = CacheEntry::with_created_at("v", 10, 5_000);

        assert_eq!(entry.age_ms_at(1_000), 0);
        assert!(!entry.is_expired_at(1_000));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::with_created_at("v", 10_000, 1_000);

        assert_eq!(entry.ttl_remaining_ms_at(1_000), 10_000);
        assert_eq!(entry.ttl_remaining_ms_at(4_000), 7_000);
        assert_eq!(entry.ttl_remaining_ms_at(20_000), 0);
    }
}
