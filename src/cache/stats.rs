//! Cache Statistics Module
//!
//! Read-only snapshot of the store's occupancy and approximate footprint.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the cache contents.
///
/// `active_entries + expired_entries == total_entries` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries physically held, live or not
    pub total_entries: usize,
    /// Entries past their TTL that no read or sweep has removed yet
    pub expired_entries: usize,
    /// Entries still within their TTL
    pub active_entries: usize,
    /// Key bytes plus JSON-encoded value bytes across all entries
    pub approximate_size_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Entry ==
    /// Accounts for one entry in the snapshot.
    pub fn record_entry(&mut self, expired: bool, size_bytes: usize) {
        self.total_entries += 1;
        if expired {
            self.expired_entries += 1;
        } else {
            self.active_entries += 1;
        }
        self.approximate_size_bytes += size_bytes;
    }

    // == Expired Ratio ==
    /// Fraction of held entries that are stale, or 0.0 for an empty cache.
    pub fn expired_ratio(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            self.expired_entries as f64 / self.total_entries as f64
        }
    }
}
