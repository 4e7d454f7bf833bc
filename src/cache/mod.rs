//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL and substring invalidation.

mod entry;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;
