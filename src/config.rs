//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::directory::CacheTtls;
use crate::tasks::DEFAULT_CLEANUP_INTERVAL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// TTL for a single business profile, in milliseconds
    pub business_ttl_ms: u64,
    /// TTL for a search result set, in milliseconds
    pub search_ttl_ms: u64,
    /// TTL for the category listing, in milliseconds
    pub categories_ttl_ms: u64,
    /// Optional JSON file seeding the in-memory directory
    pub directory_data: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `BUSINESS_TTL_MS` - Business profile TTL (default: 300000)
    /// - `SEARCH_TTL_MS` - Search results TTL (default: 120000)
    /// - `CATEGORIES_TTL_MS` - Category listing TTL (default: 1800000)
    /// - `DIRECTORY_DATA` - Path to a seed JSON file (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            business_ttl_ms: env_or("BUSINESS_TTL_MS", defaults.business_ttl_ms),
            search_ttl_ms: env_or("SEARCH_TTL_MS", defaults.search_ttl_ms),
            categories_ttl_ms: env_or("CATEGORIES_TTL_MS", defaults.categories_ttl_ms),
            directory_data: env::var("DIRECTORY_DATA")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Sweep interval as a Duration.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }

    /// Per-kind TTLs for the cached accessors.
    pub fn cache_ttls(&self) -> CacheTtls {
        CacheTtls {
            business_ms: self.business_ttl_ms,
            search_ms: self.search_ttl_ms,
            categories_ms: self.categories_ttl_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let ttls = CacheTtls::default();
        Self {
            server_port: 3000,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL.as_secs(),
            business_ttl_ms: ttls.business_ms,
            search_ttl_ms: ttls.search_ms,
            categories_ttl_ms: ttls.categories_ms,
            directory_data: None,
        }
    }
}

/// Reads and parses `key`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
