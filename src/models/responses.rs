//! Response DTOs for the directory service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::directory::{Business, SearchFilters};

/// Response body for GET /search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Free-text query as applied
    pub query: String,
    /// Filters as applied
    pub filters: SearchFilters,
    /// Number of results
    pub count: usize,
    /// Matching businesses, best rated first
    pub results: Vec<Business>,
}

impl SearchResponse {
    /// Creates a new SearchResponse
    pub fn new(query: impl Into<String>, filters: SearchFilters, results: Vec<Business>) -> Self {
        Self {
            query: query.into(),
            filters,
            count: results.len(),
            results,
        }
    }
}

/// Response body for POST /cache/invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Pattern used, or null when the whole cache was cleared
    pub pattern: Option<String>,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(pattern: Option<String>, removed: usize) -> Self {
        Self { pattern, removed }
    }
}

/// Response body for POST /cache/cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    /// Number of expired entries swept
    pub removed: usize,
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Entries held, live or not
    pub total_entries: usize,
    /// Entries stale but not yet swept
    pub expired_entries: usize,
    /// Entries still within TTL
    pub active_entries: usize,
    /// Approximate memory footprint in bytes
    pub approximate_size_bytes: usize,
    /// expired_entries / total_entries
    pub expired_ratio: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            expired_ratio: stats.expired_ratio(),
            total_entries: stats.total_entries,
            expired_entries: stats.expired_entries,
            active_entries: stats.active_entries,
            approximate_size_bytes: stats.approximate_size_bytes,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_counts_results() {
        let resp = SearchResponse::new("yoga", SearchFilters::new(), Vec::new());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["query"], "yoga");
        assert_eq!(json["count"], 0);
        assert!(json["filters"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let json = serde_json::to_value(InvalidateResponse::new(None, 3)).unwrap();
        assert!(json["pattern"].is_null());
        assert_eq!(json["removed"], 3);
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new();
        stats.record_entry(false, 10);
        stats.record_entry(true, 10);

        let resp = StatsResponse::from(stats);
        assert_eq!(resp.total_entries, 2);
        assert!((resp.expired_ratio - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
