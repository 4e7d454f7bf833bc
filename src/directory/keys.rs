//! Cache key derivation for directory lookups.
//!
//! Keys are `<namespace>:<params>` so a whole namespace can be dropped with
//! one substring invalidation.

use crate::directory::SearchFilters;

pub const BUSINESS_NAMESPACE: &str = "business";
pub const SEARCH_NAMESPACE: &str = "search";
pub const CATEGORIES_KEY: &str = "categories";

/// `business:<id>`
pub fn business_key(id: &str) -> String {
    format!("{}:{}", BUSINESS_NAMESPACE, id)
}

/// `search:<query>:<filters as JSON>`, filter keys in sorted order.
///
/// Search is case-insensitive, so the query and filter values are trimmed
/// and lowercased first.
pub fn search_key(query: &str, filters: &SearchFilters) -> String {
    let filters: SearchFilters = filters
        .iter()
        .map(|(k, v)| (k.clone(), v.trim().to_lowercase()))
        .collect();
    // A string-to-string map always serializes
    let filters = serde_json::to_string(&filters).unwrap_or_else(|_| "{}".to_string());
    format!(
        "{}:{}:{}",
        SEARCH_NAMESPACE,
        query.trim().to_lowercase(),
        filters
    )
}
