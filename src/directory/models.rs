//! Directory records and the typed cache payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A listed health/wellness business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// URL-safe identifier, e.g. `sf-yoga`
    pub id: String,
    pub name: String,
    pub category: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Average review rating, absent until the first review
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub verified: bool,
}

/// A category with the number of businesses listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub business_count: usize,
}

/// Search filters keyed by field name.
///
/// Sorted map, so equal filter sets serialize identically whatever order
/// they were built in.
pub type SearchFilters = BTreeMap<String, String>;

/// Everything the directory keeps in the shared cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CachedValue {
    Business(Business),
    SearchResults(Vec<Business>),
    Categories(Vec<Category>),
}
