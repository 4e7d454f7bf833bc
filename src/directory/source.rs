//! Directory data source.
//!
//! The cached accessors only see the [`DirectorySource`] trait. The
//! production backing store lives behind it; [`InMemoryDirectory`] serves
//! the binary's seed data and the tests.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::directory::{Business, Category, SearchFilters};
use crate::error::{DirectoryError, Result};

/// Read side of the business directory.
#[async_trait]
pub trait DirectorySource: Send + Sync + 'static {
    /// Looks up one business. `Ok(None)` when no such id exists.
    async fn fetch_business(&self, id: &str) -> Result<Option<Business>>;

    /// Businesses matching `query` and every filter in `filters`.
    async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Business>>;

    /// All categories with their business counts.
    async fn categories(&self) -> Result<Vec<Category>>;
}

/// Shape of the seed file: `{"businesses": [...]}`.
#[derive(Debug, Deserialize)]
struct DirectoryFile {
    businesses: Vec<Business>,
}

/// Directory held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    businesses: Vec<Business>,
}

impl InMemoryDirectory {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self { businesses }
    }

    /// Parses a seed document.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DirectoryFile = serde_json::from_str(json)
            .map_err(|e| DirectoryError::Source(format!("invalid directory data: {}", e)))?;
        Ok(Self::new(file.businesses))
    }

    /// Loads a seed document from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            DirectoryError::Source(format!("cannot read {}: {}", path.display(), e))
        })?;
        let directory = Self::from_json(&json)?;
        info!(
            "Loaded {} businesses from {}",
            directory.businesses.len(),
            path.display()
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }
}

/// A parsed set of search filters.
#[derive(Debug, Default)]
struct Criteria {
    category: Option<String>,
    city: Option<String>,
    state: Option<String>,
    verified: Option<bool>,
    min_rating: Option<f64>,
}

impl Criteria {
    fn parse(filters: &SearchFilters) -> Result<Self> {
        let mut criteria = Criteria::default();
        for (key, value) in filters {
            match key.as_str() {
                "category" => criteria.category = Some(value.to_lowercase()),
                "city" => criteria.city = Some(value.to_lowercase()),
                "state" => criteria.state = Some(value.to_lowercase()),
                "verified" => {
                    let verified = value.parse().map_err(|_| {
                        DirectoryError::InvalidRequest(format!(
                            "verified must be true or false, got '{}'",
                            value
                        ))
                    })?;
                    criteria.verified = Some(verified);
                }
                "min_rating" => {
                    let rating = value.parse().map_err(|_| {
                        DirectoryError::InvalidRequest(format!(
                            "min_rating must be a number, got '{}'",
                            value
                        ))
                    })?;
                    criteria.min_rating = Some(rating);
                }
                other => {
                    return Err(DirectoryError::InvalidRequest(format!(
                        "unknown search filter '{}'",
                        other
                    )))
                }
            }
        }
        Ok(criteria)
    }

    fn matches(&self, business: &Business) -> bool {
        let eq = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .map_or(true, |w| actual.to_lowercase() == w)
        };

        eq(&self.category, &business.category)
            && eq(&self.city, &business.city)
            && eq(&self.state, &business.state)
            && self.verified.map_or(true, |v| business.verified == v)
            && self
                .min_rating
                .map_or(true, |min| business.rating.is_some_and(|r| r >= min))
    }
}

fn matches_query(business: &Business, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    [&business.name, &business.category, &business.description]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

#[async_trait]
impl DirectorySource for InMemoryDirectory {
    async fn fetch_business(&self, id: &str) -> Result<Option<Business>> {
        Ok(self.businesses.iter().find(|b| b.id == id).cloned())
    }

    async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Business>> {
        let criteria = Criteria::parse(filters)?;
        let query = query.trim().to_lowercase();

        let mut results: Vec<Business> = self
            .businesses
            .iter()
            .filter(|b| matches_query(b, &query) && criteria.matches(b))
            .cloned()
            .collect();

        // Highest rated first, unrated last, then by name
        results.sort_by(|a, b| {
            b.rating
                .unwrap_or(f64::MIN)
                .total_cmp(&a.rating.unwrap_or(f64::MIN))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(results)
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for business in &self.businesses {
            *counts.entry(business.category.as_str()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(name, business_count)| Category {
                name: name.to_string(),
                business_count,
            })
            .collect())
    }
}
