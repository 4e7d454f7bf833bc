//! Read-through cached accessors for directory lookups.
//!
//! Each lookup derives a namespaced key, serves a live cached value when
//! there is one, and otherwise fetches from the source and caches the result.
//! Missing businesses and source failures are not cached, and neither is a
//! fetch that an invalidation overtook.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::directory::keys::{
    business_key, search_key, BUSINESS_NAMESPACE, CATEGORIES_KEY, SEARCH_NAMESPACE,
};
use crate::directory::{Business, CachedValue, Category, DirectorySource, SearchFilters};
use crate::error::{DirectoryError, Result};

/// Per-kind time-to-live, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub business_ms: u64,
    pub search_ms: u64,
    pub categories_ms: u64,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            business_ms: 5 * 60 * 1000,
            search_ms: 2 * 60 * 1000,
            categories_ms: 30 * 60 * 1000,
        }
    }
}

/// Directory reads memoized in a shared cache.
pub struct CachedDirectory {
    cache: SharedCache<CachedValue>,
    source: Arc<dyn DirectorySource>,
    ttls: CacheTtls,
}

impl Clone for CachedDirectory {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            source: Arc::clone(&self.source),
            ttls: self.ttls,
        }
    }
}

impl CachedDirectory {
    pub fn new(
        cache: SharedCache<CachedValue>,
        source: Arc<dyn DirectorySource>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            cache,
            source,
            ttls,
        }
    }

    /// The cache these accessors read through.
    pub fn cache(&self) -> &SharedCache<CachedValue> {
        &self.cache
    }

    /// One business by id, or `NotFound`.
    pub async fn business(&self, id: &str) -> Result<Business> {
        let key = business_key(id);
        match self.lookup(&key).await {
            Some(CachedValue::Business(business)) => return Ok(business),
            Some(other) => self.evict_mismatch(&key, &other).await,
            None => {}
        }

        let generation = self.cache.generation().await;
        let business = self
            .source
            .fetch_business(id)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(format!("business '{}'", id)))?;
        self.cache
            .set_if_generation(
                key,
                CachedValue::Business(business.clone()),
                self.ttls.business_ms,
                generation,
            )
            .await;
        Ok(business)
    }

    /// Businesses matching `query` and `filters`.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Business>> {
        let key = search_key(query, filters);
        match self.lookup(&key).await {
            Some(CachedValue::SearchResults(results)) => return Ok(results),
            Some(other) => self.evict_mismatch(&key, &other).await,
            None => {}
        }

        let generation = self.cache.generation().await;
        let results = self.source.search(query, filters).await?;
        self.cache
            .set_if_generation(
                key,
                CachedValue::SearchResults(results.clone()),
                self.ttls.search_ms,
                generation,
            )
            .await;
        Ok(results)
    }

    /// The full category listing.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        match self.lookup(CATEGORIES_KEY).await {
            Some(CachedValue::Categories(categories)) => return Ok(categories),
            Some(other) => self.evict_mismatch(CATEGORIES_KEY, &other).await,
            None => {}
        }

        let generation = self.cache.generation().await;
        let categories = self.source.categories().await?;
        self.cache
            .set_if_generation(
                CATEGORIES_KEY,
                CachedValue::Categories(categories.clone()),
                self.ttls.categories_ms,
                generation,
            )
            .await;
        Ok(categories)
    }

    /// Drops the cached profile for one business.
    pub async fn invalidate_business(&self, id: &str) -> bool {
        self.cache.remove(&business_key(id)).await
    }

    /// Drops every cached profile.
    pub async fn invalidate_businesses(&self) -> usize {
        let pattern = format!("{}:", BUSINESS_NAMESPACE);
        self.cache.invalidate(Some(pattern.as_str())).await
    }

    /// Drops every cached search result set.
    pub async fn invalidate_search(&self) -> usize {
        let pattern = format!("{}:", SEARCH_NAMESPACE);
        self.cache.invalidate(Some(pattern.as_str())).await
    }

    /// Drops everything.
    pub async fn invalidate_all(&self) -> usize {
        self.cache.invalidate(None).await
    }

    async fn lookup(&self, key: &str) -> Option<CachedValue> {
        let value = self.cache.get(key).await;
        if value.is_some() {
            debug!(key, "cache hit");
        } else {
            debug!(key, "cache miss");
        }
        value
    }

    // Only reachable if something else wrote a different kind under a
    // directory key; treat it as a miss.
    async fn evict_mismatch(&self, key: &str, found: &CachedValue) {
        warn!(key, ?found, "unexpected cached value kind, refetching");
        self.cache.remove(key).await;
    }
}
