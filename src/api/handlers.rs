//! API Handlers
//!
//! HTTP request handlers for each directory service endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::directory::{
    Business, CacheTtls, CachedDirectory, CachedValue, Category, DirectorySource, SearchFilters,
};
use crate::error::{DirectoryError, Result};
use crate::models::{
    CleanupResponse, HealthResponse, InvalidateRequest, InvalidateResponse, SearchParams,
    SearchResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cached directory and the operational endpoints share one cache.
#[derive(Clone)]
pub struct AppState {
    /// Read-through directory accessors
    pub directory: CachedDirectory,
}

impl AppState {
    /// Creates a new AppState over `source` with its own cache.
    pub fn new(source: Arc<dyn DirectorySource>, ttls: CacheTtls) -> Self {
        Self::with_cache(SharedCache::default(), source, ttls)
    }

    /// Creates a new AppState over an existing cache handle.
    pub fn with_cache(
        cache: SharedCache<CachedValue>,
        source: Arc<dyn DirectorySource>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            directory: CachedDirectory::new(cache, source, ttls),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, source: Arc<dyn DirectorySource>) -> Self {
        Self::new(source, config.cache_ttls())
    }

    /// The cache behind the directory.
    pub fn cache(&self) -> &SharedCache<CachedValue> {
        self.directory.cache()
    }
}

/// Handler for GET /businesses/:id
pub async fn business_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Business>> {
    let business = state.directory.business(&id).await?;
    Ok(Json(business))
}

/// Handler for GET /search
///
/// `q` is the text query; remaining query parameters are filters.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(raw): Query<SearchFilters>,
) -> Result<Json<SearchResponse>> {
    let params = SearchParams::from(raw);
    let results = state
        .directory
        .search(&params.query, &params.filters)
        .await?;

    Ok(Json(SearchResponse::new(
        params.query,
        params.filters,
        results,
    )))
}

/// Handler for GET /categories
pub async fn categories_handler(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.directory.categories().await?;
    Ok(Json(categories))
}

/// Handler for GET /cache/stats
///
/// Returns a snapshot of the cache's occupancy.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache().stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for POST /cache/invalidate
///
/// Drops keys containing `pattern`, or the whole cache when it is absent.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<InvalidateRequest>, JsonRejection>,
) -> Result<Json<InvalidateResponse>> {
    let Json(req) =
        body.map_err(|rejection| DirectoryError::InvalidRequest(rejection.body_text()))?;

    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(DirectoryError::InvalidRequest(error_msg));
    }

    let removed = state.cache().invalidate(req.pattern.as_deref()).await;
    Ok(Json(InvalidateResponse::new(req.pattern, removed)))
}

/// Handler for POST /cache/cleanup
///
/// Runs a sweep now instead of waiting for the background task.
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let removed = state.cache().cleanup().await;
    Json(CleanupResponse { removed })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
