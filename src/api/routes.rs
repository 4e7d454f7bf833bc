//! API Routes
//!
//! Configures the Axum router with all directory service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    business_handler, categories_handler, cleanup_handler, health_handler, invalidate_handler,
    search_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /businesses/:id` - Business profile
/// - `GET /search` - Search with `q` and filter parameters
/// - `GET /categories` - Category listing
/// - `GET /cache/stats` - Cache occupancy
/// - `POST /cache/invalidate` - Pattern invalidation
/// - `POST /cache/cleanup` - Immediate sweep
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/businesses/:id", get(business_handler))
        .route("/search", get(search_handler))
        .route("/categories", get(categories_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .route("/cache/cleanup", post(cleanup_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
