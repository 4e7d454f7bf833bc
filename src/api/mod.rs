//! API Module
//!
//! HTTP handlers and routing for the directory service REST API.
//!
//! # Endpoints
//! - `GET /businesses/:id` - Business profile (cached)
//! - `GET /search` - Search results (cached)
//! - `GET /categories` - Category listing (cached)
//! - `GET /cache/stats` - Cache statistics
//! - `POST /cache/invalidate` - Drop cached entries by key substring
//! - `POST /cache/cleanup` - Sweep expired entries now
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
