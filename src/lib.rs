//! Directory Cache - TTL caching for a local business directory
//!
//! Provides a per-entry TTL cache with substring invalidation and
//! read-through accessors for business, search and category lookups.

pub mod api;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::CleanupTask;
