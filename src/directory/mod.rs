//! Directory Module
//!
//! Business directory lookups served through the shared TTL cache.

mod accessors;
pub mod keys;
mod models;
mod source;

pub use accessors::{CacheTtls, CachedDirectory};
pub use models::{Business, CachedValue, Category, SearchFilters};
pub use source::{DirectorySource, InMemoryDirectory};
