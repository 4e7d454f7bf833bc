//! Request and Response models for the directory service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{InvalidateRequest, SearchParams};
pub use responses::{
    CleanupResponse, ErrorResponse, HealthResponse, InvalidateResponse, SearchResponse,
    StatsResponse,
};
