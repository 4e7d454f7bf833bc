//! Error types for the directory service
//!
//! Provides unified error handling using thiserror. Cache operations are
//! total and never produce these; they come from the directory source and
//! from request validation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Directory Error Enum ==
/// Unified error type for the directory service.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backing directory source failed
    #[error("Directory source error: {0}")]
    Source(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
            DirectoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DirectoryError::Source(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the directory service.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DirectoryError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DirectoryError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (DirectoryError::Source("x".into()), StatusCode::BAD_GATEWAY),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_display_includes_detail() {
        let err = DirectoryError::NotFound("business 'sf-yoga'".into());
        assert_eq!(err.to_string(), "Not found: business 'sf-yoga'");
    }
}
