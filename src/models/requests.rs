//! Request DTOs for the directory service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::directory::SearchFilters;

/// Request body for POST /cache/invalidate
///
/// # Fields
/// - `pattern`: Substring selecting keys to drop; omit or null to clear all
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub pattern: Option<String>,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// An empty pattern would match every key, so it must be spelled as
    /// an absent pattern instead.
    pub fn validate(&self) -> Option<String> {
        match self.pattern.as_deref() {
            Some("") => Some("Pattern cannot be empty; omit it to clear the cache".to_string()),
            _ => None,
        }
    }
}

/// Query string for GET /search
///
/// `q` is the free-text query; every other parameter is a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub filters: SearchFilters,
}

impl From<SearchFilters> for SearchParams {
    fn from(mut params: SearchFilters) -> Self {
        let query = params.remove("q").unwrap_or_default();
        Self {
            query: query.trim().to_string(),
            filters: params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_request_deserialize() {
        let req: InvalidateRequest = serde_json::from_str(r#"{"pattern": "business"}"#).unwrap();
        assert_eq!(req.pattern.as_deref(), Some("business"));

        let req: InvalidateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pattern.is_none());

        let req: InvalidateRequest = serde_json::from_str(r#"{"pattern": null}"#).unwrap();
        assert!(req.pattern.is_none());
    }

    #[test]
    fn test_validate_empty_pattern() {
        let req = InvalidateRequest {
            pattern: Some(String::new()),
        };
        assert!(req.validate().is_some());
        assert!(InvalidateRequest::default().validate().is_none());
    }

    #[test]
    fn test_search_params_split_query_from_filters() {
        let mut raw = SearchFilters::new();
        raw.insert("q".into(), " yoga ".into());
        raw.insert("city".into(), "Austin".into());

        let params = SearchParams::from(raw);
        assert_eq!(params.query, "yoga");
        assert_eq!(params.filters.len(), 1);
        assert_eq!(params.filters["city"], "Austin");
    }

    #[test]
    fn test_search_params_without_query() {
        let params = SearchParams::from(SearchFilters::new());
        assert_eq!(params, SearchParams::default());
    }
}
