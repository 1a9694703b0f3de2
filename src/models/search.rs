//! Search query model.

use serde::{Deserialize, Serialize};

/// Search query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Main search query string
    pub query: String,

    /// Maximum number of results to return
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: 10,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_results() {
        let query = SearchQuery::new("cancer");
        assert_eq!(query.query, "cancer");
        assert_eq!(query.max_results, 10);
    }

    #[test]
    fn test_max_results_builder() {
        let query = SearchQuery::new("cancer").max_results(25);
        assert_eq!(query.max_results, 25);
    }
}
