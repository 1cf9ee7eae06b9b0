//! Web searcher trait for query expansion.
//!
//! Search-driven adapters turn keyword queries into candidate page URLs;
//! the adapter decides how many to fetch.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use url::Url;

use crate::error::Result;

/// A discovered URL from web search with metadata.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The discovered URL.
    pub url: Url,

    /// Title of the page (if available from search results).
    pub title: Option<String>,

    /// Snippet/description from search results.
    pub snippet: Option<String>,
}

impl SearchResult {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: None,
            snippet: None,
        }
    }

    /// Create from a URL string.
    pub fn from_url(url: &str) -> Option<Self> {
        Url::parse(url).ok().map(Self::new)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Web search for open-world discovery.
///
/// # Implementations
///
/// - `TavilyWebSearcher` - Tavily API (needs a key)
/// - `DuckDuckGoSearcher` - DuckDuckGo HTML endpoint (no key)
/// - `MockWebSearcher` - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web for URLs relevant to the query.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Search with a specific result limit.
    async fn search_with_limit(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let mut results = self.search(query).await?;
        results.truncate(limit);
        Ok(results)
    }

    /// Provider name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Mock web searcher for testing.
#[derive(Default)]
pub struct MockWebSearcher {
    results: RwLock<HashMap<String, Vec<SearchResult>>>,
    failing: RwLock<Vec<String>>,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Add URL strings as results.
    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let results: Vec<_> = urls
            .iter()
            .filter_map(|u| SearchResult::from_url(u))
            .collect();
        self.with_results(query, results)
    }

    /// Make a query fail with a provider error.
    pub fn with_failure(self, query: &str) -> Self {
        self.failing.write().unwrap().push(query.to_string());
        self
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if self.failing.read().unwrap().iter().any(|q| q == query) {
            return Err(crate::error::DiscoveryError::Search {
                query: query.to_string(),
                reason: "mock failure".to_string(),
            });
        }
        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_web_searcher() {
        let searcher = MockWebSearcher::new().with_urls(
            "Saskatoon mural artist",
            &["https://dtnyxe.ca/murals", "https://example.com/art"],
        );

        let results = searcher.search("Saskatoon mural artist").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url.as_str(), "https://dtnyxe.ca/murals");
        assert!(searcher.search("unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_with_limit() {
        let searcher = MockWebSearcher::new().with_urls(
            "query",
            &["https://a.com", "https://b.com", "https://c.com", "https://d.com"],
        );

        let results = searcher.search_with_limit("query", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let searcher = MockWebSearcher::new().with_failure("broken");
        assert!(searcher.search("broken").await.is_err());
    }
}
