//! Tavily-backed web searcher.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::traits::searcher::{SearchResult, WebSearcher};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Uses Tavily's search API for open-world URL discovery.
pub struct TavilyWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    timeout: Duration,
    /// Default number of results to return.
    pub default_limit: usize,
}

impl TavilyWebSearcher {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(api_key, &DiscoveryConfig::default())
    }

    /// Request timeout and result limit taken from the run configuration.
    pub fn from_config(api_key: impl Into<String>, config: &DiscoveryConfig) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            client: reqwest::Client::new(),
            timeout: config.request_timeout(),
            default_limit: config.max_results_per_query,
        }
    }

    /// Share an existing client (user agent, redirect policy).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(serde::Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(serde::Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyResult>,
}

#[derive(serde::Deserialize)]
struct TavilyResult {
    url: String,
    title: Option<String>,
    content: Option<String>,
}

fn into_results(response: TavilyResponse) -> Vec<SearchResult> {
    response
        .results
        .into_iter()
        .filter_map(|r| {
            let url = Url::parse(&r.url).ok()?;
            let mut result = SearchResult::new(url);
            if let Some(title) = r.title {
                result = result.with_title(title);
            }
            if let Some(content) = r.content {
                result = result.with_snippet(content);
            }
            Some(result)
        })
        .collect()
}

#[async_trait]
impl WebSearcher for TavilyWebSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_with_limit(query, self.default_limit).await
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let search_error = |reason: String| DiscoveryError::Search {
            query: query.to_string(),
            reason,
        };

        let request = TavilyRequest {
            query,
            search_depth: "basic",
            max_results: limit,
        };

        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .timeout(self.timeout)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| search_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(search_error(format!("Tavily API error: {}", response.status())));
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| search_error(e.to_string()))?;

        let mut results = into_results(body);
        results.truncate(limit);
        debug!(query = %query, results = results.len(), "Tavily search complete");
        Ok(results)
    }

    fn name(&self) -> &str {
        "tavily"
    }
}
