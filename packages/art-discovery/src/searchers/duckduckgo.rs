//! DuckDuckGo HTML-endpoint searcher (no API key).
//!
//! Requests go through a `PageFetcher`, so they share the politeness delay
//! with every other fetch of the run.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::error::{DiscoveryError, Result};
use crate::traits::fetcher::PageFetcher;
use crate::traits::searcher::{SearchResult, WebSearcher};

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Searches via DuckDuckGo's static HTML results page.
pub struct DuckDuckGoSearcher {
    fetcher: Arc<dyn PageFetcher>,
    default_limit: usize,
}

impl DuckDuckGoSearcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            default_limit: 10,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Results URL for a query.
    pub fn search_url(query: &str) -> String {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish();
        format!("{ENDPOINT}?{encoded}")
    }
}

/// Resolve a result href, unwrapping DuckDuckGo's `/l/?uddg=` redirects.
fn resolve_href(href: &str) -> Option<Url> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let url = Url::parse(&absolute).ok()?;

    let is_redirect = url
        .host_str()
        .map(|h| h.ends_with("duckduckgo.com"))
        .unwrap_or(false);
    if !is_redirect {
        return Some(url);
    }

    url.query_pairs()
        .find(|(k, _)| k == "uddg")
        .and_then(|(_, target)| Url::parse(&target).ok())
}

/// Pull result links out of a results page.
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    document
        .select(&result_sel)
        .filter_map(|block| {
            let link = block.select(&link_sel).next()?;
            let url = resolve_href(link.value().attr("href")?)?;
            let title = link.text().collect::<String>().trim().to_string();
            let mut result = SearchResult::new(url);
            if !title.is_empty() {
                result = result.with_title(title);
            }
            if let Some(snippet) = block.select(&snippet_sel).next() {
                result = result.with_snippet(snippet.text().collect::<String>().trim());
            }
            Some(result)
        })
        .collect()
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_with_limit(query, self.default_limit).await
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let page = self
            .fetcher
            .fetch(&Self::search_url(query))
            .await
            .map_err(|e| DiscoveryError::Search {
                query: query.to_string(),
                reason: e.to_string(),
            })?;

        let mut results = parse_results(&page.body);
        results.truncate(limit);
        debug!(query = %query, results = results.len(), "DuckDuckGo search complete");
        Ok(results)
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;

    const RESULTS_HTML: &str = r#"
        <div class="result">
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fdtnyxe.ca%2Fness-jacobson-murals%2F&rut=abc">Ness + Jacobson</a>
          <a class="result__snippet">Two new murals downtown</a>
        </div>
        <div class="result">
          <a class="result__a" href="https://www.saskatoon.ca/public-art">Public Art</a>
        </div>
        <div class="result"><a class="result__a">No href</a></div>
    "#;

    #[test]
    fn test_parse_results_unwraps_redirects() {
        let results = parse_results(RESULTS_HTML);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url.as_str(), "https://dtnyxe.ca/ness-jacobson-murals/");
        assert_eq!(results[0].title.as_deref(), Some("Ness + Jacobson"));
        assert_eq!(results[0].snippet.as_deref(), Some("Two new murals downtown"));
        assert_eq!(results[1].url.as_str(), "https://www.saskatoon.ca/public-art");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = DuckDuckGoSearcher::search_url("yxe street art");
        assert_eq!(url, "https://html.duckduckgo.com/html/?q=yxe+street+art");
    }

    #[tokio::test]
    async fn test_search_through_fetcher() {
        let fetcher = MockFetcher::new().with_html(
            DuckDuckGoSearcher::search_url("yxe street art"),
            RESULTS_HTML,
        );
        let searcher = DuckDuckGoSearcher::new(Arc::new(fetcher.clone()));

        let results = searcher.search_with_limit("yxe street art", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(fetcher.call_count(), 1);

        assert!(searcher.search("unfetchable").await.is_err());
    }
}
