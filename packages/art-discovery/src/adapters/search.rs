//! Search-query expansion adapter.
//!
//! Issues keyword queries against a `WebSearcher`, fetches the distinct
//! result pages and runs generic extraction over each. Web results are
//! noisy, so the broad-search preset only keeps medium and high confidence.

use async_trait::async_trait;
use indexmap::IndexSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::adapters::generic::PageFolder;
use crate::adapters::{AcceptancePolicy, AdapterReport, DiscoveryState, SourceAdapter};
use crate::config::DiscoveryConfig;
use crate::extract::TextExtractor;
use crate::traits::fetcher::PageFetcher;
use crate::traits::searcher::WebSearcher;
use crate::types::candidate::Confidence;

/// Queries for local mural and street-art coverage.
pub const BROAD_SEARCH_QUERIES: &[&str] = &[
    "Saskatoon mural 2023",
    "Saskatoon mural 2024",
    "Saskatoon public art downtown",
    "yxe street art",
    "Broadway Saskatoon mural",
    "Riversdale Saskatoon art",
    "Josh Jacobson mural Saskatoon",
    "Saskatoon mural artist",
];

/// Run every query and collect distinct result URLs, first-seen order.
///
/// Takes at most `per_query` results from each query and stops once `cap`
/// URLs are collected. URLs in `exclude` are skipped. A failing query is
/// logged and skipped.
pub async fn collect_search_urls(
    searcher: &dyn WebSearcher,
    queries: &[String],
    per_query: usize,
    cap: usize,
    exclude: &[&str],
) -> IndexSet<String> {
    let mut urls = IndexSet::new();

    for query in queries {
        if urls.len() >= cap {
            break;
        }

        let results = match searcher.search_with_limit(query, per_query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(query = %query, provider = searcher.name(), error = %e, "Search failed");
                continue;
            }
        };
        debug!(query = %query, results = results.len(), "Search returned");

        for result in results {
            if urls.len() >= cap {
                break;
            }
            let url = result.url.to_string();
            if exclude.contains(&url.as_str()) {
                continue;
            }
            urls.insert(url);
        }
    }

    urls
}

/// Source name for a page found by search: its host, without `www.`.
fn host_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.trim_start_matches("www.").to_string())
}

/// Keyword search over the open web.
pub struct SearchAdapter {
    id: String,
    source_name: String,
    searcher: Arc<dyn WebSearcher>,
    queries: Vec<String>,
    per_query: usize,
    max_pages: usize,
    policy: AcceptancePolicy,
    extractor: TextExtractor,
    max_artists: usize,
}

impl SearchAdapter {
    pub fn new(
        id: impl Into<String>,
        source_name: impl Into<String>,
        searcher: Arc<dyn WebSearcher>,
    ) -> Self {
        let defaults = DiscoveryConfig::default();
        Self {
            id: id.into(),
            source_name: source_name.into(),
            searcher,
            queries: Vec::new(),
            per_query: defaults.max_results_per_query,
            max_pages: defaults.max_pages_per_search,
            policy: AcceptancePolicy::All,
            extractor: TextExtractor::new(),
            max_artists: defaults.max_artists_per_page,
        }
    }

    /// Broad web search over `BROAD_SEARCH_QUERIES`, medium confidence and up.
    pub fn broad_web(searcher: Arc<dyn WebSearcher>, config: &DiscoveryConfig) -> Self {
        Self::new("web_search", "Web Search", searcher)
            .with_queries(BROAD_SEARCH_QUERIES.iter().copied())
            .with_limits(config.max_results_per_query, config.max_pages_per_search)
            .with_policy(AcceptancePolicy::MinConfidence(Confidence::Medium))
            .with_max_artists(config.max_artists_per_page)
    }

    pub fn with_queries<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queries.extend(queries.into_iter().map(Into::into));
        self
    }

    pub fn with_limits(mut self, per_query: usize, max_pages: usize) -> Self {
        self.per_query = per_query;
        self.max_pages = max_pages;
        self
    }

    pub fn with_policy(mut self, policy: AcceptancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_artists(mut self, max: usize) -> Self {
        self.max_artists = max;
        self
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn policy(&self) -> AcceptancePolicy {
        self.policy
    }
}

#[async_trait]
impl SourceAdapter for SearchAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    async fn discover(
        &self,
        fetcher: &dyn PageFetcher,
        state: &mut DiscoveryState,
    ) -> AdapterReport {
        let mut report = AdapterReport::new(&self.id);

        let urls = collect_search_urls(
            self.searcher.as_ref(),
            &self.queries,
            self.per_query,
            self.max_pages,
            &[],
        )
        .await;
        info!(
            adapter = %self.id,
            provider = self.searcher.name(),
            queries = self.queries.len(),
            urls = urls.len(),
            "Search expansion collected pages"
        );

        let urls: Vec<String> = urls.into_iter().collect();
        for (url, outcome) in fetcher.fetch_all(&urls).await {
            let source_name = host_name(&url).unwrap_or_else(|| self.source_name.clone());
            let folder = PageFolder {
                extractor: &self.extractor,
                source_name: &source_name,
                max_artists: self.max_artists,
                policy: self.policy,
            };
            folder.fold(&url, outcome, state, &mut report);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;
    use crate::traits::searcher::MockWebSearcher;

    const HIGH_PAGE: &str = r#"<article>By Jane Smith, the mural titled "River Dreams" was unveiled on 3rd Avenue building in Saskatoon in 2021.</article>"#;
    // Artist, location and URL: medium.
    const MEDIUM_PAGE: &str = r#"<article>A mural painted by Kent Ness on Broadway Avenue.</article>"#;
    // Artist, title and URL: medium.
    const TITLE_ONLY_PAGE: &str = r#"<article>A piece by Ann Lee called "Prairie Sky".</article>"#;

    fn queries(adapter: &SearchAdapter) -> Vec<String> {
        adapter.queries().to_vec()
    }

    #[test]
    fn test_broad_web_preset() {
        let adapter = SearchAdapter::broad_web(
            Arc::new(MockWebSearcher::new()),
            &DiscoveryConfig::default(),
        );
        assert_eq!(queries(&adapter).len(), 8);
        assert_eq!(
            adapter.policy(),
            AcceptancePolicy::MinConfidence(Confidence::Medium)
        );
    }

    #[test]
    fn test_host_name() {
        assert_eq!(host_name("https://www.cbc.ca/news/x").as_deref(), Some("cbc.ca"));
        assert_eq!(host_name("not a url"), None);
    }

    #[tokio::test]
    async fn test_collect_dedups_and_caps() {
        let searcher = MockWebSearcher::new()
            .with_urls("a", &["https://one.ca/", "https://two.ca/", "https://three.ca/"])
            .with_urls("b", &["https://two.ca/", "https://four.ca/"])
            .with_failure("c")
            .with_urls("d", &["https://five.ca/"]);
        let qs: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

        let urls = collect_search_urls(&searcher, &qs, 2, 10, &["https://one.ca/"]).await;
        let urls: Vec<_> = urls.into_iter().collect();
        assert_eq!(
            urls,
            vec!["https://two.ca/", "https://four.ca/", "https://five.ca/"]
        );

        let capped = collect_search_urls(&searcher, &qs, 5, 2, &[]).await;
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn test_broad_search_keeps_medium_and_up() {
        let searcher = MockWebSearcher::new()
            .with_urls(
                "Saskatoon mural 2023",
                &["https://www.high.ca/", "https://low.ca/", "https://medium.ca/"],
            )
            .with_urls("yxe street art", &["https://title.ca/", "https://down.ca/"]);
        let fetcher = MockFetcher::new()
            .with_html("https://www.high.ca/", HIGH_PAGE)
            .with_html("https://medium.ca/", MEDIUM_PAGE)
            .with_html("https://title.ca/", TITLE_ONLY_PAGE)
            .with_html("https://low.ca/", "<article>Nothing to see.</article>")
            .with_status_failure("https://down.ca/", 500);

        let adapter = SearchAdapter::broad_web(Arc::new(searcher), &DiscoveryConfig::default());
        let mut state = DiscoveryState::new();
        let report = adapter.discover(&fetcher, &mut state).await;

        assert_eq!(report.pages_fetched, 4);
        assert_eq!(report.pages_failed, 1);
        assert_eq!(report.accepted, 3);
        assert_eq!(report.dropped, 0);
        let sources: Vec<_> = state.candidates.iter().map(|c| c.source_name()).collect();
        assert_eq!(sources, vec!["high.ca", "medium.ca", "title.ca"]);
        for c in state.candidates.iter() {
            assert!(c.calculate_confidence() >= Confidence::Medium);
        }
    }

    #[tokio::test]
    async fn test_repeat_url_across_adapters_is_duplicate() {
        let searcher = MockWebSearcher::new().with_urls("q", &["https://a.ca/"]);
        let fetcher = MockFetcher::new().with_html("https://a.ca/", MEDIUM_PAGE);
        let adapter = SearchAdapter::new("custom", "Custom", Arc::new(searcher))
            .with_queries(["q"]);
        let mut state = DiscoveryState::new();

        let first = adapter.discover(&fetcher, &mut state).await;
        let second = adapter.discover(&fetcher, &mut state).await;

        assert_eq!(first.accepted, 1);
        assert_eq!(second.accepted, 0);
        assert_eq!(second.duplicates, 1);
        assert_eq!(state.candidates.len(), 1);
    }
}
