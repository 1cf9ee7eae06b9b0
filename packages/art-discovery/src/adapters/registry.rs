//! City public-art registry adapter.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::generic::PageFolder;
use crate::adapters::search::collect_search_urls;
use crate::adapters::{AcceptancePolicy, AdapterReport, DiscoveryState, SourceAdapter};
use crate::config::DiscoveryConfig;
use crate::extract::TextExtractor;
use crate::traits::fetcher::PageFetcher;
use crate::traits::searcher::WebSearcher;
use crate::types::source::{SourceEntry, SourceStatus};

pub const CITY_REGISTRY_ID: &str = "city_saskatoon";
pub const CITY_PUBLIC_ART_URL: &str =
    "https://www.saskatoon.ca/community-culture-heritage/arts-culture/public-art";
pub const MANUAL_REVIEW_NOTE: &str = "Page structure needs analysis";

/// Fetches a registry landing page, plus pages found by site search.
///
/// When nothing is extracted, the source is recorded for manual review.
/// When the landing page itself cannot be fetched, it is recorded as
/// unreachable and no further requests are made.
pub struct RegistryAdapter {
    id: String,
    source_name: String,
    landing_url: String,
    searcher: Option<Arc<dyn WebSearcher>>,
    queries: Vec<String>,
    per_query: usize,
    max_pages: usize,
    extractor: TextExtractor,
    max_artists: usize,
}

impl RegistryAdapter {
    pub fn new(
        id: impl Into<String>,
        source_name: impl Into<String>,
        landing_url: impl Into<String>,
    ) -> Self {
        let defaults = DiscoveryConfig::default();
        Self {
            id: id.into(),
            source_name: source_name.into(),
            landing_url: landing_url.into(),
            searcher: None,
            queries: Vec::new(),
            per_query: defaults.max_results_per_query,
            max_pages: defaults.max_pages_per_search,
            extractor: TextExtractor::new(),
            max_artists: defaults.max_artists_per_page,
        }
    }

    /// The City of Saskatoon public art page.
    pub fn city_saskatoon(config: &DiscoveryConfig) -> Self {
        Self::new(CITY_REGISTRY_ID, "City of Saskatoon", CITY_PUBLIC_ART_URL)
            .with_limits(config.max_results_per_query, config.max_pages_per_search)
            .with_max_artists(config.max_artists_per_page)
    }

    /// Also fetch pages the searcher returns for `queries`.
    pub fn with_searcher<I, S>(mut self, searcher: Arc<dyn WebSearcher>, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searcher = Some(searcher);
        self.queries = queries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limits(mut self, per_query: usize, max_pages: usize) -> Self {
        self.per_query = per_query;
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_artists(mut self, max: usize) -> Self {
        self.max_artists = max;
        self
    }

    pub fn landing_url(&self) -> &str {
        &self.landing_url
    }
}

#[async_trait]
impl SourceAdapter for RegistryAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    async fn discover(
        &self,
        fetcher: &dyn PageFetcher,
        state: &mut DiscoveryState,
    ) -> AdapterReport {
        let mut report = AdapterReport::new(&self.id);
        let folder = PageFolder {
            extractor: &self.extractor,
            source_name: &self.source_name,
            max_artists: self.max_artists,
            policy: AcceptancePolicy::All,
        };

        info!(url = %self.landing_url, source = %self.source_name, "Fetching registry");
        let landing = match fetcher.fetch(&self.landing_url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %self.landing_url, error = %e, "Registry unreachable");
                report.pages_failed += 1;
                state.sources.record(
                    self.id.as_str(),
                    SourceEntry::new(SourceStatus::Unreachable, e.to_string())
                        .with_url(self.landing_url.as_str()),
                );
                return report;
            }
        };
        folder.fold(&self.landing_url, Ok(landing), state, &mut report);

        if let Some(searcher) = &self.searcher {
            let urls = collect_search_urls(
                searcher.as_ref(),
                &self.queries,
                self.per_query,
                self.max_pages,
                &[self.landing_url.as_str()],
            )
            .await;
            for url in &urls {
                folder.fold(url, fetcher.fetch(url).await, state, &mut report);
            }
        }

        if report.extracted() == 0 {
            info!(source = %self.id, "No candidates extracted, flagging for manual review");
            state.sources.record(
                self.id.as_str(),
                SourceEntry::new(SourceStatus::RequiresManualReview, MANUAL_REVIEW_NOTE)
                    .with_url(self.landing_url.as_str()),
            );
        }

        report
    }
}
