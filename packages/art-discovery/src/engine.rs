//! The discovery engine: runs adapters in order, then exports.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::adapters::{
    AdapterReport, ArticleAdapter, DiscoveryState, RegistryAdapter, SearchAdapter, SourceAdapter,
    UnsupportedSourceAdapter,
};
use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::export::{export_run, ExportPaths};
use crate::traits::fetcher::PageFetcher;
use crate::traits::searcher::WebSearcher;
use crate::types::candidate::Confidence;
use crate::types::collection::CandidateList;
use crate::types::source::SourceRegistry;

/// Site search used to find registry detail pages.
pub const REGISTRY_SEARCH_QUERIES: &[&str] = &["site:saskatoon.ca public art mural"];

/// Everything a finished run produced.
#[derive(Debug)]
pub struct DiscoveryRun {
    pub candidates: CandidateList,
    pub sources: SourceRegistry,
    pub reports: Vec<AdapterReport>,
    pub outputs: ExportPaths,
}

/// Tier counts for logging and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub sources_flagged: usize,
}

impl DiscoveryRun {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.candidates.len(),
            high: self.candidates.with_confidence(Confidence::High).len(),
            medium: self.candidates.with_confidence(Confidence::Medium).len(),
            low: self.candidates.with_confidence(Confidence::Low).len(),
            sources_flagged: self.sources.len(),
        }
    }
}

/// Runs a fixed sequence of adapters over one fetcher, sequentially.
pub struct DiscoveryEngine {
    config: DiscoveryConfig,
    fetcher: Arc<dyn PageFetcher>,
    adapters: Vec<Box<dyn SourceAdapter>>,
}

impl DiscoveryEngine {
    /// Engine with no adapters.
    pub fn new(config: DiscoveryConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher,
            adapters: Vec::new(),
        }
    }

    /// Known article, city registry, broad web search, then Instagram.
    pub fn standard(
        config: DiscoveryConfig,
        fetcher: Arc<dyn PageFetcher>,
        searcher: Arc<dyn WebSearcher>,
    ) -> Self {
        let article = ArticleAdapter::dtnyxe(&config);
        let registry = RegistryAdapter::city_saskatoon(&config)
            .with_searcher(searcher.clone(), REGISTRY_SEARCH_QUERIES.iter().copied());
        let search = SearchAdapter::broad_web(searcher, &config);

        Self::new(config, fetcher)
            .with_adapter(article)
            .with_adapter(registry)
            .with_adapter(search)
            .with_adapter(UnsupportedSourceAdapter::instagram())
    }

    pub fn with_adapter(mut self, adapter: impl SourceAdapter + 'static) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn adapter_ids(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.id()).collect()
    }

    /// Run every adapter in order without exporting.
    pub async fn collect(&self) -> (DiscoveryState, Vec<AdapterReport>) {
        let mut state = DiscoveryState::new();
        let mut reports = Vec::with_capacity(self.adapters.len());

        for adapter in &self.adapters {
            info!(adapter = adapter.id(), fetcher = self.fetcher.name(), "Running adapter");
            let report = adapter.discover(self.fetcher.as_ref(), &mut state).await;
            info!(
                adapter = %report.adapter,
                fetched = report.pages_fetched,
                failed = report.pages_failed,
                accepted = report.accepted,
                duplicates = report.duplicates,
                dropped = report.dropped,
                "Adapter finished"
            );
            reports.push(report);
        }

        (state, reports)
    }

    /// Run every adapter, then write the CSV, registry JSON and report.
    ///
    /// Adapter failures never abort the run. Only export I/O errors are
    /// returned.
    pub async fn run(&self) -> Result<DiscoveryRun> {
        info!(output_dir = %self.config.output_dir().display(), "Starting artwork discovery");

        let (state, reports) = self.collect().await;
        let outputs = export_run(&self.config, &state.candidates, &state.sources)?;

        let run = DiscoveryRun {
            candidates: state.candidates,
            sources: state.sources,
            reports,
            outputs,
        };
        let summary = run.summary();
        info!(
            total = summary.total,
            high = summary.high,
            medium = summary.medium,
            low = summary.low,
            sources_flagged = summary.sources_flagged,
            "Discovery complete"
        );
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;
    use crate::traits::searcher::MockWebSearcher;

    #[test]
    fn test_standard_order() {
        let engine = DiscoveryEngine::standard(
            DiscoveryConfig::default(),
            Arc::new(MockFetcher::new()),
            Arc::new(MockWebSearcher::new()),
        );
        assert_eq!(
            engine.adapter_ids(),
            vec!["dtnyxe", "city_saskatoon", "web_search", "instagram"]
        );
    }

    #[tokio::test]
    async fn test_collect_with_nothing_reachable() {
        let engine = DiscoveryEngine::standard(
            DiscoveryConfig::default(),
            Arc::new(MockFetcher::new()),
            Arc::new(MockWebSearcher::new()),
        );
        let (state, reports) = engine.collect().await;

        assert!(state.candidates.is_empty());
        assert_eq!(reports.len(), 4);
        let ids: Vec<_> = state.sources.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["city_saskatoon", "instagram"]);
    }
}
