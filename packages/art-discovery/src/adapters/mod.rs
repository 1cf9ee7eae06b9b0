//! Source adapters: per-source acquisition strategies.
//!
//! Every adapter takes the fetch collaborator and the run state, fetches
//! whatever it needs, and folds accepted candidates into the shared list
//! and/or records the source in the registry. Adapters never fail the run:
//! fetch and search errors are logged and counted in the `AdapterReport`.
//!
//! - `ArticleAdapter` - known articles with hand-verified facts, generic otherwise
//! - `RegistryAdapter` - city public-art registry, manual-review fallback
//! - `SearchAdapter` - keyword search expansion with a stricter acceptance bar
//! - `UnsupportedSourceAdapter` - API-gated sources, registry entry only

pub mod article;
pub mod generic;
pub mod registry;
pub mod search;
pub mod unsupported;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::traits::fetcher::PageFetcher;
use crate::types::candidate::{ArtworkCandidate, Confidence};
use crate::types::collection::CandidateList;
use crate::types::source::SourceRegistry;

pub use article::{ArticleAdapter, KnownArticle, KnownArtwork};
pub use registry::RegistryAdapter;
pub use search::SearchAdapter;
pub use unsupported::UnsupportedSourceAdapter;

/// Mutable state of one discovery run, owned by the engine.
#[derive(Debug, Default)]
pub struct DiscoveryState {
    pub candidates: CandidateList,
    pub sources: SourceRegistry,
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score, filter by policy, dedup and append one candidate.
    pub fn accept(
        &mut self,
        candidate: ArtworkCandidate,
        policy: AcceptancePolicy,
        report: &mut AdapterReport,
    ) -> bool {
        let confidence = candidate.calculate_confidence();
        if !policy.accepts(confidence) {
            tracing::debug!(
                artist = %candidate.artist(),
                title = %candidate.display_title(),
                confidence = %confidence,
                "Dropped below acceptance bar"
            );
            report.dropped += 1;
            return false;
        }

        let artist = candidate.artist().to_string();
        let title = candidate.display_title().to_string();
        if self.candidates.append(candidate) {
            info!(artist = %artist, title = %title, confidence = %confidence, "Found candidate");
            report.accepted += 1;
            true
        } else {
            tracing::debug!(artist = %artist, title = %title, "Duplicate candidate skipped");
            report.duplicates += 1;
            false
        }
    }
}

/// Which confidence tiers an adapter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptancePolicy {
    /// Keep every candidate
    All,
    /// Keep candidates at or above a tier
    MinConfidence(Confidence),
}

impl AcceptancePolicy {
    pub fn accepts(&self, confidence: Confidence) -> bool {
        match self {
            AcceptancePolicy::All => true,
            AcceptancePolicy::MinConfidence(min) => confidence >= *min,
        }
    }
}

/// What one adapter did during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdapterReport {
    pub adapter: String,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    /// Fetched pages with no usable text
    pub pages_empty: usize,
    pub accepted: usize,
    pub duplicates: usize,
    /// Candidates below the adapter's acceptance bar
    pub dropped: usize,
}

impl AdapterReport {
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            ..Default::default()
        }
    }

    /// Candidates this adapter produced that met its policy, new or already known.
    pub fn extracted(&self) -> usize {
        self.accepted + self.duplicates
    }
}

/// One acquisition strategy.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable identifier, also used as the source registry key.
    fn id(&self) -> &str;

    /// Run the strategy against the shared run state.
    async fn discover(&self, fetcher: &dyn PageFetcher, state: &mut DiscoveryState)
        -> AdapterReport;
}
