//! Sources that need an authenticated API we do not have.

use async_trait::async_trait;
use tracing::info;

use crate::adapters::{AdapterReport, DiscoveryState, SourceAdapter};
use crate::traits::fetcher::PageFetcher;
use crate::types::source::{SourceEntry, SourceStatus};

pub const INSTAGRAM_HASHTAGS: &[&str] = &["#yxeart", "#saskatoonart", "#saskatoonmurals"];

/// Records the source as `requires_api_access` without fetching anything.
pub struct UnsupportedSourceAdapter {
    id: String,
    would_search: Vec<String>,
}

impl UnsupportedSourceAdapter {
    pub fn new<I, S>(id: impl Into<String>, would_search: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            would_search: would_search.into_iter().map(Into::into).collect(),
        }
    }

    pub fn instagram() -> Self {
        Self::new("instagram", INSTAGRAM_HASHTAGS.iter().copied())
    }

    pub fn note(&self) -> String {
        format!("Would search: {}", self.would_search.join(", "))
    }
}

#[async_trait]
impl SourceAdapter for UnsupportedSourceAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    async fn discover(
        &self,
        _fetcher: &dyn PageFetcher,
        state: &mut DiscoveryState,
    ) -> AdapterReport {
        info!(source = %self.id, "Source requires API access, skipping");
        state.sources.record(
            self.id.as_str(),
            SourceEntry::new(SourceStatus::RequiresApiAccess, self.note()),
        );
        AdapterReport::new(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;

    #[tokio::test]
    async fn test_instagram_records_without_fetching() {
        let fetcher = MockFetcher::new();
        let mut state = DiscoveryState::new();

        UnsupportedSourceAdapter::instagram()
            .discover(&fetcher, &mut state)
            .await;

        assert_eq!(fetcher.call_count(), 0);
        let entry = state.sources.get("instagram").unwrap();
        assert_eq!(entry.status, SourceStatus::RequiresApiAccess);
        assert_eq!(
            entry.note,
            "Would search: #yxeart, #saskatoonart, #saskatoonmurals"
        );
        assert!(entry.url.is_none());
    }
}
