//! Blog article adapter.
//!
//! Articles we have already read by hand carry exact artwork facts; those
//! bypass the extractor entirely. Any other article URL goes through generic
//! extraction.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::adapters::generic::PageFolder;
use crate::adapters::{AcceptancePolicy, AdapterReport, DiscoveryState, SourceAdapter};
use crate::config::DiscoveryConfig;
use crate::extract::TextExtractor;
use crate::traits::fetcher::PageFetcher;
use crate::types::candidate::ArtworkCandidate;

pub const DTNYXE_SOURCE_NAME: &str = "DTNYXE Downtown Blog";
pub const DTNYXE_MURALS_URL: &str = "https://dtnyxe.ca/ness-jacobson-murals/";

/// One hand-verified artwork inside a known article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownArtwork {
    pub artist: String,
    pub title: String,
    pub location: String,
}

impl KnownArtwork {
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            location: location.into(),
        }
    }
}

/// An article whose artworks have been verified by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownArticle {
    /// URL path segment identifying the article
    pub slug: String,
    pub neighbourhood: String,
    pub year: i32,
    pub medium: Vec<String>,
    pub notes: String,
    pub artworks: Vec<KnownArtwork>,
}

impl KnownArticle {
    pub fn matches(&self, url: &str) -> bool {
        url.contains(&self.slug)
    }

    /// Wrap every known artwork into a candidate attributed to `url`.
    pub fn candidates(&self, url: &str, source_name: &str) -> Vec<ArtworkCandidate> {
        self.artworks
            .iter()
            .map(|art| {
                ArtworkCandidate::new(art.artist.as_str(), art.title.as_str())
                    .with_location(art.location.as_str())
                    .with_neighbourhood(self.neighbourhood.as_str())
                    .with_year(Some(self.year))
                    .with_medium(self.medium.iter())
                    .with_source(url, source_name)
                    .with_notes(self.notes.as_str())
            })
            .collect()
    }

    /// The two 2023 downtown murals on the Dream building.
    pub fn ness_jacobson_murals() -> Self {
        Self {
            slug: "ness-jacobson-murals".to_string(),
            neighbourhood: "Downtown".to_string(),
            year: 2023,
            medium: vec!["paint".to_string()],
            notes: "Extracted from: Ness + Jacobson collaborate on new downtown murals".to_string(),
            artworks: vec![
                KnownArtwork::new(
                    "Kent Ness",
                    "Moving Forward",
                    "Dream's Building, Downtown Saskatoon, SK",
                ),
                KnownArtwork::new(
                    "Josh Jacobson",
                    "Prairie Petals: Lilies in Luminous Frames",
                    "south-facing wall of Dream's building, Downtown Saskatoon, SK",
                ),
            ],
        }
    }
}

/// Fetches a fixed list of article URLs from one blog.
pub struct ArticleAdapter {
    id: String,
    source_name: String,
    urls: Vec<String>,
    known: Vec<KnownArticle>,
    extractor: TextExtractor,
    max_artists: usize,
}

impl ArticleAdapter {
    pub fn new(id: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_name: source_name.into(),
            urls: Vec::new(),
            known: Vec::new(),
            extractor: TextExtractor::new(),
            max_artists: DiscoveryConfig::default().max_artists_per_page,
        }
    }

    /// The downtown business district blog.
    pub fn dtnyxe(config: &DiscoveryConfig) -> Self {
        Self::new("dtnyxe", DTNYXE_SOURCE_NAME)
            .with_url(DTNYXE_MURALS_URL)
            .with_known(KnownArticle::ness_jacobson_murals())
            .with_max_artists(config.max_artists_per_page)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    pub fn with_known(mut self, article: KnownArticle) -> Self {
        self.known.push(article);
        self
    }

    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_max_artists(mut self, max: usize) -> Self {
        self.max_artists = max;
        self
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    fn known_for(&self, url: &str) -> Option<&KnownArticle> {
        self.known.iter().find(|a| a.matches(url))
    }
}

#[async_trait]
impl SourceAdapter for ArticleAdapter {
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

        for url in &self.urls {
            info!(url = %url, source = %self.source_name, "Fetching article");

            let Some(known) = self.known_for(url) else {
                folder.fold(url, fetcher.fetch(url).await, state, &mut report);
                continue;
            };

            // Known facts only apply once the article is reachable and has content.
            let page = match fetcher.fetch(url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %url, error = %e, "Article unavailable");
                    report.pages_failed += 1;
                    continue;
                }
            };
            report.pages_fetched += 1;

            let text = page.text();
            if text.is_empty() {
                warn!(url = %url, "Could not find article content");
                report.pages_empty += 1;
                continue;
            }
            info!(url = %url, characters = text.combined().len(), "Parsing article");

            for candidate in known.candidates(url, &self.source_name) {
                state.accept(candidate, AcceptancePolicy::All, &mut report);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;
    use crate::types::candidate::Confidence;

    const ARTICLE_HTML: &str = r#"<html><head><title>Murals</title></head><body>
        <h1>Ness + Jacobson collaborate on new downtown murals</h1>
        <div class="entry-content"><p>Two new murals brighten downtown.</p></div>
        </body></html>"#;

    #[test]
    fn test_known_candidates() {
        let known = KnownArticle::ness_jacobson_murals();
        assert!(known.matches(DTNYXE_MURALS_URL));
        assert!(!known.matches("https://dtnyxe.ca/other/"));

        let candidates = known.candidates(DTNYXE_MURALS_URL, DTNYXE_SOURCE_NAME);
        assert_eq!(candidates.len(), 2);
        for c in &candidates {
            assert_eq!(c.neighbourhood(), "Downtown");
            assert_eq!(c.year(), Some(2023));
            assert_eq!(c.medium(), &["paint".to_string()]);
            assert_eq!(c.calculate_confidence(), Confidence::High);
        }
        assert_eq!(candidates[1].title(), "Prairie Petals: Lilies in Luminous Frames");
    }

    #[tokio::test]
    async fn test_known_article_bypasses_extractor() {
        let fetcher = MockFetcher::new().with_html(DTNYXE_MURALS_URL, ARTICLE_HTML);
        let adapter = ArticleAdapter::dtnyxe(&DiscoveryConfig::default());
        let mut state = DiscoveryState::new();

        let report = adapter.discover(&fetcher, &mut state).await;

        assert_eq!(report.accepted, 2);
        assert_eq!(report.pages_fetched, 1);
        let artists: Vec<_> = state.candidates.iter().map(|c| c.artist()).collect();
        assert_eq!(artists, vec!["Kent Ness", "Josh Jacobson"]);
    }

    #[tokio::test]
    async fn test_unreachable_known_article_yields_nothing() {
        let fetcher = MockFetcher::new().with_status_failure(DTNYXE_MURALS_URL, 503);
        let adapter = ArticleAdapter::dtnyxe(&DiscoveryConfig::default());
        let mut state = DiscoveryState::new();

        let report = adapter.discover(&fetcher, &mut state).await;

        assert_eq!(report.pages_failed, 1);
        assert!(state.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_empty_known_article_is_skipped() {
        let fetcher = MockFetcher::new().with_html(DTNYXE_MURALS_URL, "   ");
        let adapter = ArticleAdapter::dtnyxe(&DiscoveryConfig::default());
        let mut state = DiscoveryState::new();

        let report = adapter.discover(&fetcher, &mut state).await;

        assert_eq!(report.pages_fetched, 1);
        assert_eq!(report.pages_empty, 1);
        assert_eq!(report.accepted, 0);
        assert!(state.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_article_uses_extractor() {
        let url = "https://dtnyxe.ca/broadway-mural/";
        let fetcher = MockFetcher::new().with_html(
            url,
            r#"<article>A new mural painted by Ann Lee titled "Prairie Sky" on Broadway Avenue.</article>"#,
        );
        let adapter = ArticleAdapter::new("dtnyxe", DTNYXE_SOURCE_NAME)
            .with_url(url)
            .with_known(KnownArticle::ness_jacobson_murals());
        let mut state = DiscoveryState::new();

        adapter.discover(&fetcher, &mut state).await;

        assert_eq!(state.candidates.len(), 1);
        let c = &state.candidates.as_slice()[0];
        assert_eq!(c.artist(), "Ann Lee");
        assert_eq!(c.neighbourhood(), "Broadway");
    }
}
