//! Generic extraction: fetched page -> extractor -> candidates.
//!
//! Shared by every adapter that has no hand-verified facts for a page.

use tracing::{debug, info, warn};

use crate::adapters::{AcceptancePolicy, AdapterReport, DiscoveryState};
use crate::error::FetchResult;
use crate::extract::{ExtractedFacts, TextExtractor};
use crate::types::candidate::ArtworkCandidate;
use crate::types::page::FetchedPage;

/// Attribution attached to every candidate built from a page.
#[derive(Debug, Clone)]
pub struct PageSource<'a> {
    pub url: &'a str,
    pub source_name: &'a str,
    pub notes: String,
}

/// Turn extracted facts into candidates, one per distinct artist.
///
/// Returns nothing unless the facts pass the acceptance gate. At most
/// `max_artists` candidates are built, in first-seen artist order.
pub fn build_candidates(
    facts: &ExtractedFacts,
    source: &PageSource<'_>,
    max_artists: usize,
) -> Vec<ArtworkCandidate> {
    if !facts.is_acceptable() {
        return Vec::new();
    }

    if facts.artists.len() > max_artists {
        debug!(
            url = %source.url,
            artists = facts.artists.len(),
            cap = max_artists,
            "Capping artists for noisy page"
        );
    }

    let title = facts.first_title().unwrap_or_default();
    let location = facts.first_location().unwrap_or_default();

    facts
        .artists
        .iter()
        .take(max_artists)
        .map(|artist| {
            ArtworkCandidate::new(artist.as_str(), title)
                .with_location(location)
                .with_year(facts.year)
                .with_medium(facts.medium_tags())
                .with_source(source.url, source.source_name)
                .with_notes(source.notes.clone())
        })
        .collect()
}

/// Run the extractor over a page's meta description and main content.
///
/// `None` when the page has no usable text at all.
pub fn extract_page_candidates(
    page: &FetchedPage,
    extractor: &TextExtractor,
    source_name: &str,
    max_artists: usize,
) -> Option<Vec<ArtworkCandidate>> {
    let text = page.text();
    if text.is_empty() {
        return None;
    }

    let combined = text.combined();
    debug!(url = %page.url, characters = combined.len(), "Parsing page text");

    let notes = match &text.heading {
        Some(heading) => format!("Extracted from: {heading}"),
        None => format!("Extracted from {source_name} page"),
    };
    let source = PageSource {
        url: &page.url,
        source_name,
        notes,
    };

    Some(build_candidates(&extractor.extract(&combined), &source, max_artists))
}

/// Settings for folding fetched pages into the run state.
#[derive(Debug, Clone, Copy)]
pub struct PageFolder<'a> {
    pub extractor: &'a TextExtractor,
    pub source_name: &'a str,
    pub max_artists: usize,
    pub policy: AcceptancePolicy,
}

impl PageFolder<'_> {
    /// Handle one fetch outcome end to end, updating the report.
    pub fn fold(
        &self,
        url: &str,
        outcome: FetchResult<FetchedPage>,
        state: &mut DiscoveryState,
        report: &mut AdapterReport,
    ) {
        let page = match outcome {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "Page unavailable");
                report.pages_failed += 1;
                return;
            }
        };
        report.pages_fetched += 1;

        match extract_page_candidates(&page, self.extractor, self.source_name, self.max_artists) {
            None => {
                warn!(url = %url, "Could not find page content");
                report.pages_empty += 1;
            }
            Some(candidates) if candidates.is_empty() => {
                debug!(url = %url, "No candidates extracted");
            }
            Some(candidates) => {
                info!(url = %url, count = candidates.len(), "Extracted candidates");
                for candidate in candidates {
                    state.accept(candidate, self.policy, report);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::candidate::Confidence;

    const RIVER_DREAMS: &str = r#"By Jane Smith, the mural titled "River Dreams" was unveiled on 3rd Avenue building in Saskatoon in 2021."#;

    #[test]
    fn test_river_dreams_candidate() {
        let page = FetchedPage::new("https://example.com/river", RIVER_DREAMS);
        let candidates =
            extract_page_candidates(&page, &TextExtractor::new(), "Example", 10).unwrap();

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.artist(), "Jane Smith");
        assert_eq!(c.title(), "River Dreams");
        assert_eq!(c.year(), Some(2021));
        assert_eq!(c.medium(), &["paint".to_string()]);
        assert_eq!(c.neighbourhood(), "");
        assert_eq!(c.calculate_confidence(), Confidence::High);
        assert_eq!(c.source_url(), "https://example.com/river");
    }

    #[test]
    fn test_fan_out_cap() {
        let names = [
            "Ann Lee", "Bob Ray", "Cat Moss", "Dan Fox", "Eve Hart", "Fay Wong", "Gus Park",
            "Hal Dunn", "Ida Bell", "Jon Kerr", "Kim Cole", "Lou Hale", "Max Reid", "Ned Shaw",
            "Oli Tate",
        ];
        let text = names
            .iter()
            .map(|n| format!("A mural by {n}."))
            .collect::<Vec<_>>()
            .join(" ")
            + r#" The series is titled "Prairie Voices"."#;

        let facts = TextExtractor::new().extract(&text);
        assert_eq!(facts.artists.len(), 15);

        let source = PageSource {
            url: "https://example.com",
            source_name: "Example",
            notes: String::new(),
        };
        let candidates = build_candidates(&facts, &source, 10);
        assert_eq!(candidates.len(), 10);
        assert_eq!(candidates[0].artist(), "Ann Lee");
        assert_eq!(candidates[9].artist(), "Jon Kerr");
    }

    #[test]
    fn test_gate_blocks_unbacked_artist() {
        let page = FetchedPage::new("https://example.com", "A mural painted by Kent Ness.");
        let candidates =
            extract_page_candidates(&page, &TextExtractor::new(), "Example", 10).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_heading_becomes_notes() {
        let html = r#"<html><body><h1>New Murals</h1><article>Painted by Kent Ness on Broadway Avenue.</article></body></html>"#;
        let page = FetchedPage::new("https://example.com", html);
        let candidates =
            extract_page_candidates(&page, &TextExtractor::new(), "Example", 10).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].notes(), "Extracted from: New Murals");
        assert_eq!(candidates[0].location(), "Broadway Avenue");
        assert_eq!(candidates[0].neighbourhood(), "Broadway");
        assert_eq!(candidates[0].title(), "");
    }

    #[test]
    fn test_fold_counts_failures_and_empties() {
        let mut state = DiscoveryState::new();
        let mut report = AdapterReport::new("test");
        let extractor = TextExtractor::new();
        let folder = PageFolder {
            extractor: &extractor,
            source_name: "Example",
            max_artists: 10,
            policy: AcceptancePolicy::All,
        };

        folder.fold(
            "https://a",
            Err(crate::error::FetchError::NotFound {
                url: "https://a".into(),
            }),
            &mut state,
            &mut report,
        );
        folder.fold(
            "https://b",
            Ok(FetchedPage::new("https://b", "  ")),
            &mut state,
            &mut report,
        );
        folder.fold(
            "https://c",
            Ok(FetchedPage::new("https://c", RIVER_DREAMS)),
            &mut state,
            &mut report,
        );

        assert_eq!(report.pages_failed, 1);
        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.pages_empty, 1);
        assert_eq!(report.accepted, 1);
        assert_eq!(state.candidates.len(), 1);
    }
}
