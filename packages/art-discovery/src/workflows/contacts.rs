//! Contact enrichment for discovered artists.
//!
//! Only public, verifiable contact points are recorded. Social handles are
//! suggested for a human to check, never asserted.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{DiscoveryError, Result};
use crate::export::{csv::parse_records, write_json};
use crate::traits::searcher::WebSearcher;
use crate::types::candidate::Confidence;

/// Artist directories worth checking by hand.
pub const ARTIST_DIRECTORIES: &[&str] = &[
    "https://www.carfac.ca",
    "https://saskculture.ca",
    "https://www.saskartsboard.ca",
];

const WEBSITE_TERMS: &[&str] = &["art", "design", "portfolio"];

/// Hosts whose URLs are search-engine plumbing rather than destinations.
const REDIRECT_HOSTS: &[&str] = &["duckduckgo.com", "google.com", "bing.com"];

/// Public contact information gathered for one artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistContact {
    pub name: String,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub public_profiles: Vec<String>,
    /// Unverified handle guesses for manual checking
    #[serde(default)]
    pub suggested_handles: Vec<String>,
    pub confidence: Confidence,
    #[serde(default)]
    pub notes: String,
}

impl ArtistContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website: None,
            instagram: None,
            email: None,
            public_profiles: Vec::new(),
            suggested_handles: Vec::new(),
            confidence: Confidence::Low,
            notes: String::new(),
        }
    }

    /// Website 2, instagram 1, email 1, any public profile 1.
    pub fn score(&self) -> u8 {
        let mut score = 0;
        if self.website.is_some() {
            score += 2;
        }
        if self.instagram.is_some() {
            score += 1;
        }
        if self.email.is_some() {
            score += 1;
        }
        if !self.public_profiles.is_empty() {
            score += 1;
        }
        score
    }

    pub fn calculate_confidence(&self) -> Confidence {
        match self.score() {
            s if s >= 3 => Confidence::High,
            2 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    /// Refresh the stored confidence from the current fields.
    pub fn with_confidence_updated(mut self) -> Self {
        self.confidence = self.calculate_confidence();
        self
    }
}

/// Handle guesses: name lowercased with spaces removed, underscored, dotted.
pub fn handle_variants(name: &str) -> Vec<String> {
    let lower = name.trim().to_lowercase();
    let mut variants = IndexSet::new();
    for sep in ["", "_", "."] {
        variants.insert(lower.split_whitespace().collect::<Vec<_>>().join(sep));
    }
    variants.into_iter().filter(|v| !v.is_empty()).collect()
}

/// Whether a search result URL looks like the artist's own site.
pub fn looks_like_artist_site(url: &url::Url, name: &str) -> bool {
    let is_redirect = url
        .host_str()
        .map(|h| REDIRECT_HOSTS.iter().any(|r| h.ends_with(r)))
        .unwrap_or(true);
    if is_redirect {
        return false;
    }

    let href = url.as_str().to_lowercase();
    let compact: String = name.to_lowercase().split_whitespace().collect();
    WEBSITE_TERMS.iter().any(|t| href.contains(t)) || (!compact.is_empty() && href.contains(&compact))
}

/// Distinct non-empty artists from a candidates CSV, first-seen order.
///
/// A missing file yields an empty list with a warning.
pub fn load_artists(path: &Path) -> Result<Vec<String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "No candidates file found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(DiscoveryError::io(path, e)),
    };

    let artists: IndexSet<String> = parse_records(&text)
        .into_iter()
        .filter_map(|record| record.get("artist").map(|a| a.trim().to_string()))
        .filter(|a| !a.is_empty())
        .collect();

    info!(count = artists.len(), "Found unique artists to research");
    Ok(artists.into_iter().collect())
}

/// Looks up public contact points for artists via a `WebSearcher`.
pub struct ContactFinder {
    searcher: Arc<dyn WebSearcher>,
    results_per_query: usize,
}

impl ContactFinder {
    pub fn new(searcher: Arc<dyn WebSearcher>) -> Self {
        Self {
            searcher,
            results_per_query: 10,
        }
    }

    pub fn with_results_per_query(mut self, limit: usize) -> Self {
        self.results_per_query = limit;
        self
    }

    pub fn website_query(name: &str) -> String {
        format!("{name} artist saskatoon website")
    }

    /// Research one artist. Search failures leave the website empty.
    pub async fn search_artist(&self, name: &str) -> ArtistContact {
        info!(artist = %name, "Searching for contacts");
        let mut contact = ArtistContact::new(name);

        match self
            .searcher
            .search_with_limit(&Self::website_query(name), self.results_per_query)
            .await
        {
            Ok(results) => {
                contact.website = results
                    .into_iter()
                    .find(|r| looks_like_artist_site(&r.url, name))
                    .map(|r| r.url.to_string());
                if let Some(website) = &contact.website {
                    info!(artist = %name, website = %website, "Found website");
                }
            }
            Err(e) => warn!(artist = %name, error = %e, "Website search failed"),
        }

        contact.suggested_handles = handle_variants(name);
        debug!(artist = %name, handles = ?contact.suggested_handles, "Possible Instagram handles");

        contact.notes = format!("Check artist directories manually: {}", ARTIST_DIRECTORIES.join(", "));
        contact.with_confidence_updated()
    }

    /// Research every artist in order, skipping repeats.
    pub async fn find_contacts(&self, artists: &[String]) -> IndexMap<String, ArtistContact> {
        let mut contacts = IndexMap::new();
        for name in artists {
            if contacts.contains_key(name) {
                continue;
            }
            let contact = self.search_artist(name).await;
            contacts.insert(name.clone(), contact);
        }
        contacts
    }
}

/// Write contacts as a pretty JSON object keyed by artist name.
pub fn export_contacts(path: &Path, contacts: &IndexMap<String, ArtistContact>) -> Result<()> {
    write_json(path, contacts)?;
    info!(path = %path.display(), count = contacts.len(), "Exported artist contacts");
    Ok(())
}
