//! The artwork candidate record and its confidence scoring.
//!
//! A candidate is immutable once built: every `with_*` method consumes the
//! value and returns a new one. Confidence is computed on read from the
//! current fields, so there is no cached score to go stale.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest year accepted for an artwork.
pub const MIN_YEAR: i32 = 1900;

/// Known neighbourhoods, matched against the lowercased location text.
///
/// Order matters: the first keyword found wins.
const NEIGHBOURHOODS: &[(&str, &str)] = &[
    ("downtown", "Downtown"),
    ("broadway", "Broadway"),
    ("riversdale", "Riversdale"),
    ("city park", "City Park"),
    ("nutana", "Nutana"),
    ("sutherland", "Sutherland"),
    ("caswell hill", "Caswell Hill"),
    ("varsity view", "Varsity View"),
];

/// Coarse completeness bucket for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Map a completeness score (0..=6) to a tier.
    pub fn from_score(score: u8) -> Self {
        if score >= 5 {
            Confidence::High
        } else if score >= 3 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current calendar year (local time), upper bound for valid years.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Keep a year only when it lies in `[MIN_YEAR, current year]`.
pub fn valid_year(year: i32) -> Option<i32> {
    (MIN_YEAR..=current_year()).contains(&year).then_some(year)
}

/// Normalize one medium tag: trimmed, lowercase, spaces to underscores.
pub fn normalize_medium(tag: &str) -> String {
    tag.trim().to_lowercase().replace(' ', "_")
}

/// Split a comma-separated medium list into normalized tags.
pub fn parse_medium_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(normalize_medium)
        .filter(|m| !m.is_empty())
        .collect()
}

/// Derive a neighbourhood name from free-text location, or "" if none match.
pub fn neighbourhood_for(location: &str) -> &'static str {
    let lower = location.to_lowercase();
    NEIGHBOURHOODS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, name)| *name)
        .unwrap_or("")
}

/// An unverified, machine-extracted proposed artwork record.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkCandidate {
    title: String,
    artist: String,
    year: Option<i32>,
    location: String,
    /// Explicit neighbourhood from a hand-verified source; derived otherwise.
    neighbourhood: Option<String>,
    medium: Vec<String>,
    commissioned_by: String,
    source_url: String,
    source_name: String,
    notes: String,
    discovered_at: DateTime<Utc>,
}

impl ArtworkCandidate {
    /// Create a candidate for an artist/title pair. Either may be empty.
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            year: None,
            location: String::new(),
            neighbourhood: None,
            medium: Vec::new(),
            commissioned_by: String::new(),
            source_url: String::new(),
            source_name: String::new(),
            notes: String::new(),
            discovered_at: Utc::now(),
        }
    }

    /// Set the year. Out-of-range values are discarded, not stored.
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year.and_then(valid_year);
        self
    }

    /// Set the free-text location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Override the derived neighbourhood.
    pub fn with_neighbourhood(mut self, neighbourhood: impl Into<String>) -> Self {
        self.neighbourhood = Some(neighbourhood.into());
        self
    }

    /// Set the medium tags (normalized on the way in).
    pub fn with_medium<I, S>(mut self, medium: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.medium = medium
            .into_iter()
            .map(|m| normalize_medium(m.as_ref()))
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    pub fn with_commissioned_by(mut self, commissioned_by: impl Into<String>) -> Self {
        self.commissioned_by = commissioned_by.into();
        self
    }

    /// Set where this candidate was found.
    pub fn with_source(mut self, url: impl Into<String>, name: impl Into<String>) -> Self {
        self.source_url = url.into();
        self.source_name = name.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the discovery timestamp (imports and tests).
    pub fn with_discovered_at(mut self, discovered_at: DateTime<Utc>) -> Self {
        self.discovered_at = discovered_at;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Neighbourhood as stated by the source, or derived from the location.
    pub fn neighbourhood(&self) -> &str {
        self.neighbourhood
            .as_deref()
            .unwrap_or_else(|| neighbourhood_for(&self.location))
    }

    pub fn medium(&self) -> &[String] {
        &self.medium
    }

    pub fn commissioned_by(&self) -> &str {
        &self.commissioned_by
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn discovered_at(&self) -> DateTime<Utc> {
        self.discovered_at
    }

    /// Completeness score: title 1, artist 2, year 1, location 1, source URL 1.
    pub fn score(&self) -> u8 {
        let mut score = 0;
        if !self.title.is_empty() {
            score += 1;
        }
        if !self.artist.is_empty() {
            score += 2;
        }
        if self.year.is_some() {
            score += 1;
        }
        if !self.location.is_empty() {
            score += 1;
        }
        if !self.source_url.is_empty() {
            score += 1;
        }
        score
    }

    /// Confidence tier for the candidate's current fields.
    pub fn calculate_confidence(&self) -> Confidence {
        Confidence::from_score(self.score())
    }

    /// Dedup key: exact, case-sensitive `(artist, title)` equality.
    pub fn is_same_artwork(&self, other: &ArtworkCandidate) -> bool {
        self.artist == other.artist && self.title == other.title
    }

    /// Title for display, "Untitled" when empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Flatten into the export row shape.
    pub fn to_record(&self) -> CandidateRecord {
        CandidateRecord {
            title: self.title.clone(),
            artist: self.artist.clone(),
            year: self.year,
            location: self.location.clone(),
            neighbourhood: self.neighbourhood().to_string(),
            medium: self.medium.join(", "),
            commissioned_by: self.commissioned_by.clone(),
            source_url: self.source_url.clone(),
            source_name: self.source_name.clone(),
            confidence: self.calculate_confidence(),
            notes: self.notes.clone(),
            discovered_at: self.discovered_at.to_rfc3339(),
        }
    }
}

/// One exported candidate row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
    pub location: String,
    pub neighbourhood: String,
    pub medium: String,
    pub commissioned_by: String,
    pub source_url: String,
    pub source_name: String,
    pub confidence: Confidence,
    pub notes: String,
    pub discovered_at: String,
}

impl CandidateRecord {
    pub const HEADERS: [&'static str; 12] = [
        "title",
        "artist",
        "year",
        "location",
        "neighbourhood",
        "medium",
        "commissioned_by",
        "source_url",
        "source_name",
        "confidence",
        "notes",
        "discovered_at",
    ];

    /// Cells in `HEADERS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.artist.clone(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.location.clone(),
            self.neighbourhood.clone(),
            self.medium.clone(),
            self.commissioned_by.clone(),
            self.source_url.clone(),
            self.source_name.clone(),
            self.confidence.to_string(),
            self.notes.clone(),
            self.discovered_at.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_candidate() -> ArtworkCandidate {
        ArtworkCandidate::new("Kent Ness", "Moving Forward")
            .with_year(Some(2023))
            .with_location("Dream's Building, Downtown Saskatoon, SK")
            .with_source("https://dtnyxe.ca/ness-jacobson-murals/", "DTNYXE Downtown Blog")
    }

    #[test]
    fn test_full_candidate_is_high() {
        let candidate = full_candidate();
        assert_eq!(candidate.score(), 6);
        assert_eq!(candidate.calculate_confidence(), Confidence::High);
    }

    #[test]
    fn test_artist_only_is_low() {
        let candidate = ArtworkCandidate::new("Jane Smith", "");
        assert_eq!(candidate.score(), 2);
        assert_eq!(candidate.calculate_confidence(), Confidence::Low);
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(Confidence::from_score(0), Confidence::Low);
        assert_eq!(Confidence::from_score(2), Confidence::Low);
        assert_eq!(Confidence::from_score(3), Confidence::Medium);
        assert_eq!(Confidence::from_score(4), Confidence::Medium);
        assert_eq!(Confidence::from_score(5), Confidence::High);
        assert_eq!(Confidence::from_score(6), Confidence::High);
    }

    #[test]
    fn test_confidence_tracks_rebuilt_fields() {
        let candidate = ArtworkCandidate::new("Jane Smith", "");
        assert_eq!(candidate.calculate_confidence(), Confidence::Low);

        let candidate = candidate
            .with_year(Some(2021))
            .with_location("3rd Avenue building");
        assert_eq!(candidate.calculate_confidence(), Confidence::Medium);
    }

    #[test]
    fn test_year_out_of_range_is_discarded() {
        assert_eq!(ArtworkCandidate::new("A B", "").with_year(Some(1899)).year(), None);
        assert_eq!(ArtworkCandidate::new("A B", "").with_year(Some(2099)).year(), None);
        assert_eq!(
            ArtworkCandidate::new("A B", "").with_year(Some(1900)).year(),
            Some(1900)
        );
        let now = current_year();
        assert_eq!(ArtworkCandidate::new("A B", "").with_year(Some(now)).year(), Some(now));
    }

    #[test]
    fn test_neighbourhood_derived_from_location() {
        let candidate = ArtworkCandidate::new("A B", "T").with_location("20th Street, Riversdale");
        assert_eq!(candidate.neighbourhood(), "Riversdale");

        let candidate = ArtworkCandidate::new("A B", "T").with_location("3rd Avenue building");
        assert_eq!(candidate.neighbourhood(), "");

        let candidate = ArtworkCandidate::new("A B", "T")
            .with_location("3rd Avenue building")
            .with_neighbourhood("Downtown");
        assert_eq!(candidate.neighbourhood(), "Downtown");
    }

    #[test]
    fn test_medium_is_normalized() {
        let candidate = ArtworkCandidate::new("A B", "T").with_medium(["Spray Paint", " Steel "]);
        assert_eq!(candidate.medium(), &["spray_paint".to_string(), "steel".to_string()]);
        assert_eq!(
            parse_medium_list("Acrylic Paint, mosaic,, Stained Glass"),
            vec!["acrylic_paint", "mosaic", "stained_glass"]
        );
    }

    #[test]
    fn test_same_artwork_is_case_sensitive() {
        let a = ArtworkCandidate::new("Jane Smith", "River Dreams");
        let b = ArtworkCandidate::new("Jane Smith", "River Dreams").with_year(Some(2020));
        let c = ArtworkCandidate::new("jane smith", "River Dreams");
        assert!(a.is_same_artwork(&b));
        assert!(!a.is_same_artwork(&c));
    }

    #[test]
    fn test_record_cells_follow_headers() {
        let record = full_candidate().with_medium(["paint", "mosaic"]).to_record();
        let cells = record.cells();
        assert_eq!(cells.len(), CandidateRecord::HEADERS.len());
        assert_eq!(cells[0], "Moving Forward");
        assert_eq!(cells[2], "2023");
        assert_eq!(cells[4], "Downtown");
        assert_eq!(cells[5], "paint, mosaic");
        assert_eq!(cells[9], "high");
    }

    proptest! {
        #[test]
        fn prop_artist_plus_two_fields_is_medium(mask in 0u8..16) {
            prop_assume!(mask.count_ones() == 2);
            let mut candidate = ArtworkCandidate::new("Jane Smith", "");
            if mask & 1 != 0 {
                candidate = ArtworkCandidate::new("Jane Smith", "River Dreams");
            }
            if mask & 2 != 0 {
                candidate = candidate.with_year(Some(2001));
            }
            if mask & 4 != 0 {
                candidate = candidate.with_location("Broadway Avenue");
            }
            if mask & 8 != 0 {
                candidate = candidate.with_source("https://example.com", "Example");
            }
            prop_assert_eq!(candidate.score(), 4);
            prop_assert_eq!(candidate.calculate_confidence(), Confidence::Medium);
        }

        #[test]
        fn prop_score_is_monotone_in_fields(title in "[A-Za-z ]{0,12}", year in 1800i32..2200) {
            let base = ArtworkCandidate::new("Jane Smith", title);
            let with_year = base.clone().with_year(Some(year));
            prop_assert!(with_year.score() >= base.score());
            prop_assert!(with_year.calculate_confidence() >= base.calculate_confidence());
        }
    }
}
