//! Text extractor: pattern-rule mining of artwork facts from plain text.
//!
//! This is heuristic by nature. Sources with hand-verified facts bypass it
//! entirely (see `adapters::article`).

pub mod rules;

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::types::candidate::valid_year;
pub use rules::{Field, PostFilter, Rule, RuleSet};

lazy_static! {
    static ref YEAR_REGEX: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").unwrap();
}

/// Facts mined from one block of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFacts {
    /// Distinct artist names, first-seen order
    pub artists: IndexSet<String>,
    /// Distinct titles, first-seen order
    pub titles: IndexSet<String>,
    /// Distinct locations, first-seen order
    pub locations: IndexSet<String>,
    pub year: Option<i32>,
    /// Single best-effort medium tag
    pub medium: Option<&'static str>,
}

impl ExtractedFacts {
    /// Artist is the gate; at least one of title or location must back it.
    pub fn is_acceptable(&self) -> bool {
        !self.artists.is_empty() && (!self.titles.is_empty() || !self.locations.is_empty())
    }

    pub fn first_title(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }

    pub fn first_location(&self) -> Option<&str> {
        self.locations.first().map(String::as_str)
    }

    /// Medium as a tag list (empty or one element).
    pub fn medium_tags(&self) -> Vec<String> {
        self.medium.map(|m| vec![m.to_string()]).unwrap_or_default()
    }
}

/// Runs a `RuleSet` over text.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    rules: Arc<RuleSet>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor {
    /// Extractor over the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
        }
    }

    /// Extractor over a custom rule set.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Mine all facts from `text`.
    pub fn extract(&self, text: &str) -> ExtractedFacts {
        ExtractedFacts {
            artists: self.collect(Field::Artist, text),
            titles: self.collect(Field::Title, text),
            locations: self.collect(Field::Location, text),
            year: extract_year(text),
            medium: infer_medium(text),
        }
    }

    fn collect(&self, field: Field, text: &str) -> IndexSet<String> {
        self.rules
            .for_field(field)
            .flat_map(|rule| rule.matches(text))
            .collect()
    }
}

/// The first 19xx/20xx run in the text, if it is a valid year.
///
/// Only the first run is considered: an out-of-range first match yields
/// `None` even when a later run would be valid.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .and_then(valid_year)
}

/// "paint" for paint/mural, else "sculpture", else nothing.
pub fn infer_medium(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    if lower.contains("paint") || lower.contains("mural") {
        Some("paint")
    } else if lower.contains("sculpture") {
        Some("sculpture")
    } else {
        None
    }
}
