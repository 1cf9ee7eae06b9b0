//! Registry of sources that could not be parsed automatically.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Why a source needs a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Page fetched, but its structure needs manual inspection
    RequiresManualReview,
    /// Source is gated behind an authenticated API
    RequiresApiAccess,
    /// Page could not be fetched at all
    Unreachable,
}

/// Metadata recorded for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: SourceStatus,
    pub note: String,
}

impl SourceEntry {
    pub fn new(status: SourceStatus, note: impl Into<String>) -> Self {
        Self {
            url: None,
            status,
            note: note.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Insertion-ordered, append-only map of source id to entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRegistry {
    entries: IndexMap<String, SourceEntry>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source. Returns false (and keeps the first entry) if the id
    /// was already recorded during this run.
    pub fn record(&mut self, id: impl Into<String>, entry: SourceEntry) -> bool {
        let id = id.into();
        if self.entries.contains_key(&id) {
            tracing::debug!(source = %id, "Source already recorded, keeping first entry");
            return false;
        }
        self.entries.insert(id, entry);
        true
    }

    pub fn get(&self, id: &str) -> Option<&SourceEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SourceEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_append_only() {
        let mut registry = SourceRegistry::new();
        assert!(registry.record(
            "instagram",
            SourceEntry::new(SourceStatus::RequiresApiAccess, "first")
        ));
        assert!(!registry.record(
            "instagram",
            SourceEntry::new(SourceStatus::Unreachable, "second")
        ));

        let entry = registry.get("instagram").unwrap();
        assert_eq!(entry.status, SourceStatus::RequiresApiAccess);
        assert_eq!(entry.note, "first");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_serializes_as_map() {
        let mut registry = SourceRegistry::new();
        registry.record(
            "city_saskatoon",
            SourceEntry::new(SourceStatus::RequiresManualReview, "Page structure needs analysis")
                .with_url("https://www.saskatoon.ca/public-art"),
        );
        registry.record(
            "instagram",
            SourceEntry::new(SourceStatus::RequiresApiAccess, "Would search: #yxeart"),
        );

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["city_saskatoon"]["status"], "requires_manual_review");
        assert_eq!(json["city_saskatoon"]["url"], "https://www.saskatoon.ca/public-art");
        assert!(json["instagram"].get("url").is_none());

        let keys: Vec<_> = registry.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["city_saskatoon", "instagram"]);
    }
}
