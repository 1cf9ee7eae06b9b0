//! The run's candidate accumulator and dedup predicate.

use crate::types::candidate::{ArtworkCandidate, Confidence};

/// Whether `candidate` shares its `(artist, title)` pair with any entry.
///
/// Exact, case-sensitive comparison. Spelling drift is not caught.
pub fn is_duplicate(candidate: &ArtworkCandidate, existing: &[ArtworkCandidate]) -> bool {
    existing.iter().any(|e| e.is_same_artwork(candidate))
}

/// Ordered list of candidates accumulated across all adapters of one run.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    items: Vec<ArtworkCandidate>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless a candidate with the same dedup key is already stored.
    ///
    /// Returns true if the candidate was stored.
    pub fn append(&mut self, candidate: ArtworkCandidate) -> bool {
        if self.contains(&candidate) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, candidate: &ArtworkCandidate) -> bool {
        is_duplicate(candidate, &self.items)
    }

    pub fn as_slice(&self) -> &[ArtworkCandidate] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtworkCandidate> {
        self.items.iter()
    }

    /// Candidates in the given tier, in discovery order.
    pub fn with_confidence(&self, tier: Confidence) -> Vec<&ArtworkCandidate> {
        self.items
            .iter()
            .filter(|c| c.calculate_confidence() == tier)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<ArtworkCandidate> {
        self.items
    }
}
