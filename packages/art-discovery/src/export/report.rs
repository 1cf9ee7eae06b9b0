//! Markdown discovery report.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::types::candidate::Confidence;
use crate::types::collection::CandidateList;

const NEXT_STEPS: &[&str] = &[
    "Review high confidence candidates in `candidates.csv`",
    "Verify artist names and titles",
    "Confirm locations and commissioning information",
    "Add vetted entries to `data/artworks/saskatoon.json`",
    "Consider reaching out to artists for verification",
];

/// Render the report for a finished run.
pub fn render_report(candidates: &CandidateList, generated_at: DateTime<Utc>) -> String {
    let high = candidates.with_confidence(Confidence::High);
    let medium = candidates.with_confidence(Confidence::Medium).len();
    let low = candidates.with_confidence(Confidence::Low).len();

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "# Discovery Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "- **Total Candidates**: {}", candidates.len());
    let _ = writeln!(out, "- **High Confidence**: {}", high.len());
    let _ = writeln!(out, "- **Medium Confidence**: {}", medium);
    let _ = writeln!(out, "- **Low Confidence**: {}", low);
    let _ = writeln!(out);
    let _ = writeln!(out, "## High Confidence Candidates");
    let _ = writeln!(out);

    for candidate in high {
        let year = candidate
            .year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let _ = writeln!(out, "### {}", candidate.display_title());
        let _ = writeln!(out, "- **Artist**: {}", candidate.artist());
        let _ = writeln!(out, "- **Location**: {}", candidate.location());
        let _ = writeln!(out, "- **Year**: {}", year);
        let _ = writeln!(
            out,
            "- **Source**: [{}]({})",
            candidate.source_name(),
            candidate.source_url()
        );
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Next Steps");
    let _ = writeln!(out);
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }

    out
}
