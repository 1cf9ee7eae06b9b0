//! Output writers: candidates CSV, source registry JSON, markdown report.

pub mod csv;
pub mod report;

use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::types::candidate::CandidateRecord;
use crate::types::collection::CandidateList;
use crate::types::source::SourceRegistry;

pub use report::render_report;

/// Paths written by one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPaths {
    pub candidates: PathBuf,
    pub sources: PathBuf,
    pub report: PathBuf,
}

/// Render candidates as CSV text, header first.
pub fn candidates_csv(candidates: &CandidateList) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = csv::write_row(&mut buf, &CandidateRecord::HEADERS);
    for candidate in candidates.iter() {
        let _ = csv::write_row(&mut buf, &candidate.to_record().cells());
    }
    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// Write `candidates.csv`. With no candidates only the header is written.
pub fn write_candidates_csv(path: &Path, candidates: &CandidateList) -> Result<()> {
    write_file(path, candidates_csv(candidates).as_bytes())?;
    info!(path = %path.display(), count = candidates.len(), "Exported candidates");
    Ok(())
}

/// Write the source registry as pretty-printed JSON.
pub fn write_sources_json(path: &Path, sources: &SourceRegistry) -> Result<()> {
    write_json(path, sources)?;
    info!(path = %path.display(), count = sources.len(), "Exported source registry");
    Ok(())
}

/// Write the markdown report, stamped with the current time.
pub fn write_report(path: &Path, candidates: &CandidateList) -> Result<()> {
    write_file(path, render_report(candidates, Utc::now()).as_bytes())?;
    info!(path = %path.display(), "Generated report");
    Ok(())
}

/// Write all three run outputs into the configured output directory.
pub fn export_run(
    config: &DiscoveryConfig,
    candidates: &CandidateList,
    sources: &SourceRegistry,
) -> Result<ExportPaths> {
    let paths = ExportPaths {
        candidates: config.candidates_path(),
        sources: config.sources_path(),
        report: config.report_path(),
    };
    write_candidates_csv(&paths.candidates, candidates)?;
    write_sources_json(&paths.sources, sources)?;
    write_report(&paths.report, candidates)?;
    Ok(paths)
}

/// Serialize `value` as pretty JSON into `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, json.as_bytes())
}

/// Replace `path` with `contents`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DiscoveryError::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| DiscoveryError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .and_then(|_| writer.flush())
        .map_err(|e| DiscoveryError::io(path, e))
}
