//! Import of vetted public submissions into catalog records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{DiscoveryError, Result};
use crate::export::{csv::parse_records, write_json};
use crate::types::candidate::parse_medium_list;

/// Where a catalog artwork is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogLocation {
    pub address: String,
    pub neighbourhood: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One artwork record in the catalog's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogArtwork {
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
    pub location: CatalogLocation,
    pub commissioned_by: String,
    pub medium: Vec<String>,
    pub artist_contact: String,
    pub source: String,
    pub status: String,
}

fn cell<'a>(record: &'a IndexMap<String, String>, column: &str) -> &'a str {
    record.get(column).map(|v| v.trim()).unwrap_or("")
}

/// Parse an optional numeric cell. Unparseable values become `None`.
fn number<T: FromStr>(record: &IndexMap<String, String>, column: &str, row: usize) -> Option<T> {
    let value = cell(record, column);
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(row, column, value, "Unparseable number, leaving empty");
            None
        }
    }
}

impl CatalogArtwork {
    /// Build from one submissions-form row. `row` is used for logging only.
    pub fn from_record(record: &IndexMap<String, String>, row: usize) -> Self {
        Self {
            title: cell(record, "Artwork Title").to_string(),
            artist: cell(record, "Artist Name(s)").to_string(),
            year: number(record, "Year Completed", row),
            location: CatalogLocation {
                address: cell(record, "Location").to_string(),
                neighbourhood: cell(record, "Neighbourhood").to_string(),
                latitude: number(record, "Latitude", row),
                longitude: number(record, "Longitude", row),
            },
            commissioned_by: cell(record, "Commissioning Body").to_string(),
            medium: parse_medium_list(cell(record, "Medium")),
            artist_contact: cell(record, "Artist Contact").to_string(),
            source: cell(record, "Source").to_string(),
            status: cell(record, "Status").to_lowercase(),
        }
    }
}

/// Parse submissions CSV text into catalog records.
pub fn parse_submissions(text: &str) -> Vec<CatalogArtwork> {
    parse_records(text)
        .iter()
        .enumerate()
        .map(|(i, record)| CatalogArtwork::from_record(record, i + 1))
        .collect()
}

/// Convert a submissions CSV into a pretty JSON array of catalog records.
pub fn import_submissions(input: &Path, output: &Path) -> Result<Vec<CatalogArtwork>> {
    let text = fs::read_to_string(input).map_err(|e| DiscoveryError::io(input, e))?;
    let artworks = parse_submissions(&text);
    write_json(output, &artworks)?;
    info!(
        count = artworks.len(),
        input = %input.display(),
        output = %output.display(),
        "Converted submissions"
    );
    Ok(artworks)
}
