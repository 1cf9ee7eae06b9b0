//! Configuration for a discovery run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Polite identification for the sites we crawl.
pub const DEFAULT_USER_AGENT: &str =
    "Saskatoon Art Guide Discovery Bot (Educational/Non-Commercial)";

/// Configuration for the discovery pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Directory that receives every output file.
    ///
    /// Default: `data/discovered`.
    pub output_dir: PathBuf,

    /// Fixed delay before every request, in milliseconds.
    ///
    /// Default: 1000.
    pub request_delay_ms: u64,

    /// Per-request timeout, in seconds.
    ///
    /// Default: 10.
    pub request_timeout_secs: u64,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Cap on candidates materialized from a single page.
    ///
    /// Default: 10.
    pub max_artists_per_page: usize,

    /// Results taken from each search query.
    ///
    /// Default: 5.
    pub max_results_per_query: usize,

    /// Distinct pages a search-driven adapter will fetch in total.
    ///
    /// Default: 20.
    pub max_pages_per_search: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/discovered"),
            request_delay_ms: 1000,
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_artists_per_page: 10,
            max_results_per_query: 5,
            max_pages_per_search: 20,
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_request_delay_ms(mut self, ms: u64) -> Self {
        self.request_delay_ms = ms;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_artists_per_page(mut self, max: usize) -> Self {
        self.max_artists_per_page = max;
        self
    }

    pub fn with_search_limits(mut self, per_query: usize, total_pages: usize) -> Self {
        self.max_results_per_query = per_query;
        self.max_pages_per_search = total_pages;
        self
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn candidates_path(&self) -> PathBuf {
        self.output_dir.join("candidates.csv")
    }

    pub fn sources_path(&self) -> PathBuf {
        self.output_dir.join("sources.json")
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("discovery_report.md")
    }

    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join("discovery.log")
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.output_dir.join("contacts.json")
    }
}
