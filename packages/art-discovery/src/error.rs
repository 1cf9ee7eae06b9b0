//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the binary can
//! decide which failures are fatal.

use thiserror::Error;

/// Errors that can occur while running discovery or its side workflows.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Fetch operation failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Web search provider failed
    #[error("search failed for {query:?}: {reason}")]
    Search { query: String, reason: String },

    /// Reading or writing an output file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl DiscoveryError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Errors that can occur while fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level HTTP failure (DNS, TLS, connection reset)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Request exceeded the per-request timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// No canned page (test doubles) or empty body
    #[error("no content at: {url}")]
    NotFound { url: String },
}

impl FetchError {
    /// Classify a reqwest error, keeping timeouts distinct.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            Self::Http(Box::new(error))
        }
    }
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Outcome of one fetch: the page, or the reason it is unavailable.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
