//! Page fetcher trait: "given a URL, return the page or why it failed".
//!
//! Adapters branch on the `FetchResult` variant instead of relying on
//! exceptions. A failure is never fatal to the run.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::page::FetchedPage;

/// Fetches one page at a time.
///
/// Implementations:
/// - `HttpFetcher` - reqwest with a fixed politeness delay before each request
/// - `MockFetcher` - canned pages for tests
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single URL.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Fetch several URLs sequentially, keeping each outcome.
    async fn fetch_all(&self, urls: &[String]) -> Vec<(String, FetchResult<FetchedPage>)> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push((url.clone(), self.fetch(url).await));
        }
        results
    }

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
