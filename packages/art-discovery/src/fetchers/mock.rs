//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::page::FetchedPage;

/// Mock fetcher with canned pages and failures.
///
/// Unknown URLs fail with `FetchError::NotFound`.
///
/// # Example
///
/// ```rust
/// use art_discovery::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_html("https://example.com/a", "<article>By Jane Smith</article>")
///     .with_status_failure("https://example.com/b", 503);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, u16>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page body that will be returned for `url`.
    pub fn add_page(&self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), body.into());
    }

    /// Builder form of `add_page`.
    pub fn with_html(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_page(url, body);
        self
    }

    /// Make `url` answer with a non-success status.
    pub fn with_status_failure(self, url: impl Into<String>, status: u16) -> Self {
        self.failures.write().unwrap().insert(url.into(), status);
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(status) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .map(|body| FetchedPage::new(url, body.clone()).with_status(200))
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
