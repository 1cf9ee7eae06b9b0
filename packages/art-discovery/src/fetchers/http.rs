//! HTTP page fetcher.
//!
//! One request at a time, each preceded by a fixed politeness delay. The
//! delay is the only rate limiting; the per-request timeout bounds how long a
//! dead host can stall the run.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::page::FetchedPage;

/// HTTP fetcher backed by `reqwest`.
///
/// # Example
///
/// ```rust,ignore
/// let fetcher = HttpFetcher::new(&DiscoveryConfig::default())?;
/// match fetcher.fetch("https://dtnyxe.ca/ness-jacobson-murals/").await {
///     Ok(page) => println!("{} bytes", page.body.len()),
///     Err(e) => eprintln!("unavailable: {e}"),
/// }
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    delay: Duration,
}

impl HttpFetcher {
    /// Build the client from configuration.
    ///
    /// Fails only if the TLS backend cannot be initialized; callers treat that
    /// as a startup error.
    pub fn new(config: &DiscoveryConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            delay: config.request_delay(),
        })
    }

    /// Set the politeness delay before each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Borrow the client (search providers share it).
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        info!(url = %url, "Fetching");

        if url::Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            FetchError::from_reqwest(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        debug!(url = %url, content_length = body.len(), "Page fetched");

        let mut page = FetchedPage::new(url, body).with_status(status.as_u16());
        if let Some(ct) = content_type {
            page = page.with_content_type(ct);
        }
        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_config() {
        let config = DiscoveryConfig::default().with_request_delay_ms(250);
        let fetcher = HttpFetcher::new(&config).unwrap();
        assert_eq!(fetcher.delay(), Duration::from_millis(250));
        assert_eq!(fetcher.name(), "http");
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_network() {
        let fetcher = HttpFetcher::new(&DiscoveryConfig::default())
            .unwrap()
            .with_delay(Duration::ZERO);
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }
}
