use anyhow::{Context, Result};
use art_discovery::{DiscoveryConfig, SecretString};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Default)]
pub struct AppConfig {
    pub output_dir: Option<PathBuf>,
    pub request_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub tavily_api_key: Option<SecretString>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            output_dir: get("ART_DISCOVERY_OUTPUT_DIR").map(PathBuf::from),
            request_delay_ms: get("ART_DISCOVERY_REQUEST_DELAY_MS")
                .map(|v| v.trim().parse())
                .transpose()
                .context("ART_DISCOVERY_REQUEST_DELAY_MS must be a whole number of milliseconds")?,
            request_timeout_secs: get("ART_DISCOVERY_TIMEOUT_SECS")
                .map(|v| v.trim().parse())
                .transpose()
                .context("ART_DISCOVERY_TIMEOUT_SECS must be a whole number of seconds")?,
            tavily_api_key: get("TAVILY_API_KEY").map(SecretString::from),
        })
    }

    /// Library configuration, with `output_dir` taking precedence over the
    /// environment.
    pub fn discovery_config(&self, output_dir: Option<PathBuf>) -> DiscoveryConfig {
        let mut config = DiscoveryConfig::default();
        if let Some(dir) = output_dir.or_else(|| self.output_dir.clone()) {
            config = config.with_output_dir(dir);
        }
        if let Some(ms) = self.request_delay_ms {
            config = config.with_request_delay_ms(ms);
        }
        if let Some(secs) = self.request_timeout_secs {
            config = config.with_request_timeout_secs(secs);
        }
        config
    }
}
