//! Page fetcher implementations.
//!
//! - `HttpFetcher` - reqwest with a politeness delay and timeout
//! - `MockFetcher` - For testing

mod http;
mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::PageFetcher;
