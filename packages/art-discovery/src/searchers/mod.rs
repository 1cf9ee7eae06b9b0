//! Web searcher implementations.
//!
//! - `TavilyWebSearcher` - Tavily API, selected when a key is configured
//! - `DuckDuckGoSearcher` - keyless HTML results page

mod duckduckgo;
mod tavily;

pub use duckduckgo::{parse_results, DuckDuckGoSearcher};
pub use tavily::TavilyWebSearcher;

pub use crate::traits::searcher::{MockWebSearcher, SearchResult, WebSearcher};
