//! Trait seams for the external collaborators.

pub mod fetcher;
pub mod searcher;

pub use fetcher::PageFetcher;
pub use searcher::{MockWebSearcher, SearchResult, WebSearcher};
