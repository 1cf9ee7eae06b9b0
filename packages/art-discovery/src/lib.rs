//! Public Art Discovery Engine
//!
//! Finds candidate public artworks (murals, sculptures, installations) in
//! Saskatoon from public web sources and writes them out for human review.
//! Nothing produced here is authoritative: every record is a *candidate*
//! with a coarse confidence tier.
//!
//! # Pipeline
//!
//! A fixed, sequential run of source adapters over one page fetcher:
//!
//! 1. Known blog articles (hand-verified facts bypass the extractor)
//! 2. City public-art registry (flagged for manual review when unparseable)
//! 3. Broad web search (keeps medium and high confidence only)
//! 4. API-gated sources (recorded, never fetched)
//!
//! Then `candidates.csv`, `sources.json` and `discovery_report.md` are
//! written to the output directory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use art_discovery::{DiscoveryConfig, DiscoveryEngine, DuckDuckGoSearcher, HttpFetcher};
//!
//! let config = DiscoveryConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let searcher = Arc::new(DuckDuckGoSearcher::new(fetcher.clone()));
//! let run = DiscoveryEngine::standard(config, fetcher, searcher).run().await?;
//! println!("{} candidates", run.candidates.len());
//! ```
//!
//! # Modules
//!
//! - [`types`] - Candidate, candidate list, source registry, fetched pages
//! - [`extract`] - Pattern-rule text extractor
//! - [`traits`] - `PageFetcher` and `WebSearcher` seams
//! - [`fetchers`] - HTTP and mock fetchers
//! - [`searchers`] - Tavily and DuckDuckGo searchers
//! - [`adapters`] - Per-source acquisition strategies
//! - [`engine`] - Run orchestration
//! - [`export`] - CSV, JSON and markdown writers
//! - [`workflows`] - Contact enrichment and submission import

pub mod adapters;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetchers;
pub mod searchers;
pub mod traits;
pub mod types;
pub mod workflows;

// Re-export core types at crate root
pub use config::{DiscoveryConfig, DEFAULT_USER_AGENT};
pub use error::{DiscoveryError, FetchError, FetchResult, Result};
pub use traits::{
    fetcher::PageFetcher,
    searcher::{MockWebSearcher, SearchResult, WebSearcher},
};
pub use types::{
    candidate::{ArtworkCandidate, CandidateRecord, Confidence},
    collection::{is_duplicate, CandidateList},
    page::{FetchedPage, PageText},
    source::{SourceEntry, SourceRegistry, SourceStatus},
};

pub use adapters::{
    AcceptancePolicy, AdapterReport, ArticleAdapter, DiscoveryState, KnownArticle, KnownArtwork,
    RegistryAdapter, SearchAdapter, SourceAdapter, UnsupportedSourceAdapter,
};
pub use engine::{DiscoveryEngine, DiscoveryRun, RunSummary};
pub use export::{export_run, ExportPaths};
pub use extract::{ExtractedFacts, TextExtractor};
pub use fetchers::{HttpFetcher, MockFetcher};
pub use searchers::{DuckDuckGoSearcher, TavilyWebSearcher};
pub use secrecy::{ExposeSecret, SecretString};
pub use workflows::{
    export_contacts, import_submissions, load_artists, ArtistContact, CatalogArtwork,
    ContactFinder,
};
