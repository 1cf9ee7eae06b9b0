//! Command-line entry point for the public art discovery engine.
//!
//! - `discover` (default): run every source adapter and write the outputs
//! - `contacts`: look up public contact points for discovered artists
//! - `import-submissions`: convert a submissions CSV into catalog JSON

mod config;

use anyhow::{Context, Result};
use art_discovery::{
    export_contacts, import_submissions, load_artists, Confidence, ContactFinder,
    DiscoveryConfig, DiscoveryEngine, DuckDuckGoSearcher, ExposeSecret, HttpFetcher,
    PageFetcher, TavilyWebSearcher, WebSearcher,
};
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "art-discovery")]
#[command(about = "Discover candidate public artworks in Saskatoon for human review")]
struct Cli {
    /// Output directory (overrides ART_DISCOVERY_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the discovery pipeline (default)
    Discover,

    /// Find public contact information for artists in candidates.csv
    Contacts,

    /// Convert a submissions CSV into catalog JSON
    ImportSubmissions {
        #[arg(long, default_value = "submissions.csv")]
        input: PathBuf,
        #[arg(long, default_value = "data/artworks/saskatoon_from_submissions.json")]
        output: PathBuf,
    },
}

/// Console output, plus an append-only run log when `log_path` is given.
fn init_tracing(log_path: Option<&Path>) -> Result<()> {
    let log_layer = match log_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,art_discovery=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(log_layer)
        .init();
    Ok(())
}

/// Tavily when a key is configured, sharing the fetcher's HTTP client and
/// the configured request timeout. Otherwise DuckDuckGo through the fetcher.
fn build_searcher(
    app: &AppConfig,
    config: &DiscoveryConfig,
    http: Arc<HttpFetcher>,
) -> Arc<dyn WebSearcher> {
    match &app.tavily_api_key {
        Some(key) => {
            tracing::info!("Using Tavily web search");
            Arc::new(
                TavilyWebSearcher::from_config(key.expose_secret(), config)
                    .with_client(http.client().clone()),
            )
        }
        None => {
            tracing::info!("No TAVILY_API_KEY set, using DuckDuckGo HTML search");
            Arc::new(
                DuckDuckGoSearcher::new(http).with_default_limit(config.max_results_per_query),
            )
        }
    }
}

async fn discover(app: &AppConfig, config: DiscoveryConfig) -> Result<()> {
    let http = Arc::new(HttpFetcher::new(&config).context("Failed to build HTTP client")?);
    let searcher = build_searcher(app, &config, http.clone());
    let fetcher: Arc<dyn PageFetcher> = http;

    let run = DiscoveryEngine::standard(config, fetcher, searcher)
        .run()
        .await
        .context("Failed to write discovery outputs")?;

    let summary = run.summary();
    println!("Discovery complete");
    println!("  Total candidates: {}", summary.total);
    println!("  High confidence:  {}", summary.high);
    println!("  Medium confidence: {}", summary.medium);
    println!("  Low confidence:   {}", summary.low);
    println!("  Sources flagged:  {}", summary.sources_flagged);
    println!("Candidates: {}", run.outputs.candidates.display());
    println!("Report:     {}", run.outputs.report.display());
    Ok(())
}

async fn contacts(app: &AppConfig, config: DiscoveryConfig) -> Result<()> {
    let artists = load_artists(&config.candidates_path()).context("Failed to read candidates")?;

    let http = Arc::new(HttpFetcher::new(&config).context("Failed to build HTTP client")?);
    let finder = ContactFinder::new(build_searcher(app, &config, http));
    let contacts = finder.find_contacts(&artists).await;

    export_contacts(&config.contacts_path(), &contacts).context("Failed to write contacts")?;

    let high: Vec<_> = contacts
        .values()
        .filter(|c| c.confidence == Confidence::High)
        .collect();
    println!("Contact discovery complete");
    println!("  Total artists:   {}", contacts.len());
    println!("  High confidence: {}", high.len());
    for contact in high {
        println!("  - {}", contact.name);
        if let Some(website) = &contact.website {
            println!("    Website: {}", website);
        }
    }
    Ok(())
}

/// Only commands that touch the discovery output directory keep a run log.
fn run_log_path(command: &Commands, config: &DiscoveryConfig) -> Option<PathBuf> {
    match command {
        Commands::Discover | Commands::Contacts => Some(config.log_path()),
        Commands::ImportSubmissions { .. } => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app = AppConfig::from_env().context("Failed to load configuration")?;
    let config = app.discovery_config(cli.output_dir);
    let command = cli.command.unwrap_or(Commands::Discover);

    init_tracing(run_log_path(&command, &config).as_deref())?;

    match command {
        Commands::Discover => discover(&app, config).await,
        Commands::Contacts => contacts(&app, config).await,
        Commands::ImportSubmissions { input, output } => {
            let artworks = import_submissions(&input, &output)
                .with_context(|| format!("Failed to import {}", input.display()))?;
            println!(
                "Converted {} submissions to {}",
                artworks.len(),
                output.display()
            );
            Ok(())
        }
    }
}
