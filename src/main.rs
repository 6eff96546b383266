//! Siteglean main entry point

use clap::Parser;
use siteglean::config::{load_config_with_hash, Config};
use siteglean::{harvest, Harvester};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Siteglean: a polite single-site page scraper
///
/// Fetches a fixed range of index pages from one origin while respecting
/// robots.txt, extracts title and description fields, stores the records
/// in SQLite, and exports them to CSV and JSON.
#[derive(Parser, Debug)]
#[command(name = "siteglean")]
#[command(version)]
#[command(about = "A polite single-site page scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Scrape and persist without writing CSV/JSON exports
    #[arg(long)]
    skip_export: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::builtin()
        }
    };

    let items = if cli.skip_export {
        let mut harvester = Harvester::new(config)?;
        harvester.run().await?
    } else {
        harvest(config).await?
    };

    println!("Scraped {} items", items.len());
    for item in items.iter().take(5) {
        println!("  {} | {}", item.url, item.title);
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("siteglean=info,warn"),
            1 => EnvFilter::new("siteglean=debug,info"),
            2 => EnvFilter::new("siteglean=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
