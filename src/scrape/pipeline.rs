//! End-to-end scrape pipeline
//!
//! Drives a run through its phases in order: load the exclusion policy
//! (fatal on failure), generate the page URL sequence, fan out through the
//! fetcher, extract and persist each success, export, and return the
//! accumulated items. Errors local to one URL never abort the run.

use crate::config::Config;
use crate::output::{write_csv, write_json};
use crate::robots::{self, RobotsPolicy};
use crate::scrape::extractor::extract;
use crate::scrape::fetcher::{build_http_client, FetchFailure, FetchResult, Fetcher};
use crate::storage::SqliteStore;
use crate::{Result, ScrapedItem};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Owns the resources for one scrape run: config, HTTP client, and the
/// store handle. The store is only ever touched from this struct, after
/// the concurrent fetch phase has fully resolved.
pub struct Harvester {
    config: Config,
    client: Client,
    store: SqliteStore,
}

impl Harvester {
    /// Opens the store and builds the HTTP client.
    ///
    /// Store creation failures (unwritable path, corrupt schema) are fatal
    /// here, before any network traffic.
    pub fn new(config: Config) -> Result<Self> {
        let store = SqliteStore::new(Path::new(&config.output.database_path))?;
        let client = build_http_client(&config.fetcher)?;
        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// Runs the scrape: policy load, concurrent fetch, extract, persist.
    ///
    /// Returns the items persisted this run, in page order. Per-URL fetch
    /// failures, extraction errors, and item write failures are logged and
    /// skipped; only a missing policy aborts.
    pub async fn run(&mut self) -> Result<Vec<ScrapedItem>> {
        let base = Url::parse(&self.config.site.base_url)?;
        let policy: Arc<RobotsPolicy> =
            Arc::new(robots::load_policy(&self.client, &base).await?);

        let urls = page_urls(&base, self.config.site.page_count)?;
        tracing::info!("Fetching {} pages from {}", urls.len(), base);

        let fetcher = Fetcher::new(self.client.clone(), policy, &self.config.fetcher);
        let results = fetcher.fetch_all(&urls).await;

        let mut items = Vec::new();
        for (url, result) in urls.iter().zip(results) {
            match result {
                FetchResult::Success(body) => match extract(&body, url) {
                    Ok(item) => {
                        if let Err(e) = self.store.upsert(&item) {
                            tracing::error!("Failed to persist {}: {}", url, e);
                            continue;
                        }
                        items.push(item);
                    }
                    Err(e) => {
                        tracing::error!("Extraction failed for {}: {}", url, e);
                    }
                },
                FetchResult::Failure(FetchFailure::PolicyDenied) => {
                    // The fetcher already warned at deny time
                    tracing::debug!("Skipped {}: disallowed by robots.txt", url);
                }
                FetchResult::Failure(FetchFailure::Network(reason)) => {
                    tracing::error!("Error fetching {}: {}", url, reason);
                }
                FetchResult::Failure(FetchFailure::HttpStatus(code)) => {
                    tracing::error!("Error fetching {}: HTTP {}", url, code);
                }
            }
        }

        tracing::info!("Persisted {} of {} pages", items.len(), urls.len());
        Ok(items)
    }

    /// Writes the run's items to the configured CSV and JSON paths
    pub fn export(&self, items: &[ScrapedItem]) -> Result<()> {
        write_csv(items, Path::new(&self.config.output.csv_path))?;
        write_json(items, Path::new(&self.config.output.json_path))?;
        tracing::info!(
            "Exported {} items to {} and {}",
            items.len(),
            self.config.output.csv_path,
            self.config.output.json_path
        );
        Ok(())
    }
}

/// Generates the deterministic page-index URL sequence `/page/1..=count`
pub fn page_urls(base: &Url, count: u32) -> Result<Vec<Url>> {
    (1..=count)
        .map(|n| base.join(&format!("/page/{}", n)).map_err(Into::into))
        .collect()
}

/// Runs a complete scrape: fetch, persist, export.
///
/// This is the main library entry point. Returns the items scraped this
/// run.
pub async fn harvest(config: Config) -> Result<Vec<ScrapedItem>> {
    let mut harvester = Harvester::new(config)?;
    let items = harvester.run().await?;
    harvester.export(&items)?;
    Ok(items)
}
