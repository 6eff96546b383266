//! Scrape module: fetch, extract, orchestrate
//!
//! - `fetcher`: bounded-concurrency HTTP retrieval with ordered gather
//! - `extractor`: pure HTML to record mapping
//! - `pipeline`: the end-to-end run (policy load, fetch, persist, export)

mod extractor;
mod fetcher;
mod pipeline;

pub use extractor::{extract, ExtractError};
pub use fetcher::{build_http_client, FetchFailure, FetchResult, Fetcher};
pub use pipeline::{harvest, page_urls, Harvester};
