use serde::Deserialize;

/// Main configuration structure for siteglean
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin to scrape, e.g. "https://example.com"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Number of index pages to fetch: /page/1 through /page/N
    #[serde(rename = "page-count")]
    pub page_count: u32,
}

/// Fetcher behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Maximum number of simultaneous in-flight requests
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User-agent header sent with every request and matched against
    /// robots.txt groups
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the CSV export file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the JSON export file
    #[serde(rename = "json-path")]
    pub json_path: String,
}

fn default_user_agent() -> String {
    // A mainstream browser string; some sites serve degraded markup to
    // anything that does not look like a browser.
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

impl Config {
    /// The built-in configuration used when no config file is supplied.
    pub fn builtin() -> Self {
        Self {
            site: SiteConfig {
                base_url: "https://example.com".to_string(),
                page_count: 5,
            },
            fetcher: FetcherConfig {
                max_concurrent_requests: 5,
                request_timeout_secs: 30,
                user_agent: default_user_agent(),
            },
            output: OutputConfig {
                database_path: "./scraped_data.db".to_string(),
                csv_path: "./scraped_data.csv".to_string(),
                json_path: "./scraped_data.json".to_string(),
            },
        }
    }
}
