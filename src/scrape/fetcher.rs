//! Concurrent HTTP fetcher
//!
//! Dispatches a batch of URLs with bounded parallelism and gathers one
//! typed result per URL in input order, regardless of completion order.
//! Every request is checked against the loaded robots policy first; denied
//! URLs never touch the network.

use crate::config::FetcherConfig;
use crate::robots::RobotsPolicy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Outcome of a single fetch attempt. Produced exactly once per requested
/// URL; there are no retries within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Raw response body
    Success(String),
    /// Typed failure; the run continues without this URL
    Failure(FetchFailure),
}

/// Why a URL produced no content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// robots.txt disallows this URL; no request was made
    PolicyDenied,
    /// Transport-level failure (DNS, connect, timeout, truncated body)
    Network(String),
    /// The server answered with a non-2xx status
    HttpStatus(u16),
}

impl FetchResult {
    /// Returns the body for a successful fetch
    pub fn success(&self) -> Option<&str> {
        match self {
            FetchResult::Success(body) => Some(body),
            FetchResult::Failure(_) => None,
        }
    }
}

/// Builds the HTTP client shared by the policy loader and the fetcher
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Batch fetcher bound to one origin's policy for the lifetime of a run
pub struct Fetcher {
    client: Client,
    policy: Arc<RobotsPolicy>,
    user_agent: String,
    max_concurrent: usize,
    crawl_delay: Option<Duration>,
}

impl Fetcher {
    /// Creates a fetcher from a client and a loaded policy.
    ///
    /// A crawl delay declared in robots.txt forces sequential dispatch;
    /// concurrent requests cannot honor a minimum spacing.
    pub fn new(client: Client, policy: Arc<RobotsPolicy>, config: &FetcherConfig) -> Self {
        let crawl_delay = policy.crawl_delay(&config.user_agent);
        let max_concurrent = if crawl_delay.is_some() {
            1
        } else {
            config.max_concurrent_requests
        };

        Self {
            client,
            policy,
            user_agent: config.user_agent.clone(),
            max_concurrent,
            crawl_delay,
        }
    }

    /// Fetches every URL in the batch, bounded by the concurrency limit.
    ///
    /// The returned vector has exactly one entry per input URL, in input
    /// order. The call resolves only after every dispatched request has
    /// settled.
    pub async fn fetch_all(&self, urls: &[Url]) -> Vec<FetchResult> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let policy = Arc::clone(&self.policy);
            let user_agent = self.user_agent.clone();
            let crawl_delay = self.crawl_delay;
            let url = url.clone();

            handles.push(tokio::spawn(async move {
                if !policy.is_allowed(url.as_str(), &user_agent) {
                    tracing::warn!("robots.txt disallows scraping: {}", url);
                    return FetchResult::Failure(FetchFailure::PolicyDenied);
                }

                let permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return FetchResult::Failure(FetchFailure::Network(
                            "fetch slot unavailable".to_string(),
                        ))
                    }
                };

                let result = fetch_one(&client, &url).await;

                if let Some(delay) = crawl_delay {
                    // Hold the permit through the sleep so the next request
                    // is spaced by the declared delay
                    tokio::time::sleep(delay).await;
                }
                drop(permit);

                result
            }));
        }

        // Gather in spawn order so output position matches input position
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    results.push(FetchResult::Failure(FetchFailure::Network(format!(
                        "fetch task failed: {}",
                        e
                    ))))
                }
            }
        }
        results
    }
}

/// Issues a single GET and classifies the outcome
async fn fetch_one(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.as_str()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchResult::Failure(FetchFailure::HttpStatus(status.as_u16()));
            }

            match response.text().await {
                Ok(body) => FetchResult::Success(body),
                Err(e) => FetchResult::Failure(FetchFailure::Network(e.to_string())),
            }
        }
        Err(e) => {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            FetchResult::Failure(FetchFailure::Network(reason))
        }
    }
}
