//! Robots.txt handling module
//!
//! Fetches and parses the target origin's robots.txt once at startup. The
//! loaded policy is immutable for the rest of the run and is shared
//! read-only across all concurrent fetch tasks.
//!
//! Failure to retrieve the exclusion document is fatal: siteglean never
//! falls back to "allow everything" when it cannot read a site's policy.

mod parser;

pub use parser::RobotsPolicy;

use crate::GleanError;
use reqwest::Client;
use url::Url;

/// Fetches and parses robots.txt for the given origin
///
/// # Errors
///
/// Returns `GleanError::PolicyUnavailable` when the document cannot be
/// retrieved (transport error or non-2xx status) or its body cannot be
/// read. Callers must treat this as fatal before issuing any page fetch.
pub async fn load_policy(client: &Client, origin: &Url) -> Result<RobotsPolicy, GleanError> {
    let robots_url = origin.join("/robots.txt")?;
    tracing::debug!("Loading exclusion policy from {}", robots_url);

    let response = client.get(robots_url.as_str()).send().await.map_err(|e| {
        GleanError::PolicyUnavailable {
            origin: origin.to_string(),
            reason: e.to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GleanError::PolicyUnavailable {
            origin: origin.to_string(),
            reason: format!("HTTP {}", status.as_u16()),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| GleanError::PolicyUnavailable {
            origin: origin.to_string(),
            reason: format!("failed to read body: {}", e),
        })?;

    Ok(RobotsPolicy::from_content(&body))
}
