//! Robots.txt policy evaluation
//!
//! Allow/disallow decisions are delegated to the robotstxt crate; the
//! crawl-delay directive is parsed here since the crate does not expose it.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Parsed exclusion ruleset for a single origin.
///
/// Immutable after construction. No network or disk I/O happens here; the
/// raw document is fetched once by [`super::load_policy`].
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content
    content: String,
    /// When set, every URL is denied regardless of content
    deny_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            deny_all: false,
        }
    }

    /// Creates a policy that denies every URL.
    ///
    /// This is the safe default when no policy could be loaded: a missing
    /// ruleset must never be treated as permission to fetch.
    pub fn deny_all() -> Self {
        Self {
            content: String::new(),
            deny_all: true,
        }
    }

    /// Returns the raw robots.txt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Checks whether a URL may be fetched by the given user agent
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.deny_all {
            return false;
        }
        if self.content.is_empty() {
            // An empty document places no restrictions
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Returns the crawl delay that applies to the given user agent
    ///
    /// A delay declared for a specific agent group takes precedence over
    /// one declared for the `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        if self.deny_all || self.content.is_empty() {
            return None;
        }

        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_rules = false;
        let mut wildcard_delay: Option<f64> = None;
        let mut agent_delay: Option<f64> = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after any rule line starts a new group
                    if in_rules {
                        group.clear();
                        in_rules = false;
                    }
                    if !value.is_empty() {
                        group.push(value.to_lowercase());
                    }
                }
                "crawl-delay" => {
                    in_rules = true;
                    if let Ok(secs) = value.parse::<f64>() {
                        if secs >= 0.0 && secs.is_finite() {
                            if group.iter().any(|g| g != "*" && agent.contains(g.as_str())) {
                                agent_delay = Some(secs);
                            } else if group.iter().any(|g| g == "*") {
                                wildcard_delay = Some(secs);
                            }
                        }
                    }
                }
                _ => {
                    // Allow, Disallow, Sitemap, etc. close the agent list
                    in_rules = true;
                }
            }
        }

        agent_delay
            .or(wildcard_delay)
            .map(Duration::from_secs_f64)
    }
}
