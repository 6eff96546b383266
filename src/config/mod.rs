//! Configuration module for siteglean
//!
//! Handles loading, parsing, and validating TOML configuration files.
//! When no file is given, `Config::builtin()` supplies the default scrape
//! target so the binary can run with no arguments.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
