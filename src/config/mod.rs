//! Configuration module for linkrank
//!
//! This module handles two inputs:
//! - the seed file (node budget, domain URL, seed URLs) that drives a crawl
//! - an optional TOML settings file for crawler and PageRank tuning
//!
//! # Example
//!
//! ```no_run
//! use linkrank::config::{load_seed_file, load_settings};
//! use std::path::Path;
//!
//! let seeds = load_seed_file(Path::new("crawler.txt")).unwrap();
//! let settings = load_settings(Path::new("linkrank.toml")).unwrap();
//! println!(
//!     "Crawling {} with budget {} and {} workers",
//!     seeds.domain, seeds.max_nodes, settings.crawler.max_concurrent_fetches
//! );
//! ```

mod parser;
mod seed;
mod types;
mod validation;

// Re-export types
pub use seed::{load_seed_file, parse_seed_file, SeedFile};
pub use types::{CrawlerSettings, PageRankSettings, Settings};

// Re-export parser functions
pub use parser::{load_settings, load_settings_or_default, parse_settings};
