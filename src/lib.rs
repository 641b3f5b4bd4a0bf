//! linkrank: crawl a site's link structure and rank its pages
//!
//! This crate discovers a directed graph of pages and hyperlinks by crawling
//! from seed URLs (bounded by a domain filter and a node budget), then ranks
//! the pages with PageRank power iteration.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for linkrank operations
#[derive(Debug, Error)]
pub enum LinkRankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        source: crawler::FetchError,
    },

    #[error("Unsupported content type for {url}: {content_type}")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("Cannot rank an empty graph")]
    EmptyGraph,

    #[error("Graph file error: {0}")]
    GraphFormat(#[from] storage::GraphFormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflicting arguments: {0}")]
    ConflictingArguments(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("{} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed seed file (line {line}): {message}")]
    MalformedSeedFile { line: usize, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for linkrank operations
pub type Result<T> = std::result::Result<T, LinkRankError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{degree_histogram, rank, PageRankConfig, Ranking};
pub use config::{load_seed_file, SeedFile, Settings};
pub use crawler::{crawl, CrawlOutcome, CrawlReport, CrawlScheduler, Crawler};
pub use graph::{GraphStore, WebGraph};
pub use state::PageState;
pub use crate::url::{extract_domain, matches_domain_filter, normalize_url};
