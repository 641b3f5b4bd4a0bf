//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML link extraction behind the `LinkExtractor` trait
//! - The frontier scheduler (domain scope, node budget, visited set)
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{crawl, CrawlOutcome, CrawlReport, Crawler};
pub use fetcher::{
    build_http_client, is_html_content_type, FetchError, FetchedPage, Fetcher, HttpFetcher,
};
pub use parser::{parse_links, HtmlLinkExtractor, LinkExtractor};
pub use scheduler::{AdmitStats, CrawlScheduler, FrontierEntry};
