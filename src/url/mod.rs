//! URL handling module for linkrank
//!
//! This module provides URL canonicalization, domain extraction, and the
//! domain-scope filter applied to links discovered during a crawl.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, host_of};
pub use normalize::normalize_url;

use url::Url;

/// Checks whether a candidate URL falls inside the crawl's domain scope
///
/// The policy is substring containment on the candidate's host: any host
/// that contains `domain` anywhere passes. This is deliberately loose and
/// admits hosts such as `notexample.com.evil.net` for a domain of
/// `example.com`. An empty `domain` matches every host.
///
/// # Examples
///
/// ```
/// use linkrank::url::matches_domain_filter;
/// use url::Url;
///
/// let url = Url::parse("https://blog.example.com/post").unwrap();
/// assert!(matches_domain_filter(&url, "example.com"));
///
/// let url = Url::parse("https://other.org/?ref=example.com").unwrap();
/// assert!(!matches_domain_filter(&url, "example.com"));
/// ```
pub fn matches_domain_filter(url: &Url, domain: &str) -> bool {
    match host_of(url) {
        Some(host) => host.contains(&domain.to_lowercase()),
        None => false,
    }
}
