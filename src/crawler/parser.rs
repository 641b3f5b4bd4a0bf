//! HTML link extraction
//!
//! This module handles parsing HTML content to extract the outbound links
//! the crawler may follow.

use scraper::{Html, Selector};
use url::Url;

/// Turns a fetched HTML document into absolute outbound URLs
///
/// Implementations must be pure: the same input yields the same links.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, html: &str, base_url: &Url) -> Vec<String>;
}

/// `LinkExtractor` that reads `<a href>` anchors with scraper
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, html: &str, base_url: &Url) -> Vec<String> {
        parse_links(html, base_url)
    }
}

/// Parses HTML content and extracts links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
/// - Anything that is not http(s) after resolution
///
/// **Note:** `rel="nofollow"` links ARE followed
///
/// # Example
///
/// ```
/// use linkrank::crawler::parse_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(parse_links(html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn parse_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" => {
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}
