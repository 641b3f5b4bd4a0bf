use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is not part of the domain. If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkrank::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    host_of(url).map(|h| h.to_lowercase())
}

/// Returns the raw host string of a URL, if any
pub fn host_of(url: &Url) -> Option<&str> {
    url.host_str().filter(|h| !h.is_empty())
}
