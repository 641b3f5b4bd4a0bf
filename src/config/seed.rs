//! Seed file parsing
//!
//! The seed file layout is line-oriented:
//!
//! ```text
//! 100                      <- node budget
//! https://example.com/     <- URL whose host becomes the domain filter
//! https://example.com/a    <- seed URLs, one per line
//! https://example.com/b
//! ```

use crate::url::{extract_domain, normalize_url};
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// A parsed seed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFile {
    /// Maximum number of graph nodes the crawl may create
    pub max_nodes: usize,

    /// Host used as the domain filter for link expansion
    pub domain: String,

    /// The full URL the domain was taken from
    pub domain_url: String,

    /// Normalized seed URLs, in file order
    pub seeds: Vec<String>,
}

/// Reads and parses a seed file
///
/// # Returns
///
/// * `Ok(SeedFile)` - Successfully parsed seed file
/// * `Err(ConfigError::FileNotFound)` - The path does not exist
/// * `Err(ConfigError::MalformedSeedFile)` - The content is malformed
pub fn load_seed_file(path: &Path) -> Result<SeedFile, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_seed_file(&content)
}

/// Parses seed file content
pub fn parse_seed_file(content: &str) -> Result<SeedFile, ConfigError> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() < 2 {
        return Err(malformed(
            lines.len() + 1,
            "expected a node budget line and a domain URL line",
        ));
    }

    let budget_line = lines[0].trim();
    let max_nodes: usize = budget_line
        .parse()
        .map_err(|_| malformed(1, &format!("node budget '{}' is not an integer", budget_line)))?;
    if max_nodes == 0 {
        return Err(malformed(1, "node budget must be positive"));
    }

    let domain_url = lines[1].trim();
    let parsed = Url::parse(domain_url)
        .map_err(|e| malformed(2, &format!("invalid domain URL '{}': {}", domain_url, e)))?;
    let domain = extract_domain(&parsed)
        .ok_or_else(|| malformed(2, &format!("domain URL '{}' has no host", domain_url)))?;

    let mut seeds = Vec::new();
    for (offset, line) in lines.iter().enumerate().skip(2) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let normalized = normalize_url(line)
            .map_err(|e| malformed(offset + 1, &format!("invalid seed URL '{}': {}", line, e)))?;
        seeds.push(normalized.to_string());
    }

    if seeds.is_empty() {
        return Err(malformed(3, "no seed URLs given"));
    }

    Ok(SeedFile {
        max_nodes,
        domain,
        domain_url: domain_url.to_string(),
        seeds,
    })
}

fn malformed(line: usize, message: &str) -> ConfigError {
    ConfigError::MalformedSeedFile {
        line,
        message: message.to_string(),
    }
}
