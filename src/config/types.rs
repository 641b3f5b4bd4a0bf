use serde::Deserialize;

/// Main settings structure for linkrank
///
/// Every key is optional; a missing table or key falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crawler: CrawlerSettings,
    pub pagerank: PageRankSettings,
}

/// Crawler behavior settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerSettings {
    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Per-request timeout enforced by the HTTP fetcher (seconds)
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Fixes the seed shuffle order when set
    pub shuffle_seed: Option<u64>,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 16,
            request_timeout_secs: 10,
            user_agent: format!("linkrank/{}", env!("CARGO_PKG_VERSION")),
            shuffle_seed: None,
        }
    }
}

/// PageRank power iteration settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PageRankSettings {
    /// Probability of following a link rather than teleporting
    pub damping_factor: f64,

    /// L1 distance between successive rank vectors that counts as converged
    pub tolerance: f64,

    /// Upper bound on power iterations
    pub max_iterations: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}
