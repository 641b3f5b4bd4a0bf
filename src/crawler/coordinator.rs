//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the dispatch loop:
//! - Seeds are shuffled, then enqueued through the `CrawlScheduler`
//! - Up to `max_concurrent_fetches` workers fetch and extract links at once
//! - Finished visits are applied to the scheduler in dispatch order
//!
//! Applying results in dispatch order makes the final graph independent of
//! which fetch happens to finish first.

use super::fetcher::{FetchError, Fetcher, HttpFetcher};
use super::parser::{HtmlLinkExtractor, LinkExtractor};
use super::scheduler::{CrawlScheduler, FrontierEntry};
use crate::config::CrawlerSettings;
use crate::graph::WebGraph;
use crate::state::PageState;
use crate::url::normalize_url;
use crate::{ConfigError, LinkRankError};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Number of distinct seeds enqueued
    pub seeds: usize,
    pub domain: String,
    pub max_nodes: usize,
    /// Fetches that returned a response
    pub pages_fetched: usize,
    /// HTML pages whose links were extracted
    pub pages_expanded: usize,
    /// Responses skipped because they were not HTML
    pub non_html: usize,
    /// Failed fetches as (url, error message)
    pub failures: Vec<(String, String)>,
    /// Frontier entries never fetched because the budget was reached
    pub pending: usize,
    pub budget_reached: bool,
    pub nodes: usize,
    pub edges: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// A crawled graph together with its report
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub graph: WebGraph,
    pub report: CrawlReport,
}

/// What a worker learned about one URL
#[derive(Debug)]
enum PageOutcome {
    Expanded(Vec<String>),
    NotHtml(String),
    Failed(FetchError),
}

#[derive(Debug)]
struct Visit {
    seq: u64,
    entry: FrontierEntry,
    outcome: PageOutcome,
}

/// Crawl driver with injected fetch and link-extraction capabilities
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    max_concurrent: usize,
    shuffle_seed: Option<u64>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn LinkExtractor>) -> Self {
        Self {
            fetcher,
            extractor,
            max_concurrent: CrawlerSettings::default().max_concurrent_fetches,
            shuffle_seed: None,
        }
    }

    /// Creates a crawler with the HTTP fetcher and HTML extractor
    pub fn from_settings(settings: &CrawlerSettings) -> Result<Self, LinkRankError> {
        let fetcher = HttpFetcher::new(settings)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(HtmlLinkExtractor))
            .with_concurrency(settings.max_concurrent_fetches)
            .with_shuffle_seed(settings.shuffle_seed))
    }

    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }

    /// Crawls from `seeds`, expanding only links whose host contains
    /// `domain`, until the frontier drains or `max_nodes` nodes exist
    ///
    /// Fetch failures are recorded per URL and never abort the crawl.
    ///
    /// Results are applied in dispatch order. A slow fetch at the head of
    /// that order holds back every result dispatched after it, and held
    /// results still count against `max_concurrent`, so dispatch stalls
    /// until the head completes. Throughput is bounded by the slowest
    /// outstanding fetch; in return the graph does not depend on completion
    /// timing.
    pub async fn run(
        &self,
        seeds: &[String],
        domain: &str,
        max_nodes: usize,
    ) -> Result<CrawlOutcome, LinkRankError> {
        if seeds.is_empty() {
            return Err(ConfigError::MissingArgument("at least one seed URL".to_string()).into());
        }
        if max_nodes == 0 {
            return Err(ConfigError::Validation("node budget must be positive".to_string()).into());
        }

        let mut seeds = seeds
            .iter()
            .map(|s| normalize_url(s).map(|u| u.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        shuffle_seeds(&mut seeds, self.shuffle_seed);

        let started_at = Utc::now();
        let start_time = Instant::now();

        let scheduler = CrawlScheduler::new(domain.to_lowercase(), max_nodes);
        let seeded = scheduler.seed(&seeds);

        tracing::info!(
            "Starting crawl: {} seeds, domain '{}', budget {} nodes, {} concurrent fetches",
            seeded,
            scheduler.domain(),
            max_nodes,
            self.max_concurrent
        );

        let mut report = CrawlReport {
            seeds: seeded,
            domain: scheduler.domain().to_string(),
            max_nodes,
            pages_fetched: 0,
            pages_expanded: 0,
            non_html: 0,
            failures: Vec::new(),
            pending: 0,
            budget_reached: false,
            nodes: 0,
            edges: 0,
            started_at,
            finished_at: started_at,
            elapsed: Duration::ZERO,
        };

        let mut workers: JoinSet<Visit> = JoinSet::new();
        let mut finished: BTreeMap<u64, Visit> = BTreeMap::new();
        let mut next_dispatch: u64 = 0;
        let mut next_apply: u64 = 0;
        let mut visits = 0usize;

        loop {
            // Dispatch while there is capacity and the frontier has work
            while next_dispatch - next_apply < self.max_concurrent as u64 {
                let Some(entry) = scheduler.next_entry() else {
                    break;
                };
                tracing::debug!(
                    "Dispatching {} (from {})",
                    entry.url,
                    entry.discovered_from.as_deref().unwrap_or("seed")
                );

                let fetcher = Arc::clone(&self.fetcher);
                let extractor = Arc::clone(&self.extractor);
                let seq = next_dispatch;
                workers.spawn(visit(seq, entry, fetcher, extractor));
                next_dispatch += 1;
            }

            if next_apply == next_dispatch {
                break;
            }

            while !finished.contains_key(&next_apply) {
                match workers.join_next().await {
                    Some(joined) => {
                        let done = joined?;
                        finished.insert(done.seq, done);
                    }
                    None => break,
                }
            }

            let Some(done) = finished.remove(&next_apply) else {
                break;
            };
            next_apply += 1;

            let was_full = scheduler.budget_reached();
            apply_visit(&scheduler, done, &mut report);
            if !was_full && scheduler.budget_reached() {
                tracing::info!(
                    "Node budget of {} reached; finishing {} in-flight fetches",
                    max_nodes,
                    next_dispatch - next_apply
                );
            }

            visits += 1;
            if visits % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = visits as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier, {} nodes, {:.2} pages/sec",
                    visits,
                    scheduler.frontier_len(),
                    scheduler.node_count(),
                    rate
                );
            }
        }

        report.pending = scheduler.frontier_len();
        report.budget_reached = scheduler.budget_reached();

        let graph = scheduler.into_graph();
        report.nodes = graph.node_count();
        report.edges = graph.edge_count();
        report.finished_at = Utc::now();
        report.elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} pages fetched, {} nodes, {} edges in {:?}",
            visits,
            report.nodes,
            report.edges,
            report.elapsed
        );

        Ok(CrawlOutcome { graph, report })
    }
}

/// Crawls with the HTTP fetcher and HTML link extractor
///
/// # Example
///
/// ```no_run
/// use linkrank::config::CrawlerSettings;
///
/// # async fn run() -> linkrank::Result<()> {
/// let seeds = vec!["https://example.com/".to_string()];
/// let outcome = linkrank::crawl(&seeds, "example.com", 100, &CrawlerSettings::default()).await?;
/// println!("{} pages", outcome.graph.node_count());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    seeds: &[String],
    domain: &str,
    max_nodes: usize,
    settings: &CrawlerSettings,
) -> Result<CrawlOutcome, LinkRankError> {
    Crawler::from_settings(settings)?
        .run(seeds, domain, max_nodes)
        .await
}

/// Randomizes seed order; a fixed seed gives a repeatable order
fn shuffle_seeds(seeds: &mut [String], shuffle_seed: Option<u64>) {
    match shuffle_seed {
        Some(s) => seeds.shuffle(&mut StdRng::seed_from_u64(s)),
        None => seeds.shuffle(&mut rand::thread_rng()),
    }
}

/// Fetches one URL and extracts its links
async fn visit(
    seq: u64,
    entry: FrontierEntry,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
) -> Visit {
    let outcome = match fetcher.fetch(&entry.url).await {
        Ok(page) if page.is_html() => {
            let base = Url::parse(&page.final_url).or_else(|_| Url::parse(&entry.url));
            match base {
                Ok(base) => {
                    let links = extractor
                        .extract(&page.body, &base)
                        .iter()
                        .filter_map(|link| normalize_url(link).ok())
                        .map(|u| u.to_string())
                        .collect();
                    PageOutcome::Expanded(links)
                }
                Err(e) => PageOutcome::Failed(FetchError::Request(e.to_string())),
            }
        }
        Ok(page) => PageOutcome::NotHtml(page.content_type),
        Err(e) => PageOutcome::Failed(e),
    };

    Visit {
        seq,
        entry,
        outcome,
    }
}

fn apply_visit(scheduler: &CrawlScheduler, visit: Visit, report: &mut CrawlReport) {
    let url = visit.entry.url;

    match visit.outcome {
        PageOutcome::Expanded(links) => {
            report.pages_fetched += 1;
            report.pages_expanded += 1;
            scheduler.record_outcome(&url, PageState::Processed, None);

            let stats = scheduler.admit_links(&url, &links);
            tracing::debug!(
                "{}: {} links, {} new, {} visited, {} off-domain, {} over budget",
                url,
                links.len(),
                stats.admitted,
                stats.already_visited,
                stats.filtered,
                stats.over_budget
            );
        }
        PageOutcome::NotHtml(content_type) => {
            report.pages_fetched += 1;
            report.non_html += 1;
            let err = LinkRankError::UnsupportedContentType {
                url: url.clone(),
                content_type,
            };
            tracing::debug!("Skipping: {}", err);
            scheduler.record_outcome(&url, PageState::ContentMismatch, Some(err.to_string()));
        }
        PageOutcome::Failed(source) => {
            let message = source.to_string();
            let err = LinkRankError::Fetch {
                url: url.clone(),
                source,
            };
            tracing::warn!("{}", err);
            scheduler.record_outcome(&url, PageState::Failed, Some(message.clone()));
            report.failures.push((url, message));
        }
    }
}
