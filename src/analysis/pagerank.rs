//! PageRank power iteration
//!
//! Computes the stationary distribution of the random-surfer walk over the
//! crawled link graph. Rank held by dangling nodes (no outgoing links) is
//! spread uniformly over all nodes each iteration, so the total rank mass
//! stays 1.0.

use crate::config::PageRankSettings;
use crate::graph::WebGraph;
use crate::LinkRankError;
use std::cmp::Ordering;

/// PageRank configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    pub damping_factor: f64,
    /// Convergence tolerance (L1 norm of score changes).
    pub tolerance: f64,
    /// Maximum iterations before stopping.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(settings: &PageRankSettings) -> Self {
        Self {
            damping_factor: settings.damping_factor,
            tolerance: settings.tolerance,
            max_iterations: settings.max_iterations,
        }
    }
}

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct Ranking {
    /// (URL, rank) in node discovery order
    pub scores: Vec<(String, f64)>,
    /// Iterations performed
    pub iterations: usize,
    /// Whether the L1 delta dropped below the tolerance
    pub converged: bool,
    /// L1 delta of the last iteration
    pub delta: f64,
}

impl Ranking {
    /// Rank of a single URL
    pub fn get(&self, url: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, score)| *score)
    }

    /// Sum of all ranks
    pub fn total(&self) -> f64 {
        self.scores.iter().map(|(_, s)| s).sum()
    }

    /// (URL, rank) pairs sorted by rank descending, ties by URL ascending
    pub fn sorted(&self) -> Vec<(String, f64)> {
        let mut sorted = self.scores.clone();
        sorted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        sorted
    }
}

/// Ranks every node of `graph`
///
/// Each iteration computes, for every node `v`:
///
/// ```text
/// new[v] = d * (sum over u -> v of old[u] / out(u) + dangling / N) + (1 - d) / N
/// ```
///
/// where `dangling` is the total old rank of nodes without outgoing edges.
/// Iteration stops once the L1 distance between successive vectors is below
/// `tolerance`, or after `max_iterations`.
///
/// # Errors
///
/// Returns `LinkRankError::EmptyGraph` when the graph has no nodes.
pub fn rank(graph: &WebGraph, config: &PageRankConfig) -> Result<Ranking, LinkRankError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(LinkRankError::EmptyGraph);
    }

    let edges: Vec<(usize, usize)> = graph.edge_indices().collect();
    let mut out_degree = vec![0usize; n];
    for &(src, _) in &edges {
        out_degree[src] += 1;
    }
    let dangling_nodes: Vec<usize> = (0..n).filter(|&i| out_degree[i] == 0).collect();

    let nf = n as f64;
    let d = config.damping_factor;
    let teleport = (1.0 - d) / nf;

    let mut scores = vec![1.0 / nf; n];
    let mut next = vec![0.0; n];
    let mut iterations = 0;
    let mut delta = f64::INFINITY;
    let mut converged = false;

    while iterations < config.max_iterations {
        let dangling_sum: f64 = dangling_nodes.iter().map(|&i| scores[i]).sum();
        let base = teleport + d * dangling_sum / nf;
        next.iter_mut().for_each(|s| *s = base);

        for &(src, dst) in &edges {
            next[dst] += d * scores[src] / out_degree[src] as f64;
        }

        delta = scores
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();
        std::mem::swap(&mut scores, &mut next);
        iterations += 1;

        tracing::trace!("PageRank iteration {}: delta {:e}", iterations, delta);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::info!(
            "PageRank converged after {} iterations (delta {:e})",
            iterations,
            delta
        );
    } else {
        tracing::warn!(
            "PageRank stopped after {} iterations without converging (delta {:e})",
            iterations,
            delta
        );
    }

    let scores = graph
        .pages()
        .zip(scores)
        .map(|(page, score)| (page.url.clone(), score))
        .collect();

    Ok(Ranking {
        scores,
        iterations,
        converged,
        delta,
    })
}
