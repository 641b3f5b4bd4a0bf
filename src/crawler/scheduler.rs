//! Crawl frontier and admission control
//!
//! This module handles:
//! - The FIFO frontier of URLs waiting to be fetched
//! - The visited set (URLs enqueued at least once)
//! - Domain scoping and the node budget for discovered links
//! - Recording fetch outcomes on graph nodes
//!
//! All admission for one page happens inside a single critical section, so
//! the budget check and the node insert can never race.

use crate::graph::{GraphStore, WebGraph};
use crate::state::PageState;
use crate::url::matches_domain_filter;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL pending a fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: String,

    /// The page that linked here (None for seeds)
    pub discovered_from: Option<String>,
}

/// Counters from admitting one page's links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmitStats {
    /// New nodes added and enqueued
    pub admitted: usize,
    /// Candidates skipped because they were already visited
    pub already_visited: usize,
    /// Candidates rejected by the domain filter
    pub filtered: usize,
    /// Unknown in-domain candidates dropped because the budget was full
    pub over_budget: usize,
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
}

/// Frontier owner for a single crawl
///
/// Lock order is frontier state first, then the graph store.
#[derive(Debug)]
pub struct CrawlScheduler {
    state: Mutex<FrontierState>,
    graph: GraphStore,
    domain: String,
    max_nodes: usize,
}

impl CrawlScheduler {
    pub fn new(domain: impl Into<String>, max_nodes: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            graph: GraphStore::new(),
            domain: domain.into(),
            max_nodes,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Adds seed URLs as nodes and enqueues them
    ///
    /// Seeds bypass the domain filter and the budget. Duplicates are
    /// skipped. Returns the number of seeds enqueued.
    pub fn seed(&self, seeds: &[String]) -> usize {
        let mut state = self.state.lock();
        let mut added = 0;

        for url in seeds {
            if !state.visited.insert(url.clone()) {
                continue;
            }
            self.graph.add_node(url);
            state.queue.push_back(FrontierEntry {
                url: url.clone(),
                discovered_from: None,
            });
            added += 1;
        }

        added
    }

    /// Returns the next entry to dispatch
    ///
    /// Returns None when the frontier is empty or the node budget has been
    /// reached. Entries left in the queue at that point are never fetched.
    pub fn next_entry(&self) -> Option<FrontierEntry> {
        let mut state = self.state.lock();
        if self.budget_reached() {
            return None;
        }
        state.queue.pop_front()
    }

    /// Applies the links found on `from`
    ///
    /// For each candidate, in order:
    /// - outside the domain filter: ignored
    /// - already visited: ignored, no edge
    /// - budget full: ignored
    /// - otherwise: node and edge added, candidate marked visited and enqueued
    ///
    /// Only the edge that first discovers a page is recorded, so the crawl
    /// graph is a discovery tree rooted at the seeds. Once the budget is
    /// full no candidate produces a node or an edge.
    pub fn admit_links(&self, from: &str, candidates: &[String]) -> AdmitStats {
        let mut stats = AdmitStats::default();
        let mut state = self.state.lock();

        self.graph.with_graph(|graph| {
            for candidate in candidates {
                let in_domain = Url::parse(candidate)
                    .map(|u| matches_domain_filter(&u, &self.domain))
                    .unwrap_or(false);
                if !in_domain {
                    stats.filtered += 1;
                    continue;
                }

                if state.visited.contains(candidate) {
                    stats.already_visited += 1;
                    continue;
                }

                if graph.node_count() >= self.max_nodes {
                    stats.over_budget += 1;
                    continue;
                }

                graph.add_node(candidate);
                graph.add_edge(from, candidate);
                state.visited.insert(candidate.clone());
                state.queue.push_back(FrontierEntry {
                    url: candidate.clone(),
                    discovered_from: Some(from.to_string()),
                });
                stats.admitted += 1;
            }
        });

        stats
    }

    /// Records the fetch outcome of a node
    pub fn record_outcome(&self, url: &str, state: PageState, error: Option<String>) {
        self.graph.set_state(url, state, error);
    }

    /// True once the graph holds `max_nodes` nodes
    pub fn budget_reached(&self) -> bool {
        self.graph.size() >= self.max_nodes
    }

    pub fn frontier_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn node_count(&self) -> usize {
        self.graph.size()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn into_graph(self) -> WebGraph {
        self.graph.into_inner()
    }
}
