//! Web graph module
//!
//! The crawl result is a directed graph whose nodes are canonical page URLs
//! and whose edges are hyperlinks. Node indices follow discovery order.
//!
//! # Components
//!
//! - `WebGraph`: the owned graph (petgraph `DiGraph` plus a URL index)
//! - `GraphStore`: a `WebGraph` behind a lock, shared by crawl workers

mod store;

pub use store::GraphStore;

use crate::state::PageState;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// A page node in the web graph
#[derive(Debug, Clone, PartialEq)]
pub struct PageNode {
    /// Canonical URL of the page
    pub url: String,

    /// Fetch outcome for this page
    pub state: PageState,

    /// Error description when the fetch failed
    pub error: Option<String>,
}

impl PageNode {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: PageState::Discovered,
            error: None,
        }
    }
}

/// Directed link graph keyed by URL
///
/// Node URLs are unique and each ordered pair of URLs carries at most one
/// edge. Every edge endpoint is a node.
#[derive(Debug, Clone, Default)]
pub struct WebGraph {
    graph: DiGraph<PageNode, ()>,
    index: HashMap<String, NodeIndex>,
}

impl WebGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if absent and returns its index
    ///
    /// Returns `(index, inserted)` where `inserted` is false when the URL
    /// was already a node.
    pub fn add_node(&mut self, url: &str) -> (NodeIndex, bool) {
        if let Some(&idx) = self.index.get(url) {
            return (idx, false);
        }
        let idx = self.graph.add_node(PageNode::new(url));
        self.index.insert(url.to_string(), idx);
        (idx, true)
    }

    /// Adds a directed edge between two existing nodes
    ///
    /// Returns true if the edge was new. Does nothing and returns false
    /// when either endpoint is not a node.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        if self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn contains_node(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the node for a URL
    pub fn node(&self, url: &str) -> Option<&PageNode> {
        self.index.get(url).map(|&idx| &self.graph[idx])
    }

    /// Records the fetch outcome of a page
    ///
    /// Returns false if the URL is not a node.
    pub fn set_state(&mut self, url: &str, state: PageState, error: Option<String>) -> bool {
        match self.index.get(url) {
            Some(&idx) => {
                let node = &mut self.graph[idx];
                node.state = state;
                node.error = error;
                true
            }
            None => false,
        }
    }

    /// Set of node URLs
    pub fn nodes(&self) -> BTreeSet<String> {
        self.index.keys().cloned().collect()
    }

    /// Set of edges as `(source, target)` URL pairs
    pub fn edges(&self) -> BTreeSet<(String, String)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].url.clone(),
                    self.graph[e.target()].url.clone(),
                )
            })
            .collect()
    }

    /// Nodes in discovery order
    pub fn pages(&self) -> impl Iterator<Item = &PageNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges as discovery-order node positions
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }

    pub fn out_degree(&self, url: &str) -> usize {
        self.degree(url, Direction::Outgoing)
    }

    pub fn in_degree(&self, url: &str) -> usize {
        self.degree(url, Direction::Incoming)
    }

    fn degree(&self, url: &str, dir: Direction) -> usize {
        self.index
            .get(url)
            .map(|&idx| self.graph.edges_directed(idx, dir).count())
            .unwrap_or(0)
    }
}
