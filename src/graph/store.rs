use super::WebGraph;
use crate::state::PageState;
use parking_lot::Mutex;
use std::collections::BTreeSet;

/// A `WebGraph` shared between crawl workers
///
/// Every operation takes the lock once, so each call is atomic with respect
/// to the others. `size` is always consistent with the node set.
#[derive(Debug, Default)]
pub struct GraphStore {
    inner: Mutex<WebGraph>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if absent; returns true if it was inserted
    pub fn add_node(&self, url: &str) -> bool {
        self.inner.lock().add_node(url).1
    }

    /// Adds an edge if absent; a no-op when either endpoint is not a node
    pub fn add_edge(&self, from: &str, to: &str) -> bool {
        self.inner.lock().add_edge(from, to)
    }

    /// Number of nodes
    pub fn size(&self) -> usize {
        self.inner.lock().node_count()
    }

    pub fn contains_node(&self, url: &str) -> bool {
        self.inner.lock().contains_node(url)
    }

    pub fn set_state(&self, url: &str, state: PageState, error: Option<String>) -> bool {
        self.inner.lock().set_state(url, state, error)
    }

    pub fn nodes(&self) -> BTreeSet<String> {
        self.inner.lock().nodes()
    }

    pub fn edges(&self) -> BTreeSet<(String, String)> {
        self.inner.lock().edges()
    }

    /// Runs `f` with exclusive access to the graph
    ///
    /// Use this when a check and an insert must happen atomically.
    pub fn with_graph<R>(&self, f: impl FnOnce(&mut WebGraph) -> R) -> R {
        let mut graph = self.inner.lock();
        f(&mut graph)
    }

    pub fn into_inner(self) -> WebGraph {
        self.inner.into_inner()
    }
}
