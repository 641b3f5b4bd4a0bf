use crate::graph::WebGraph;
use std::collections::BTreeMap;

/// Degree distribution of a graph
///
/// Degree is total degree (in + out), so a self-loop counts twice. Returns
/// `(degree, node count)` pairs for every degree that occurs, in ascending
/// degree order.
pub fn degree_histogram(graph: &WebGraph) -> Vec<(usize, usize)> {
    let mut degrees = vec![0usize; graph.node_count()];
    for (src, dst) in graph.edge_indices() {
        degrees[src] += 1;
        degrees[dst] += 1;
    }

    let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
    for degree in degrees {
        *histogram.entry(degree).or_insert(0) += 1;
    }

    histogram.into_iter().collect()
}
