//! Storage module for persisting crawl graphs
//!
//! Graphs are stored as GML (the subset networkx reads and writes), with
//! one node per page labelled by its URL.

mod gml;

pub use gml::{read_gml, write_gml, GraphFormatError};

use crate::graph::WebGraph;
use crate::{ConfigError, LinkRankError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a graph to a GML file, replacing any existing file
pub fn save_graph(graph: &WebGraph, path: &Path) -> Result<(), LinkRankError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_gml(graph, &mut writer)?;
    writer.flush()?;

    tracing::info!(
        "Saved graph with {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

/// Reads a graph from a GML file
///
/// # Errors
///
/// * `ConfigError::FileNotFound` - The path does not exist
/// * `GraphFormatError` - The content is not a valid graph
pub fn load_graph(path: &Path) -> Result<WebGraph, LinkRankError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
    }

    let content = std::fs::read_to_string(path)?;
    let graph = read_gml(&content)?;

    tracing::info!(
        "Loaded graph with {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}
