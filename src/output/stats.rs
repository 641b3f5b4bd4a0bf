//! Crawl and graph statistics
//!
//! This module provides functionality for summarizing a finished crawl and
//! displaying it.

use crate::crawler::CrawlReport;
use crate::graph::WebGraph;
use crate::state::PageState;
use std::collections::HashMap;

/// Graph statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatistics {
    /// Total number of nodes
    pub total_pages: usize,

    /// Total number of edges
    pub total_links: usize,

    /// Count of pages by state
    pub pages_by_state: HashMap<PageState, usize>,

    /// Pages with no outgoing links
    pub dangling_pages: usize,
}

/// Computes statistics for a graph
pub fn graph_statistics(graph: &WebGraph) -> GraphStatistics {
    let mut pages_by_state = HashMap::new();
    let mut dangling_pages = 0;

    for page in graph.pages() {
        *pages_by_state.entry(page.state).or_insert(0) += 1;
        if graph.out_degree(&page.url) == 0 {
            dangling_pages += 1;
        }
    }

    GraphStatistics {
        total_pages: graph.node_count(),
        total_links: graph.edge_count(),
        pages_by_state,
        dangling_pages,
    }
}

/// Prints graph statistics to stdout in a formatted manner
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Graph Statistics ===\n");

    println!("Overview:");
    println!("  Total pages: {}", stats.total_pages);
    println!("  Total links: {}", stats.total_links);
    println!("  Pages without outgoing links: {}", stats.dangling_pages);
    println!();

    println!("Pages by State:");
    let mut state_counts: Vec<_> = stats.pages_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    for (state, count) in state_counts {
        let percentage = if stats.total_pages > 0 {
            (*count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", state, count, percentage);
    }
    println!();
}

/// Prints a crawl report to stdout
pub fn print_crawl_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Domain filter: {}", report.domain);
    println!("  Node budget: {}", report.max_nodes);
    println!("  Seeds: {}", report.seeds);
    println!(
        "  Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Finished: {}",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Duration: {:.2}s", report.elapsed.as_secs_f64());
    println!();

    println!("Results:");
    println!("  Pages fetched: {}", report.pages_fetched);
    println!("  Pages expanded: {}", report.pages_expanded);
    println!("  Non-HTML responses: {}", report.non_html);
    println!("  Failed fetches: {}", report.failures.len());
    println!("  Nodes: {}", report.nodes);
    println!("  Edges: {}", report.edges);
    if report.budget_reached {
        println!(
            "  Budget reached; {} queued pages were not fetched",
            report.pending
        );
    }
    println!();

    if !report.failures.is_empty() {
        println!("Failures:");
        for (url, error) in report.failures.iter().take(10) {
            println!("  {} - {}", url, error);
        }
        if report.failures.len() > 10 {
            println!("  ... and {} more", report.failures.len() - 10);
        }
        println!();
    }
}
