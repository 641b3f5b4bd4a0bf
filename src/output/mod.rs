//! Output module for reports and result files
//!
//! This module handles:
//! - Writing the PageRank result file
//! - Rendering the degree distribution as a log-log table
//! - Printing crawl and graph statistics

mod histogram;
mod ranking;
pub mod stats;

pub use histogram::{format_loglog, print_loglog};
pub use ranking::{save_rankings, write_rankings};
pub use stats::{graph_statistics, print_crawl_report, print_statistics, GraphStatistics};
