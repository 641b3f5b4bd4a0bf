//! Graph analysis
//!
//! - `pagerank`: power-iteration PageRank over a finished `WebGraph`
//! - `degree`: degree distribution for diagnostics

mod degree;
mod pagerank;

pub use degree::degree_histogram;
pub use pagerank::{rank, PageRankConfig, Ranking};
