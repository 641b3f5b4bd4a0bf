//! State module for tracking crawl progress
//!
//! - `PageState`: fetch outcome of an individual page node

mod page_state;

pub use page_state::PageState;
