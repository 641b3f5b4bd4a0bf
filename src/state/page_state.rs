/// Page state definitions for tracking crawl progress
///
/// A page enters the graph as `Discovered` and moves to exactly one
/// terminal state once a worker has attempted it.
use std::fmt;

/// Represents the current state of a page node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageState {
    /// Page is a node in the graph but has not been fetched (yet)
    #[default]
    Discovered,

    /// Page was fetched as HTML and its links were extracted
    Processed,

    /// Page was fetched but its Content-Type is not HTML
    ContentMismatch,

    /// Page fetch failed (timeout, connection error, HTTP error status)
    Failed,
}

impl PageState {
    /// Returns true once a fetch was attempted, regardless of outcome
    pub fn is_visited(&self) -> bool {
        !matches!(self, Self::Discovered)
    }

    /// Returns true if this represents a successful expansion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ContentMismatch | Self::Failed)
    }

    /// Short lowercase name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Processed => "processed",
            Self::ContentMismatch => "content_mismatch",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
