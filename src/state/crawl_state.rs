/// Crawl lifecycle state definitions
///
/// A crawl moves strictly forward: `Idle -> Running -> Done`.
use serde::Serialize;
use std::fmt;

/// Represents the lifecycle state of one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlState {
    /// Configured but not started
    #[default]
    Idle,

    /// Traversal loop is draining the frontier
    Running,

    /// Frontier drained or page cap reached
    Done,
}

impl CrawlState {
    /// Returns true if moving from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Done)
        )
    }

    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
