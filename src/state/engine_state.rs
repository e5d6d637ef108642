//! Lifecycle state definitions for the crawl engine
//!
//! The engine moves through these states exactly once, in order. There is no
//! pause state and no way back to `Idle`.

use std::fmt;

/// Represents the current lifecycle state of a crawl engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Constructed and seeded, `crawl()` not yet called
    Idle,

    /// Dequeuing and visiting URLs
    Running,

    /// Frontier exhausted, flushing the index
    Draining,

    /// Crawl finished
    Done,
}

impl EngineState {
    /// Returns true if the engine may move from `self` to `next`
    pub fn can_transition_to(&self, next: EngineState) -> bool {
        matches!(
            (*self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Returns true once the crawl has run to completion
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
