//! Crawl statistics
//!
//! Counters collected by the engine while it runs, returned from `crawl()`
//! and printed as a summary by the CLI.

use chrono::{DateTime, Utc};
use std::fmt;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// URLs dequeued and visited (fetch attempted)
    pub pages_visited: u64,

    /// Pages written to the mirror
    pub pages_stored: u64,

    /// Visits abandoned because the fetch failed
    pub fetch_failures: u64,

    /// Pages fetched but not written to disk
    pub storage_failures: u64,

    /// Link attribute values extracted from HTML pages
    pub links_discovered: u64,

    /// URLs that passed the scope policy and entered the frontier,
    /// including the root
    pub urls_queued: u64,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStats {
    /// Wall-clock duration of the crawl, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Fraction of visits that ended with a stored page
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            0.0
        } else {
            self.pages_stored as f64 / self.pages_visited as f64
        }
    }
}

impl fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages visited, {} stored, {} fetch failures, {} storage failures, \
             {} links discovered, {} URLs queued",
            self.pages_visited,
            self.pages_stored,
            self.fetch_failures,
            self.storage_failures,
            self.links_discovered,
            self.urls_queued
        )?;

        if let Some(duration) = self.duration() {
            write!(f, " in {:.2}s", duration.num_milliseconds() as f64 / 1000.0)?;
        }

        Ok(())
    }
}
