//! Output module for crawl events and summaries
//!
//! - `CrawlLogger`: the sink for visiting / processing / error events
//! - `CrawlStats`: counters summarising a finished crawl

mod logger;
mod stats;

pub use logger::{CrawlLogger, TracingLogger};
pub use stats::CrawlStats;
