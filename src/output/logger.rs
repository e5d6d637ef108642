//! Crawl event sink
//!
//! The engine reports what it is doing through a `CrawlLogger`. The default
//! implementation forwards events to `tracing`; tests substitute a recorder.

use crate::url::CrawlUrl;

/// Receives the crawl engine's progress events
///
/// Implementations must not fail; a sink that cannot write simply drops the
/// event.
pub trait CrawlLogger {
    /// A URL is about to be fetched
    fn log_visiting(&self, url: &CrawlUrl);

    /// A URL was fetched and its content is being processed
    fn log_processing(&self, url: &CrawlUrl);

    /// A page-level failure; the crawl continues
    fn log_error(&self, detail: &str);
}

/// Logs crawl events through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl CrawlLogger for TracingLogger {
    fn log_visiting(&self, url: &CrawlUrl) {
        tracing::info!(depth = url.depth(), "Visiting {}", url);
    }

    fn log_processing(&self, url: &CrawlUrl) {
        tracing::info!("Processing {}", url);
    }

    fn log_error(&self, detail: &str) {
        tracing::error!("{}", detail);
    }
}

impl<L: CrawlLogger + ?Sized> CrawlLogger for &L {
    fn log_visiting(&self, url: &CrawlUrl) {
        (**self).log_visiting(url);
    }

    fn log_processing(&self, url: &CrawlUrl) {
        (**self).log_processing(url);
    }

    fn log_error(&self, detail: &str) {
        (**self).log_error(detail);
    }
}
