//! Crawler module for fetching and mirroring one domain
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` capability
//! - HTML parsing and link extraction
//! - The frontier, seen set and scope policy
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod scope;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use frontier::{Frontier, SeenUrls};
pub use parser::{ExtractedLink, HtmlLinkExtractor, LinkExtractor, LinkKind, LINK_KINDS};
pub use scope::{Admission, ScopePolicy};

pub use crate::output::{CrawlLogger, TracingLogger};

use crate::config::{validate, Config};
use crate::output::CrawlStats;
use crate::Result;

/// Mirrors the domain of `root_url` to disk
///
/// This is the main entry point for a crawl. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Create the mirror directory and fetch robots.txt
/// 3. Fetch pages until the frontier is empty
/// 4. Flush and close the index
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `root_url` - Absolute URL the crawl starts from
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed
/// * `Err(MirrorError)` - Crawl could not start, or the index could not be written
pub async fn run_mirror(config: Config, root_url: &str) -> Result<CrawlStats> {
    validate(&config)?;
    let fetcher = HttpFetcher::new(&config.crawler)?;

    let mut crawler =
        Crawler::new(&config, root_url, fetcher, HtmlLinkExtractor, TracingLogger).await?;

    tracing::info!(
        "Mirroring into {}",
        crawler.storage().base_dir().display()
    );

    let stats = crawler.crawl().await?;
    crawler.close()?;

    Ok(stats)
}
