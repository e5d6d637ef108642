//! Robots.txt handling module
//!
//! This module provides functionality for fetching and parsing robots.txt.
//! The file is fetched once per crawl, through the same `Fetcher` as pages.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::{FetchResult, Fetcher};
use url::Url;

/// Returns the robots.txt URL for the site `url` belongs to
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::robots::robots_url;
///
/// let root = Url::parse("https://example.com/docs/index.html").unwrap();
/// assert_eq!(robots_url(&root), "https://example.com/robots.txt");
/// ```
pub fn robots_url(url: &Url) -> String {
    format!("{}://{}/robots.txt", url.scheme(), url.authority())
}

/// Fetches robots.txt for the site `root` belongs to
///
/// This never fails; every outcome maps onto a ruleset:
///
/// | Response | Ruleset |
/// |----------|---------|
/// | 2xx | parsed from the body |
/// | 401, 403 | disallow everything |
/// | other 4xx | allow everything |
/// | 5xx | disallow everything |
/// | transport failure | allow everything (logged as a warning) |
pub async fn fetch_robots<F: Fetcher>(fetcher: &F, root: &Url) -> ParsedRobots {
    let url = robots_url(root);
    tracing::debug!("Fetching {}", url);

    let (robots, warning) = robots_from_result(fetcher.fetch(&url).await);
    if let Some(warning) = warning {
        tracing::warn!("{} for {}", warning, url);
    }
    robots
}

/// Maps a robots.txt fetch outcome onto a ruleset, plus a warning to log
fn robots_from_result(result: FetchResult) -> (ParsedRobots, Option<String>) {
    match result {
        FetchResult::Success { body, .. } => {
            (ParsedRobots::from_content(&String::from_utf8_lossy(&body)), None)
        }
        FetchResult::HttpError { status_code: 401 | 403 } => (ParsedRobots::disallow_all(), None),
        FetchResult::HttpError { status_code } if (400..500).contains(&status_code) => {
            (ParsedRobots::allow_all(), None)
        }
        FetchResult::HttpError { status_code } => (
            ParsedRobots::disallow_all(),
            Some(format!("Server error {} fetching robots.txt, crawling nothing", status_code)),
        ),
        FetchResult::NetworkError { error } => (
            ParsedRobots::allow_all(),
            Some(format!("Could not fetch robots.txt ({}), allowing all", error)),
        ),
    }
}
