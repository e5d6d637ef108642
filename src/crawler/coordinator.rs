//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl engine that ties everything together:
//! - Seeding the frontier with the root URL
//! - The dequeue → fetch → extract → enqueue → store loop
//! - Page-level error handling (log and move on)
//! - Engine lifecycle and final flush of the index

use crate::config::Config;
use crate::crawler::frontier::{Frontier, SeenUrls};
use crate::crawler::parser::LinkExtractor;
use crate::crawler::scope::{Admission, ScopePolicy};
use crate::crawler::{FetchResult, Fetcher};
use crate::output::{CrawlLogger, CrawlStats};
use crate::robots::fetch_robots;
use crate::state::EngineState;
use crate::storage::MirrorStorage;
use crate::url::{domain_of_record, CrawlUrl};
use crate::{MirrorError, Result};
use chrono::Utc;

/// Content type that marks a page as a source of further links
const HTML_CONTENT_TYPE: &str = "text/html";

/// The crawl engine for one domain
///
/// Owns all crawl state: the frontier, the seen set, the scope policy and
/// the storage. Transport, link extraction and event logging are injected.
///
/// Fetching is strictly sequential: each fetch completes (or fails) before
/// the next URL is dequeued.
pub struct Crawler<F, E, L> {
    fetcher: F,
    extractor: E,
    logger: L,
    scope: ScopePolicy,
    seen: SeenUrls,
    frontier: Frontier,
    storage: MirrorStorage,
    state: EngineState,
    stats: CrawlStats,
}

impl<F, E, L> Crawler<F, E, L>
where
    F: Fetcher,
    E: LinkExtractor,
    L: CrawlLogger,
{
    /// Creates a crawler rooted at `root_url`
    ///
    /// This creates the mirror directories, fetches robots.txt once, and
    /// queues the root URL (if robots.txt allows it).
    ///
    /// # Errors
    ///
    /// * `MirrorError::RootUrlInvalid` - `root_url` is not absolute or has
    ///   no network location
    /// * `MirrorError::Storage` - the mirror directories or index could not
    ///   be created
    pub async fn new(
        config: &Config,
        root_url: &str,
        fetcher: F,
        extractor: E,
        logger: L,
    ) -> Result<Self> {
        let invalid_root = || MirrorError::RootUrlInvalid {
            url: root_url.to_string(),
        };

        let root = CrawlUrl::root(root_url).map_err(|_| invalid_root())?;
        let parsed_root = root.parsed().map_err(|_| invalid_root())?;
        let domain = domain_of_record(&parsed_root).ok_or_else(invalid_root)?;

        let storage = MirrorStorage::new(config.output.root_dir.as_deref(), &domain)?;

        let robots = fetch_robots(&fetcher, &parsed_root).await;
        let scope = ScopePolicy::new(
            domain,
            robots,
            config.crawler.user_agent.clone(),
            config.crawler.max_depth,
        );

        tracing::info!(
            "Crawling {} (max depth {}, {:?})",
            scope.domain(),
            scope.max_depth(),
            config.crawler.traversal
        );

        let mut crawler = Self {
            fetcher,
            extractor,
            logger,
            scope,
            seen: SeenUrls::new(),
            frontier: Frontier::new(config.crawler.traversal),
            storage,
            state: EngineState::Idle,
            stats: CrawlStats::default(),
        };

        if !crawler.enqueue(root.clone()) {
            tracing::warn!("Root URL {} is not crawlable; nothing to do", root);
        }

        Ok(crawler)
    }

    /// Queues a URL if the scope policy admits it
    ///
    /// The URL is marked seen before it is pushed, so a link appearing twice
    /// on one page is only queued once. Rejection is silent.
    ///
    /// # Returns
    ///
    /// `true` if the URL entered the frontier
    pub fn enqueue(&mut self, candidate: CrawlUrl) -> bool {
        match self.scope.evaluate(&candidate, &self.seen) {
            Admission::Admitted => {
                self.seen.mark_seen(&candidate);
                self.frontier.push(candidate);
                self.stats.urls_queued += 1;
                true
            }
            rejection => {
                tracing::trace!("Skipping {} ({:?})", candidate, rejection);
                false
            }
        }
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// Page-level failures are reported to the logger and never end the
    /// crawl. A crawler runs once; calling `crawl` again returns
    /// `MirrorError::InvalidTransition`.
    ///
    /// If the index cannot be written the crawl stops where it is and the
    /// engine stays `Running`. Such a crawler cannot be resumed; `close` it.
    ///
    /// # Errors
    ///
    /// * `MirrorError::Storage` - the index could no longer be written
    /// * `MirrorError::InvalidTransition` - the crawl already ran
    pub async fn crawl(&mut self) -> Result<CrawlStats> {
        self.transition(EngineState::Running)?;
        self.stats.started_at = Some(Utc::now());

        while let Some(next) = self.frontier.pop() {
            self.visit(next).await?;

            if self.stats.pages_visited % 50 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier",
                    self.stats.pages_visited,
                    self.frontier.len()
                );
            }
        }

        self.transition(EngineState::Draining)?;
        self.storage.flush()?;

        self.stats.finished_at = Some(Utc::now());
        self.transition(EngineState::Done)?;

        tracing::info!("Crawl of {} complete: {}", self.scope.domain(), self.stats);
        Ok(self.stats.clone())
    }

    /// Fetches one URL, queues its links, and stores its content
    async fn visit(&mut self, page: CrawlUrl) -> Result<()> {
        self.logger.log_visiting(&page);
        self.stats.pages_visited += 1;

        let (content_type, body) = match self.fetcher.fetch(page.url()).await {
            FetchResult::Success {
                content_type, body, ..
            } => (content_type, body),
            failure => {
                let detail = failure.failure_detail().unwrap_or_default();
                self.logger.log_error(&format!("{}: {}", page, detail));
                self.stats.fetch_failures += 1;
                return Ok(());
            }
        };

        self.logger.log_processing(&page);

        // only html pages can link to further pages
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.contains(HTML_CONTENT_TYPE))
        {
            self.enqueue_links(&page, &body);
        }

        match self.storage.save(&page, &body) {
            Ok(path) => {
                self.stats.pages_stored += 1;
                tracing::debug!("Stored {} at {}", page, path.display());
                Ok(())
            }
            Err(e) if e.is_page_local() => {
                self.logger.log_error(&format!("{}: {}", page, e));
                tracing::warn!("Index row for {} points at a missing file", page);
                self.stats.storage_failures += 1;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn enqueue_links(&mut self, page: &CrawlUrl, body: &[u8]) {
        let links = self.extractor.extract_links(body);
        self.stats.links_discovered += links.len() as u64;

        for link in links {
            match page.child(&link.value) {
                Ok(child) => {
                    self.enqueue(child);
                }
                Err(e) => tracing::debug!("Dropping {:?} link on {}: {}", link.kind, page, e),
            }
        }
    }

    fn transition(&mut self, next: EngineState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(MirrorError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Engine {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Flushes and releases the index file
    pub fn close(mut self) -> Result<()> {
        self.storage.close()?;
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn scope(&self) -> &ScopePolicy {
        &self.scope
    }

    pub fn seen(&self) -> &SeenUrls {
        &self.seen
    }

    /// Number of URLs waiting to be visited
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn storage(&self) -> &MirrorStorage {
        &self.storage
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }
}
