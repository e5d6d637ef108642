//! Frontier and seen-set for the crawl engine
//!
//! Neither type enforces the enqueue protocol on its own; `Crawler::enqueue`
//! marks a URL seen before pushing it so the same URL cannot be queued twice
//! from one page.

use crate::config::TraversalOrder;
use crate::url::CrawlUrl;
use std::collections::{HashSet, VecDeque};

/// URLs the crawler has already queued
///
/// Everything is kept in memory and nothing is ever removed.
#[derive(Debug, Default)]
pub struct SeenUrls {
    urls: HashSet<String>,
}

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL as seen. Marking twice is a no-op.
    pub fn mark_seen(&mut self, url: &CrawlUrl) {
        if !self.urls.contains(url.url()) {
            self.urls.insert(url.url().to_string());
        }
    }

    pub fn is_seen(&self, url: &CrawlUrl) -> bool {
        self.urls.contains(url.url())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// URLs waiting to be visited
///
/// With `TraversalOrder::DepthFirst` the most recently pushed URL comes out
/// first; with `BreadthFirst` the oldest does.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<CrawlUrl>,
    order: TraversalOrder,
}

impl Frontier {
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            queue: VecDeque::new(),
            order,
        }
    }

    pub fn push(&mut self, url: CrawlUrl) {
        self.queue.push_back(url);
    }

    /// Removes the next URL to visit, or `None` once the frontier is exhausted
    pub fn pop(&mut self) -> Option<CrawlUrl> {
        match self.order {
            TraversalOrder::DepthFirst => self.queue.pop_back(),
            TraversalOrder::BreadthFirst => self.queue.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }
}
