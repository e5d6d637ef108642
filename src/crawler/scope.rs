//! Scope policy: which URLs may ever be queued
//!
//! Checks run cheapest first and stop at the first failure:
//!
//! 1. depth within the configured bound
//! 2. URL is structurally valid
//! 3. robots.txt allows it for our user agent
//! 4. network location is exactly the domain of record
//! 5. not already seen

use crate::crawler::frontier::SeenUrls;
use crate::robots::ParsedRobots;
use crate::url::{domain_of_record, CrawlUrl};

/// Outcome of evaluating a candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    TooDeep,
    Malformed,
    RobotsDenied,
    OffDomain,
    AlreadySeen,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Admission test for candidate URLs
///
/// Immutable for the lifetime of a crawl. Evaluation never marks anything
/// seen; the caller does that after a successful admit.
#[derive(Debug, Clone)]
pub struct ScopePolicy {
    domain: String,
    robots: ParsedRobots,
    user_agent: String,
    max_depth: u32,
}

impl ScopePolicy {
    pub fn new(domain: String, robots: ParsedRobots, user_agent: String, max_depth: u32) -> Self {
        Self {
            domain,
            robots,
            user_agent,
            max_depth,
        }
    }

    /// The domain of record every admitted URL must match
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Runs the checks in order and reports the first that fails
    pub fn evaluate(&self, candidate: &CrawlUrl, seen: &SeenUrls) -> Admission {
        if candidate.depth() > self.max_depth {
            return Admission::TooDeep;
        }

        let Ok(parsed) = candidate.parsed() else {
            return Admission::Malformed;
        };

        if !self.robots.is_allowed(candidate.url(), &self.user_agent) {
            return Admission::RobotsDenied;
        }

        if domain_of_record(&parsed).as_deref() != Some(self.domain.as_str()) {
            return Admission::OffDomain;
        }

        if seen.is_seen(candidate) {
            return Admission::AlreadySeen;
        }

        Admission::Admitted
    }

    /// Returns true if `candidate` passes every check
    pub fn admit(&self, candidate: &CrawlUrl, seen: &SeenUrls) -> bool {
        self.evaluate(candidate, seen).is_admitted()
    }
}
