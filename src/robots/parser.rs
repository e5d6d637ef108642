//! Robots.txt parser implementation
//!
//! This module provides functionality for parsing robots.txt content using the robotstxt crate.

use robotstxt::DefaultMatcher;

/// How a ruleset answers permission queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RobotsPolicy {
    /// Every URL is allowed
    AllowAll,
    /// Every URL is disallowed
    DisallowAll,
    /// Decided by the robots.txt content
    Rules,
}

/// Parsed robots.txt data
///
/// This is a wrapper around the robotstxt crate's types, providing a simplified
/// interface for checking if URLs are allowed.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
    policy: RobotsPolicy,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            policy: RobotsPolicy::Rules,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// Used when the site has no robots.txt.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            policy: RobotsPolicy::AllowAll,
        }
    }

    /// Creates a ParsedRobots that refuses everything
    ///
    /// Used when robots.txt access is forbidden or the server failed to
    /// deliver it.
    pub fn disallow_all() -> Self {
        Self {
            content: String::new(),
            policy: RobotsPolicy::DisallowAll,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to check; absolute URLs and bare paths both work
    /// * `user_agent` - The full user agent string. Only the product token
    ///   (the part before any `/`) is matched against `User-agent` lines.
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match self.policy {
            RobotsPolicy::AllowAll => true,
            RobotsPolicy::DisallowAll => false,
            RobotsPolicy::Rules if self.content.is_empty() => true,
            RobotsPolicy::Rules => {
                // Parse and check on-demand
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(&self.content, product_token(user_agent), url)
            }
        }
    }
}

/// `simple-crawler/1.0` -> `simple-crawler`
fn product_token(user_agent: &str) -> &str {
    user_agent
        .split('/')
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .unwrap_or(user_agent)
}
