use crate::{UrlError, UrlResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// A URL as the crawler tracks it: fragment-stripped, absolute, and tagged
/// with its link distance from the root.
///
/// Two identities are equal when their URL strings are equal. The depth is
/// carried along for depth limiting but takes no part in equality or hashing,
/// so the same page reached by two different paths is still one page.
#[derive(Debug, Clone)]
pub struct CrawlUrl {
    url: String,
    depth: u32,
}

impl CrawlUrl {
    /// Creates the identity of the root URL (depth 0)
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_mirror::url::CrawlUrl;
    ///
    /// let root = CrawlUrl::root("https://example.com/start#top").unwrap();
    /// assert_eq!(root.url(), "https://example.com/start");
    /// assert_eq!(root.depth(), 0);
    /// ```
    pub fn root(raw: &str) -> UrlResult<Self> {
        Self::at_depth(raw, 0)
    }

    /// Parses an absolute URL into an identity at the given depth
    pub fn at_depth(raw: &str, depth: u32) -> UrlResult<Self> {
        let url = Url::parse(raw).map_err(|e| UrlError::Malformed {
            raw: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_parsed(url, depth))
    }

    /// Resolves a link found on this page into a child identity
    ///
    /// `raw` may be absolute or relative; it is resolved against this URL
    /// with standard relative-reference resolution. The fragment is dropped
    /// and the child sits one hop deeper than `self`.
    ///
    /// # Errors
    ///
    /// Returns `UrlError::Malformed` if the link cannot be resolved. Callers
    /// treat this as "ignore the link", never as a crawl failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_mirror::url::CrawlUrl;
    ///
    /// let root = CrawlUrl::root("https://example.com/docs/").unwrap();
    /// let child = root.child("intro.html#setup").unwrap();
    /// assert_eq!(child.url(), "https://example.com/docs/intro.html");
    /// assert_eq!(child.depth(), 1);
    /// ```
    pub fn child(&self, raw: &str) -> UrlResult<Self> {
        let base = self.parsed()?;
        let joined = base.join(raw).map_err(|e| UrlError::Malformed {
            raw: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_parsed(joined, self.depth.saturating_add(1)))
    }

    fn from_parsed(mut url: Url, depth: u32) -> Self {
        url.set_fragment(None);
        Self {
            url: url.into(),
            depth,
        }
    }

    /// The fragment-stripped absolute URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of link hops from the root
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Re-parses the URL string
    pub fn parsed(&self) -> UrlResult<Url> {
        Url::parse(&self.url).map_err(|e| UrlError::Malformed {
            raw: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

impl PartialEq for CrawlUrl {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for CrawlUrl {}

impl Hash for CrawlUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for CrawlUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
