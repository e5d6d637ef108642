//! HTML link extraction
//!
//! The engine only needs the raw link-bearing attribute values of a page;
//! resolving them and deciding whether to follow them happens elsewhere.

use scraper::{Html, Selector};

/// Which kind of element a link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// `<link href>`: stylesheets, icons, alternates
    Link,
    /// `<img src>`
    Image,
    /// `<a href>`
    Anchor,
}

impl LinkKind {
    /// Element name and attribute holding the link
    pub fn selector_parts(&self) -> (&'static str, &'static str) {
        match self {
            Self::Link => ("link", "href"),
            Self::Image => ("img", "src"),
            Self::Anchor => ("a", "href"),
        }
    }
}

/// Element kinds that can carry a link to follow, in extraction order
pub const LINK_KINDS: [LinkKind; 3] = [LinkKind::Link, LinkKind::Image, LinkKind::Anchor];

/// A raw attribute value found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub kind: LinkKind,
    /// The attribute value as written in the document (entities decoded)
    pub value: String,
}

/// Extracts link-bearing attribute values from a page body
pub trait LinkExtractor {
    /// Returns every `(kind, value)` pair in `body`
    ///
    /// Values are returned unresolved and unfiltered. Elements missing the
    /// attribute are skipped.
    fn extract_links(&self, body: &[u8]) -> Vec<ExtractedLink>;
}

/// `LinkExtractor` backed by scraper's HTML5 parser
///
/// Results are grouped by kind in `LINK_KINDS` order (all `<link>`, then all
/// `<img>`, then all `<a>`), document order within each group.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &[u8]) -> Vec<ExtractedLink> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);
        let mut links = Vec::new();

        for kind in LINK_KINDS {
            let (element, attribute) = kind.selector_parts();
            let Ok(selector) = Selector::parse(&format!("{}[{}]", element, attribute)) else {
                continue;
            };

            for node in document.select(&selector) {
                if let Some(value) = node.value().attr(attribute) {
                    links.push(ExtractedLink {
                        kind,
                        value: value.to_string(),
                    });
                }
            }
        }

        links
    }
}
