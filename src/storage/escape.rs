//! URL to filename escaping
//!
//! Filenames cannot contain the path separator, so stored files are named by
//! escaping the URL: the escape character is doubled and every separator is
//! replaced by the escape character.

/// Character used to stand in for `/` in stored filenames
pub const ESCAPE_CHAR: char = '_';

const SEPARATOR: char = '/';

/// Escapes a URL into a flat filename
///
/// # Examples
///
/// ```
/// use sumi_mirror::storage::escape_filename;
///
/// assert_eq!(escape_filename("https://example.com/a/b"), "https:__example.com_a_b");
/// assert_eq!(escape_filename("https://example.com/a_b"), "https:__example.com_a__b");
/// ```
pub fn escape_filename(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len() + 8);
    for c in url.chars() {
        match c {
            ESCAPE_CHAR => {
                escaped.push(ESCAPE_CHAR);
                escaped.push(ESCAPE_CHAR);
            }
            SEPARATOR => escaped.push(ESCAPE_CHAR),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_replaced() {
        assert_eq!(escape_filename("a/b"), "a_b");
        assert_eq!(escape_filename("/"), "_");
    }

    #[test]
    fn test_escape_char_doubled() {
        assert_eq!(escape_filename("a_b"), "a__b");
        assert_eq!(escape_filename("_"), "__");
    }

    #[test]
    fn test_slash_and_underscore_distinct() {
        assert_ne!(escape_filename("a/b"), escape_filename("a_b"));
        assert_ne!(escape_filename("x/"), escape_filename("x_"));
    }

    #[test]
    fn test_no_separator_in_output() {
        let name = escape_filename("https://example.com/deep/path/to/file_name.html?q=a/b");
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_full_url() {
        assert_eq!(
            escape_filename("http://example.com/"),
            "http:__example.com_"
        );
        assert_eq!(
            escape_filename("http://example.com/static/my_style.css"),
            "http:__example.com_static_my__style.css"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_filename("index.html"), "index.html");
        assert_eq!(escape_filename(""), "");
    }

    #[test]
    fn test_rules_alone_can_collide() {
        // the storage layer disambiguates these
        assert_eq!(escape_filename("a_b"), escape_filename("a//b"));
        assert_eq!(escape_filename("_/"), escape_filename("/_"));
    }
}
