use url::Url;

/// Returns the network location of a URL, if it has one
///
/// The network location is the URL's authority: the host plus any explicit
/// non-default port (and user info, if present). Two URLs belong to the same
/// crawl only if these strings are identical, so `example.com` and
/// `www.example.com` are different domains, and so are `example.com` and
/// `example.com:8080`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::url::domain_of_record;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(domain_of_record(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(domain_of_record(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(domain_of_record(&url), None);
/// ```
pub fn domain_of_record(url: &Url) -> Option<String> {
    let authority = url.authority();
    if authority.is_empty() {
        None
    } else {
        Some(authority.to_string())
    }
}
