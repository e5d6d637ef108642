//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - The `Fetcher` capability the engine fetches through
//! - Building the reqwest client with the crawler's user agent
//! - Mapping responses and transport failures onto `FetchResult`

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
///
/// Failures are ordinary values: the engine decides what to do with them by
/// matching, never by catching.
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// The server returned a body
    Success {
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value, if the server sent one
        content_type: Option<String>,
        /// Raw response body
        body: Vec<u8>,
    },

    /// The server answered with a 4xx or 5xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// No usable response (connection refused, DNS failure, timeout,
    /// truncated body, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for `Success`
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Human-readable failure description, `None` for `Success`
    pub fn failure_detail(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP error {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Fetches URLs for the crawl engine
///
/// Implementations send the crawler's user agent with every request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a GET for `url`
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// `Fetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client sends `config.user_agent`, follows redirects, and applies the
/// request timeout only when one is configured.
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::CrawlerConfig;
/// use sumi_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 1xx–3xx after redirects | `Success` |
/// | 4xx / 5xx | `HttpError` |
/// | Timeout, connection failure, body read failure | `NetworkError` |
///
/// No retries are attempted.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            content_type,
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body of {}: {}", url, e),
        },
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
