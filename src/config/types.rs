use serde::Deserialize;
use std::path::PathBuf;

/// Depth bound applied when the configuration does not set one
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// User agent sent with every request, and matched against robots.txt
pub const DEFAULT_USER_AGENT: &str = "simple-crawler/1.0";

/// Main configuration structure for Sumi-Mirror
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link distance from the root URL. Breaks infinite chains of
    /// generated URLs on pathological sites.
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// User agent string for requests and robots.txt matching
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Order in which discovered URLs are visited
    #[serde(default)]
    pub traversal: TraversalOrder,

    /// Per-request timeout in seconds. Unset means the transport never times out.
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            traversal: TraversalOrder::default(),
            request_timeout_secs: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Directory under which the `<domain>/` mirror directory is created.
    /// Unset means the current working directory.
    #[serde(rename = "root-dir", default)]
    pub root_dir: Option<PathBuf>,
}

/// Frontier ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Last in, first out: the most recently discovered link is visited next
    #[default]
    DepthFirst,

    /// First in, first out: links are visited in discovery order
    BreadthFirst,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
