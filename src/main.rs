//! Sumi-Mirror main entry point
//!
//! This is the command-line interface for the Sumi-Mirror site mirror.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use sumi_mirror::config::{load_config_with_hash, Config};
use sumi_mirror::crawler::run_mirror;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional TOML configuration file
const CONFIG_ENV_VAR: &str = "SUMI_MIRROR_CONFIG";

/// Default log filter when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "sumi_mirror=info,warn";

/// Sumi-Mirror: mirrors a single web sub-domain to disk
///
/// Starting from ROOT_URL, follows every link that stays on the same
/// network location, respects robots.txt, and writes each fetched resource
/// into `<domain>/files/` with an index at `<domain>/index.csv`.
#[derive(Parser, Debug)]
#[command(name = "sumi-mirror")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Absolute URL the crawl starts from
    #[arg(value_name = "ROOT_URL")]
    root_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
    };

    setup_logging();

    let config = load_ambient_config()?;

    tracing::info!("Starting crawl at {}", cli.root_url);
    match run_mirror(config, &cli.root_url).await {
        Ok(stats) => {
            tracing::info!("Crawl completed: {}", stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e).with_context(|| format!("mirroring {}", cli.root_url))
        }
    }
}

/// Sets up the logging/tracing subscriber, honoring `RUST_LOG`
fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file named by `SUMI_MIRROR_CONFIG`, or defaults
fn load_ambient_config() -> anyhow::Result<Config> {
    let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) else {
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(&path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}
