use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lyrics_stats_server::aggregator::AggregationSummary;
use lyrics_stats_server::config::{AppConfig, CliConfig, FileConfig};
use lyrics_stats_server::corpus::initialize_corpus;
use lyrics_stats_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the lyrics corpus JSON file.
    #[clap(value_parser = parse_path)]
    pub corpus_path: Option<PathBuf>,

    /// Path to a TOML config file. Values in the file override the flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The address to bind the HTTP and metrics servers to.
    #[clap(long, default_value = "127.0.0.1")]
    pub bind_address: String,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age of content in the cache in seconds.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Word charted across artists when no search term is given.
    #[clap(long, default_value = "ja")]
    pub default_search_term: String,

    /// Dropdown label of the all-artists view.
    #[clap(long, default_value = "All artists")]
    pub all_artists_label: String,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            corpus_path: self.corpus_path.clone(),
            port: self.port,
            bind_address: self.bind_address.clone(),
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            default_search_term: self.default_search_term.clone(),
            all_artists_label: self.all_artists_label.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Loading corpus at {:?}...", config.corpus_path);
    let corpus = initialize_corpus(&config.corpus_path)?;

    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::init_corpus_metrics(&AggregationSummary::from(&corpus));

    run_server(ServerConfig::from(&config), Arc::new(corpus)).await
}
