mod file_config;

pub use file_config::{DashboardConfig, FileConfig};

use crate::dashboard::{DashboardSettings, DEFAULT_ALL_ARTISTS_LABEL};
use crate::query::DEFAULT_SEARCH_TERM;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub corpus_path: Option<PathBuf>,
    pub port: u16,
    pub bind_address: String,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub default_search_term: String,
    pub all_artists_label: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            corpus_path: None,
            port: 8000,
            bind_address: "127.0.0.1".to_owned(),
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            content_cache_age_sec: 3600,
            frontend_dir_path: None,
            default_search_term: DEFAULT_SEARCH_TERM.to_owned(),
            all_artists_label: DEFAULT_ALL_ARTISTS_LABEL.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub corpus_path: PathBuf,
    pub port: u16,
    pub bind_address: String,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,

    pub dashboard: DashboardSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let corpus_path = file
            .corpus_path
            .map(PathBuf::from)
            .or_else(|| cli.corpus_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("corpus_path must be given on the command line or in config file")
            })?;

        if !corpus_path.exists() {
            bail!("Corpus file does not exist: {:?}", corpus_path);
        }
        if !corpus_path.is_file() {
            bail!("corpus_path is not a file: {:?}", corpus_path);
        }

        let port = file.port.unwrap_or(cli.port);
        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let dashboard_file = file.dashboard.unwrap_or_default();
        let dashboard = resolve_dashboard_settings(
            dashboard_file
                .default_search_term
                .as_deref()
                .unwrap_or(&cli.default_search_term),
            dashboard_file
                .all_artists_label
                .as_deref()
                .unwrap_or(&cli.all_artists_label),
        )?;

        Ok(Self {
            corpus_path,
            port,
            bind_address,
            metrics_port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            dashboard,
        })
    }
}

/// Normalizes the default search term and rejects blank dashboard settings.
pub fn resolve_dashboard_settings(
    default_search_term: &str,
    all_artists_label: &str,
) -> Result<DashboardSettings> {
    let default_search_term = default_search_term.trim().to_lowercase();
    if default_search_term.is_empty() {
        bail!("default_search_term cannot be empty");
    }
    if all_artists_label.trim().is_empty() {
        bail!("all_artists_label cannot be empty");
    }
    Ok(DashboardSettings {
        all_artists_label: all_artists_label.to_owned(),
        default_search_term,
    })
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
