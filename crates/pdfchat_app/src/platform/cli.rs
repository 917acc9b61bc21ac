//! Command-line arguments and settings resolution.
//!
//! Priority: CLI args > `PDFCHAT_BASE_URL` (base address only) > config file > defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use pdfchat_service::ServiceSettings;

use super::config::{FileConfig, DEFAULT_CONFIG_FILENAME};
use super::logging::LogDestination;

pub(crate) const BASE_URL_ENV: &str = "PDFCHAT_BASE_URL";

/// Chat with your PDFs through a Document Service.
#[derive(Parser, Debug, Default)]
#[command(name = "pdfchat", version, about)]
pub(crate) struct CliArgs {
    /// Path to a RON configuration file (default: ./pdfchat.ron).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base address of the Document Service.
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Where log output goes.
    #[arg(long = "log", value_enum)]
    pub log_destination: Option<LogDestination>,

    /// Log level (trace, debug, info, warn, error, off).
    #[arg(short = 'l', long = "log-level", value_parser = parse_log_level)]
    pub log_level: Option<LevelFilter>,
}

fn parse_log_level(value: &str) -> Result<LevelFilter, String> {
    chat_logging::parse_level(value).ok_or_else(|| {
        format!("unknown log level '{value}' (expected trace, debug, info, warn, error or off)")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub service: ServiceSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl CliArgs {
    /// Path of the config file and whether the user named it explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        }
    }

    /// Merges arguments, the environment value and the config file.
    pub fn resolve(&self, env_base_url: Option<String>, file: FileConfig) -> Settings {
        let defaults = ServiceSettings::default();
        let base_url = self
            .base_url
            .clone()
            .or(env_base_url.filter(|value| !value.trim().is_empty()))
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        let log_level = self
            .log_level
            .or_else(|| file.log_level.as_deref().and_then(chat_logging::parse_level))
            .unwrap_or(LevelFilter::Info);

        Settings {
            service: ServiceSettings {
                base_url,
                connect_timeout: file.connect_timeout_secs.map(Duration::from_secs),
                request_timeout: file.request_timeout_secs.map(Duration::from_secs),
            },
            log_destination: self
                .log_destination
                .or(file.log_destination)
                .unwrap_or_default(),
            log_level,
        }
    }
}
