//! Configuration infrastructure
//!
//! Application settings are layered with the `config` crate:
//! 1. Built-in defaults (`AppConfig::default()`)
//! 2. An optional config file (`--config <path>`, or `topdecks.{toml,json,yaml}` if present)
//! 3. Environment variables, e.g. `TOPDECKS__CRAWL__MAX_FAILED=5`

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use super::dataset_store::OutputConfig;
use super::http_client::HttpClientConfig;
use super::page_cache::CacheConfig;
use super::parsing::ParsingConfig;
use super::publisher::PublishConfig;
use crate::domain::constants::{crawling, site};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "topdecks";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TOPDECKS";

/// Nesting separator in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub crawl: CrawlConfig,
    pub http: HttpClientConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub parsing: ParsingConfig,
    pub logging: LoggingConfig,
    pub publish: PublishConfig,
}

/// Identifier sweep settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Deck page URL with a `{}` placeholder for the id
    pub url_template: String,

    /// First deck id visited
    pub start_id: u32,

    /// Last deck id visited (inclusive)
    pub max_deck: u32,

    /// Consecutive pages without a deck that end the sweep
    pub max_failed: u32,

    /// Minimum duration of one fetch + extract step in milliseconds
    pub min_request_interval_ms: u64,
}

impl CrawlConfig {
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            url_template: site::DECK_URL_TEMPLATE.to_string(),
            start_id: site::FIRST_DECK_ID,
            max_deck: crawling::DEFAULT_MAX_DECK,
            max_failed: crawling::DEFAULT_MAX_FAILED,
            min_request_interval_ms: crawling::DEFAULT_MIN_REQUEST_INTERVAL_MS,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Write the run log as JSON lines
    pub json_format: bool,

    /// Mirror log output to stdout
    pub console_output: bool,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            module_filters: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Reject settings the crawl cannot run with
    pub fn validate(&self) -> Result<()> {
        let crawl = &self.crawl;
        ensure!(crawl.max_failed > 0, "crawl.max_failed must be greater than 0");
        ensure!(crawl.start_id > 0, "crawl.start_id must be greater than 0 (deck ids are 1-based)");
        ensure!(
            crawl.start_id <= crawl.max_deck,
            "crawl.start_id ({}) must not exceed crawl.max_deck ({})",
            crawl.start_id,
            crawl.max_deck
        );
        ensure!(!crawl.url_template.trim().is_empty(), "crawl.url_template must not be empty");
        ensure!(!self.output.file_name.trim().is_empty(), "output.file_name must not be empty");
        ensure!(
            !self.publish.enabled || !self.publish.command.trim().is_empty(),
            "publish.command must not be empty when publishing is enabled"
        );
        Ok(())
    }
}

/// Loads the layered application configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    /// Explicit config file; when unset the default file is optional
    pub config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .context("Failed to build default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        builder = match &self.config_path {
            Some(path) => builder.add_source(config::File::from(path.as_path()).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Configuration has invalid values")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Human-readable list of the sources `load_config` reads
    pub fn source_description(&self) -> String {
        match &self.config_path {
            Some(path) => format!("defaults, file {}, environment", path.display()),
            None => format!("defaults, optional '{DEFAULT_CONFIG_FILE}' file, environment"),
        }
    }
}
