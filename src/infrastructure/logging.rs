//! Logging system configuration and initialization
//!
//! Sets up `tracing` for one crawl run:
//! - Run log file at the path given on the command line (appended, never rotated)
//! - Optional JSON formatting of the run log
//! - Optional console mirror
//! - Local-time timestamps
//!
//! The returned [`LoggingGuard`] flushes the non-blocking file writer on drop
//! and must be held for the whole run.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::{self, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub use crate::infrastructure::config::LoggingConfig;

/// Dependencies held at `warn` unless the level is `trace`
const QUIET_TARGETS: [&str; 5] = ["reqwest", "hyper", "hyper_util", "html5ever", "selectors"];

/// Local wall-clock time, millisecond precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Keeps the log writer alive; dropping it flushes pending lines
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Build the level filter: `RUST_LOG` wins, otherwise the configured level
/// plus quiet dependency targets and module overrides.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    if !config.level.to_lowercase().contains("trace") {
        for target in QUIET_TARGETS {
            filter = filter.add_directive(
                format!("{target}=warn")
                    .parse()
                    .with_context(|| format!("Invalid log directive for {target}"))?,
            );
        }
    }

    for (module, level) in &config.module_filters {
        filter = filter.add_directive(
            format!("{module}={level}")
                .parse()
                .with_context(|| format!("Invalid log filter '{module}={level}'"))?,
        );
    }

    Ok(filter)
}

/// Initialize logging to `log_file` with the given configuration
pub fn init_logging_with_config(config: &LoggingConfig, log_file: &Path) -> Result<LoggingGuard> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("Log path has no file name: {}", log_file.display()))?;
    let log_dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let env_filter = build_env_filter(config)?;

    let file_appender = rolling::never(&log_dir, file_name);
    let (file_writer, file_guard) = non_blocking(file_appender);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.json_format {
        layers.push(
            fmt::Layer::new()
                .json()
                .with_writer(file_writer)
                .with_timer(LocalTimeFormatter)
                .with_target(true)
                .with_ansi(false)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::Layer::new()
                .with_writer(file_writer)
                .with_timer(LocalTimeFormatter)
                .with_target(true)
                .with_ansi(false)
                .boxed(),
        );
    }

    if config.console_output {
        layers.push(
            fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_timer(LocalTimeFormatter)
                .with_target(false)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install the global tracing subscriber")?;

    tracing::info!("Logging initialized: {}", log_file.display());

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
