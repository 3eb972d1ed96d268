//! Dataset publishing
//!
//! After the dataset is written, its directory is published as a new dataset
//! version. The default publisher drives the Kaggle CLI
//! (`kaggle datasets version -p <dir> -m <label>`).

use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::info;

use crate::domain::constants::publishing;

/// Version label of a dataset update made on `date`
pub fn version_label(date: NaiveDate) -> String {
    format!("{} ({})", publishing::VERSION_LABEL_PREFIX, date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub enabled: bool,

    /// Kaggle CLI executable
    pub command: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: publishing::DEFAULT_PUBLISH_COMMAND.to_string(),
        }
    }
}

#[async_trait]
pub trait DatasetPublisher: Send + Sync {
    /// Publish the contents of `dataset_dir` as a new version labelled `version_label`
    async fn publish(&self, dataset_dir: &Path, version_label: &str) -> Result<()>;
}

/// Publishes through the Kaggle command line client
#[derive(Debug, Clone)]
pub struct KaggleCliPublisher {
    command: String,
}

impl KaggleCliPublisher {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

#[async_trait]
impl DatasetPublisher for KaggleCliPublisher {
    async fn publish(&self, dataset_dir: &Path, version_label: &str) -> Result<()> {
        info!("Publishing {} as '{}'", dataset_dir.display(), version_label);

        let output = Command::new(&self.command)
            .args(["datasets", "version", "-p"])
            .arg(dataset_dir)
            .args(["-m", version_label])
            .output()
            .await
            .with_context(|| format!("Failed to run '{}'", self.command))?;

        if !output.status.success() {
            bail!(
                "'{} datasets version' exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        info!("Published: {}", String::from_utf8_lossy(&output.stdout).trim());
        Ok(())
    }
}

/// Skips publishing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl DatasetPublisher for NoopPublisher {
    async fn publish(&self, dataset_dir: &Path, version_label: &str) -> Result<()> {
        info!("Publishing disabled; skipped '{}' for {}", version_label, dataset_dir.display());
        Ok(())
    }
}

/// Publisher selected by configuration
pub fn from_config(config: &PublishConfig) -> Box<dyn DatasetPublisher> {
    if config.enabled {
        Box::new(KaggleCliPublisher::new(config.command.clone()))
    } else {
        Box::new(NoopPublisher)
    }
}
