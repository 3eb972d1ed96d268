//! Line-delimited JSON dataset output
//!
//! The dataset is written once per run, replacing any previous file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::domain::constants::storage;
use crate::domain::DeckRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Dataset directory, handed as a whole to the publisher
    pub dir: PathBuf,

    /// Dataset file name inside `dir`
    pub file_name: String,
}

impl OutputConfig {
    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(storage::DEFAULT_OUTPUT_DIR),
            file_name: storage::DEFAULT_DATASET_FILE.to_string(),
        }
    }
}

/// Serialize records as one JSON object per line
pub fn to_ndjson(records: &[DeckRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buffer, record)
            .with_context(|| format!("Failed to serialize deck '{}'", record.name()))?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}

/// Write `records` to `path`, overwriting it. Returns the number of lines written.
pub async fn write_ndjson(path: &Path, records: &[DeckRecord]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create dataset directory {}", parent.display()))?;
        }
    }

    let buffer = to_ndjson(records)?;
    fs::write(path, buffer)
        .await
        .with_context(|| format!("Failed to write dataset {}", path.display()))?;

    info!("Wrote {} decks to {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeckSection;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn record(name: &str) -> DeckRecord {
        let mut deck = BTreeMap::new();
        deck.insert(DeckSection::Main, vec!["Sangan".to_string()]);
        DeckRecord::new(name, vec![("author".to_string(), "Alice".to_string())], deck)
    }

    #[tokio::test]
    async fn test_one_object_per_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("decks.ndjson");

        let written = write_ndjson(&path, &[record("First"), record("Second")]).await.unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["name"], "First");
        assert_eq!(lines[1]["deck"]["main"][0], "Sangan");
    }

    #[tokio::test]
    async fn test_existing_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decks.ndjson");
        std::fs::write(&path, "stale\nstale\nstale\n").unwrap();

        write_ndjson(&path, &[record("Fresh")]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("stale"));
    }

    #[tokio::test]
    async fn test_empty_run_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decks.ndjson");

        assert_eq!(write_ndjson(&path, &[]).await.unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
