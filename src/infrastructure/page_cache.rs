//! On-disk raw page cache
//!
//! One file per source URL, named by the URL slug, holding the response body
//! verbatim. Entries are never expired or rewritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::fetch_error::{FetchError, FetchResult};
use crate::domain::constants::storage;
use crate::utils::url_slug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding cached pages
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(storage::DEFAULT_CACHE_DIR),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file of `url`
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", url_slug(url), storage::CACHE_FILE_EXTENSION))
    }

    /// Cached body of `url`, if any
    pub async fn load(&self, url: &str) -> FetchResult<Option<String>> {
        let path = self.path_for(url);
        match fs::read_to_string(&path).await {
            Ok(content) => {
                debug!("Cache hit: {}", path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FetchError::cache(path, e)),
        }
    }

    /// Persist the body of `url`, creating the cache directory on demand
    pub async fn store(&self, url: &str, content: &str) -> FetchResult<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| FetchError::cache(&self.dir, e))?;

        let path = self.path_for(url);
        fs::write(&path, content)
            .await
            .map_err(|e| FetchError::cache(&path, e))?;

        debug!("Cached {} -> {}", url, path.display());
        Ok(path)
    }
}
