//! HTTP client for deck page retrieval
//!
//! A thin `reqwest` wrapper. Pacing between requests is the crawl driver's
//! job; this client only issues single GETs.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::fetch_error::{FetchError, FetchResult};
use crate::domain::constants::crawling;

/// Remote source of raw page bodies
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch `url` and return the response body as text
    async fn get_text(&self, url: &str) -> FetchResult<String>;
}

/// HTTP client configuration for crawling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: crawling::DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: crawling::DEFAULT_REQUEST_TIMEOUT_SECONDS,
            follow_redirects: true,
        }
    }
}

pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl RemoteSource for HttpClient {
    /// The body is returned whatever the status; a missing deck page is
    /// recognized by its content.
    async fn get_text(&self, url: &str) -> FetchResult<String> {
        tracing::info!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP {} for {}", status, url);
        }

        let text = response.text().await.map_err(|e| FetchError::transport(url, e))?;

        tracing::debug!("Fetched {} ({}, {} chars)", url, status, text.len());
        Ok(text)
    }
}
