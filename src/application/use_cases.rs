//! Application use cases
//!
//! One run is crawl, then persist, then publish. A crawl error aborts the
//! run before anything is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use super::crawl_driver::{CrawlDriver, StopReason};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dataset_store::write_ndjson;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::page_cache::PageCache;
use crate::infrastructure::page_fetcher::{DeckPages, PageFetcher, UrlTemplate};
use crate::infrastructure::parsing::DeckParser;
use crate::infrastructure::publisher::{version_label, DatasetPublisher};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub decks_written: usize,
    pub pages_visited: u32,
    pub stop_reason: StopReason,
    pub dataset_path: PathBuf,
    pub version_label: String,
}

/// Page fetcher over the live site, backed by the configured cache
pub fn build_page_fetcher(config: &AppConfig) -> Result<PageFetcher<HttpClient>> {
    let template = UrlTemplate::parse(&config.crawl.url_template).context("Invalid deck URL template")?;
    let cache = PageCache::from_config(&config.cache);
    let client = HttpClient::new(config.http.clone())?;
    Ok(PageFetcher::new(template, cache, client))
}

/// Crawl every deck, write the dataset and publish the output directory
pub async fn run_pipeline<P>(
    config: &AppConfig,
    pages: &P,
    parser: &DeckParser,
    publisher: &dyn DatasetPublisher,
    today: NaiveDate,
) -> Result<RunSummary>
where
    P: DeckPages + ?Sized,
{
    let report = CrawlDriver::new(pages, parser, config.crawl.clone())
        .run()
        .await
        .context("Crawl aborted")?;

    let dataset_path = config.output.dataset_path();
    let decks_written = write_ndjson(&dataset_path, &report.records).await?;

    let label = version_label(today);
    publisher
        .publish(&config.output.dir, &label)
        .await
        .context("Dataset publishing failed")?;

    info!(
        "Run complete: {} decks in {} ({})",
        decks_written,
        dataset_path.display(),
        report.stop_reason
    );

    Ok(RunSummary {
        decks_written,
        pages_visited: report.pages_visited,
        stop_reason: report.stop_reason,
        dataset_path,
        version_label: label,
    })
}
