//! Application layer module
//!
//! Crawl orchestration and the end-to-end run that persists and publishes
//! the dataset.

pub mod crawl_driver;
pub mod crawl_error;
pub mod use_cases;

pub use crawl_driver::{CrawlDriver, CrawlReport, CrawlState, StopReason};
pub use crawl_error::CrawlError;
pub use use_cases::{build_page_fetcher, run_pipeline, RunSummary};
