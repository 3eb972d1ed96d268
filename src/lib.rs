//! Top Decks Scraper - deck listing crawler for yugiohtopdecks.com
//!
//! Sweeps deck pages by numeric id, extracts each deck's metadata and card
//! lists, writes them as a line-delimited JSON dataset and publishes the
//! dataset directory as a new version.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

pub use application::{run_pipeline, CrawlReport, RunSummary, StopReason};
pub use domain::{DeckRecord, DeckSection};
