//! Sequential deck crawl
//!
//! Visits deck ids in increasing order, one page at a time, and keeps every
//! extracted record. The sweep ends when `max_failed` consecutive ids have no
//! deck page or when `max_deck` has been visited.

use std::fmt;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use super::crawl_error::CrawlError;
use crate::domain::DeckRecord;
use crate::infrastructure::config::CrawlConfig;
use crate::infrastructure::page_fetcher::DeckPages;
use crate::infrastructure::parsing::{ContextualParser, DeckDocument, DeckParser, ParseContext};

/// How a sweep ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every id up to `max_deck` was visited
    Exhausted,
    /// `max_failed` consecutive ids had no deck; `deck_id` is the last of them
    FailureThreshold { deck_id: u32 },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "identifier space exhausted"),
            Self::FailureThreshold { deck_id } => write!(f, "failure threshold reached at deck {deck_id}"),
        }
    }
}

/// Process-local crawl progress
#[derive(Debug, Default)]
pub struct CrawlState {
    cursor: u32,
    records: Vec<DeckRecord>,
    consecutive_failures: u32,
}

impl CrawlState {
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn records(&self) -> &[DeckRecord] {
        &self.records
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    fn record_success(&mut self, record: DeckRecord) {
        self.records.push(record);
        self.consecutive_failures = 0;
    }

    /// Returns the updated consecutive failure count
    fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }
}

/// Result of a finished sweep
#[derive(Debug)]
pub struct CrawlReport {
    /// Extracted decks in id order
    pub records: Vec<DeckRecord>,
    pub stop_reason: StopReason,
    pub pages_visited: u32,
}

pub struct CrawlDriver<'a, P: DeckPages + ?Sized> {
    pages: &'a P,
    parser: &'a DeckParser,
    config: CrawlConfig,
}

impl<'a, P: DeckPages + ?Sized> CrawlDriver<'a, P> {
    pub fn new(pages: &'a P, parser: &'a DeckParser, config: CrawlConfig) -> Self {
        Self { pages, parser, config }
    }

    /// Run the sweep to one of its terminal states
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        let floor = self.config.min_request_interval();
        let mut state = CrawlState::default();
        let mut pages_visited = 0;

        info!(
            "Crawling decks {}..={} (stop after {} consecutive misses)",
            self.config.start_id, self.config.max_deck, self.config.max_failed
        );

        for deck_id in self.config.start_id..=self.config.max_deck {
            state.cursor = deck_id;
            let started = Instant::now();

            let record = self.visit(deck_id).await?;
            pages_visited += 1;

            wait_out_floor(started, floor).await;

            match record {
                Some(record) => {
                    info!("Deck {}: '{}' ({} cards)", deck_id, record.name(), record.card_count());
                    state.record_success(record);
                }
                None => {
                    let failed = state.record_failure();
                    debug!("Deck {}: no deck ({} consecutive)", deck_id, failed);
                    if failed >= self.config.max_failed {
                        warn!("Went over failed threshold at deck {}", deck_id);
                        return Ok(finish(state, StopReason::FailureThreshold { deck_id }, pages_visited));
                    }
                }
            }
        }

        Ok(finish(state, StopReason::Exhausted, pages_visited))
    }

    async fn visit(&self, deck_id: u32) -> Result<Option<DeckRecord>, CrawlError> {
        let content = self
            .pages
            .fetch(deck_id)
            .await
            .map_err(|source| CrawlError::Fetch { deck_id, source })?;

        let context = ParseContext::new(deck_id, self.pages.url_for(deck_id));
        let document = DeckDocument::parse(&content);
        self.parser
            .parse_with_context(&document, &context)
            .map_err(|source| CrawlError::Parse { deck_id, source })
    }
}

/// Sleep until `floor` has passed since `started`
async fn wait_out_floor(started: Instant, floor: Duration) {
    let elapsed = started.elapsed();
    if elapsed < floor {
        sleep(floor - elapsed).await;
    }
}

fn finish(state: CrawlState, stop_reason: StopReason, pages_visited: u32) -> CrawlReport {
    info!(
        "Crawl finished at deck {} ({}): {} decks from {} pages",
        state.cursor,
        stop_reason,
        state.records.len(),
        pages_visited
    );
    CrawlReport {
        records: state.records,
        stop_reason,
        pages_visited,
    }
}
