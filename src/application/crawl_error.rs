//! Errors that end a crawl
//!
//! A deck id without a deck page is not an error; it only counts toward the
//! consecutive-failure threshold. Everything here aborts the sweep and no
//! dataset is written.

use thiserror::Error;

use crate::infrastructure::fetch_error::FetchError;
use crate::infrastructure::parsing_error::ParsingError;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Failed to fetch deck {deck_id}: {source}")]
    Fetch {
        deck_id: u32,
        #[source]
        source: FetchError,
    },

    #[error("Failed to parse deck {deck_id}: {source}")]
    Parse {
        deck_id: u32,
        #[source]
        source: ParsingError,
    },
}

impl CrawlError {
    /// Deck id being processed when the crawl stopped
    pub fn deck_id(&self) -> u32 {
        match self {
            Self::Fetch { deck_id, .. } | Self::Parse { deck_id, .. } => *deck_id,
        }
    }
}
