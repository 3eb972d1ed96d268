//! Site characteristics and domain constants
//!
//! Values describing the deck-listing site and the crawl limits that the
//! default configuration is built from.

/// Deck-listing site constants
pub mod site {
    /// Deck page URL pattern (deck id placeholder: {})
    pub const DECK_URL_TEMPLATE: &str = "https://yugiohtopdecks.com/deck/{}";

    /// Placeholder substituted by the numeric deck id
    pub const ID_PLACEHOLDER: &str = "{}";

    /// Deck ids are 1-based
    pub const FIRST_DECK_ID: u32 = 1;
}

/// Fixed page template markers
pub mod template {
    /// Label of the currency widget heading, which shares the metadata heading markup
    pub const CURRENCY_SENTINEL_LABEL: &str = "Set Preferred Currency";

    /// Heading holding the deck name and its labelled metadata
    pub const METADATA_HEADING_TAG: &str = "h3";

    /// Heading introducing a card list section
    pub const SECTION_HEADING_TAG: &str = "h4";

    /// Emphasized label element
    pub const LABEL_TAG: &str = "b";

    /// Link element carrying metadata values and card names
    pub const CONTENT_TAG: &str = "a";

    pub const LIST_TAG: &str = "ul";

    pub const ITEM_TAG: &str = "li";
}

/// Crawl limits
pub mod crawling {
    /// Safety cap on the identifier sweep, not a real site limit
    pub const DEFAULT_MAX_DECK: u32 = 200_000;

    /// Consecutive "no deck" pages that end the sweep
    pub const DEFAULT_MAX_FAILED: u32 = 10;

    /// Minimum spacing between two page steps (milliseconds)
    pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 500;

    /// Default request timeout (seconds)
    pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const DEFAULT_USER_AGENT: &str = "topdecks-scraper/0.1 (dataset builder)";
}

/// On-disk layout
pub mod storage {
    /// Raw HTML cache directory
    pub const DEFAULT_CACHE_DIR: &str = "html";

    /// Cache entry file extension
    pub const CACHE_FILE_EXTENSION: &str = "html";

    /// Dataset directory handed to the publisher
    pub const DEFAULT_OUTPUT_DIR: &str = "data";

    pub const DEFAULT_DATASET_FILE: &str = "decks.ndjson";
}

/// Dataset publishing
pub mod publishing {
    pub const DEFAULT_PUBLISH_COMMAND: &str = "kaggle";

    /// Version label prefix; the run date is appended in parentheses
    pub const VERSION_LABEL_PREFIX: &str = "Weekly dataset update";
}
