//! Parsing context for deck page extraction
//!
//! Identifies the page being parsed so extraction logs and errors can name it.

/// Context information for parsing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Deck id of the page being parsed
    pub deck_id: u32,

    /// Source URL of the page
    pub url: String,
}

impl ParseContext {
    pub fn new(deck_id: u32, url: impl Into<String>) -> Self {
        Self {
            deck_id,
            url: url.into(),
        }
    }
}
