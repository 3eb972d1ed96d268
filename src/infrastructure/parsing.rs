//! HTML parsing infrastructure for deck pages
//!
//! Trait-based parsing over a typed document wrapper, with template
//! selectors coming from configuration.

pub mod config;
pub mod context;
pub mod deck_parser;
pub mod document;
pub mod error;

// Re-export public types
pub use config::{DeckTemplateSelectors, ParsingConfig};
pub use context::ParseContext;
pub use deck_parser::DeckParser;
pub use document::DeckDocument;
pub use error::{ParsingError, ParsingResult};

/// Generic HTML parser trait for type-safe parsing
pub trait HtmlParser {
    type Output;

    /// Parse raw HTML content
    fn parse(&self, html: &str) -> ParsingResult<Self::Output>;
}

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse a document with contextual information
    fn parse_with_context(&self, document: &DeckDocument, context: &Self::Context) -> ParsingResult<Self::Output>;
}
