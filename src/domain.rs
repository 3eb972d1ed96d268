//! Domain module - deck records and site constants
//!
//! Holds the normalized output unit of the crawl and the constants
//! describing the deck-listing site.

pub mod constants;
pub mod deck;

pub use deck::{DeckRecord, DeckSection};
