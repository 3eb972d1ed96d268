//! Deck record - the normalized output unit of a crawl
//!
//! One record is built per successfully parsed deck page and never changes
//! afterwards. It serializes to the flat JSON object stored in the dataset:
//! `name`, one key per metadata slug, and a nested `deck` object.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Card list sections of a deck page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckSection {
    Main,
    Extra,
    Side,
}

impl DeckSection {
    pub const ALL: [DeckSection; 3] = [DeckSection::Main, DeckSection::Extra, DeckSection::Side];

    /// Key used in the `deck` object
    pub fn slug(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Extra => "extra",
            Self::Side => "side",
        }
    }

    /// Heading text closing the section's header on the page
    pub fn title(self) -> &'static str {
        match self {
            Self::Main => "Main Deck",
            Self::Extra => "Extra Deck",
            Self::Side => "Side Deck",
        }
    }
}

impl fmt::Display for DeckSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Metadata key always holding the deck name
pub const NAME_KEY: &str = "name";

/// Output key of the card sections object
pub const DECK_KEY: &str = "deck";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRecord {
    name: String,
    metadata: BTreeMap<String, String>,
    deck: BTreeMap<DeckSection, Vec<String>>,
}

impl DeckRecord {
    /// Build a record from the deck name, labelled metadata fields and card sections.
    ///
    /// `metadata["name"]` is always the deck name. Fields whose slug is one of the
    /// reserved output keys (`name`, `deck`) are dropped.
    pub fn new<I>(name: impl Into<String>, fields: I, deck: BTreeMap<DeckSection, Vec<String>>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let name = name.into();
        let mut metadata = BTreeMap::new();

        for (slug, value) in fields {
            if slug == NAME_KEY || slug == DECK_KEY {
                debug!("Dropping metadata field with reserved key '{}'", slug);
                continue;
            }
            metadata.insert(slug, value);
        }
        metadata.insert(NAME_KEY.to_string(), name.clone());

        Self { name, metadata, deck }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All metadata fields, including `name`
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn field(&self, slug: &str) -> Option<&str> {
        self.metadata.get(slug).map(String::as_str)
    }

    pub fn deck(&self) -> &BTreeMap<DeckSection, Vec<String>> {
        &self.deck
    }

    pub fn section(&self, section: DeckSection) -> Option<&[String]> {
        self.deck.get(&section).map(Vec::as_slice)
    }

    /// Total number of cards across all sections
    pub fn card_count(&self) -> usize {
        self.deck.values().map(Vec::len).sum()
    }
}

impl Serialize for DeckRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // name + other metadata keys + deck
        let mut map = serializer.serialize_map(Some(self.metadata.len() + 1))?;
        map.serialize_entry(NAME_KEY, &self.name)?;
        for (key, value) in &self.metadata {
            if key != NAME_KEY {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry(DECK_KEY, &self.deck)?;
        map.end()
    }
}
