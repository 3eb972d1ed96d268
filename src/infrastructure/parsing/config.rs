//! Parsing configuration for deck page extraction
//!
//! Tag selectors and template markers of the deck page, kept in one place so
//! a template change is a configuration change.

use crate::domain::constants::template;
use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Label text of the heading that looks like metadata but is not
    pub sentinel_label: String,

    /// Element selectors of the page template
    pub selectors: DeckTemplateSelectors,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            sentinel_label: template::CURRENCY_SENTINEL_LABEL.to_string(),
            selectors: DeckTemplateSelectors::default(),
        }
    }
}

/// CSS selectors for the deck page template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckTemplateSelectors {
    /// Heading whose parent is the metadata block
    pub metadata_heading: String,

    /// Heading whose parent is a card section block
    pub section_heading: String,

    /// Emphasized label (metadata labels, section titles, copy counts)
    pub label: String,

    /// Link text (metadata values, card names)
    pub content: String,

    /// Card list inside a section block
    pub list: String,

    /// Card entry inside a list
    pub item: String,
}

impl Default for DeckTemplateSelectors {
    fn default() -> Self {
        Self {
            metadata_heading: template::METADATA_HEADING_TAG.to_string(),
            section_heading: template::SECTION_HEADING_TAG.to_string(),
            label: template::LABEL_TAG.to_string(),
            content: template::CONTENT_TAG.to_string(),
            list: template::LIST_TAG.to_string(),
            item: template::ITEM_TAG.to_string(),
        }
    }
}
