//! Deck page parser
//!
//! Turns one deck page of the fixed template into a [`DeckRecord`]:
//! a metadata block (an `h3` heading with the deck name followed by
//! `<b>Label:</b> <a>value</a>` pairs) and up to three card sections (an `h4`
//! heading ending in "Main Deck", "Extra Deck" or "Side Deck" followed by a
//! list of `<li><b>3x</b> <a>Card</a></li>` entries).

use std::collections::BTreeMap;

use scraper::ElementRef;
use tracing::{debug, trace};

use super::config::ParsingConfig;
use super::document::{all_in, first_in, parent_of, text_of, DeckDocument, TemplateQueries};
use super::{ContextualParser, HtmlParser, ParseContext, ParsingError, ParsingResult};
use crate::domain::{DeckRecord, DeckSection};
use crate::utils::{field_slug, normalize_content};

/// Parser for deck pages
pub struct DeckParser {
    config: ParsingConfig,
    queries: TemplateQueries,
}

impl DeckParser {
    /// Create a parser for the default page template
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(ParsingConfig::default())
    }

    /// Create a parser with a custom template configuration
    pub fn with_config(config: ParsingConfig) -> ParsingResult<Self> {
        let queries = TemplateQueries::compile(&config.selectors)?;
        Ok(Self { config, queries })
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Extract the record from an already parsed page.
    ///
    /// `Ok(None)` means the page carries no deck section at all.
    pub fn extract(&self, document: &DeckDocument) -> ParsingResult<Option<DeckRecord>> {
        let sections = locate_sections(document, &self.queries);
        if sections.is_empty() {
            return Ok(None);
        }

        let container = locate_metadata_block(document, &self.queries, &self.config.sentinel_label)
            .ok_or_else(|| {
                ParsingError::malformed_metadata_block(
                    &self.config.selectors.metadata_heading,
                    &self.config.sentinel_label,
                )
            })?;
        let (name, fields) = self.extract_metadata(container)?;

        let mut deck = BTreeMap::new();
        for (section, container) in sections {
            let cards = self.extract_section(section, container)?;
            if let Some(cards) = cards {
                deck.insert(section, cards);
            }
        }

        Ok(Some(DeckRecord::new(name, fields, deck)))
    }

    /// Deck name (first label) and the `labels[1..]` x `contents` pairs
    fn extract_metadata(&self, container: ElementRef<'_>) -> ParsingResult<(String, Vec<(String, String)>)> {
        let labels = all_in(container, &self.queries.label);
        let contents = all_in(container, &self.queries.content);

        let (name_label, field_labels) = labels
            .split_first()
            .ok_or_else(|| ParsingError::required_field_missing("name", "metadata block"))?;
        let name = text_of(*name_label).trim().to_string();

        let fields: Vec<(String, String)> = field_labels
            .iter()
            .zip(contents.iter())
            .map(|(label, content)| (field_slug(&text_of(*label)), normalize_content(&text_of(*content))))
            .collect();

        trace!("Metadata block: {} labels, {} contents", labels.len(), contents.len());
        Ok((name, fields))
    }

    /// Copy-count expanded card names, or `None` when the block lists no items
    fn extract_section(&self, section: DeckSection, container: ElementRef<'_>) -> ParsingResult<Option<Vec<String>>> {
        let Some(list) = first_in(container, &self.queries.list) else {
            debug!("{} section has no card list", section);
            return Ok(None);
        };
        let items = all_in(list, &self.queries.item);
        if items.is_empty() {
            return Ok(None);
        }

        let mut cards = Vec::new();
        for item in items {
            let count_label = first_in(item, &self.queries.label)
                .map(text_of)
                .ok_or_else(|| ParsingError::required_field_missing("copy count", section.slug()))?;
            let count = copy_count(&count_label)
                .ok_or_else(|| ParsingError::invalid_copy_count(count_label.trim(), section.slug()))?;
            let card = first_in(item, &self.queries.content)
                .map(|link| text_of(link).trim().to_string())
                .ok_or_else(|| ParsingError::required_field_missing("card name", section.slug()))?;

            cards.extend(std::iter::repeat_n(card, count));
        }

        Ok(Some(cards))
    }
}

impl HtmlParser for DeckParser {
    type Output = Option<DeckRecord>;

    fn parse(&self, html: &str) -> ParsingResult<Self::Output> {
        self.extract(&DeckDocument::parse(html))
    }
}

impl ContextualParser for DeckParser {
    type Output = Option<DeckRecord>;
    type Context = ParseContext;

    fn parse_with_context(&self, document: &DeckDocument, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing deck page {} ({})", context.deck_id, context.url);
        let record = self.extract(document)?;
        match &record {
            Some(record) => debug!(
                "Deck {} '{}': {} cards in {} sections",
                context.deck_id,
                record.name(),
                record.card_count(),
                record.deck().len()
            ),
            None => debug!("No deck sections on page {}", context.deck_id),
        }
        Ok(record)
    }
}

/// Copy count of a list entry: the first character of the trimmed label as a digit.
///
/// Multi-digit counts keep only their first digit ("10x" -> 1), matching the
/// dataset's existing records.
pub fn copy_count(label: &str) -> Option<usize> {
    label
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as usize)
}

/// Parent of the first metadata heading whose first label is not the sentinel
pub fn locate_metadata_block<'a>(
    document: &'a DeckDocument,
    queries: &TemplateQueries,
    sentinel: &str,
) -> Option<ElementRef<'a>> {
    document
        .find_first(&queries.metadata_heading, |heading| {
            first_in(heading, &queries.label).is_some_and(|label| text_of(label).trim() != sentinel)
        })
        .and_then(parent_of)
}

/// Parent of the first section heading whose first label ends with the section title
pub fn locate_section<'a>(
    document: &'a DeckDocument,
    queries: &TemplateQueries,
    section: DeckSection,
) -> Option<ElementRef<'a>> {
    document
        .find_first(&queries.section_heading, |heading| {
            first_in(heading, &queries.label).is_some_and(|label| text_of(label).trim().ends_with(section.title()))
        })
        .and_then(parent_of)
}

/// Every known section present on the page, in section order
pub fn locate_sections<'a>(document: &'a DeckDocument, queries: &TemplateQueries) -> Vec<(DeckSection, ElementRef<'a>)> {
    DeckSection::ALL
        .into_iter()
        .filter_map(|section| locate_section(document, queries, section).map(|container| (section, container)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn page(metadata: &str, sections: &str) -> String {
        format!(
            r#"<html><body>
            <div class="currency"><h3><b>Set Preferred Currency</b></h3><a>USD</a><a>EUR</a></div>
            <div class="deck-info">{metadata}</div>
            {sections}
            </body></html>"#
        )
    }

    fn section(title: &str, items: &[(&str, &str)]) -> String {
        let lis: String = items
            .iter()
            .map(|(count, card)| format!("<li><b>{count}</b> <a href=\"/card\">{card}</a></li>"))
            .collect();
        format!("<div class=\"section\"><h4><b>{title}</b></h4><ul>{lis}</ul></div>")
    }

    const SYNTHETIC_METADATA: &str = r#"<h3><b>My Deck</b></h3>
        <b>Author:</b> <a href="/u/alice">Alice</a><br>
        <b>Format:</b> <a href="/f/adv">Advanced</a>"#;

    #[test]
    fn test_synthetic_page_end_to_end() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, &section("Main Deck", &[("2x", "Dark Magician")]));

        let record = parser.parse(&html).unwrap().unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "My Deck",
                "author": "Alice",
                "format": "Advanced",
                "deck": { "main": ["Dark Magician", "Dark Magician"] }
            })
        );
    }

    #[test]
    fn test_name_matches_metadata_name() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, &section("Side Deck", &[("1x", "Maxx C")]));

        let record = parser.parse(&html).unwrap().unwrap();
        assert_eq!(record.field("name"), Some(record.name()));
    }

    #[test]
    fn test_page_without_sections_is_absent() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, "<div><h4><b>Comments</b></h4><ul><li><b>1</b><a>x</a></li></ul></div>");

        assert_eq!(parser.parse(&html).unwrap(), None);
        assert_eq!(parser.parse("<html><body>404 Not Found</body></html>").unwrap(), None);
    }

    #[test]
    fn test_copy_count_expansion() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, &section("Main Deck", &[("3x", "Blue-Eyes White Dragon")]));

        let record = parser.parse(&html).unwrap().unwrap();
        assert_eq!(
            record.section(DeckSection::Main).unwrap(),
            ["Blue-Eyes White Dragon", "Blue-Eyes White Dragon", "Blue-Eyes White Dragon"]
        );
    }

    #[test]
    fn test_all_sections_keep_list_order() {
        let parser = DeckParser::new().unwrap();
        let sections = [
            section("Main Deck", &[("1x", "Pot of Greed"), ("2x", "Sangan")]),
            section("Extra Deck", &[("1x", "Borreload Dragon")]),
            section("Side Deck", &[("3x", "Ghost Ogre")]),
        ]
        .concat();
        let record = parser.parse(&page(SYNTHETIC_METADATA, &sections)).unwrap().unwrap();

        assert_eq!(record.section(DeckSection::Main).unwrap(), ["Pot of Greed", "Sangan", "Sangan"]);
        assert_eq!(record.section(DeckSection::Extra).unwrap(), ["Borreload Dragon"]);
        assert_eq!(record.section(DeckSection::Side).unwrap().len(), 3);
        assert_eq!(record.card_count(), 7);
    }

    #[test]
    fn test_missing_sections_are_omitted() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, &section("Extra Deck", &[("1x", "Decode Talker")]));

        let record = parser.parse(&html).unwrap().unwrap();
        assert_eq!(record.deck().keys().copied().collect::<Vec<_>>(), vec![DeckSection::Extra]);
        assert_eq!(record.section(DeckSection::Main), None);
    }

    #[test]
    fn test_name_only_metadata_block() {
        let parser = DeckParser::new().unwrap();
        let html = page("<h3><b>Lonely Deck</b></h3>", &section("Main Deck", &[("1x", "Kuriboh")]));

        let record = parser.parse(&html).unwrap().unwrap();
        assert_eq!(record.metadata().len(), 1);
        assert_eq!(record.field("name"), Some("Lonely Deck"));
    }

    #[test]
    fn test_unequal_labels_and_contents_stop_at_shorter() {
        let parser = DeckParser::new().unwrap();
        let metadata = r#"<h3><b>Uneven</b></h3>
            <b>Author:</b> <a>Bob</a>
            <b>Format:</b>
            <b>Date:</b>"#;
        let record = parser
            .parse(&page(metadata, &section("Main Deck", &[("1x", "Kuriboh")])))
            .unwrap()
            .unwrap();

        assert_eq!(record.field("author"), Some("Bob"));
        assert_eq!(record.field("format"), None);
        assert_eq!(record.field("date"), None);
    }

    #[test]
    fn test_metadata_values_are_normalized() {
        let parser = DeckParser::new().unwrap();
        let metadata = "<h3><b> Spaced Deck </b></h3><b>Tournament Placement:\n</b> <a> Top\u{a0}8 </a>";
        let record = parser
            .parse(&page(metadata, &section("Main Deck", &[("1x", "Kuriboh")])))
            .unwrap()
            .unwrap();

        assert_eq!(record.name(), "Spaced Deck");
        assert_eq!(record.field("tournament_placement"), Some("Top 8"));
    }

    #[test]
    fn test_sentinel_heading_is_skipped() {
        let parser = DeckParser::new().unwrap();
        let record = parser
            .parse(&page(SYNTHETIC_METADATA, &section("Main Deck", &[("1x", "Kuriboh")])))
            .unwrap()
            .unwrap();

        assert_ne!(record.name(), "Set Preferred Currency");
        assert_eq!(record.field("author"), Some("Alice"));
    }

    #[test]
    fn test_missing_metadata_block_is_fatal() {
        let parser = DeckParser::new().unwrap();
        let html = format!(
            "<html><body><div><h3><b>Set Preferred Currency</b></h3></div>{}</body></html>",
            section("Main Deck", &[("1x", "Kuriboh")])
        );

        let err = parser.parse(&html).unwrap_err();
        assert!(matches!(err, ParsingError::MalformedMetadataBlock { .. }));
    }

    #[test]
    fn test_non_digit_copy_count_is_rejected() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, &section("Main Deck", &[("x3", "Kuriboh")]));

        let err = parser.parse(&html).unwrap_err();
        assert_eq!(err, ParsingError::invalid_copy_count("x3", "main"));
    }

    #[test]
    fn test_section_without_items_is_omitted() {
        let parser = DeckParser::new().unwrap();
        let sections = format!(
            "<div><h4><b>Side Deck</b></h4><ul></ul></div>{}",
            section("Main Deck", &[("1x", "Kuriboh")])
        );
        let record = parser.parse(&page(SYNTHETIC_METADATA, &sections)).unwrap().unwrap();

        assert_eq!(record.section(DeckSection::Side), None);
        assert_eq!(record.section(DeckSection::Main).unwrap(), ["Kuriboh"]);
    }

    #[test]
    fn test_parse_with_context_matches_parse() {
        let parser = DeckParser::new().unwrap();
        let html = page(SYNTHETIC_METADATA, &section("Main Deck", &[("2x", "Dark Magician")]));
        let context = ParseContext::new(42, "https://yugiohtopdecks.com/deck/42");

        let with_context = parser.parse_with_context(&DeckDocument::parse(&html), &context).unwrap();
        assert_eq!(with_context, parser.parse(&html).unwrap());
    }

    #[rstest]
    #[case("3x", Some(3))]
    #[case(" 1 ", Some(1))]
    #[case("10x", Some(1))]
    #[case("x2", None)]
    #[case("", None)]
    fn test_copy_count(#[case] label: &str, #[case] expected: Option<usize>) {
        assert_eq!(copy_count(label), expected);
    }

    proptest! {
        #[test]
        fn copy_count_uses_only_the_first_digit(first in 1u32..=9, rest in "[0-9]{0,3}x?") {
            let label = format!("{first}{rest}");
            prop_assert_eq!(copy_count(&label), Some(first as usize));
        }
    }
}
