//! Parsed deck page and the queries the extractor may run on it
//!
//! Wraps `scraper::Html` so locators only see tag and predicate queries,
//! never the raw tree API.

use scraper::{ElementRef, Html, Selector};

use super::config::DeckTemplateSelectors;
use super::error::{ParsingError, ParsingResult};

/// Immutable parsed page
pub struct DeckDocument {
    html: Html,
}

impl DeckDocument {
    pub fn parse(raw_content: &str) -> Self {
        Self {
            html: Html::parse_document(raw_content),
        }
    }

    /// All elements matching `tag`, in document order
    pub fn find_all<'a, 'b>(&'a self, tag: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(tag)
    }

    /// First element matching `tag` that satisfies `predicate`
    pub fn find_first<'a, P>(&'a self, tag: &Selector, mut predicate: P) -> Option<ElementRef<'a>>
    where
        P: FnMut(ElementRef<'a>) -> bool,
    {
        self.html.select(tag).find(|element| predicate(*element))
    }
}

/// First descendant of `element` matching `tag`
pub fn first_in<'a>(element: ElementRef<'a>, tag: &Selector) -> Option<ElementRef<'a>> {
    element.select(tag).next()
}

/// All descendants of `element` matching `tag`, in document order
pub fn all_in<'a>(element: ElementRef<'a>, tag: &Selector) -> Vec<ElementRef<'a>> {
    element.select(tag).collect()
}

/// Enclosing element, if the parent node is an element
pub fn parent_of(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Concatenated text of the element and its descendants
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Compiled selectors of the page template
#[derive(Debug, Clone)]
pub struct TemplateQueries {
    pub metadata_heading: Selector,
    pub section_heading: Selector,
    pub label: Selector,
    pub content: Selector,
    pub list: Selector,
    pub item: Selector,
}

impl TemplateQueries {
    pub fn compile(selectors: &DeckTemplateSelectors) -> ParsingResult<Self> {
        Ok(Self {
            metadata_heading: compile_selector(&selectors.metadata_heading)?,
            section_heading: compile_selector(&selectors.section_heading)?,
            label: compile_selector(&selectors.label)?,
            content: compile_selector(&selectors.content)?,
            list: compile_selector(&selectors.list)?,
            item: compile_selector(&selectors.item)?,
        })
    }
}

fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e.to_string()))
}
