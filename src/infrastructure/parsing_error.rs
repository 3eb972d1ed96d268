//! Parsing error types for deck page extraction
//!
//! A page without any deck section is not an error (the parser returns
//! `Ok(None)`); everything here indicates a page that breaks the template.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("No metadata block found (no '{heading}' heading with a label other than '{sentinel}')")]
    MalformedMetadataBlock { heading: String, sentinel: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid copy count '{label}' in {section} section")]
    InvalidCopyCount { label: String, section: String },

    #[error("Required field '{field}' not found in {context}")]
    RequiredFieldMissing { field: String, context: String },
}

impl ParsingError {
    pub fn malformed_metadata_block(heading: &str, sentinel: &str) -> Self {
        Self::MalformedMetadataBlock {
            heading: heading.to_string(),
            sentinel: sentinel.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_copy_count(label: &str, section: &str) -> Self {
        Self::InvalidCopyCount {
            label: label.to_string(),
            section: section.to_string(),
        }
    }

    pub fn required_field_missing(field: &str, context: &str) -> Self {
        Self::RequiredFieldMissing {
            field: field.to_string(),
            context: context.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = ParsingError::invalid_copy_count("x3", "main");
        assert_eq!(err.to_string(), "Invalid copy count 'x3' in main section");

        let err = ParsingError::malformed_metadata_block("h3", "Set Preferred Currency");
        assert!(err.to_string().contains("Set Preferred Currency"));
    }
}
