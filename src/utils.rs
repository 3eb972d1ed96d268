//! Common utilities shared across the crate
//!
//! Slug derivation for cache keys (from URLs) and metadata keys (from label text).

use deunicode::deunicode;

/// Separator used in cache-file slugs
pub const URL_SLUG_SEPARATOR: char = '-';

/// Separator used in metadata field slugs
pub const FIELD_SLUG_SEPARATOR: char = '_';

/// Transliterate to ASCII, then keep lowercase alphanumerics; every run of
/// other characters becomes one `separator`. No leading or trailing separator.
pub fn slugify(text: &str, separator: char) -> String {
    let text = deunicode(text);
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(separator);
            }
            slug.push(c.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Filesystem-safe cache key of a source URL
///
/// `https://yugiohtopdecks.com/deck/1` -> `https-yugiohtopdecks-com-deck-1`
pub fn url_slug(url: &str) -> String {
    slugify(url, URL_SLUG_SEPARATOR)
}

/// Metadata key of a label, e.g. `"Deck Format: "` -> `deck_format`
pub fn field_slug(label: &str) -> String {
    let label = label.trim_matches(|c| matches!(c, ':' | ' ' | '\n'));
    slugify(label, FIELD_SLUG_SEPARATOR)
}

/// Trim and replace non-breaking spaces with regular spaces
pub fn normalize_content(text: &str) -> String {
    text.trim().replace('\u{a0}', " ")
}
