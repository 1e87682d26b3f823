//! Line pre-processing for IDF content
//!
//! Helpers that operate on a single physical line: comment handling, keyword
//! detection and terminator detection. None of them allocate.

use crate::constants::{FIELD_SEPARATOR, OBJECT_TERMINATOR};
use regex::Regex;
use std::sync::LazyLock;

/// Candidate keyword of a line that opens an object: the text before the
/// first comma, provided it holds no terminator. The comment marker is
/// configurable, so it is rejected in [`parse_keyword`] instead.
static KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^,;]+?)\s*,").expect("keyword pattern is a valid regex")
});

/// Remove an inline comment from a line
///
/// A marker at position 0 is not inline: the whole line is a comment and is
/// returned unchanged, as is a line without a marker.
pub fn strip_inline_comment(line: &str, marker: char) -> &str {
    match line.find(marker) {
        Some(index) if index > 0 => line[..index].trim(),
        _ => line,
    }
}

/// Whether a line holds nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Whether a trimmed line is a whole-line comment
pub fn is_comment_line(trimmed: &str, marker: char) -> bool {
    trimmed.starts_with(marker)
}

/// Keyword of a line that starts a new object (`Keyword, ...`)
pub fn parse_keyword(line: &str, marker: char) -> Option<&str> {
    KEYWORD_PATTERN
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
        .filter(|keyword| !keyword.is_empty() && !keyword.contains(marker))
}

/// Name given on the keyword line of a `Zone` object, if any
///
/// `Zone, Office,` yields `Office`; `Zone,` (name on the next line) yields `None`.
pub fn inline_zone_name(line: &str, marker: char) -> Option<&str> {
    let (_, rest) = line.split_once(FIELD_SEPARATOR)?;
    let end = rest
        .find(|c: char| c == marker || c == FIELD_SEPARATOR || c == OBJECT_TERMINATOR)
        .unwrap_or(rest.len());
    let name = rest[..end].trim();
    (!name.is_empty()).then_some(name)
}

/// Whether a trimmed line closes the object being accumulated
///
/// The terminator is looked for after inline comments are removed, so
/// `0.5;  !- Fraction` closes an object.
pub fn content_ends_object(trimmed: &str, marker: char) -> bool {
    strip_inline_comment(trimmed, marker)
        .trim_end()
        .ends_with(OBJECT_TERMINATOR)
}

/// Drop the `Keyword,` prefix from the first line of an object
pub fn strip_keyword_prefix(line: &str) -> &str {
    line.split_once(FIELD_SEPARATOR)
        .map(|(_, rest)| rest.trim_start())
        .unwrap_or("")
}
