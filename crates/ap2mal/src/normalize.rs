//! Title normalization for search queries.
//!
//! Exported list titles often carry decorations that hurt search recall,
//! like "(TV)" or "(2011)" suffixes and punctuation the API tokenizer
//! chokes on. Queries are built from a cleaned form of the title; the
//! original title is kept for reporting and the skip log.

use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthesized segments, including any leading whitespace
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());

/// Anything that is not alphanumeric, whitespace, or a colon
static NON_SEARCHABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s:]").unwrap());

/// Clean a title for use as a search query
///
/// Strips parenthesized segments, removes characters outside the
/// alphanumeric/whitespace/colon set, and trims surrounding whitespace.
pub fn normalize_title(title: &str) -> String {
    let stripped = PARENTHETICAL.replace_all(title, "");
    let cleaned = NON_SEARCHABLE.replace_all(&stripped, "");
    cleaned.trim().to_string()
}
