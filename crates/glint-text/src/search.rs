#![forbid(unsafe_code)]

//! Literal text search over character offsets.
//!
//! Only exact substring matching is supported. [`find_forward`] also
//! accepts an ASCII case-folding mode for hosts that need it; folding ASCII
//! letters keeps byte lengths, so character boundaries are unchanged.
//!
//! # Example
//! ```
//! use glint_text::TextRange;
//! use glint_text::search::search_exact;
//!
//! let results = search_exact("foo bar foo baz foo", "foo");
//! assert_eq!(results.len(), 3);
//! assert_eq!(results[1].range, TextRange::new(8, 11));
//! ```

use crate::range::TextRange;

/// Case handling for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    /// Byte-exact comparison.
    #[default]
    Sensitive,
    /// ASCII letters compare equal regardless of case.
    AsciiInsensitive,
}

/// A single search match with its character range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Character offset range of the match.
    pub range: TextRange,
}

impl SearchResult {
    /// Create a new search result.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            range: TextRange::new(start, end),
        }
    }

    /// Extract the matched text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        crate::char_slice(source, self.range)
    }
}

/// Find the first occurrence of `needle` that starts at or after `from` and
/// ends at or before `bound`.
///
/// Returns `None` for an empty needle, an empty window, or no match.
#[must_use]
pub fn find_forward(
    haystack: &str,
    needle: &str,
    from: usize,
    bound: usize,
    case: CaseSensitivity,
) -> Option<TextRange> {
    if needle.is_empty() || from >= bound {
        return None;
    }
    let byte_from = crate::char_to_byte(haystack, from);
    let byte_bound = crate::char_to_byte(haystack, bound);
    if byte_from >= byte_bound {
        return None;
    }
    let window = &haystack[byte_from..byte_bound];
    let pos = match case {
        CaseSensitivity::Sensitive => window.find(needle)?,
        CaseSensitivity::AsciiInsensitive => window
            .to_ascii_lowercase()
            .find(&needle.to_ascii_lowercase())?,
    };
    let start = from + window[..pos].chars().count();
    Some(TextRange::with_len(start, crate::char_len(needle)))
}

/// Find all exact substring matches, left to right, non-overlapping.
#[must_use]
pub fn search_exact(haystack: &str, needle: &str) -> Vec<SearchResult> {
    if needle.is_empty() {
        return Vec::new();
    }
    let needle_chars = crate::char_len(needle);
    let mut results = Vec::new();
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    while let Some(pos) = haystack[byte_cursor..].find(needle) {
        let abs_pos = byte_cursor + pos;
        let start = char_cursor + haystack[byte_cursor..abs_pos].chars().count();
        results.push(SearchResult::new(start, start + needle_chars));
        byte_cursor = abs_pos + needle.len();
        char_cursor = start + needle_chars;
    }
    results
}
