#![forbid(unsafe_code)]

//! Text primitives for Glint.
//!
//! This crate provides the small vocabulary shared by the highlight engine
//! and the hosts that embed it:
//! - [`TextRange`] - half-open range of character offsets
//! - [`search::find_forward`] - bounded literal search from a position
//! - [`search::search_exact`] - all non-overlapping literal occurrences
//!
//! All positions are **character** offsets (Unicode scalar values), not
//! bytes, because editors address buffers by character.
//!
//! # Example
//! ```
//! use glint_text::{CaseSensitivity, TextRange, search::find_forward};
//!
//! let hit = find_forward("foo bar foo", "foo", 1, 11, CaseSensitivity::Sensitive);
//! assert_eq!(hit, Some(TextRange::new(8, 11)));
//! ```

pub mod range;
pub mod search;

pub use range::TextRange;
pub use search::{CaseSensitivity, SearchResult};

/// Number of characters in `text`.
#[inline]
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a character offset into a byte offset, clamping to the end of `text`.
#[must_use]
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Slice `text` by a character range, clamping both ends to the text.
#[must_use]
pub fn char_slice(text: &str, range: TextRange) -> &str {
    let start = char_to_byte(text, range.start);
    let end = char_to_byte(text, range.end).max(start);
    &text[start..end]
}
