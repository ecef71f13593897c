#![forbid(unsafe_code)]

//! Selection extraction: turns the live selection into a search term.

use std::fmt;

use glint_text::char_len;

use crate::host::{BufferId, SelectionSource, TextSource};

/// Where a search term was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermOrigin {
    /// Buffer holding the selection.
    pub buffer: BufferId,
    /// First character of the selection.
    pub start: usize,
}

/// The active search term: selected text plus the selection it came from.
///
/// Equality covers the origin as well as the text, so re-selecting the same
/// word elsewhere counts as a new term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm {
    text: String,
    len: usize,
    origin: TermOrigin,
}

impl SearchTerm {
    /// Create a term from selected text and its origin.
    #[must_use]
    pub fn new(text: impl Into<String>, origin: TermOrigin) -> Self {
        let text = text.into();
        let len = char_len(&text);
        Self { text, len, origin }
    }

    /// The literal text to match.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.len
    }

    /// Selection the term was taken from.
    #[must_use]
    pub const fn origin(&self) -> TermOrigin {
        self.origin
    }

    /// Start of the live selection when scanning `buffer`, if it lives there.
    #[must_use]
    pub fn excluded_start(&self, buffer: BufferId) -> Option<usize> {
        (self.origin.buffer == buffer).then_some(self.origin.start)
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.text, self.origin.start)
    }
}

/// Read the active selection and return it as a search term when it is at
/// least `min_length` characters long.
///
/// In a block-inclusive selection mode the character under the cursor is
/// counted as selected, so the end is extended by one.
#[must_use]
pub fn active_search_term<H>(host: &H, min_length: usize) -> Option<SearchTerm>
where
    H: SelectionSource + TextSource + ?Sized,
{
    if !host.has_active_selection() {
        return None;
    }
    let selection = host.active_selection()?;

    let mut range = selection.range;
    if host
        .block_selection()
        .is_some_and(|block| block.is_block_selection_mode())
    {
        range = range.extend_end(1);
    }

    if range.len() < min_length {
        tracing::trace!(len = range.len(), min_length, "selection below minimum length");
        return None;
    }

    let text = host.substring(selection.buffer, range)?;
    // The block extension may clamp at the end of the buffer.
    if char_len(&text) < min_length {
        return None;
    }

    Some(SearchTerm::new(
        text,
        TermOrigin {
            buffer: selection.buffer,
            start: range.start,
        },
    ))
}
