#![forbid(unsafe_code)]

//! Match scanning and annotation.
//!
//! A scan walks a character range left to right, finding non-overlapping,
//! case-sensitive occurrences of the search term and creating one
//! annotation per occurrence.
//!
//! # Rules
//!
//! 1. **Forced case sensitivity**: the host's ambient case folding is never
//!    consulted.
//! 2. **Selection exclusion**: the occurrence starting exactly at the live
//!    selection's start is skipped (the host already shows the selection).
//!    Scanning resumes at that occurrence's end. At most one occurrence is
//!    skipped per scan.
//! 3. **Zebra styling**: an occurrence that starts exactly where the
//!    previously created annotation ends takes the opposite style; any gap
//!    resets to [`StyleCategory::Primary`].
//!
//! ```text
//! term "a", text "aaa b a"
//!   [a][a][a] b [a]
//!    P  A  P    P
//! ```

use glint_text::{CaseSensitivity, TextRange};

use crate::extract::SearchTerm;
use crate::host::{AnnotationId, AnnotationSink, BufferId, TextSource};
use crate::style::StyleCategory;

/// An annotation created by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// Host handle.
    pub id: AnnotationId,
    /// Highlighted characters.
    pub range: TextRange,
    /// Visual category.
    pub style: StyleCategory,
}

/// A styled occurrence before any host annotation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMatch {
    /// Occurrence range.
    pub range: TextRange,
    /// Style it would receive.
    pub style: StyleCategory,
}

/// Tracks the last created annotation to decide adjacency styling.
#[derive(Debug, Default)]
struct Zebra {
    last: Option<(usize, StyleCategory)>,
}

impl Zebra {
    fn style_for(&self, start: usize) -> StyleCategory {
        match self.last {
            Some((end, style)) if end == start => style.toggled(),
            _ => StyleCategory::Primary,
        }
    }

    fn record(&mut self, end: usize, style: StyleCategory) {
        self.last = Some((end, style));
    }
}

/// Occurrences of `term` fully inside `range`, minus the one at the
/// selection start.
#[must_use]
pub fn find_matches<T>(
    text: &T,
    buffer: BufferId,
    term: &SearchTerm,
    range: TextRange,
) -> Vec<TextRange>
where
    T: TextSource + ?Sized,
{
    let len = term.char_len();
    if range.is_empty() || len == 0 {
        return Vec::new();
    }
    let excluded = term.excluded_start(buffer);
    let mut skipped = false;
    let mut matches = Vec::new();
    let mut cursor = range.start;

    while cursor < range.end {
        let Some(end) = text.search_forward(
            buffer,
            term.text(),
            cursor,
            range.end,
            CaseSensitivity::Sensitive,
        ) else {
            break;
        };
        if end <= cursor {
            break;
        }
        cursor = end;
        let start = end.saturating_sub(len);
        if !skipped && excluded == Some(start) {
            skipped = true;
            continue;
        }
        matches.push(TextRange::new(start, end));
    }
    matches
}

/// Styled occurrences as [`scan`] would create them if the host accepted
/// every annotation.
#[must_use]
pub fn plan_matches<T>(
    text: &T,
    buffer: BufferId,
    term: &SearchTerm,
    range: TextRange,
) -> Vec<PlannedMatch>
where
    T: TextSource + ?Sized,
{
    let mut zebra = Zebra::default();
    find_matches(text, buffer, term, range)
        .into_iter()
        .map(|range| {
            let style = zebra.style_for(range.start);
            zebra.record(range.end, style);
            PlannedMatch { range, style }
        })
        .collect()
}

/// Scan `range` of `buffer` and create an annotation for every occurrence.
///
/// Annotations the host refuses are skipped; adjacency is judged against
/// the previously *created* annotation.
pub fn scan<H>(host: &mut H, buffer: BufferId, term: &SearchTerm, range: TextRange) -> Vec<Annotation>
where
    H: TextSource + AnnotationSink + ?Sized,
{
    let matches = find_matches(&*host, buffer, term, range);
    let mut zebra = Zebra::default();
    let mut created = Vec::with_capacity(matches.len());

    for range in matches {
        let style = zebra.style_for(range.start);
        match host.create_annotation(buffer, range, style) {
            Ok(id) => {
                zebra.record(range.end, style);
                created.push(Annotation { id, range, style });
            }
            Err(err) => {
                tracing::warn!(buffer = buffer.0, %range, error = %err, "highlight not created");
            }
        }
    }

    tracing::trace!(
        buffer = buffer.0,
        %range,
        term = term.text(),
        annotations = created.len(),
        "scan complete"
    );
    created
}
