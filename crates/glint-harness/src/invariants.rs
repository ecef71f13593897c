#![forbid(unsafe_code)]

//! Cross-checks between engine state and what the host renders.
//!
//! # Checks
//!
//! 1. **No orphans**: the host's live annotations are exactly the union of
//!    every tracked viewport's annotation list.
//! 2. **Coverage**: each tracked viewport's annotations are exactly the
//!    non-overlapping occurrences of the term inside its scanned range,
//!    minus the one at the selection start. Computed independently with
//!    [`search_exact`] over the scanned slice.
//! 3. **Alternation**: touching annotations never share a style.
//!
//! Coverage assumes buffers were not edited since the last scan.

use std::collections::BTreeSet;
use std::fmt;

use glint_core::{AnnotationId, HighlightMode, ViewportId};
use glint_text::search::search_exact;
use glint_text::{TextRange, char_slice};

use crate::memory_host::MemoryHost;

/// A broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The host renders an annotation the engine does not track.
    Orphan(AnnotationId),
    /// The engine tracks an annotation the host no longer renders.
    Missing(AnnotationId),
    /// A viewport's annotations differ from the expected occurrences.
    Coverage {
        viewport: ViewportId,
        expected: Vec<TextRange>,
        actual: Vec<TextRange>,
    },
    /// Two touching annotations share a style.
    Alternation {
        viewport: ViewportId,
        left: TextRange,
        right: TextRange,
    },
    /// Inactive or idle mode still owns annotations.
    IdleWithAnnotations(usize),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orphan(id) => write!(f, "orphaned annotation {}", id.0),
            Self::Missing(id) => write!(f, "tracked annotation {} not rendered", id.0),
            Self::Coverage {
                viewport,
                expected,
                actual,
            } => write!(
                f,
                "viewport {} coverage mismatch: expected {expected:?}, got {actual:?}",
                viewport.0
            ),
            Self::Alternation {
                viewport,
                left,
                right,
            } => write!(
                f,
                "viewport {}: touching matches {left} and {right} share a style",
                viewport.0
            ),
            Self::IdleWithAnnotations(n) => write!(f, "idle mode still owns {n} annotations"),
        }
    }
}

impl std::error::Error for Violation {}

/// Run every check, returning the first violation.
pub fn check(mode: &HighlightMode, host: &MemoryHost) -> Result<(), Violation> {
    check_no_orphans(mode, host)?;
    check_coverage(mode, host)?;
    check_alternation(mode)
}

/// Host live set equals the engine's tracked set.
pub fn check_no_orphans(mode: &HighlightMode, host: &MemoryHost) -> Result<(), Violation> {
    let tracked: BTreeSet<AnnotationId> = mode
        .tracked_viewports()
        .into_iter()
        .flat_map(|v| mode.annotations_for(v).iter().map(|a| a.id))
        .collect();
    let live: BTreeSet<AnnotationId> = host.live_annotations().iter().map(|a| a.id).collect();

    if mode.active_term().is_none() && !tracked.is_empty() {
        return Err(Violation::IdleWithAnnotations(tracked.len()));
    }
    if let Some(id) = live.difference(&tracked).next() {
        return Err(Violation::Orphan(*id));
    }
    if let Some(id) = tracked.difference(&live).next() {
        return Err(Violation::Missing(*id));
    }
    Ok(())
}

/// Each tracked viewport holds exactly the expected occurrences.
pub fn check_coverage(mode: &HighlightMode, host: &MemoryHost) -> Result<(), Violation> {
    let Some(term) = mode.active_term() else {
        return Ok(());
    };
    let Some(session) = mode.session() else {
        return Ok(());
    };
    for viewport in mode.tracked_viewports() {
        let Some(state) = session.state(viewport) else {
            continue;
        };
        let Some(text) = host.text(state.buffer) else {
            continue;
        };
        let scanned = state.scanned;
        let excluded = term.excluded_start(state.buffer);
        let expected: Vec<TextRange> = search_exact(char_slice(text, scanned), term.text())
            .into_iter()
            .map(|r| TextRange::new(r.range.start + scanned.start, r.range.end + scanned.start))
            .filter(|r| r.end <= scanned.end && Some(r.start) != excluded)
            .collect();
        let actual: Vec<TextRange> = state.annotations.iter().map(|a| a.range).collect();
        if expected != actual {
            return Err(Violation::Coverage {
                viewport,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Touching annotations alternate style.
pub fn check_alternation(mode: &HighlightMode) -> Result<(), Violation> {
    for viewport in mode.tracked_viewports() {
        for pair in mode.annotations_for(viewport).windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if left.range.end == right.range.start && left.style == right.style {
                return Err(Violation::Alternation {
                    viewport,
                    left: left.range,
                    right: right.range,
                });
            }
        }
    }
    Ok(())
}
