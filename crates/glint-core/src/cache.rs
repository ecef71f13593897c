#![forbid(unsafe_code)]

//! Per-viewport highlight state and its reconciliation.
//!
//! A [`HighlightSession`] owns every annotation the engine has created. It
//! remembers, per viewport, which character range was scanned for the
//! current term and which annotations live there.
//!
//! # State machine
//!
//! ```text
//!            term            term' != term
//!   Idle ──────────▶ Active(term) ──────────▶ Active(term')
//!    ▲                  │    ▲                  (full reset + rescan all)
//!    └──── None / clear ┘    └─ same term: per-viewport refresh check
//! ```
//!
//! # Invariants
//!
//! 1. The annotations alive in the host are exactly the union of every
//!    tracked [`ViewportState::annotations`].
//! 2. A viewport is rescanned only when it is untracked, shows a different
//!    buffer, or its visible range reaches outside the scanned range.
//! 3. A rescan always covers the whole new visible range and replaces the
//!    previous state wholesale.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Viewport unknown to the host | State dropped, annotations deleted |
//! | Annotation already gone in host | Deletion treated as success |
//! | Host refuses an annotation | Skipped; scan continues |

use rustc_hash::FxHashMap;

use glint_text::TextRange;

use crate::extract::SearchTerm;
use crate::host::{AnnotationSink, BufferId, Host, ViewportId};
use crate::scan::{Annotation, scan};

/// What was scanned in one viewport for the current term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    /// Buffer the viewport showed when scanned.
    pub buffer: BufferId,
    /// Character range covered by the last scan.
    pub scanned: TextRange,
    /// Annotations created by that scan, in text order.
    pub annotations: Vec<Annotation>,
}

/// Diagnostic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Term changes that invalidated every viewport.
    pub full_resets: u64,
    /// Individual viewport scans.
    pub viewport_scans: u64,
    /// Annotations created.
    pub annotations_created: u64,
    /// Annotations deleted (including ones the host had already dropped).
    pub annotations_deleted: u64,
}

impl HighlightStats {
    /// Add another set of counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.full_resets += other.full_resets;
        self.viewport_scans += other.viewport_scans;
        self.annotations_created += other.annotations_created;
        self.annotations_deleted += other.annotations_deleted;
    }
}

/// Highlight state for one activation of the mode.
///
/// Call [`clear`](Self::clear) before dropping; the session cannot reach the
/// host on its own and only logs a warning if dropped with live annotations.
#[derive(Debug, Default)]
pub struct HighlightSession {
    term: Option<SearchTerm>,
    states: FxHashMap<ViewportId, ViewportState>,
    stats: HighlightStats,
}

impl HighlightSession {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The term currently highlighted.
    #[must_use]
    pub fn term(&self) -> Option<&SearchTerm> {
        self.term.as_ref()
    }

    /// Whether no term is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.term.is_none()
    }

    /// Scan state for `viewport`.
    #[must_use]
    pub fn state(&self, viewport: ViewportId) -> Option<&ViewportState> {
        self.states.get(&viewport)
    }

    /// Tracked viewports, sorted.
    #[must_use]
    pub fn tracked_viewports(&self) -> Vec<ViewportId> {
        let mut ids: Vec<_> = self.states.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of annotations this session owns.
    #[must_use]
    pub fn live_annotation_count(&self) -> usize {
        self.states.values().map(|s| s.annotations.len()).sum()
    }

    /// Diagnostic counters.
    #[must_use]
    pub const fn stats(&self) -> HighlightStats {
        self.stats
    }

    /// Whether `viewport`, now showing `visible` of `buffer`, must be rescanned.
    #[must_use]
    pub fn refresh_needed(&self, viewport: ViewportId, buffer: BufferId, visible: TextRange) -> bool {
        match self.states.get(&viewport) {
            None => true,
            Some(state) => state.buffer != buffer || visible.exceeds(&state.scanned),
        }
    }

    /// Bring every visible viewport in line with `term`.
    ///
    /// - `None` clears everything.
    /// - A term different from the current one clears everything and scans
    ///   every visible viewport.
    /// - The same term only rescans viewports whose visible range grew, and
    ///   drops viewports that are no longer visible.
    pub fn reconcile<H>(&mut self, host: &mut H, term: Option<SearchTerm>)
    where
        H: Host + ?Sized,
    {
        let _span = tracing::debug_span!("glint.reconcile").entered();

        let Some(term) = term else {
            if self.term.is_some() {
                tracing::debug!("search term cleared");
                self.clear(host);
            }
            return;
        };

        if self.term.as_ref() == Some(&term) {
            self.refresh_visible(host);
            return;
        }

        tracing::debug!(%term, "search term changed, rescanning all viewports");
        self.drop_all_states(host);
        self.stats.full_resets += 1;
        self.term = Some(term);
        for viewport in host.visible_viewports() {
            self.refresh_viewport(host, viewport);
        }
    }

    /// Handle a scroll or resize of one viewport.
    pub fn on_viewport_visibility_changed<H>(
        &mut self,
        host: &mut H,
        viewport: ViewportId,
        visible: TextRange,
    ) where
        H: Host + ?Sized,
    {
        if self.term.is_none() {
            return;
        }
        let Some(buffer) = host.buffer_of(viewport) else {
            self.forget_viewport(host, viewport);
            return;
        };
        if self.refresh_needed(viewport, buffer, visible) {
            self.rescan_viewport(host, viewport, buffer, visible);
        } else {
            tracing::trace!(viewport = viewport.0, %visible, "visible range already scanned");
        }
    }

    /// Stop tracking `viewport`, deleting its annotations.
    ///
    /// Returns `false` if the viewport was not tracked.
    pub fn forget_viewport<H>(&mut self, host: &mut H, viewport: ViewportId) -> bool
    where
        H: AnnotationSink + ?Sized,
    {
        let Some(state) = self.states.remove(&viewport) else {
            return false;
        };
        tracing::debug!(
            viewport = viewport.0,
            annotations = state.annotations.len(),
            "viewport dropped"
        );
        self.stats.annotations_deleted += delete_annotations(host, &state.annotations);
        true
    }

    /// Delete every annotation and return to idle. Idempotent.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: AnnotationSink + ?Sized,
    {
        self.drop_all_states(host);
        self.term = None;
    }

    fn drop_all_states<H>(&mut self, host: &mut H)
    where
        H: AnnotationSink + ?Sized,
    {
        for (_, state) in self.states.drain() {
            self.stats.annotations_deleted += delete_annotations(host, &state.annotations);
        }
    }

    fn refresh_visible<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        let visible = host.visible_viewports();
        let hidden: Vec<ViewportId> = self
            .states
            .keys()
            .filter(|id| !visible.contains(id))
            .copied()
            .collect();
        for viewport in hidden {
            self.forget_viewport(host, viewport);
        }
        for viewport in visible {
            self.refresh_viewport(host, viewport);
        }
    }

    fn refresh_viewport<H>(&mut self, host: &mut H, viewport: ViewportId)
    where
        H: Host + ?Sized,
    {
        let (Some(buffer), Some(visible)) = (host.buffer_of(viewport), host.visible_range(viewport))
        else {
            self.forget_viewport(host, viewport);
            return;
        };
        if self.refresh_needed(viewport, buffer, visible) {
            self.rescan_viewport(host, viewport, buffer, visible);
        }
    }

    fn rescan_viewport<H>(
        &mut self,
        host: &mut H,
        viewport: ViewportId,
        buffer: BufferId,
        visible: TextRange,
    ) where
        H: Host + ?Sized,
    {
        if let Some(old) = self.states.remove(&viewport) {
            self.stats.annotations_deleted += delete_annotations(host, &old.annotations);
        }
        let Some(term) = self.term.as_ref() else {
            return;
        };
        let annotations = scan(host, buffer, term, visible);
        tracing::debug!(
            viewport = viewport.0,
            %visible,
            annotations = annotations.len(),
            "viewport rescanned"
        );
        self.stats.viewport_scans += 1;
        self.stats.annotations_created += annotations.len() as u64;
        self.states.insert(
            viewport,
            ViewportState {
                buffer,
                scanned: visible,
                annotations,
            },
        );
    }
}

impl Drop for HighlightSession {
    fn drop(&mut self) {
        let live = self.live_annotation_count();
        if live > 0 {
            tracing::warn!(live, "highlight session dropped with live annotations");
        }
    }
}

/// Delete `annotations` from the host, returning how many were processed.
fn delete_annotations<H>(host: &mut H, annotations: &[Annotation]) -> u64
where
    H: AnnotationSink + ?Sized,
{
    for annotation in annotations {
        if !host.delete_annotation(annotation.id) {
            tracing::trace!(id = annotation.id.0, "annotation already gone");
        }
    }
    annotations.len() as u64
}
