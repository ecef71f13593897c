#![forbid(unsafe_code)]

//! Collaborator contracts the engine calls into.
//!
//! The engine never owns text, viewports, or rendering. It talks to the
//! embedding editor through four narrow traits, bundled by the [`Host`]
//! supertrait:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`SelectionSource`] | Where the live selection is |
//! | [`TextSource`] | Buffer contents and literal search |
//! | [`ViewportSource`] | Which viewports are visible, over what range |
//! | [`AnnotationSink`] | Create/delete rendered highlight markers |
//!
//! Handles are opaque `u64` newtypes chosen by the host.

use std::fmt;

use glint_text::{CaseSensitivity, TextRange};

use crate::style::StyleCategory;

/// Host handle for a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

/// Host handle for one visible viewport (window) over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportId(pub u64);

/// Host handle for a rendered annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

/// The live selection: a character range in one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Buffer the selection lives in.
    pub buffer: BufferId,
    /// Selected characters, `start <= end`.
    pub range: TextRange,
}

impl Selection {
    /// Create a selection over `range` in `buffer`.
    #[must_use]
    pub const fn new(buffer: BufferId, range: TextRange) -> Self {
        Self { buffer, range }
    }
}

/// Optional capability: an input mode that treats the character under a
/// block cursor as part of the selection.
pub trait BlockSelection {
    /// Whether the block-inclusive selection mode is currently active.
    fn is_block_selection_mode(&self) -> bool;
}

/// Source of the live selection.
pub trait SelectionSource {
    /// The current selection, if any.
    fn active_selection(&self) -> Option<Selection>;

    /// Whether a non-empty selection exists.
    fn has_active_selection(&self) -> bool {
        self.active_selection()
            .is_some_and(|sel| !sel.range.is_empty())
    }

    /// The block-selection capability, when the host has one.
    fn block_selection(&self) -> Option<&dyn BlockSelection> {
        None
    }
}

/// Read access to buffer text.
pub trait TextSource {
    /// Text of `range` in `buffer`, or `None` if the buffer is gone.
    ///
    /// Ranges reaching past the end of the buffer are clamped.
    fn substring(&self, buffer: BufferId, range: TextRange) -> Option<String>;

    /// End offset of the first occurrence of `term` starting at or after
    /// `from` and ending at or before `bound`.
    fn search_forward(
        &self,
        buffer: BufferId,
        term: &str,
        from: usize,
        bound: usize,
        case: CaseSensitivity,
    ) -> Option<usize>;
}

/// Enumeration of visible viewports.
pub trait ViewportSource {
    /// Every currently visible viewport, in host order.
    fn visible_viewports(&self) -> Vec<ViewportId>;

    /// Buffer shown by `viewport`, or `None` if the viewport is gone.
    fn buffer_of(&self, viewport: ViewportId) -> Option<BufferId>;

    /// Character range currently visible in `viewport`.
    fn visible_range(&self, viewport: ViewportId) -> Option<TextRange>;
}

/// Rendering primitives for highlight markers.
pub trait AnnotationSink {
    /// Create a marker over `range` in `buffer`.
    fn create_annotation(
        &mut self,
        buffer: BufferId,
        range: TextRange,
        style: StyleCategory,
    ) -> Result<AnnotationId, HostError>;

    /// Delete a marker. Returns `false` if it no longer existed, which
    /// callers treat as success.
    fn delete_annotation(&mut self, id: AnnotationId) -> bool;
}

/// Everything the engine needs from an editor.
pub trait Host: SelectionSource + TextSource + ViewportSource + AnnotationSink {}

impl<T> Host for T where T: SelectionSource + TextSource + ViewportSource + AnnotationSink {}

/// Failures a host may report while creating annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The buffer was closed or never existed.
    BufferGone(BufferId),
    /// The range does not fit the buffer.
    InvalidRange(TextRange),
    /// Any other host-side refusal.
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferGone(id) => write!(f, "buffer {} is gone", id.0),
            Self::InvalidRange(range) => write!(f, "range {range} is outside the buffer"),
            Self::Rejected(msg) => write!(f, "host rejected annotation: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}
