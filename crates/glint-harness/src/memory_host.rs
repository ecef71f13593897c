#![forbid(unsafe_code)]

//! In-memory editor host.
//!
//! [`MemoryHost`] implements every collaborator trait the engine needs over
//! plain `String` buffers, and records each annotation create/delete as a
//! [`HostOp`] so tests can assert exactly how much churn an event caused.

use std::cell::RefCell;
use std::collections::BTreeMap;

use glint_core::{
    AnnotationId, AnnotationSink, BlockSelection, BufferId, HostError, Selection, SelectionSource,
    StyleCategory, TextSource, ViewportId, ViewportSource,
};
use glint_text::search::find_forward;
use glint_text::{CaseSensitivity, TextRange, char_len, char_slice};

/// An annotation currently rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveAnnotation {
    /// Host handle.
    pub id: AnnotationId,
    /// Buffer it decorates.
    pub buffer: BufferId,
    /// Decorated characters.
    pub range: TextRange,
    /// Visual category.
    pub style: StyleCategory,
}

/// One annotation operation observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    /// An annotation was created.
    Create(LiveAnnotation),
    /// A deletion was requested; `existed` is false for already-gone ids.
    Delete { id: AnnotationId, existed: bool },
}

/// Create/delete counts over a span of operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Churn {
    /// Annotations created.
    pub created: usize,
    /// Deletions requested.
    pub deleted: usize,
}

impl Churn {
    /// Whether nothing was created or deleted.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.created == 0 && self.deleted == 0
    }

    /// Tally a sequence of operations.
    #[must_use]
    pub fn of(ops: &[HostOp]) -> Self {
        ops.iter().fold(Self::default(), |mut churn, op| {
            match op {
                HostOp::Create(_) => churn.created += 1,
                HostOp::Delete { .. } => churn.deleted += 1,
            }
            churn
        })
    }
}

/// Block-selection capability state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMode {
    /// Whether the block-inclusive mode is on.
    pub enabled: bool,
}

impl BlockSelection for BlockMode {
    fn is_block_selection_mode(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, Copy)]
struct ViewportEntry {
    id: ViewportId,
    buffer: BufferId,
    visible: TextRange,
}

/// An editor made of strings.
#[derive(Debug, Default)]
pub struct MemoryHost {
    buffers: BTreeMap<BufferId, String>,
    viewports: Vec<ViewportEntry>,
    selection: Option<Selection>,
    block_mode: Option<BlockMode>,
    annotations: BTreeMap<AnnotationId, LiveAnnotation>,
    ops: Vec<HostOp>,
    searches: RefCell<Vec<CaseSensitivity>>,
    reject_creates: bool,
    next_id: u64,
}

impl MemoryHost {
    /// An editor with no buffers or viewports.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // --- buffers ---

    /// Add a buffer holding `text`.
    pub fn add_buffer(&mut self, text: impl Into<String>) -> BufferId {
        let id = BufferId(self.next_id());
        self.buffers.insert(id, text.into());
        id
    }

    /// Replace a buffer's contents. Existing annotations are left in place,
    /// as a real editor's markers would be.
    pub fn set_text(&mut self, buffer: BufferId, text: impl Into<String>) {
        if let Some(slot) = self.buffers.get_mut(&buffer) {
            *slot = text.into();
        }
    }

    /// Text of `buffer`.
    #[must_use]
    pub fn text(&self, buffer: BufferId) -> Option<&str> {
        self.buffers.get(&buffer).map(String::as_str)
    }

    /// Length of `buffer` in characters (0 if unknown).
    #[must_use]
    pub fn buffer_len(&self, buffer: BufferId) -> usize {
        self.text(buffer).map_or(0, char_len)
    }

    /// Close a buffer. Its annotations vanish without the engine being
    /// told, and viewports showing it close too.
    pub fn kill_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
        let before = self.annotations.len();
        self.annotations.retain(|_, a| a.buffer != buffer);
        tracing::debug!(
            buffer = buffer.0,
            orphaned = before - self.annotations.len(),
            "buffer killed"
        );
        self.viewports.retain(|v| v.buffer != buffer);
        if self.selection.is_some_and(|s| s.buffer == buffer) {
            self.selection = None;
        }
    }

    // --- viewports ---

    /// Open a viewport over `visible` of `buffer`.
    pub fn open_viewport(&mut self, buffer: BufferId, visible: TextRange) -> ViewportId {
        let id = ViewportId(self.next_id());
        self.viewports.push(ViewportEntry {
            id,
            buffer,
            visible,
        });
        id
    }

    /// Open a viewport showing all of `buffer`.
    pub fn open_full_viewport(&mut self, buffer: BufferId) -> ViewportId {
        let len = self.buffer_len(buffer);
        self.open_viewport(buffer, TextRange::new(0, len))
    }

    /// Scroll or resize a viewport.
    pub fn scroll(&mut self, viewport: ViewportId, visible: TextRange) {
        if let Some(entry) = self.viewports.iter_mut().find(|v| v.id == viewport) {
            entry.visible = visible;
        }
    }

    /// Switch a viewport to another buffer.
    pub fn show_buffer(&mut self, viewport: ViewportId, buffer: BufferId, visible: TextRange) {
        if let Some(entry) = self.viewports.iter_mut().find(|v| v.id == viewport) {
            entry.buffer = buffer;
            entry.visible = visible;
        }
    }

    /// Close a viewport.
    pub fn close_viewport(&mut self, viewport: ViewportId) {
        self.viewports.retain(|v| v.id != viewport);
    }

    // --- selection ---

    /// Select `[start, end)` in `buffer`.
    pub fn select(&mut self, buffer: BufferId, start: usize, end: usize) {
        self.selection = Some(Selection::new(buffer, TextRange::new(start, end)));
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Expose (`Some`) or hide (`None`) the block-selection capability.
    pub fn set_block_mode(&mut self, mode: Option<bool>) {
        self.block_mode = mode.map(|enabled| BlockMode { enabled });
    }

    /// Make every subsequent annotation creation fail.
    pub fn set_reject_creates(&mut self, reject: bool) {
        self.reject_creates = reject;
    }

    // --- observation ---

    /// Every live annotation, ordered by buffer then position.
    #[must_use]
    pub fn live_annotations(&self) -> Vec<LiveAnnotation> {
        let mut live: Vec<_> = self.annotations.values().copied().collect();
        live.sort_by_key(|a| (a.buffer, a.range));
        live
    }

    /// Live annotations in `buffer` as `(range, style)`, ordered by position.
    #[must_use]
    pub fn highlights_in(&self, buffer: BufferId) -> Vec<(TextRange, StyleCategory)> {
        self.live_annotations()
            .into_iter()
            .filter(|a| a.buffer == buffer)
            .map(|a| (a.range, a.style))
            .collect()
    }

    /// Number of live annotations.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.annotations.len()
    }

    /// Whether `id` is still rendered.
    #[must_use]
    pub fn is_live(&self, id: AnnotationId) -> bool {
        self.annotations.contains_key(&id)
    }

    /// Operations recorded since the last [`take_ops`](Self::take_ops).
    #[must_use]
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Drain the operation log.
    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    /// Churn since the last [`take_ops`](Self::take_ops).
    #[must_use]
    pub fn churn(&self) -> Churn {
        Churn::of(&self.ops)
    }

    /// Case sensitivity requested by every search so far.
    #[must_use]
    pub fn searches(&self) -> Vec<CaseSensitivity> {
        self.searches.borrow().clone()
    }

    fn viewport(&self, id: ViewportId) -> Option<&ViewportEntry> {
        self.viewports.iter().find(|v| v.id == id)
    }
}

impl SelectionSource for MemoryHost {
    fn active_selection(&self) -> Option<Selection> {
        self.selection
    }

    fn block_selection(&self) -> Option<&dyn BlockSelection> {
        self.block_mode.as_ref().map(|m| m as &dyn BlockSelection)
    }
}

impl TextSource for MemoryHost {
    fn substring(&self, buffer: BufferId, range: TextRange) -> Option<String> {
        self.text(buffer)
            .map(|text| char_slice(text, range).to_string())
    }

    fn search_forward(
        &self,
        buffer: BufferId,
        term: &str,
        from: usize,
        bound: usize,
        case: CaseSensitivity,
    ) -> Option<usize> {
        self.searches.borrow_mut().push(case);
        let text = self.text(buffer)?;
        find_forward(text, term, from, bound, case).map(|hit| hit.end)
    }
}

impl ViewportSource for MemoryHost {
    fn visible_viewports(&self) -> Vec<ViewportId> {
        self.viewports.iter().map(|v| v.id).collect()
    }

    fn buffer_of(&self, viewport: ViewportId) -> Option<BufferId> {
        self.viewport(viewport).map(|v| v.buffer)
    }

    fn visible_range(&self, viewport: ViewportId) -> Option<TextRange> {
        self.viewport(viewport).map(|v| v.visible)
    }
}

impl AnnotationSink for MemoryHost {
    fn create_annotation(
        &mut self,
        buffer: BufferId,
        range: TextRange,
        style: StyleCategory,
    ) -> Result<AnnotationId, HostError> {
        if self.reject_creates {
            return Err(HostError::Rejected("creation disabled".into()));
        }
        let len = self.text(buffer).map(char_len).ok_or(HostError::BufferGone(buffer))?;
        if range.end > len {
            return Err(HostError::InvalidRange(range));
        }
        let annotation = LiveAnnotation {
            id: AnnotationId(self.next_id()),
            buffer,
            range,
            style,
        };
        self.annotations.insert(annotation.id, annotation);
        self.ops.push(HostOp::Create(annotation));
        Ok(annotation.id)
    }

    fn delete_annotation(&mut self, id: AnnotationId) -> bool {
        let existed = self.annotations.remove(&id).is_some();
        self.ops.push(HostOp::Delete { id, existed });
        existed
    }
}
