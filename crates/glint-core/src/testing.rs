#![forbid(unsafe_code)]

//! Minimal in-crate host for unit tests.

use std::collections::BTreeMap;

use glint_text::search::find_forward;
use glint_text::{CaseSensitivity, TextRange, char_len, char_slice};

use crate::host::{
    AnnotationId, AnnotationSink, BlockSelection, BufferId, HostError, Selection, SelectionSource,
    TextSource, ViewportId, ViewportSource,
};
use crate::style::StyleCategory;

impl BlockSelection for bool {
    fn is_block_selection_mode(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Live {
    pub buffer: BufferId,
    pub range: TextRange,
    pub style: StyleCategory,
}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    pub buffers: BTreeMap<BufferId, String>,
    pub viewports: Vec<(ViewportId, BufferId, TextRange)>,
    pub selection: Option<Selection>,
    pub block_mode: Option<bool>,
    pub live: BTreeMap<AnnotationId, Live>,
    pub creates: usize,
    pub deletes: usize,
    pub reject_creates: bool,
    next_id: u64,
}

impl TestHost {
    pub const BUFFER: BufferId = BufferId(1);
    pub const VIEW: ViewportId = ViewportId(10);

    /// One buffer shown in one viewport covering all of it.
    pub fn new(text: &str) -> Self {
        let mut host = Self::default();
        host.buffers.insert(Self::BUFFER, text.to_string());
        host.viewports
            .push((Self::VIEW, Self::BUFFER, TextRange::new(0, char_len(text))));
        host
    }

    pub fn select(&mut self, start: usize, end: usize) {
        self.selection = Some(Selection::new(Self::BUFFER, TextRange::new(start, end)));
    }

    pub fn scroll(&mut self, viewport: ViewportId, range: TextRange) {
        if let Some(entry) = self.viewports.iter_mut().find(|(id, _, _)| *id == viewport) {
            entry.2 = range;
        }
    }

    pub fn live_ranges(&self) -> Vec<(TextRange, StyleCategory)> {
        self.live.values().map(|a| (a.range, a.style)).collect()
    }

    pub fn reset_counters(&mut self) {
        self.creates = 0;
        self.deletes = 0;
    }
}

impl SelectionSource for TestHost {
    fn active_selection(&self) -> Option<Selection> {
        self.selection
    }

    fn block_selection(&self) -> Option<&dyn BlockSelection> {
        self.block_mode.as_ref().map(|b| b as &dyn BlockSelection)
    }
}

impl TextSource for TestHost {
    fn substring(&self, buffer: BufferId, range: TextRange) -> Option<String> {
        self.buffers
            .get(&buffer)
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
        let text = self.buffers.get(&buffer)?;
        find_forward(text, term, from, bound, case).map(|hit| hit.end)
    }
}

impl ViewportSource for TestHost {
    fn visible_viewports(&self) -> Vec<ViewportId> {
        self.viewports.iter().map(|(id, _, _)| *id).collect()
    }

    fn buffer_of(&self, viewport: ViewportId) -> Option<BufferId> {
        self.viewports
            .iter()
            .find(|(id, _, _)| *id == viewport)
            .map(|(_, buffer, _)| *buffer)
    }

    fn visible_range(&self, viewport: ViewportId) -> Option<TextRange> {
        self.viewports
            .iter()
            .find(|(id, _, _)| *id == viewport)
            .map(|(_, _, range)| *range)
    }
}

impl AnnotationSink for TestHost {
    fn create_annotation(
        &mut self,
        buffer: BufferId,
        range: TextRange,
        style: StyleCategory,
    ) -> Result<AnnotationId, HostError> {
        if self.reject_creates {
            return Err(HostError::Rejected("test".into()));
        }
        if !self.buffers.contains_key(&buffer) {
            return Err(HostError::BufferGone(buffer));
        }
        self.next_id += 1;
        let id = AnnotationId(self.next_id);
        self.live.insert(
            id,
            Live {
                buffer,
                range,
                style,
            },
        );
        self.creates += 1;
        Ok(id)
    }

    fn delete_annotation(&mut self, id: AnnotationId) -> bool {
        self.deletes += 1;
        self.live.remove(&id).is_some()
    }
}
