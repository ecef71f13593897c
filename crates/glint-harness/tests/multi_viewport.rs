//! Highlighting across several viewports and buffers.

use glint_core::{GlintConfig, HighlightMode, StyleCategory, TextRange};
use glint_harness::{MemoryHost, assert_invariants, init_test_logging};
use pretty_assertions::assert_eq;

fn r(start: usize, end: usize) -> TextRange {
    TextRange::new(start, end)
}

fn mode() -> HighlightMode {
    init_test_logging();
    HighlightMode::new(GlintConfig::default()).unwrap()
}

#[test]
fn every_visible_viewport_is_highlighted() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("let x = 1; let y = x;");
    let b = host.add_buffer("x let");
    let va = host.open_full_viewport(a);
    let vb = host.open_full_viewport(b);
    host.select(a, 0, 3);

    let mut mode = mode();
    mode.on_activate(&mut host);

    assert_eq!(
        host.highlights_in(a),
        vec![(r(11, 14), StyleCategory::Primary)]
    );
    // Exclusion only applies in the selection's own buffer.
    assert_eq!(host.highlights_in(b), vec![(r(2, 5), StyleCategory::Primary)]);
    assert_eq!(mode.tracked_viewports(), vec![va, vb]);
    assert_invariants!(&mode, &host);
    mode.on_deactivate(&mut host);
}

#[test]
fn match_at_selection_offset_in_other_buffer_is_kept() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab");
    let b = host.add_buffer("ab");
    host.open_full_viewport(a);
    host.open_full_viewport(b);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    assert!(host.highlights_in(a).is_empty());
    assert_eq!(host.highlights_in(b), vec![(r(0, 2), StyleCategory::Primary)]);
    mode.on_deactivate(&mut host);
}

#[test]
fn split_views_of_one_buffer_track_separately() {
    let mut host = MemoryHost::new();
    let buf = host.add_buffer("ab cd ab cd ab cd ab cd");
    let top = host.open_viewport(buf, r(0, 12));
    let bottom = host.open_viewport(buf, r(12, 23));
    host.select(buf, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);

    let top_ranges: Vec<_> = mode.annotations_for(top).iter().map(|a| a.range).collect();
    let bottom_ranges: Vec<_> = mode
        .annotations_for(bottom)
        .iter()
        .map(|a| a.range)
        .collect();
    assert_eq!(top_ranges, vec![r(6, 8)]);
    assert_eq!(bottom_ranges, vec![r(12, 14), r(18, 20)]);
    assert_invariants!(&mode, &host);
    mode.on_deactivate(&mut host);
}

#[test]
fn scrolling_one_viewport_leaves_others_untouched() {
    let mut host = MemoryHost::new();
    let buf = host.add_buffer("ab cd ab cd ab cd ab cd");
    let top = host.open_viewport(buf, r(0, 12));
    let bottom = host.open_viewport(buf, r(12, 23));
    host.select(buf, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    let bottom_ids: Vec<_> = mode.annotations_for(bottom).iter().map(|a| a.id).collect();
    host.take_ops();

    host.scroll(top, r(0, 18));
    mode.on_viewport_changed(&mut host, top);

    assert!(bottom_ids.iter().all(|id| host.is_live(*id)));
    let churn = host.churn();
    assert_eq!(churn.deleted, 1);
    assert_eq!(churn.created, 2);
    assert_invariants!(&mode, &host);
    mode.on_deactivate(&mut host);
}

#[test]
fn closing_viewport_removes_its_highlights() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab");
    let b = host.add_buffer("ab ab");
    host.open_full_viewport(a);
    let vb = host.open_full_viewport(b);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    assert_eq!(host.live_count(), 3);

    host.close_viewport(vb);
    mode.on_viewport_closed(&mut host, vb);
    assert!(host.highlights_in(b).is_empty());
    assert_eq!(host.live_count(), 1);
    assert_invariants!(&mode, &host);
    mode.on_deactivate(&mut host);
}

#[test]
fn hidden_viewport_dropped_on_next_cursor_event() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab");
    let b = host.add_buffer("ab ab");
    host.open_full_viewport(a);
    let vb = host.open_full_viewport(b);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    host.close_viewport(vb);
    mode.on_selection_or_cursor_changed(&mut host);

    assert!(!mode.tracked_viewports().contains(&vb));
    assert!(host.highlights_in(b).is_empty());
    assert_invariants!(&mode, &host);
    mode.on_deactivate(&mut host);
}

#[test]
fn newly_opened_viewport_scanned_on_next_cursor_event() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab");
    let b = host.add_buffer("xx ab");
    host.open_full_viewport(a);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    assert!(host.highlights_in(b).is_empty());

    let vb = host.open_full_viewport(b);
    mode.on_selection_or_cursor_changed(&mut host);
    assert_eq!(host.highlights_in(b), vec![(r(3, 5), StyleCategory::Primary)]);
    assert!(mode.tracked_viewports().contains(&vb));
    assert_eq!(mode.stats().full_resets, 1);
    mode.on_deactivate(&mut host);
}

#[test]
fn switching_viewport_buffer_rescans() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab ab");
    let b = host.add_buffer("ab--ab");
    let view = host.open_full_viewport(a);
    let other = host.open_full_viewport(a);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);

    // Same visible range, different buffer.
    host.show_buffer(other, b, r(0, 6));
    mode.on_viewport_changed(&mut host, other);

    let ranges: Vec<_> = mode.annotations_for(other).iter().map(|a| a.range).collect();
    assert_eq!(ranges, vec![r(0, 2), r(4, 6)]);
    assert_eq!(mode.annotations_for(view).len(), 2);
    assert_eq!(mode.session().unwrap().state(other).unwrap().buffer, b);
    assert_invariants!(&mode, &host);
    mode.on_deactivate(&mut host);
}

#[test]
fn killed_buffer_does_not_break_deactivation() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab");
    let b = host.add_buffer("ab ab ab");
    host.open_full_viewport(a);
    host.open_full_viewport(b);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    assert_eq!(host.live_count(), 4);

    host.kill_buffer(b);
    mode.on_deactivate(&mut host);
    assert_eq!(host.live_count(), 0);
    assert_eq!(mode.stats().annotations_deleted, 4);
    assert_invariants!(&mode, &host);
}

#[test]
fn killed_selection_buffer_returns_to_idle() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab");
    let b = host.add_buffer("ab ab");
    host.open_full_viewport(a);
    host.open_full_viewport(b);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    host.kill_buffer(a);
    mode.on_selection_or_cursor_changed(&mut host);

    assert!(mode.active_term().is_none());
    assert_eq!(host.live_count(), 0);
    assert_invariants!(&mode, &host);
}

#[test]
fn unknown_viewport_event_is_ignored() {
    let mut host = MemoryHost::new();
    let a = host.add_buffer("ab ab");
    host.open_full_viewport(a);
    host.select(a, 0, 2);

    let mut mode = mode();
    mode.on_activate(&mut host);
    host.take_ops();

    mode.on_viewport_changed(&mut host, glint_core::ViewportId(9_999));
    mode.on_viewport_closed(&mut host, glint_core::ViewportId(9_999));
    assert!(host.churn().is_quiet());
    mode.on_deactivate(&mut host);
}
