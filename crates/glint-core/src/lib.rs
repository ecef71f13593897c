#![forbid(unsafe_code)]

//! Incremental selection-occurrence highlighting for editors.
//!
//! When the user selects text, every other occurrence of that text in every
//! visible viewport is highlighted. This crate is the synchronization engine
//! behind that feature; the editor plugs in through the traits in [`host`].
//!
//! - [`extract`] - turns the live selection into a [`SearchTerm`]
//! - [`scan`] - finds occurrences in a range and creates styled annotations
//! - [`cache`] - per-viewport scan state and reconciliation
//! - [`mode`] - the event entry points ([`HighlightMode`])
//! - [`config`] / [`style`] - the two user options
//!
//! # Example
//! ```ignore
//! use glint_core::{GlintConfig, HighlightMode};
//!
//! let mut mode = HighlightMode::new(GlintConfig::default())?;
//! mode.on_activate(&mut editor);
//! mode.on_selection_or_cursor_changed(&mut editor);
//! ```

pub mod cache;
pub mod config;
pub mod extract;
pub mod host;
pub mod mode;
pub mod scan;
pub mod style;

#[cfg(test)]
mod testing;

pub use cache::{HighlightSession, HighlightStats, ViewportState};
pub use config::{ConfigError, GlintConfig};
pub use extract::{SearchTerm, TermOrigin, active_search_term};
pub use host::{
    AnnotationId, AnnotationSink, BlockSelection, BufferId, Host, HostError, Selection,
    SelectionSource, TextSource, ViewportId, ViewportSource,
};
pub use mode::HighlightMode;
pub use scan::{Annotation, PlannedMatch};
pub use style::{HighlightStyle, HighlightStyles, Rgb, StyleCategory, StyleFlags};

pub use glint_text::{CaseSensitivity, TextRange};
