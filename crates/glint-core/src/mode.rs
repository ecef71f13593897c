#![forbid(unsafe_code)]

//! The highlight mode: the only entry points a host wires events to.
//!
//! | Host event | Method |
//! |------------|--------|
//! | Mode enabled | [`HighlightMode::on_activate`] |
//! | Mode disabled | [`HighlightMode::on_deactivate`] |
//! | After every command / cursor move | [`HighlightMode::on_selection_or_cursor_changed`] |
//! | Viewport scrolled or resized | [`HighlightMode::on_viewport_changed`] |
//! | Viewport closed | [`HighlightMode::on_viewport_closed`] |
//!
//! All methods run synchronously to completion; the host must serialize
//! calls on its UI thread.
//!
//! # Example
//! ```ignore
//! let mut mode = HighlightMode::new(GlintConfig::default())?;
//! mode.on_activate(&mut editor);
//! // ... on every post-command hook:
//! mode.on_selection_or_cursor_changed(&mut editor);
//! // ... on scroll:
//! mode.on_viewport_changed(&mut editor, window_id);
//! mode.on_deactivate(&mut editor);
//! ```

use glint_text::TextRange;

use crate::cache::{HighlightSession, HighlightStats};
use crate::config::{ConfigError, GlintConfig};
use crate::extract::{SearchTerm, active_search_term};
use crate::host::{AnnotationSink, Host, ViewportId};
use crate::scan::Annotation;

/// Selection-occurrence highlighting for one editor.
///
/// Holds a [`HighlightSession`] only while active; the session is created on
/// activation and destroyed (after deleting its annotations) on deactivation.
#[derive(Debug)]
pub struct HighlightMode {
    config: GlintConfig,
    session: Option<HighlightSession>,
    /// Counters from sessions already torn down.
    retired: HighlightStats,
}

impl HighlightMode {
    /// Create an inactive mode.
    pub fn new(config: GlintConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
            retired: HighlightStats::default(),
        })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &GlintConfig {
        &self.config
    }

    /// Whether the mode is enabled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, while active.
    #[must_use]
    pub const fn session(&self) -> Option<&HighlightSession> {
        self.session.as_ref()
    }

    /// Enable highlighting and immediately highlight the current selection.
    pub fn on_activate<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        if self.session.is_none() {
            tracing::debug!(min_length = self.config.min_length, "highlight mode activated");
            self.session = Some(HighlightSession::new());
        }
        self.on_selection_or_cursor_changed(host);
    }

    /// Disable highlighting, deleting every annotation. Idempotent.
    pub fn on_deactivate<H>(&mut self, host: &mut H)
    where
        H: AnnotationSink + ?Sized,
    {
        if let Some(mut session) = self.session.take() {
            session.clear(host);
            self.retired.merge(&session.stats());
            tracing::debug!("highlight mode deactivated");
        }
    }

    /// Flip between active and inactive. Returns the new state.
    pub fn toggle<H>(&mut self, host: &mut H) -> bool
    where
        H: Host + ?Sized,
    {
        if self.is_active() {
            self.on_deactivate(host);
        } else {
            self.on_activate(host);
        }
        self.is_active()
    }

    /// Re-read the selection and reconcile every viewport against it.
    pub fn on_selection_or_cursor_changed<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let term = active_search_term(&*host, self.config.min_length);
        session.reconcile(host, term);
    }

    /// A viewport scrolled or resized; its new visible range is read from
    /// the host.
    pub fn on_viewport_changed<H>(&mut self, host: &mut H, viewport: ViewportId)
    where
        H: Host + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match host.visible_range(viewport) {
            Some(visible) => session.on_viewport_visibility_changed(host, viewport, visible),
            None => {
                session.forget_viewport(host, viewport);
            }
        }
    }

    /// A viewport scrolled or resized to a known range.
    pub fn on_viewport_visibility_changed<H>(
        &mut self,
        host: &mut H,
        viewport: ViewportId,
        visible: TextRange,
    ) where
        H: Host + ?Sized,
    {
        if let Some(session) = self.session.as_mut() {
            session.on_viewport_visibility_changed(host, viewport, visible);
        }
    }

    /// A viewport was closed; drop its state and annotations.
    pub fn on_viewport_closed<H>(&mut self, host: &mut H, viewport: ViewportId)
    where
        H: AnnotationSink + ?Sized,
    {
        if let Some(session) = self.session.as_mut() {
            session.forget_viewport(host, viewport);
        }
    }

    /// Replace the configuration. While active, highlights are rebuilt so
    /// the new minimum length and styles apply immediately.
    pub fn set_config<H>(&mut self, host: &mut H, config: GlintConfig) -> Result<(), ConfigError>
    where
        H: Host + ?Sized,
    {
        config.validate()?;
        self.config = config;
        if let Some(session) = self.session.as_mut() {
            session.clear(host);
            self.on_selection_or_cursor_changed(host);
        }
        Ok(())
    }

    /// The term currently highlighted.
    #[must_use]
    pub fn active_term(&self) -> Option<&SearchTerm> {
        self.session.as_ref().and_then(HighlightSession::term)
    }

    /// Viewports with highlight state, sorted.
    #[must_use]
    pub fn tracked_viewports(&self) -> Vec<ViewportId> {
        self.session
            .as_ref()
            .map(HighlightSession::tracked_viewports)
            .unwrap_or_default()
    }

    /// Annotations currently owned for `viewport`, in text order.
    #[must_use]
    pub fn annotations_for(&self, viewport: ViewportId) -> &[Annotation] {
        self.session
            .as_ref()
            .and_then(|s| s.state(viewport))
            .map(|state| state.annotations.as_slice())
            .unwrap_or_default()
    }

    /// Total annotations currently owned.
    #[must_use]
    pub fn live_annotation_count(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, HighlightSession::live_annotation_count)
    }

    /// Counters accumulated across every session of this mode.
    #[must_use]
    pub fn stats(&self) -> HighlightStats {
        let mut total = self.retired;
        if let Some(session) = &self.session {
            total.merge(&session.stats());
        }
        total
    }
}
