//! High-level editing facade.
//!
//! [`CoverStudio`] owns a [`CoverState`] and the [`StyleCatalog`] it is
//! edited against, and exposes the mutations a UI performs. Free-text fields
//! accept anything; catalog-keyed fields are validated on the way in so the
//! state can only ever reference an unknown key if a raw snapshot put it
//! there. [`RenderDebouncer`] carries the edit-coalescing timer logic for
//! hosts that re-render on a tick.

use std::time::{Duration, Instant};

use crate::error::CoverError;
use crate::export::{ExportedCover, export_cover};
use crate::layout::{Density, SpreadLayout};
use crate::render::CoverRenderer;
use crate::state::{BackgroundStyle, CoverState, TrimSize};
use crate::style::StyleCatalog;
use crate::surface::{FontLibrary, RasterSurface};

// ============================================================================
// CoverStudio
// ============================================================================

/// One editing session: a style state plus the catalog that scopes it.
pub struct CoverStudio {
    state: CoverState,
    catalog: StyleCatalog,
}

impl CoverStudio {
    /// Opens a session with the default state and the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(StyleCatalog::builtin())
    }

    /// Opens a session against a caller-provided catalog.
    pub fn with_catalog(catalog: StyleCatalog) -> Self {
        Self { state: CoverState::new(), catalog }
    }

    pub fn state(&self) -> &CoverState {
        &self.state
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    // ---- free-text edits ----

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.state.author = author.into();
    }

    pub fn set_back_cover_text(&mut self, text: impl Into<String>) {
        self.state.back_cover_text = text.into();
    }

    /// Sets the spine width from raw input; malformed input collapses the
    /// spine instead of failing.
    pub fn set_spine_width_input(&mut self, input: &str) {
        self.state.set_spine_width_input(input);
    }

    // ---- structural edits ----

    pub fn set_trim_size(&mut self, trim: TrimSize) {
        self.state.trim_size = trim;
    }

    pub fn set_background(&mut self, style: BackgroundStyle) {
        self.state.background = style;
    }

    pub fn set_show_guides(&mut self, show: bool) {
        self.state.show_guides = show;
    }

    /// Selects a front-cover template. Unknown keys leave the state
    /// untouched.
    pub fn set_template(&mut self, name: &str) -> Result<(), CoverError> {
        if self.catalog.template(name).is_none() {
            return Err(CoverError::UnknownTemplate(name.to_string()));
        }
        self.state.template = name.to_string();
        Ok(())
    }

    /// Selects a color scheme. Unknown keys leave the state untouched.
    pub fn set_color_scheme(&mut self, name: &str) -> Result<(), CoverError> {
        if self.catalog.color_scheme(name).is_none() {
            return Err(CoverError::UnknownColorScheme(name.to_string()));
        }
        self.state.color_scheme = name.to_string();
        Ok(())
    }

    // ---- snapshots ----

    /// Serializes the current state as a JSON snapshot.
    pub fn snapshot_json(&self) -> Result<String, CoverError> {
        self.state.to_json()
    }

    /// Replaces the state from a JSON snapshot.
    ///
    /// Catalog keys in the snapshot are validated before anything is
    /// committed, so a rejected snapshot leaves the session unchanged.
    pub fn apply_snapshot(&mut self, json: &str) -> Result<(), CoverError> {
        let restored = CoverState::from_json(json)?;
        if self.catalog.template(&restored.template).is_none() {
            return Err(CoverError::UnknownTemplate(restored.template));
        }
        if self.catalog.color_scheme(&restored.color_scheme).is_none() {
            return Err(CoverError::UnknownColorScheme(restored.color_scheme));
        }
        self.state = restored;
        Ok(())
    }

    // ---- rendering ----

    /// The spread layout at preview density.
    pub fn preview_layout(&self) -> SpreadLayout {
        SpreadLayout::compute(self.state.trim_size, self.state.spine_width_in, Density::PREVIEW)
    }

    /// Renders the current state to a fresh preview-density surface.
    pub fn render_preview<'f>(
        &self,
        fonts: Option<&'f FontLibrary>,
    ) -> Result<RasterSurface<'f>, CoverError> {
        let size = self.preview_layout().total;
        let mut surface = match fonts {
            Some(library) => RasterSurface::with_fonts(size, library),
            None => RasterSurface::new(size),
        };
        CoverRenderer::new(&self.catalog).render(&self.state, Density::PREVIEW, &mut surface)?;
        Ok(surface)
    }

    /// Renders and encodes the current state at print density.
    pub fn export(&self, fonts: Option<&FontLibrary>) -> Result<ExportedCover, CoverError> {
        export_cover(&self.state, &self.catalog, fonts)
    }
}

impl Default for CoverStudio {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RenderDebouncer
// ============================================================================

/// Delay between the last edit and the re-render it triggers.
pub const DEFAULT_RENDER_DELAY: Duration = Duration::from_millis(300);

/// Coalesces a burst of edits into one deferred render.
///
/// Pure timer bookkeeping: the host calls [`note_edit`] on every state
/// change and [`poll`] on its tick, and renders when `poll` returns true.
/// Each edit pushes the deadline out, so only the trailing edge of a burst
/// renders.
///
/// [`note_edit`]: RenderDebouncer::note_edit
/// [`poll`]: RenderDebouncer::poll
#[derive(Debug, Clone)]
pub struct RenderDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RenderDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Records an edit at `now`, rescheduling the pending render.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns true once per scheduled render, when its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a render is scheduled but not yet due.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for RenderDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_DELAY)
    }
}

// ============================================================================
// Tests
// ============================================================================
