use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::color::Color;
use crate::config::SketchConfig;
use crate::consts::PALETTE;
use crate::error::SketchResult;
use crate::geom::{ClientRect, Point};
use crate::input::Tool;
use crate::render;
use crate::surface::{StrokeEvent, Surface};
use crate::transfer;
use crate::viewport::{self, FullscreenLayout, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Where the drawing session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    InlineEditing,
    FullscreenEditing,
}

/// Which of the two surfaces an event or action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Inline,
    Fullscreen,
}

/// Blocking messages for the host to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Submit was pressed on an empty drawing.
    NothingDrawn,
    /// The viewport is too small to expand and the browser cannot go fullscreen.
    FullscreenUnavailable,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded(SurfaceKind),
    AttachListeners(SurfaceKind),
    DetachListeners(SurfaceKind),
    /// Show (or re-lay out) the fullscreen overlay.
    EnterFullscreen { layout: FullscreenLayout },
    ExitFullscreen,
    Notice(Notice),
    /// Flattened PNG of the inline surface, ready to submit with the message.
    AttachmentReady(Vec<u8>),
}

/// Core engine state: all logic that doesn't depend on canvas elements.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Exactly one surface is active while a session is open: the fullscreen one
/// when it exists, the inline one otherwise.
pub struct EngineCore {
    config: SketchConfig,
    session_id: Option<Uuid>,
    inline: Option<Surface>,
    fullscreen: Option<Surface>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self { config: SketchConfig::default(), session_id: None, inline: None, fullscreen: None }
    }
}

impl EngineCore {
    /// Create an engine with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SketchError::ConfigValue`] when the config
    /// fails [`SketchConfig::validate`].
    pub fn new(config: SketchConfig) -> SketchResult<Self> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    // --- Session ---

    /// Create the inline surface. Ignored if a session is already open.
    ///
    /// # Errors
    ///
    /// Fails if the configured inline size is unusable.
    pub fn open_session(&mut self) -> SketchResult<Vec<Action>> {
        if self.inline.is_some() {
            tracing::debug!(session = ?self.session_id, "open_session ignored: already open");
            return Ok(Vec::new());
        }
        self.inline = Some(Surface::inline(&self.config)?);
        let id = Uuid::new_v4();
        self.session_id = Some(id);
        tracing::debug!(session = %id, "drawing session opened");
        Ok(vec![Action::AttachListeners(SurfaceKind::Inline), Action::RenderNeeded(SurfaceKind::Inline)])
    }

    /// Discard both surfaces and all history.
    pub fn close_session(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.fullscreen.take().is_some() {
            actions.push(Action::DetachListeners(SurfaceKind::Fullscreen));
            actions.push(Action::ExitFullscreen);
        }
        if self.inline.take().is_some() {
            actions.push(Action::DetachListeners(SurfaceKind::Inline));
        }
        tracing::debug!(session = ?self.session_id, "drawing session closed");
        self.session_id = None;
        actions
    }

    /// Flatten the inline surface for submission.
    ///
    /// An empty drawing yields [`Notice::NothingDrawn`] instead of an
    /// attachment. While fullscreen is open the inline surface is what gets
    /// submitted; fullscreen edits count only once applied.
    ///
    /// # Errors
    ///
    /// Fails if PNG encoding fails.
    pub fn save_drawing(&self) -> SketchResult<Vec<Action>> {
        let Some(inline) = &self.inline else {
            return Ok(Vec::new());
        };
        if inline.is_empty() {
            tracing::debug!(session = ?self.session_id, "save refused: nothing drawn");
            return Ok(vec![Action::Notice(Notice::NothingDrawn)]);
        }
        let png = transfer::flatten(inline)?;
        tracing::info!(session = ?self.session_id, bytes = png.len(), "drawing flattened");
        Ok(vec![Action::AttachmentReady(png)])
    }

    // --- Fullscreen ---

    /// Open the fullscreen surface sized for `viewport`.
    ///
    /// # Errors
    ///
    /// Fails if the computed surface cannot be created or the inline surface
    /// cannot be flattened.
    pub fn expand(&mut self, viewport: &Viewport) -> SketchResult<Vec<Action>> {
        if self.fullscreen.is_some() {
            return Ok(Vec::new());
        }
        let Some(inline) = &self.inline else {
            return Ok(Vec::new());
        };
        if !viewport::can_expand(viewport, &self.config) {
            tracing::warn!(session = ?self.session_id, width = viewport.width, "fullscreen unavailable");
            return Ok(vec![Action::Notice(Notice::FullscreenUnavailable)]);
        }
        let layout = viewport::fullscreen_layout(viewport, &self.config);
        let (target, _) = transfer::expand(inline, layout, &self.config)?;
        self.fullscreen = Some(target);
        Ok(vec![
            Action::EnterFullscreen { layout },
            Action::AttachListeners(SurfaceKind::Fullscreen),
            Action::RenderNeeded(SurfaceKind::Fullscreen),
        ])
    }

    /// Commit the fullscreen drawing back to the inline surface and close it.
    ///
    /// # Errors
    ///
    /// Fails if the fullscreen surface cannot be flattened. Both surfaces are
    /// left as they were.
    pub fn apply(&mut self) -> SketchResult<Vec<Action>> {
        let (Some(inline), Some(target)) = (self.inline.as_mut(), self.fullscreen.as_ref()) else {
            return Ok(Vec::new());
        };
        transfer::apply(inline, target)?;
        self.fullscreen = None;
        Ok(Self::leave_fullscreen())
    }

    /// Close the fullscreen surface without touching the inline one.
    pub fn cancel(&mut self) -> Vec<Action> {
        let Some(target) = self.fullscreen.take() else {
            return Vec::new();
        };
        transfer::cancel(target);
        Self::leave_fullscreen()
    }

    fn leave_fullscreen() -> Vec<Action> {
        vec![
            Action::DetachListeners(SurfaceKind::Fullscreen),
            Action::ExitFullscreen,
            Action::RenderNeeded(SurfaceKind::Inline),
        ]
    }

    /// Re-lay out the fullscreen surface after the viewport changed.
    ///
    /// # Errors
    ///
    /// Fails if the new layout has a zero axis; the surface is unchanged.
    pub fn on_viewport_resize(&mut self, viewport: &Viewport) -> SketchResult<Vec<Action>> {
        let Some(target) = self.fullscreen.as_mut() else {
            return Ok(Vec::new());
        };
        let layout = viewport::fullscreen_layout(viewport, &self.config);
        if target.size() == layout.size && target.rotated() == layout.rotated {
            return Ok(Vec::new());
        }
        transfer::resize_live(target, layout)?;
        Ok(vec![Action::EnterFullscreen { layout }, Action::RenderNeeded(SurfaceKind::Fullscreen)])
    }

    // --- Pointer input ---

    /// Pointer pressed on `kind` at client coordinates inside `rect`.
    pub fn on_pointer_down(&mut self, kind: SurfaceKind, client: Point, rect: ClientRect) -> Vec<Action> {
        let Some(surface) = self.accepting_mut(kind) else {
            return Vec::new();
        };
        let Some(at) = viewport::pointer_to_canvas(client, rect, surface.size(), surface.rotated()) else {
            return Vec::new();
        };
        let brush = surface.tool_state();
        render_if(kind, surface.begin_stroke(at, brush))
    }

    /// Pointer moved at `now_ms`; subject to the input throttle.
    pub fn on_pointer_move(&mut self, kind: SurfaceKind, client: Point, rect: ClientRect, now_ms: f64) -> Vec<Action> {
        let Some(surface) = self.accepting_mut(kind) else {
            return Vec::new();
        };
        if !surface.is_capturing() {
            return Vec::new();
        }
        let Some(at) = viewport::pointer_to_canvas(client, rect, surface.size(), surface.rotated()) else {
            return Vec::new();
        };
        render_if(kind, surface.extend_stroke(at, now_ms))
    }

    /// Pointer released or left the surface. An unmappable position commits
    /// shapes at their anchor.
    pub fn on_pointer_up(&mut self, kind: SurfaceKind, client: Point, rect: ClientRect) -> Vec<Action> {
        let Some(surface) = self.accepting_mut(kind) else {
            return Vec::new();
        };
        let at = viewport::pointer_to_canvas(client, rect, surface.size(), surface.rotated())
            .unwrap_or(Point::new(f64::NAN, f64::NAN));
        render_if(kind, surface.end_stroke(at))
    }

    // --- Tool / history ---

    pub fn set_tool(&mut self, tool: Tool) {
        if let Some(surface) = self.active_mut() {
            surface.set_tool(tool);
        }
    }

    /// Set the paint color from a CSS hex string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SketchError::InvalidColor`]; the brush is unchanged.
    pub fn set_color(&mut self, raw: &str) -> SketchResult<()> {
        let color = Color::parse(raw)?;
        if let Some(surface) = self.active_mut() {
            surface.set_color(color);
        }
        Ok(())
    }

    pub fn set_line_width(&mut self, width: f64) {
        if let Some(surface) = self.active_mut() {
            surface.set_line_width(width);
        }
    }

    pub fn undo(&mut self) -> Vec<Action> {
        let Some(kind) = self.active_kind() else {
            return Vec::new();
        };
        if self.active_mut().is_some_and(Surface::undo) { vec![Action::RenderNeeded(kind)] } else { Vec::new() }
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let Some(kind) = self.active_kind() else {
            return Vec::new();
        };
        if self.active_mut().is_some_and(Surface::redo) { vec![Action::RenderNeeded(kind)] } else { Vec::new() }
    }

    pub fn clear(&mut self) -> Vec<Action> {
        let Some(kind) = self.active_kind() else {
            return Vec::new();
        };
        match self.active_mut() {
            Some(surface) => {
                surface.clear();
                vec![Action::RenderNeeded(kind)]
            }
            None => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> SessionState {
        match (&self.inline, &self.fullscreen) {
            (None, _) => SessionState::Closed,
            (Some(_), None) => SessionState::InlineEditing,
            (Some(_), Some(_)) => SessionState::FullscreenEditing,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    #[must_use]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// The surface that currently receives input.
    #[must_use]
    pub fn active_kind(&self) -> Option<SurfaceKind> {
        match self.state() {
            SessionState::Closed => None,
            SessionState::InlineEditing => Some(SurfaceKind::Inline),
            SessionState::FullscreenEditing => Some(SurfaceKind::Fullscreen),
        }
    }

    #[must_use]
    pub fn surface(&self, kind: SurfaceKind) -> Option<&Surface> {
        match kind {
            SurfaceKind::Inline => self.inline.as_ref(),
            SurfaceKind::Fullscreen => self.fullscreen.as_ref(),
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&Surface> {
        self.active_kind().and_then(|kind| self.surface(kind))
    }

    /// Whether the active surface has an entry to undo. Drives the toolbar.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.active().is_some_and(|s| s.history().can_undo())
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.active().is_some_and(|s| s.history().can_redo())
    }

    /// Swatches for the fullscreen toolbar.
    #[must_use]
    pub fn palette(&self) -> &'static [&'static str] {
        &PALETTE
    }

    /// Committed history of the active surface as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SketchError::Config`] if serialization fails.
    pub fn history_json(&self) -> SketchResult<String> {
        let entries = self.active().map(|s| s.history().committed()).unwrap_or_default();
        Ok(serde_json::to_string(entries)?)
    }

    fn active_mut(&mut self) -> Option<&mut Surface> {
        match self.active_kind()? {
            SurfaceKind::Inline => self.inline.as_mut(),
            SurfaceKind::Fullscreen => self.fullscreen.as_mut(),
        }
    }

    /// The active surface, if `kind` is it. Events for any other surface come
    /// from listeners that should already be detached and are dropped.
    fn accepting_mut(&mut self, kind: SurfaceKind) -> Option<&mut Surface> {
        if self.active_kind() != Some(kind) {
            tracing::debug!(session = ?self.session_id, ?kind, "event for inactive surface dropped");
            return None;
        }
        self.active_mut()
    }
}

fn render_if(kind: SurfaceKind, event: StrokeEvent) -> Vec<Action> {
    if event.needs_render() { vec![Action::RenderNeeded(kind)] } else { Vec::new() }
}

/// The full drawing engine. Wraps `EngineCore` and owns the browser canvas
/// elements.
pub struct Engine {
    inline_canvas: HtmlCanvasElement,
    fullscreen_canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the inline and fullscreen canvas elements.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        inline_canvas: HtmlCanvasElement,
        fullscreen_canvas: HtmlCanvasElement,
        config: SketchConfig,
    ) -> SketchResult<Self> {
        Ok(Self { inline_canvas, fullscreen_canvas, core: EngineCore::new(config)? })
    }

    fn canvas(&self, kind: SurfaceKind) -> &HtmlCanvasElement {
        match kind {
            SurfaceKind::Inline => &self.inline_canvas,
            SurfaceKind::Fullscreen => &self.fullscreen_canvas,
        }
    }

    fn client_rect(&self, kind: SurfaceKind) -> ClientRect {
        let rect = self.canvas(kind).get_bounding_client_rect();
        ClientRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, kind: SurfaceKind, client_x: f64, client_y: f64) -> Vec<Action> {
        let rect = self.client_rect(kind);
        self.core.on_pointer_down(kind, Point::new(client_x, client_y), rect)
    }

    pub fn on_pointer_move(&mut self, kind: SurfaceKind, client_x: f64, client_y: f64) -> Vec<Action> {
        let rect = self.client_rect(kind);
        self.core.on_pointer_move(kind, Point::new(client_x, client_y), rect, js_sys::Date::now())
    }

    pub fn on_pointer_up(&mut self, kind: SurfaceKind, client_x: f64, client_y: f64) -> Vec<Action> {
        let rect = self.client_rect(kind);
        self.core.on_pointer_up(kind, Point::new(client_x, client_y), rect)
    }

    // --- Render ---

    /// Copy the surface's pixels to its canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any canvas call fails.
    pub fn render(&self, kind: SurfaceKind) -> Result<(), JsValue> {
        match self.core.surface(kind) {
            Some(surface) => render::present(self.canvas(kind), surface),
            None => Ok(()),
        }
    }

    /// Apply a fullscreen layout to the fullscreen canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the style cannot be updated.
    pub fn layout_fullscreen(&self, layout: FullscreenLayout) -> Result<(), JsValue> {
        render::apply_layout(&self.fullscreen_canvas, layout)
    }
}
