//! Surface: one editable raster with its history, brush and stroke recorder.
//!
//! The inline canvas and the fullscreen canvas are both `Surface`s; they differ
//! only in size, brush limits and the rotation flag. A surface knows nothing
//! about any other surface. Moving a drawing between them is the job of
//! [`crate::transfer`].
//!
//! The recorder turns one pointer gesture into at most one history entry:
//! `begin_stroke` opens a capture, `extend_stroke` paints incrementally (or
//! repaints a shape preview), and `end_stroke` commits. Undo and redo replay
//! the committed entries from a blank background.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use image::RgbaImage;

use crate::color::Color;
use crate::config::SketchConfig;
use crate::error::SketchResult;
use crate::geom::{Point, Size};
use crate::history::{Fill, History, HistoryEntry, Shape, Stroke};
use crate::input::{BrushLimits, Capture, Throttle, Tool, ToolState};
use crate::raster::Raster;
use crate::replay;

/// What a recorder call did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEvent {
    /// Nothing changed (no capture, throttled, or precondition not met).
    Ignored,
    /// A capture opened without painting (shape anchor recorded).
    Started,
    /// Pixels changed but nothing was committed yet.
    Painted,
    /// An entry was committed to history.
    Committed,
}

impl StrokeEvent {
    /// Whether the raster changed and needs presenting.
    #[must_use]
    pub fn needs_render(self) -> bool {
        matches!(self, Self::Painted | Self::Committed)
    }
}

/// One raster canvas plus its history and tool state.
#[derive(Debug, Clone)]
pub struct Surface {
    raster: Raster,
    history: History,
    tool_state: ToolState,
    limits: BrushLimits,
    rotated: bool,
    capture: Capture,
    throttle: Throttle,
}

impl Surface {
    /// The compact inline surface at the configured base resolution.
    ///
    /// # Errors
    ///
    /// Fails if the configured size is zero on either axis.
    pub fn inline(config: &SketchConfig) -> SketchResult<Self> {
        Self::build(config.inline_size, false, config.inline_limits(), config)
    }

    /// An enlarged surface of `size`, optionally presented rotated 90°.
    ///
    /// # Errors
    ///
    /// Fails if `size` is zero on either axis.
    pub fn fullscreen(config: &SketchConfig, size: Size, rotated: bool) -> SketchResult<Self> {
        Self::build(size, rotated, config.fullscreen_limits(), config)
    }

    fn build(size: Size, rotated: bool, limits: BrushLimits, config: &SketchConfig) -> SketchResult<Self> {
        let mut tool_state = config.initial_tool_state();
        tool_state.line_width = limits.clamp(tool_state.line_width);
        Ok(Self {
            raster: Raster::new(size, config.background)?,
            history: History::new(),
            tool_state,
            limits,
            rotated,
            capture: Capture::Idle,
            throttle: Throttle::new(config.throttle_ms),
        })
    }

    // --- Queries ---

    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn tool_state(&self) -> ToolState {
        self.tool_state
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.raster.size()
    }

    #[must_use]
    pub fn rotated(&self) -> bool {
        self.rotated
    }

    #[must_use]
    pub fn limits(&self) -> BrushLimits {
        self.limits
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }

    /// True iff nothing is committed. This is the "draw something first"
    /// precondition for submitting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    // --- Tool state ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool_state.tool = tool;
    }

    /// Change the paint color. The eraser ignores it, so it survives an
    /// eraser round trip.
    pub fn set_color(&mut self, color: Color) {
        self.tool_state.color = color;
    }

    /// Change the line width, clamped to this surface's limits.
    pub fn set_line_width(&mut self, width: f64) {
        self.tool_state.line_width = self.limits.clamp(width);
    }

    /// Adopt another surface's brush, clamping the width to this surface.
    pub fn set_tool_state(&mut self, state: ToolState) {
        self.tool_state = ToolState { line_width: self.limits.clamp(state.line_width), ..state };
    }

    // --- Recorder ---

    /// Open a capture at `at` with `brush`.
    ///
    /// Pen and eraser record the first point and paint a dot. Shape tools
    /// snapshot the raster and record the anchor. Fill floods the surface and
    /// commits immediately without opening a capture. Ignored if a capture is
    /// already open.
    pub fn begin_stroke(&mut self, at: Point, brush: ToolState) -> StrokeEvent {
        if self.capture.is_active() {
            tracing::debug!("begin_stroke ignored: capture already open");
            return StrokeEvent::Ignored;
        }
        if !at.is_finite() {
            return StrokeEvent::Ignored;
        }
        let width = self.limits.clamp(brush.line_width);

        if let Some(tool) = brush.tool.stroke_tool() {
            let color = match brush.tool {
                Tool::Eraser => self.raster.background(),
                _ => brush.color,
            };
            self.raster.dot(at, color, width);
            self.capture = Capture::Freehand { stroke: Stroke::begin(tool, at, color, width) };
            return StrokeEvent::Painted;
        }

        if let Some(kind) = brush.tool.shape_kind() {
            self.capture = Capture::Shape {
                kind,
                anchor: at,
                color: brush.color,
                line_width: width,
                before: self.raster.snapshot(),
            };
            return StrokeEvent::Started;
        }

        self.raster.fill(brush.color);
        self.history.push(HistoryEntry::Fill(Fill { color: brush.color }));
        StrokeEvent::Committed
    }

    /// Continue the open capture to `at`, subject to the input throttle.
    pub fn extend_stroke(&mut self, at: Point, now_ms: f64) -> StrokeEvent {
        if !self.capture.is_active() || !at.is_finite() {
            return StrokeEvent::Ignored;
        }
        if !self.throttle.admit(now_ms) {
            return StrokeEvent::Ignored;
        }
        match &mut self.capture {
            Capture::Idle => StrokeEvent::Ignored,
            Capture::Freehand { stroke } => {
                let (Some(prev), Some(first)) = (stroke.last_position(), stroke.points.first().copied()) else {
                    return StrokeEvent::Ignored;
                };
                stroke.push(at);
                self.raster.stroke_segment(prev, at, first.color, first.line_width);
                StrokeEvent::Painted
            }
            Capture::Shape { kind, anchor, color, line_width, before } => {
                self.raster.restore(before);
                let preview = Shape { tool: *kind, start: *anchor, end: at, color: *color, line_width: *line_width };
                replay::paint_shape(&mut self.raster, &preview);
                StrokeEvent::Painted
            }
        }
    }

    /// Close the open capture and commit it.
    ///
    /// Freehand captures commit their recorded points (a capture with none
    /// commits nothing). Shape captures commit anchor → `at`; if `at` is not a
    /// usable point the shape collapses onto its anchor.
    pub fn end_stroke(&mut self, at: Point) -> StrokeEvent {
        match std::mem::take(&mut self.capture) {
            Capture::Idle => StrokeEvent::Ignored,
            Capture::Freehand { stroke } => {
                if stroke.is_empty() {
                    return StrokeEvent::Ignored;
                }
                self.history.push(HistoryEntry::Stroke(stroke));
                StrokeEvent::Committed
            }
            Capture::Shape { kind, anchor, color, line_width, before } => {
                let end = if at.is_finite() { at } else { anchor };
                self.raster.restore(&before);
                let shape = Shape { tool: kind, start: anchor, end, color, line_width };
                replay::paint_shape(&mut self.raster, &shape);
                self.history.push(HistoryEntry::Shape(shape));
                StrokeEvent::Committed
            }
        }
    }

    /// Undo the newest entry and repaint. An open capture is discarded.
    pub fn undo(&mut self) -> bool {
        self.capture = Capture::Idle;
        if !self.history.undo() {
            return false;
        }
        self.repaint();
        true
    }

    /// Redo the most recently undone entry and repaint.
    pub fn redo(&mut self) -> bool {
        self.capture = Capture::Idle;
        if !self.history.redo() {
            return false;
        }
        self.repaint();
        true
    }

    /// Drop both stacks and reset to background. Not undoable.
    pub fn clear(&mut self) {
        self.capture = Capture::Idle;
        self.history.clear();
        self.raster.clear();
    }

    /// Repaint the raster from committed history.
    pub fn repaint(&mut self) {
        replay::replay(&mut self.raster, self.history.committed());
    }

    // --- Transfer support ---

    /// Replace this surface's pixels and history with transferred content.
    ///
    /// `backdrop`, when present, is stretched over the raster first. The
    /// committed entries are then replayed on a clean background; they are the
    /// authoritative content. With no backdrop and no entries the current
    /// pixels are left as they are.
    pub fn replace_content(&mut self, backdrop: Option<&RgbaImage>, committed: Vec<HistoryEntry>) {
        self.capture = Capture::Idle;
        if let Some(image) = backdrop {
            self.raster.draw_stretched(image);
        }
        self.history.replace(committed);
        if !self.history.is_empty() {
            self.repaint();
        }
    }

    /// Resize the live raster in place, keeping pixels unscaled at the origin.
    /// History coordinates are left untouched.
    ///
    /// # Errors
    ///
    /// Fails if `size` is zero on either axis; the surface is unchanged.
    ///
    /// An open shape capture keeps its pre-gesture pixels, resized the same
    /// way, so the preview on screen never leaks into them.
    pub fn resize_in_place(&mut self, size: Size, rotated: bool) -> SketchResult<()> {
        let before = match &self.capture {
            Capture::Shape { before, .. } => {
                let mut blank = Raster::new(size, self.raster.background())?;
                blank.restore(before);
                Some(blank.snapshot())
            }
            _ => None,
        };
        self.raster.resize(size)?;
        self.rotated = rotated;
        if let (Capture::Shape { before: slot, .. }, Some(resized)) = (&mut self.capture, before) {
            *slot = resized;
        }
        Ok(())
    }
}
