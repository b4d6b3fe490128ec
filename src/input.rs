//! Input model: tools, brush state, the gesture capture state machine and the
//! pointer-move throttle.
//!
//! `Tool` and `ToolState` capture the user's brush at the time of a
//! pointer-down. `Capture` is the active gesture tracked between pointer-down
//! and pointer-up, carrying everything needed to paint incrementally and to
//! commit a single history entry on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geom::Point;
use crate::history::{ShapeKind, Stroke, StrokeTool};
use crate::raster::RasterSnapshot;

/// Which drawing tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand paint (default).
    #[default]
    Pen,
    /// Freehand paint with the background color.
    Eraser,
    /// Straight line from anchor to release.
    Line,
    /// Rectangle outline from anchor corner to release corner.
    Rect,
    /// Circle outline centred on the anchor.
    Circle,
    /// Flood the whole surface with the paint color.
    Fill,
}

impl Tool {
    /// The freehand stroke tool, for pen and eraser.
    #[must_use]
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            Self::Pen => Some(StrokeTool::Pen),
            Self::Eraser => Some(StrokeTool::Eraser),
            _ => None,
        }
    }

    /// The shape primitive, for line, rect and circle.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Line => Some(ShapeKind::Line),
            Self::Rect => Some(ShapeKind::Rect),
            Self::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}

/// The brush a surface paints with: tool, paint color and line width.
///
/// `color` is the user's paint color. Selecting the eraser never overwrites
/// it, so switching back to the pen restores the same color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color,
    pub line_width: f64,
}

/// Inclusive line-width bounds for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushLimits {
    pub min: f64,
    pub max: f64,
}

impl BrushLimits {
    /// Clamp `width` into range. Non-finite widths fall back to the minimum.
    /// Inverted bounds never panic; the maximum wins.
    #[must_use]
    pub fn clamp(&self, width: f64) -> f64 {
        if width.is_finite() { width.max(self.min).min(self.max) } else { self.min }
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum Capture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A pen or eraser stroke is being recorded.
    Freehand {
        /// Points recorded so far; the first is the path start.
        stroke: Stroke,
    },
    /// A line, rect or circle is being previewed.
    Shape {
        kind: ShapeKind,
        /// Raster-space point where the gesture started.
        anchor: Point,
        color: Color,
        line_width: f64,
        /// Pixels before the gesture, restored before each preview repaint.
        before: RasterSnapshot,
    },
}

impl Capture {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Time-based admission filter for pointer-move events.
///
/// Events closer than `interval_ms` to the last admitted one are dropped,
/// never queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    last_admitted_ms: Option<f64>,
}

impl Throttle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_admitted_ms: None }
    }

    /// Admit an event at `now_ms`, recording it as the latest admission.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_admitted_ms {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_admitted_ms = Some(now_ms);
        true
    }
}
