//! History model: strokes, shapes and fills, and the undo/redo stacks.
//!
//! Every committed entry carries its own color and width, so replaying the
//! history reproduces the raster exactly no matter what brush is selected at
//! replay time. Entries are plain values: transferring a drawing to another
//! surface deep-copies them through [`HistoryEntry::scaled`] and never shares
//! them between surfaces.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geom::{Point, Scale};

/// Which freehand tool produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    Pen,
    /// Paints with the surface background color.
    Eraser,
}

/// One sampled point of a freehand stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub line_width: f64,
    /// Marks the start of a sub-path; set on the first point of every stroke.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub path_start: bool,
}

impl StrokePoint {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A freehand pen or eraser stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub tool: StrokeTool,
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    /// Start a stroke whose first point is marked as a path start.
    #[must_use]
    pub fn begin(tool: StrokeTool, at: Point, color: Color, line_width: f64) -> Self {
        Self {
            tool,
            points: vec![StrokePoint { x: at.x, y: at.y, color, line_width, path_start: true }],
        }
    }

    /// Append a point using the brush the stroke was started with.
    pub fn push(&mut self, at: Point) {
        let Some(first) = self.points.first().copied() else {
            return;
        };
        self.points.push(StrokePoint {
            x: at.x,
            y: at.y,
            color: first.color,
            line_width: first.line_width,
            path_start: false,
        });
    }

    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.points.last().map(StrokePoint::position)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn scaled(&self, scale: Scale) -> Self {
        Self {
            tool: self.tool,
            points: self
                .points
                .iter()
                .map(|p| StrokePoint { x: p.x * scale.x, y: p.y * scale.y, ..*p })
                .collect(),
        }
    }
}

/// Shape primitive drawn from an anchor to a release point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    /// Axis-aligned rectangle outline with `start` and `end` as opposite corners.
    Rect,
    /// Circle outline centred on `start` passing through `end`.
    Circle,
}

/// A committed line, rectangle or circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub tool: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub line_width: f64,
}

impl Shape {
    #[must_use]
    pub fn scaled(&self, scale: Scale) -> Self {
        Self { start: self.start.scaled(scale), end: self.end.scaled(scale), ..*self }
    }
}

/// Full-surface flood with one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
}

/// One replayable unit of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistoryEntry {
    Stroke(Stroke),
    Shape(Shape),
    Fill(Fill),
}

impl HistoryEntry {
    /// Deep copy with every coordinate multiplied by `scale`. Fills carry no
    /// coordinates and pass through unchanged.
    #[must_use]
    pub fn scaled(&self, scale: Scale) -> Self {
        match self {
            Self::Stroke(stroke) => Self::Stroke(stroke.scaled(scale)),
            Self::Shape(shape) => Self::Shape(shape.scaled(scale)),
            Self::Fill(fill) => Self::Fill(*fill),
        }
    }
}

/// Committed entries in paint order plus the redo stack.
///
/// The two stacks are always disjoint: undo moves the tail of `committed` onto
/// `redo`, redo moves it back, and any new push discards `redo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    committed: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new entry and drop anything that could have been redone.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.committed.push(entry);
        self.redo.clear();
    }

    /// Move the newest committed entry onto the redo stack. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.committed.pop() else {
            return false;
        };
        self.redo.push(entry);
        true
    }

    /// Move the top of the redo stack back onto `committed`. Returns false when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo.pop() else {
            return false;
        };
        self.committed.push(entry);
        true
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo.clear();
    }

    /// Replace the committed entries wholesale (used by surface transfer).
    /// The redo stack does not survive a transfer.
    pub fn replace(&mut self, committed: Vec<HistoryEntry>) {
        self.committed = committed;
        self.redo.clear();
    }

    /// Scaled deep copy of the committed entries.
    #[must_use]
    pub fn scaled(&self, scale: Scale) -> Vec<HistoryEntry> {
        self.committed.iter().map(|e| e.scaled(scale)).collect()
    }

    #[must_use]
    pub fn committed(&self) -> &[HistoryEntry] {
        &self.committed
    }

    #[must_use]
    pub fn redo_stack(&self) -> &[HistoryEntry] {
        &self.redo
    }

    /// True when nothing is committed. Pending redo entries do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
