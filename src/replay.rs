//! Replay: paints history entries onto a raster.
//!
//! Each entry is painted with its own recorded color and width, never the
//! current brush. Eraser strokes always use the raster's background color.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use crate::history::{HistoryEntry, Shape, ShapeKind, Stroke, StrokeTool};
use crate::raster::Raster;

/// Clear to background and paint `entries` in order.
pub fn replay(raster: &mut Raster, entries: &[HistoryEntry]) {
    raster.clear();
    for entry in entries {
        paint_entry(raster, entry);
    }
}

/// Paint one entry on top of the current raster.
pub fn paint_entry(raster: &mut Raster, entry: &HistoryEntry) {
    match entry {
        HistoryEntry::Stroke(stroke) => paint_stroke(raster, stroke),
        HistoryEntry::Shape(shape) => paint_shape(raster, shape),
        HistoryEntry::Fill(fill) => raster.fill(fill.color),
    }
}

/// Paint every segment of a stroke, or a single dot for a one-point stroke.
pub fn paint_stroke(raster: &mut Raster, stroke: &Stroke) {
    let Some(first) = stroke.points.first() else {
        return;
    };
    let color = match stroke.tool {
        StrokeTool::Pen => first.color,
        StrokeTool::Eraser => raster.background(),
    };
    let width = first.line_width;

    if stroke.points.len() == 1 {
        raster.dot(first.position(), color, width);
        return;
    }
    for pair in stroke.points.windows(2) {
        let [prev, next] = pair else { continue };
        if next.path_start {
            continue;
        }
        raster.stroke_segment(prev.position(), next.position(), color, width);
    }
}

/// Stroke a shape primitive from `start` to `end`.
pub fn paint_shape(raster: &mut Raster, shape: &Shape) {
    match shape.tool {
        ShapeKind::Line => raster.stroke_segment(shape.start, shape.end, shape.color, shape.line_width),
        ShapeKind::Rect => raster.stroke_rect(shape.start, shape.end, shape.color, shape.line_width),
        ShapeKind::Circle => {
            let radius = shape.start.distance(shape.end);
            raster.stroke_circle(shape.start, radius, shape.color, shape.line_width);
        }
    }
}
