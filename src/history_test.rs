#![allow(clippy::float_cmp)]

use super::*;

fn red() -> Color {
    Color::rgb(255, 0, 0)
}

fn pen_stroke(from: (f64, f64), to: (f64, f64)) -> HistoryEntry {
    let mut stroke = Stroke::begin(StrokeTool::Pen, Point::new(from.0, from.1), red(), 3.0);
    stroke.push(Point::new(to.0, to.1));
    HistoryEntry::Stroke(stroke)
}

fn rect(start: (f64, f64), end: (f64, f64)) -> HistoryEntry {
    HistoryEntry::Shape(Shape {
        tool: ShapeKind::Rect,
        start: Point::new(start.0, start.1),
        end: Point::new(end.0, end.1),
        color: red(),
        line_width: 2.0,
    })
}

// =============================================================
// Stroke
// =============================================================

#[test]
fn stroke_begin_marks_path_start() {
    let stroke = Stroke::begin(StrokeTool::Pen, Point::new(10.0, 10.0), red(), 3.0);
    assert_eq!(stroke.points.len(), 1);
    assert!(stroke.points[0].path_start);
    assert_eq!(stroke.points[0].color, red());
    assert_eq!(stroke.points[0].line_width, 3.0);
}

#[test]
fn stroke_push_inherits_brush_and_is_not_path_start() {
    let mut stroke = Stroke::begin(StrokeTool::Pen, Point::new(10.0, 10.0), red(), 3.0);
    stroke.push(Point::new(50.0, 10.0));
    assert_eq!(
        stroke.points[1],
        StrokePoint { x: 50.0, y: 10.0, color: red(), line_width: 3.0, path_start: false }
    );
    assert_eq!(stroke.last_position(), Some(Point::new(50.0, 10.0)));
}

#[test]
fn stroke_push_on_empty_stroke_is_ignored() {
    let mut stroke = Stroke { tool: StrokeTool::Pen, points: Vec::new() };
    stroke.push(Point::new(1.0, 1.0));
    assert!(stroke.is_empty());
}

// =============================================================
// Scaling
// =============================================================

#[test]
fn scaled_stroke_multiplies_coordinates_only() {
    let entry = pen_stroke((10.0, 20.0), (30.0, 40.0));
    let HistoryEntry::Stroke(scaled) = entry.scaled(Scale { x: 2.0, y: 0.5 }) else {
        panic!("expected stroke");
    };
    assert_eq!(scaled.points[0].position(), Point::new(20.0, 10.0));
    assert_eq!(scaled.points[1].position(), Point::new(60.0, 20.0));
    assert!(scaled.points[0].path_start);
    assert_eq!(scaled.points[1].line_width, 3.0);
}

#[test]
fn scaled_shape_scales_both_endpoints() {
    let entry = rect((0.0, 0.0), (100.0, 50.0));
    let HistoryEntry::Shape(shape) = entry.scaled(Scale { x: 2.0, y: 3.0 }) else {
        panic!("expected shape");
    };
    assert_eq!(shape.start, Point::new(0.0, 0.0));
    assert_eq!(shape.end, Point::new(200.0, 150.0));
    assert_eq!(shape.line_width, 2.0);
}

#[test]
fn scaled_fill_passes_through() {
    let entry = HistoryEntry::Fill(Fill { color: red() });
    assert_eq!(entry.scaled(Scale { x: 9.0, y: 9.0 }), entry);
}

#[test]
fn scaling_is_a_deep_copy() {
    let mut history = History::new();
    history.push(pen_stroke((1.0, 1.0), (2.0, 2.0)));
    let copy = history.scaled(Scale { x: 1.0, y: 1.0 });
    history.clear();
    assert_eq!(copy.len(), 1);
}

// =============================================================
// Undo / redo stacks
// =============================================================

#[test]
fn push_clears_redo() {
    let mut history = History::new();
    history.push(pen_stroke((0.0, 0.0), (1.0, 1.0)));
    assert!(history.undo());
    assert!(history.can_redo());
    history.push(rect((0.0, 0.0), (5.0, 5.0)));
    assert!(!history.can_redo());
    assert!(!history.redo());
}

#[test]
fn undo_moves_tail_to_redo() {
    let mut history = History::new();
    let a = pen_stroke((0.0, 0.0), (1.0, 1.0));
    let b = rect((0.0, 0.0), (5.0, 5.0));
    history.push(a.clone());
    history.push(b.clone());
    assert!(history.undo());
    assert_eq!(history.committed(), &[a]);
    assert_eq!(history.redo_stack(), &[b]);
}

#[test]
fn undo_then_redo_restores_committed_by_value() {
    let mut history = History::new();
    for i in 0..5 {
        let f = f64::from(i);
        history.push(pen_stroke((f, f), (f + 1.0, f + 2.0)));
    }
    let before = history.committed().to_vec();
    for _ in 0..3 {
        assert!(history.undo());
    }
    for _ in 0..3 {
        assert!(history.redo());
    }
    assert_eq!(history.committed(), before.as_slice());
    assert!(history.redo_stack().is_empty());
}

#[test]
fn undo_and_redo_on_empty_stacks_are_noops() {
    let mut history = History::new();
    assert!(!history.undo());
    assert!(!history.redo());
    assert!(history.is_empty());
}

#[test]
fn is_empty_ignores_redo_stack() {
    let mut history = History::new();
    history.push(pen_stroke((0.0, 0.0), (1.0, 1.0)));
    history.undo();
    assert!(history.is_empty());
    assert!(history.can_redo());
}

#[test]
fn replace_drops_redo() {
    let mut history = History::new();
    history.push(pen_stroke((0.0, 0.0), (1.0, 1.0)));
    history.undo();
    history.replace(vec![rect((0.0, 0.0), (2.0, 2.0))]);
    assert_eq!(history.committed().len(), 1);
    assert!(!history.can_redo());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn stroke_entry_serializes_with_kind_and_tool_tags() {
    let value = serde_json::to_value(pen_stroke((10.0, 10.0), (50.0, 10.0))).unwrap();
    assert_eq!(value["kind"], "stroke");
    assert_eq!(value["tool"], "pen");
    assert_eq!(value["points"][0]["color"], "#ff0000");
    assert_eq!(value["points"][0]["path_start"], true);
    assert!(value["points"][1].get("path_start").is_none());
}

#[test]
fn history_serde_round_trip() {
    let mut history = History::new();
    history.push(pen_stroke((10.0, 10.0), (50.0, 10.0)));
    history.push(rect((0.0, 0.0), (100.0, 50.0)));
    history.push(HistoryEntry::Fill(Fill { color: Color::rgb(0, 0, 255) }));
    history.undo();
    let json = serde_json::to_string(&history).unwrap();
    let back: History = serde_json::from_str(&json).unwrap();
    assert_eq!(back, history);
}
