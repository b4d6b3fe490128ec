#![allow(clippy::float_cmp)]

use super::*;

fn desktop(width: f64, height: f64) -> Viewport {
    Viewport { width, height, toolbar_height: 60.0, touch: false, fullscreen_supported: true }
}

fn phone(width: f64, height: f64) -> Viewport {
    Viewport { width, height, toolbar_height: 0.0, touch: true, fullscreen_supported: true }
}

fn assert_close(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

// =============================================================
// Layout
// =============================================================

#[test]
fn wide_layout_never_below_minimum() {
    let layout = fullscreen_layout(&desktop(1280.0, 720.0), &SketchConfig::default());
    assert_eq!(layout, FullscreenLayout { size: Size::new(1600, 900), rotated: false });
}

#[test]
fn wide_layout_fills_large_viewport() {
    let layout = fullscreen_layout(&desktop(2560.0, 1440.0), &SketchConfig::default());
    assert_eq!(layout.size, Size::new(2520, 1340));
    assert!(!layout.rotated);
}

#[test]
fn narrow_layout_swaps_axes_and_rotates() {
    let layout = fullscreen_layout(&phone(390.0, 844.0), &SketchConfig::default());
    assert_eq!(layout, FullscreenLayout { size: Size::new(724, 290), rotated: true });
}

#[test]
fn touch_forces_rotated_layout_on_wide_screens() {
    let layout = fullscreen_layout(&phone(1024.0, 768.0), &SketchConfig::default());
    assert!(layout.rotated);
    assert_eq!(layout.size, Size::new(648, 924));
}

#[test]
fn tiny_viewport_clamps_to_one_pixel() {
    let layout = fullscreen_layout(&phone(50.0, 60.0), &SketchConfig::default());
    assert_eq!(layout.size, Size::new(1, 1));
}

#[test]
fn expand_needs_fullscreen_api_on_small_viewports() {
    let config = SketchConfig::default();
    let mut small = phone(390.0, 844.0);
    assert!(can_expand(&small, &config));
    small.fullscreen_supported = false;
    assert!(!can_expand(&small, &config));
    let big = Viewport { fullscreen_supported: false, ..desktop(1280.0, 720.0) };
    assert!(can_expand(&big, &config));
}

// =============================================================
// Pointer mapping
// =============================================================

#[test]
fn unrotated_mapping_scales_linearly() {
    let rect = ClientRect::new(100.0, 50.0, 200.0, 100.0);
    let p = pointer_to_canvas(Point::new(200.0, 100.0), rect, Size::new(400, 200), false).unwrap();
    assert_close(p, Point::new(200.0, 100.0));
}

#[test]
fn rotated_mapping_inverts_clockwise_rotation() {
    // Raster 800x400 displayed rotated: visual box is 400 wide, 800 tall.
    let rect = ClientRect::new(10.0, 20.0, 400.0, 800.0);
    let size = Size::new(800, 400);

    // Visual top-right corner is raster origin.
    let origin = pointer_to_canvas(Point::new(410.0, 20.0), rect, size, true).unwrap();
    assert_close(origin, Point::new(0.0, 0.0));

    // Visual bottom-right is raster top-right.
    let top_right = pointer_to_canvas(Point::new(410.0, 820.0), rect, size, true).unwrap();
    assert_close(top_right, Point::new(800.0, 0.0));

    // Visual top-left is raster bottom-left.
    let bottom_left = pointer_to_canvas(Point::new(10.0, 20.0), rect, size, true).unwrap();
    assert_close(bottom_left, Point::new(0.0, 400.0));

    let centre = pointer_to_canvas(Point::new(210.0, 420.0), rect, size, true).unwrap();
    assert_close(centre, Point::new(400.0, 200.0));
}

#[test]
fn rotated_mapping_handles_display_scaling() {
    // Same raster shown at half size.
    let rect = ClientRect::new(0.0, 0.0, 200.0, 400.0);
    let p = pointer_to_canvas(Point::new(200.0, 100.0), rect, Size::new(800, 400), true).unwrap();
    assert_close(p, Point::new(200.0, 0.0));
}

#[test]
fn degenerate_rect_maps_to_nothing() {
    let rect = ClientRect::new(0.0, 0.0, 0.0, 100.0);
    assert!(pointer_to_canvas(Point::new(1.0, 1.0), rect, Size::new(10, 10), false).is_none());
    assert!(pointer_to_canvas(Point::new(1.0, 1.0), rect, Size::new(10, 10), true).is_none());
}
