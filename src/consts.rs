//! Shared numeric and color constants for the sketch crate.

use crate::color::Color;

// ── Surfaces ────────────────────────────────────────────────────

/// Raster width of the inline surface; also the resolution of the submitted PNG.
pub const INLINE_WIDTH: u32 = 400;

/// Raster height of the inline surface.
pub const INLINE_HEIGHT: u32 = 200;

/// Background flood color of every surface.
pub const BACKGROUND_COLOR: Color = Color::rgb(0x0a, 0x0a, 0x0a);

// ── Brush ───────────────────────────────────────────────────────

/// Paint color selected when a session opens.
pub const DEFAULT_BRUSH_COLOR: Color = Color::rgb(0xff, 0x00, 0x00);

/// Line width selected when a session opens.
pub const DEFAULT_LINE_WIDTH: f64 = 3.0;

/// Smallest line width any surface accepts.
pub const MIN_LINE_WIDTH: f64 = 1.0;

/// Largest line width on the inline surface.
pub const INLINE_MAX_LINE_WIDTH: f64 = 20.0;

/// Largest line width on the fullscreen surface.
pub const FULLSCREEN_MAX_LINE_WIDTH: f64 = 50.0;

/// Swatches offered by the fullscreen toolbar.
pub const PALETTE: [&str; 8] = [
    "#ff0000", "#ffffff", "#000000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff",
];

// ── Input ───────────────────────────────────────────────────────

/// Minimum spacing between admitted pointer-move events (~60 Hz).
pub const INPUT_THROTTLE_MS: f64 = 16.0;

// ── Fullscreen layout ───────────────────────────────────────────

/// Viewports at or below this CSS width are treated as narrow.
pub const NARROW_VIEWPORT_MAX_WIDTH: f64 = 768.0;

/// Minimum fullscreen raster width on wide viewports.
pub const FULLSCREEN_MIN_WIDTH: u32 = 1600;

/// Minimum fullscreen raster height on wide viewports.
pub const FULLSCREEN_MIN_HEIGHT: u32 = 900;

/// Padding subtracted from each axis on wide viewports (20 px per side).
pub const WIDE_PADDING_PX: f64 = 40.0;

/// Width of the floating tool column on narrow viewports.
pub const NARROW_TOOLBAR_WIDTH_PX: f64 = 80.0;

/// Horizontal margin next to the tool column on narrow viewports.
pub const NARROW_SIDE_MARGIN_PX: f64 = 20.0;

/// Vertical space reserved for floating controls on narrow viewports.
pub const NARROW_CONTROLS_HEIGHT_PX: f64 = 120.0;
