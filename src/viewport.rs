//! Viewport geometry: fullscreen layout selection and pointer mapping.
//!
//! Pure functions of the host's viewport metrics. The rotated layout shows a
//! raster turned 90° clockwise so a landscape drawing fills a portrait phone;
//! [`pointer_to_canvas`] undoes that rotation when mapping client coordinates.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::config::SketchConfig;
use crate::geom::{ClientRect, Point, Size, pixel_coord};

/// Viewport metrics reported by the host, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Height of the fullscreen toolbar in the wide layout.
    pub toolbar_height: f64,
    /// Touch-capable device.
    pub touch: bool,
    /// The host can enter browser fullscreen.
    pub fullscreen_supported: bool,
}

impl Viewport {
    /// Narrow or touch viewports get the rotated layout.
    #[must_use]
    pub fn is_narrow(&self, config: &SketchConfig) -> bool {
        self.width <= config.narrow_max_width || self.touch
    }
}

/// Raster size and orientation of a fullscreen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullscreenLayout {
    pub size: Size,
    pub rotated: bool,
}

/// Whether expanding is allowed. Small viewports need the fullscreen API.
#[must_use]
pub fn can_expand(viewport: &Viewport, config: &SketchConfig) -> bool {
    viewport.width > config.narrow_max_width || viewport.fullscreen_supported
}

/// Pick the fullscreen raster size for `viewport`.
///
/// Wide layouts fill the viewport less padding, never smaller than the
/// configured minimum. Narrow layouts take the viewport height as raster
/// width and the viewport width as raster height, and are shown rotated.
#[must_use]
pub fn fullscreen_layout(viewport: &Viewport, config: &SketchConfig) -> FullscreenLayout {
    if viewport.is_narrow(config) {
        let width = viewport.height - config.narrow_controls_height;
        let height = viewport.width - config.narrow_toolbar_width - config.narrow_side_margin;
        return FullscreenLayout { size: Size::new(to_px(width), to_px(height)), rotated: true };
    }
    let min = config.fullscreen_min_size;
    let width = (viewport.width - config.wide_padding).max(f64::from(min.width));
    let height = (viewport.height - viewport.toolbar_height - config.wide_padding).max(f64::from(min.height));
    FullscreenLayout { size: Size::new(to_px(width), to_px(height)), rotated: false }
}

/// Map a client-space pointer position onto raster coordinates.
///
/// `rect` is the element's on-screen bounding box. For a rotated surface
/// that box already has the visual (swapped) axes, so the position is taken
/// relative to its centre, rotated back by -90°, re-offset by the unrotated
/// half extents and only then scaled. Returns `None` for a degenerate rect.
#[must_use]
pub fn pointer_to_canvas(client: Point, rect: ClientRect, size: Size, rotated: bool) -> Option<Point> {
    if !rect.has_area() || !client.is_finite() {
        return None;
    }
    let (w, h) = (f64::from(size.width), f64::from(size.height));

    if !rotated {
        return Some(Point::new((client.x - rect.left) * w / rect.width, (client.y - rect.top) * h / rect.height));
    }

    let x = client.x - rect.left - rect.width / 2.0;
    let y = client.y - rect.top - rect.height / 2.0;
    let (rx, ry) = (y, -x);
    let scale_x = w / rect.height;
    let scale_y = h / rect.width;
    Some(Point::new((rx + rect.height / 2.0) * scale_x, (ry + rect.width / 2.0) * scale_y))
}

fn to_px(value: f64) -> u32 {
    if value.is_finite() { pixel_coord(value.floor().clamp(1.0, f64::from(u32::MAX))) } else { 1 }
}
