//! Rendering: presents surface rasters on canvas elements.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Surfaces paint into their own CPU rasters; presenting is a straight pixel
//! copy, so what the user sees is exactly what gets flattened and submitted.
//!
//! All fallible canvas calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::surface::Surface;
use crate::viewport::FullscreenLayout;

/// Copy `surface`'s pixels onto `canvas`, resizing its backing store to
/// match the raster first.
///
/// # Errors
///
/// Returns `Err` if the 2D context is unavailable or `putImageData` fails.
pub fn present(canvas: &HtmlCanvasElement, surface: &Surface) -> Result<(), JsValue> {
    let size = surface.size();
    if canvas.width() != size.width {
        canvas.set_width(size.width);
    }
    if canvas.height() != size.height {
        canvas.set_height(size.height);
    }
    let ctx = context_2d(canvas)?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(surface.raster().as_raw()), size.width, size.height)?;
    ctx.put_image_data(&data, 0.0, 0.0)
}

/// Show the fullscreen canvas at its layout orientation. Rotated layouts
/// turn the element 90° clockwise about its centre.
///
/// # Errors
///
/// Returns `Err` if a style property cannot be set.
pub fn apply_layout(canvas: &HtmlCanvasElement, layout: FullscreenLayout) -> Result<(), JsValue> {
    canvas.set_width(layout.size.width);
    canvas.set_height(layout.size.height);
    let style = canvas.style();
    style.set_property("transform-origin", "center center")?;
    style.set_property("transform", if layout.rotated { "rotate(90deg)" } else { "none" })
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}
