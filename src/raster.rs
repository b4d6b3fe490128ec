//! Raster surface: an owned opaque RGBA buffer and the painting primitives the
//! recorder and replay need.
//!
//! Pixels are sampled at their centres (`x + 0.5`, `y + 0.5`) and painted
//! without anti-aliasing, so replaying the same history at the same size is
//! bit-exact. All painting clips to the buffer; geometry that falls entirely
//! outside is a no-op.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::color::Color;
use crate::error::{SketchError, SketchResult};
use crate::geom::{Point, Size, pixel_coord};

/// Smallest half-width used when painting so hairlines still cover a pixel.
const MIN_HALF_WIDTH: f64 = 0.5;

/// Pixel copy of a raster taken before a shape preview or a live resize.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSnapshot {
    image: RgbaImage,
}

impl RasterSnapshot {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

/// An opaque pixel buffer with a fixed background color.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
    background: Color,
}

impl Raster {
    /// Create a raster flooded with `background`.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidDimensions`] when either axis is zero.
    pub fn new(size: Size, background: Color) -> SketchResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(SketchError::InvalidDimensions { width: size.width, height: size.height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(size.width, size.height, background.to_rgba()),
            background,
        })
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|px| Color::from_rgba(*px))
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    // --- Painting ---

    /// Flood the whole raster with `color`.
    pub fn fill(&mut self, color: Color) {
        let px = color.to_rgba();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Reset to the background color.
    pub fn clear(&mut self) {
        self.fill(self.background);
    }

    /// Paint a round-capped line of `line_width` from `a` to `b`. A zero-length
    /// segment paints a dot.
    pub fn stroke_segment(&mut self, a: Point, b: Point, color: Color, line_width: f64) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let half = half_width(line_width);
        let bounds = (
            a.x.min(b.x) - half,
            a.y.min(b.y) - half,
            a.x.max(b.x) + half,
            a.y.max(b.y) + half,
        );
        self.paint_where(bounds, color, |c| c.distance_to_segment(a, b) <= half);
    }

    /// Paint a single round dot centred on `at`.
    pub fn dot(&mut self, at: Point, color: Color, line_width: f64) {
        self.stroke_segment(at, at, color, line_width);
    }

    /// Outline the rectangle with opposite corners `start` and `end`.
    pub fn stroke_rect(&mut self, start: Point, end: Point, color: Color, line_width: f64) {
        let corners = [
            start,
            Point::new(end.x, start.y),
            end,
            Point::new(start.x, end.y),
        ];
        for (&from, &to) in corners.iter().zip(corners.iter().cycle().skip(1)) {
            self.stroke_segment(from, to, color, line_width);
        }
    }

    /// Outline the circle centred on `center` with the given `radius`.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, line_width: f64) {
        if !center.is_finite() || !radius.is_finite() {
            return;
        }
        let half = half_width(line_width);
        let reach = radius + half;
        let bounds = (center.x - reach, center.y - reach, center.x + reach, center.y + reach);
        self.paint_where(bounds, color, |c| (c.distance(center) - radius).abs() <= half);
    }

    /// Set every pixel inside `bounds` (min x, min y, max x, max y) whose centre
    /// satisfies `covered`.
    fn paint_where(&mut self, bounds: (f64, f64, f64, f64), color: Color, covered: impl Fn(Point) -> bool) {
        let (w, h) = (f64::from(self.image.width()), f64::from(self.image.height()));
        let x0 = bounds.0.floor().clamp(0.0, w);
        let y0 = bounds.1.floor().clamp(0.0, h);
        let x1 = bounds.2.ceil().clamp(0.0, w);
        let y1 = bounds.3.ceil().clamp(0.0, h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let px = color.to_rgba();
        for y in pixel_coord(y0)..pixel_coord(y1) {
            for x in pixel_coord(x0)..pixel_coord(x1) {
                if covered(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)) {
                    self.image.put_pixel(x, y, px);
                }
            }
        }
    }

    // --- Snapshots ---

    #[must_use]
    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot { image: self.image.clone() }
    }

    /// Copy `snapshot` back at the origin without scaling. Parts that do not
    /// fit are clipped; uncovered parts keep their current pixels.
    pub fn restore(&mut self, snapshot: &RasterSnapshot) {
        imageops::replace(&mut self.image, &snapshot.image, 0, 0);
    }

    /// Change the raster resolution in place. Existing pixels are kept at the
    /// origin unscaled; newly exposed area is background.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidDimensions`] when either axis is zero.
    pub fn resize(&mut self, size: Size) -> SketchResult<()> {
        if size == self.size() {
            return Ok(());
        }
        let snapshot = self.snapshot();
        *self = Self::new(size, self.background)?;
        self.restore(&snapshot);
        Ok(())
    }

    /// Draw `image` stretched over the whole raster.
    pub fn draw_stretched(&mut self, image: &RgbaImage) {
        let size = self.size();
        if image.dimensions() == (size.width, size.height) {
            self.image.copy_from_slice(image.as_raw());
            return;
        }
        self.image = imageops::resize(image, size.width, size.height, FilterType::Triangle);
    }

    // --- Codec ---

    /// Encode the raster as a lossless PNG.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(SketchError::Encode)?;
        Ok(buf)
    }
}

/// Decode PNG bytes into an RGBA buffer.
///
/// # Errors
///
/// Returns [`SketchError::Decode`] for anything that is not a readable PNG.
pub fn decode_png(bytes: &[u8]) -> SketchResult<RgbaImage> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(SketchError::Decode)?;
    Ok(decoded.to_rgba8())
}

fn half_width(line_width: f64) -> f64 {
    if line_width.is_finite() {
        (line_width / 2.0).max(MIN_HALF_WIDTH)
    } else {
        MIN_HALF_WIDTH
    }
}
