//! Runtime configuration.
//!
//! The host may pass a JSON object to override any field; missing fields take
//! the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts;
use crate::error::{SketchError, SketchResult};
use crate::geom::Size;
use crate::input::{BrushLimits, Tool, ToolState};

/// Engine configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Raster size of the inline surface and of the submitted PNG.
    pub inline_size: Size,
    pub background: Color,
    pub brush_color: Color,
    pub line_width: f64,
    pub min_line_width: f64,
    pub inline_max_line_width: f64,
    pub fullscreen_max_line_width: f64,
    /// Minimum spacing between admitted pointer-move events.
    pub throttle_ms: f64,
    /// Minimum fullscreen raster size on wide viewports.
    pub fullscreen_min_size: Size,
    /// Viewports at or below this CSS width are narrow.
    pub narrow_max_width: f64,
    pub wide_padding: f64,
    pub narrow_toolbar_width: f64,
    pub narrow_side_margin: f64,
    pub narrow_controls_height: f64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            inline_size: Size::new(consts::INLINE_WIDTH, consts::INLINE_HEIGHT),
            background: consts::BACKGROUND_COLOR,
            brush_color: consts::DEFAULT_BRUSH_COLOR,
            line_width: consts::DEFAULT_LINE_WIDTH,
            min_line_width: consts::MIN_LINE_WIDTH,
            inline_max_line_width: consts::INLINE_MAX_LINE_WIDTH,
            fullscreen_max_line_width: consts::FULLSCREEN_MAX_LINE_WIDTH,
            throttle_ms: consts::INPUT_THROTTLE_MS,
            fullscreen_min_size: Size::new(consts::FULLSCREEN_MIN_WIDTH, consts::FULLSCREEN_MIN_HEIGHT),
            narrow_max_width: consts::NARROW_VIEWPORT_MAX_WIDTH,
            wide_padding: consts::WIDE_PADDING_PX,
            narrow_toolbar_width: consts::NARROW_TOOLBAR_WIDTH_PX,
            narrow_side_margin: consts::NARROW_SIDE_MARGIN_PX,
            narrow_controls_height: consts::NARROW_CONTROLS_HEIGHT_PX,
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Config`] for malformed JSON and
    /// [`SketchError::ConfigValue`] when [`Self::validate`] rejects it.
    pub fn from_json(raw: &str) -> SketchResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that sizes are non-zero and width limits are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::ConfigValue`] naming the first bad field.
    pub fn validate(&self) -> SketchResult<()> {
        if self.inline_size.width == 0 || self.inline_size.height == 0 {
            return Err(SketchError::ConfigValue("inline_size must be non-zero".into()));
        }
        if self.min_line_width.is_nan() || self.min_line_width <= 0.0 {
            return Err(SketchError::ConfigValue("min_line_width must be positive".into()));
        }
        if self.inline_max_line_width < self.min_line_width || self.fullscreen_max_line_width < self.min_line_width {
            return Err(SketchError::ConfigValue("max line widths must be >= min_line_width".into()));
        }
        if !self.throttle_ms.is_finite() || self.throttle_ms < 0.0 {
            return Err(SketchError::ConfigValue("throttle_ms must be a non-negative number".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn inline_limits(&self) -> BrushLimits {
        BrushLimits { min: self.min_line_width, max: self.inline_max_line_width }
    }

    #[must_use]
    pub fn fullscreen_limits(&self) -> BrushLimits {
        BrushLimits { min: self.min_line_width, max: self.fullscreen_max_line_width }
    }

    /// The brush a new session starts with.
    #[must_use]
    pub fn initial_tool_state(&self) -> ToolState {
        ToolState {
            tool: Tool::Pen,
            color: self.brush_color,
            line_width: self.inline_limits().clamp(self.line_width),
        }
    }
}
