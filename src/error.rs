//! Error type shared by every fallible operation in the crate.

/// Errors produced while building surfaces, parsing input or encoding images.
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// A surface was requested with a zero width or height.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A color string is not `#rgb` or `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    /// Flattening a raster to PNG failed.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    /// A PNG handed back to the transfer pipeline could not be read.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    /// The JSON configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    /// The configuration parsed but holds unusable values.
    #[error("invalid config value: {0}")]
    ConfigValue(String),
}

/// Convenience alias used throughout the crate.
pub type SketchResult<T> = Result<T, SketchError>;
