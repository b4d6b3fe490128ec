//! Surface transfer: moving a drawing between the inline and fullscreen
//! surfaces.
//!
//! Every transfer runs the same pipeline: flatten the source to PNG, scale
//! its history onto the receiving size, then [`load_into`] the receiver. The
//! flattened image is stretched underneath as a backdrop and the scaled
//! history is replayed over it. Replay is authoritative; the backdrop only
//! shows when there is no history to replay.
//!
//! The pipeline is synchronous, so it always finishes before the next input
//! event reaches the receiving surface.

#[cfg(test)]
#[path = "transfer_test.rs"]
mod transfer_test;

use crate::config::SketchConfig;
use crate::error::SketchResult;
use crate::geom::Scale;
use crate::history::History;
use crate::raster::decode_png;
use crate::surface::Surface;
use crate::viewport::FullscreenLayout;

/// What a transfer did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferOutcome {
    /// Factors applied to every history coordinate.
    pub scale: Scale,
    /// Entries replayed onto the receiver.
    pub replayed: usize,
    /// Whether the flattened backdrop decoded and was drawn.
    pub backdrop_drawn: bool,
}

/// Build the fullscreen surface for `layout` from `source`.
///
/// The new surface gets the source's brush (width clamped to fullscreen
/// limits), the source raster stretched as backdrop, and the source history
/// scaled per axis. `source` is not modified.
///
/// # Errors
///
/// Fails if the layout size is zero or the source cannot be encoded.
pub fn expand(source: &Surface, layout: FullscreenLayout, config: &SketchConfig) -> SketchResult<(Surface, TransferOutcome)> {
    let mut target = Surface::fullscreen(config, layout.size, layout.rotated)?;
    target.set_tool_state(source.tool_state());

    let backdrop = flatten(source)?;
    let scale = Scale::between(source.size(), target.size());
    let outcome = load_into(&mut target, &backdrop, source.history(), scale);
    tracing::info!(
        width = layout.size.width,
        height = layout.size.height,
        rotated = layout.rotated,
        replayed = outcome.replayed,
        "expanded to fullscreen"
    );
    Ok((target, outcome))
}

/// Commit the fullscreen surface back into `source`.
///
/// The source's raster and history are replaced by the target's, scaled back
/// to the source size. The target's paint color and line width are carried
/// over (width clamped to the source's limits); the source keeps its tool.
/// The caller discards the target afterwards.
///
/// # Errors
///
/// Fails if the target cannot be encoded. `source` is unchanged in that case.
pub fn apply(source: &mut Surface, target: &Surface) -> SketchResult<TransferOutcome> {
    let backdrop = flatten(target)?;
    let scale = Scale::between(target.size(), source.size());
    let outcome = load_into(source, &backdrop, target.history(), scale);

    let brush = target.tool_state();
    source.set_color(brush.color);
    source.set_line_width(brush.line_width);
    tracing::info!(replayed = outcome.replayed, "applied fullscreen drawing");
    Ok(outcome)
}

/// Discard the fullscreen surface. The inline surface is untouched.
pub fn cancel(target: Surface) {
    tracing::debug!(entries = target.history().committed().len(), "fullscreen drawing discarded");
}

/// Encode the surface's current raster as PNG.
///
/// # Errors
///
/// Returns [`crate::error::SketchError::Encode`] if encoding fails.
pub fn flatten(surface: &Surface) -> SketchResult<Vec<u8>> {
    surface.raster().encode_png()
}

/// Resize the fullscreen surface in place for a new viewport layout.
///
/// Pixels are kept unscaled at the origin and history is not rescaled, so
/// later undo/redo replays at the old coordinates.
///
/// # Errors
///
/// Fails if the layout size is zero; the surface is unchanged.
pub fn resize_live(target: &mut Surface, layout: FullscreenLayout) -> SketchResult<()> {
    if target.size() == layout.size && target.rotated() == layout.rotated {
        return Ok(());
    }
    target.resize_in_place(layout.size, layout.rotated)?;
    tracing::debug!(width = layout.size.width, height = layout.size.height, "fullscreen resized in place");
    Ok(())
}

/// Load flattened `backdrop` bytes and `history` scaled by `scale` into
/// `receiver`.
///
/// If the backdrop does not decode, the receiver keeps its pre-transfer
/// pixels and the failure is logged; history is still replaced and replayed.
pub fn load_into(receiver: &mut Surface, backdrop: &[u8], history: &History, scale: Scale) -> TransferOutcome {
    let entries = history.scaled(scale);
    let replayed = entries.len();
    let backdrop_drawn = match decode_png(backdrop) {
        Ok(image) => {
            receiver.replace_content(Some(&image), entries);
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "backdrop decode failed, keeping pre-transfer raster");
            receiver.replace_content(None, entries);
            false
        }
    };
    TransferOutcome { scale, replayed, backdrop_drawn }
}
