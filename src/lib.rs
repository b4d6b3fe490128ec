//! Freehand drawing core for the retro inbox.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of an anonymous visitor's sketch: translating raw pointer
//! events into strokes and shapes, keeping undo/redo history per surface,
//! moving the drawing between the small inline canvas and the enlarged
//! fullscreen canvas (rotated on narrow screens), and flattening the result to
//! a single PNG. The host JavaScript layer only wires DOM events to the engine
//! and submits the resulting attachment with the message text.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] session state machine |
//! | [`surface`] | One editable surface: raster, history, tool state, stroke recorder |
//! | [`transfer`] | Expand / apply / cancel / flatten between surfaces of different sizes |
//! | [`history`] | Stroke, shape and fill entries plus the undo/redo stacks |
//! | [`replay`] | Paints history entries onto a raster |
//! | [`raster`] | Owned RGBA pixel buffer, painting primitives and PNG codec |
//! | [`input`] | Tools, tool state, capture state machine and input throttle |
//! | [`viewport`] | Fullscreen layout and pointer-to-raster coordinate mapping |
//! | [`geom`] | Points, sizes and scale factors |
//! | [`color`] | Hex color parsing |
//! | [`config`] | Runtime configuration with defaults from [`consts`] |
//! | [`error`] | Crate error type |
//! | [`render`] | Presents rasters on `<canvas>` elements |
//! | [`consts`] | Shared constants (sizes, limits, palette) |

pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod history;
pub mod input;
pub mod raster;
pub mod render;
pub mod replay;
pub mod surface;
pub mod transfer;
pub mod viewport;
