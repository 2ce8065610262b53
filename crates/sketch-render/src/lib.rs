//! Software rendering for Sketchpad.
//!
//! `RasterSurface` implements the core `Surface` trait over an in-memory RGBA
//! buffer. Native hosts and the test suites draw into it; the browser uses the
//! canvas-backed surface in `sketch-wasm` instead.

pub mod raster;
pub mod text;

pub use raster::{RasterSnapshot, RasterSurface};
pub use text::FontBook;
