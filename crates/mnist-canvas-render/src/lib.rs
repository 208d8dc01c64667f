//! MNIST Canvas Render Library
//!
//! A CPU-rasterized [`Canvas`](mnist_canvas_core::Canvas) for headless use
//! and tests, plus the PNG codec used for submitted drawings.

mod png_codec;
mod raster;

pub use png_codec::{DecodedImage, RenderError, RenderResult, decode_png, encode_png};
pub use raster::PixmapCanvas;
