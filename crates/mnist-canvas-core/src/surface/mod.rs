//! Drawing surface abstraction.
//!
//! The widget never touches a platform canvas directly. It talks to a
//! [`Canvas`], implemented by the browser's 2D context, by the software
//! rasterizer in `mnist-canvas-render`, and by [`RecordingCanvas`] for tests.

mod recording;

pub use recording::{CanvasOp, RecordingCanvas};

use crate::color::ColorValue;
use crate::drawing::StrokeStyle;
use kurbo::{BezPath, Rect};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cannot allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },
    #[error("Image encoding failed: {0}")]
    Encode(String),
    #[error("Canvas backend error: {0}")]
    Backend(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Capabilities the widget needs from a drawing surface.
pub trait Canvas {
    /// Reallocate the surface. Previous contents are discarded.
    fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()>;

    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill a rectangle with an opaque or translucent color.
    fn fill_rect(&mut self, rect: Rect, color: &ColorValue);

    /// Reset a rectangle to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Stroke a path with round joins and caps.
    fn stroke_curve(&mut self, path: &BezPath, style: &StrokeStyle);

    /// Encode the current contents as a data URI.
    fn to_image_string(&self) -> SurfaceResult<String>;

    /// The whole surface as a rectangle.
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
    }
}
