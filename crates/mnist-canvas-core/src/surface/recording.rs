//! In-memory canvas that records draw calls.

use super::{Canvas, SurfaceResult};
use crate::color::ColorValue;
use crate::data_url::encode_data_url;
use crate::drawing::StrokeStyle;
use kurbo::{BezPath, Rect};

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Fill { rect: Rect, color: ColorValue },
    Clear { rect: Rect },
    Stroke { path: BezPath, style: StrokeStyle },
}

/// Canvas for testing and headless use. No pixels, just the call log.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    /// Create an empty 0x0 canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls since the last resize.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Calls still visible: everything from the last opaque full-surface fill or clear.
    pub fn visible_ops(&self) -> &[CanvasOp] {
        let bounds = self.bounds();
        let start = self
            .ops
            .iter()
            .rposition(|op| match op {
                CanvasOp::Fill { rect, color } => *rect == bounds && color.rgba8()[3] == 255,
                CanvasOp::Clear { rect } => *rect == bounds,
                CanvasOp::Stroke { .. } => false,
            })
            .unwrap_or(0);
        &self.ops[start..]
    }

    /// Number of strokes currently visible.
    pub fn visible_strokes(&self) -> usize {
        self.visible_ops()
            .iter()
            .filter(|op| matches!(op, CanvasOp::Stroke { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        self.width = width;
        self.height = height;
        self.ops.clear();
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: &ColorValue) {
        self.ops.push(CanvasOp::Fill {
            rect,
            color: color.clone(),
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(CanvasOp::Clear { rect });
    }

    fn stroke_curve(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.ops.push(CanvasOp::Stroke {
            path: path.clone(),
            style: style.clone(),
        });
    }

    fn to_image_string(&self) -> SurfaceResult<String> {
        let description = format!("{}x{} {:?}", self.width, self.height, self.visible_ops());
        Ok(encode_data_url("text/plain", description.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn black() -> ColorValue {
        ColorValue::from_rgba8(0, 0, 0, 255)
    }

    #[test]
    fn test_full_fill_hides_earlier_ops() {
        let mut canvas = RecordingCanvas::new();
        canvas.resize(10, 10).unwrap();
        let style = StrokeStyle {
            width: 2.0,
            color: black(),
        };
        canvas.stroke_curve(
            &crate::drawing::smoothed_segment(Point::ZERO, Point::new(5.0, 5.0)),
            &style,
        );
        assert_eq!(canvas.visible_strokes(), 1);

        canvas.fill_rect(canvas.bounds(), &black());
        assert_eq!(canvas.visible_strokes(), 0);
        assert_eq!(canvas.visible_ops().len(), 1);
        assert_eq!(canvas.ops().len(), 2);
    }

    #[test]
    fn test_partial_fill_does_not_hide() {
        let mut canvas = RecordingCanvas::new();
        canvas.resize(10, 10).unwrap();
        canvas.clear_rect(canvas.bounds());
        canvas.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &black());
        assert_eq!(canvas.visible_ops().len(), 2);
    }

    #[test]
    fn test_resize_discards() {
        let mut canvas = RecordingCanvas::new();
        canvas.resize(4, 4).unwrap();
        canvas.fill_rect(canvas.bounds(), &black());
        canvas.resize(8, 6).unwrap();
        assert!(canvas.ops().is_empty());
        assert_eq!(canvas.size(), (8, 6));
        assert_eq!(canvas.bounds(), Rect::new(0.0, 0.0, 8.0, 6.0));
    }
}
