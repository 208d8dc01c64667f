//! Freehand stroke state and smoothing.

use crate::color::ColorValue;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// One recorded start→end sample of pointer motion while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeSegment {
    pub start: Point,
    pub end: Point,
}

/// Stroke paint. Joins and caps are always round.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: ColorValue,
}

/// Build the smoothed path from the last recorded point to a new one.
///
/// Two quadratic curves meet at the midpoint: the first uses `last` as its
/// control point, the second the midpoint computed from the opposite end.
/// The midpoints coincide under plain averaging but are kept apart so a
/// weighted variant only has to change one of them.
pub fn smoothed_segment(last: Point, new: Point) -> BezPath {
    let mid_forward = last.midpoint(new);
    let mid_backward = new.midpoint(last);

    let mut path = BezPath::new();
    path.move_to(last);
    path.quad_to(last, mid_forward);
    path.quad_to(mid_backward, new);
    path
}

/// Pointer tracking and the stroke log for the current drawing.
///
/// The canvas pixels are the authoritative drawing; the segment log is kept
/// for inspection only and is never replayed.
#[derive(Debug, Clone, Default)]
pub struct DrawingState {
    is_drawing: bool,
    last_point: Option<Point>,
    segments: Vec<StrokeSegment>,
}

impl DrawingState {
    /// Create an idle state with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down: start drawing at `point`.
    pub fn begin(&mut self, point: Point) {
        self.is_drawing = true;
        self.last_point = Some(point);
    }

    /// Pointer moved to `point`.
    ///
    /// Returns the smoothed path to paint, or `None` when not drawing.
    pub fn extend(&mut self, point: Point) -> Option<BezPath> {
        if !self.is_drawing {
            return None;
        }
        let last = self.last_point?;
        let path = smoothed_segment(last, point);
        self.last_point = Some(point);
        self.segments.push(StrokeSegment {
            start: last,
            end: point,
        });
        Some(path)
    }

    /// Pointer released or left. Returns whether a stroke was in progress.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.is_drawing, false)
    }

    /// Empty the stroke log.
    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }

    /// Back to a fresh idle state (used on reconfiguration).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    /// Segments recorded since the last clear, in arrival order.
    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_smoothed_segment_structure() {
        let path = smoothed_segment(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        let elements: Vec<PathEl> = path.elements().to_vec();

        assert_eq!(
            elements,
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(0.0, 0.0), Point::new(5.0, 10.0)),
                PathEl::QuadTo(Point::new(5.0, 10.0), Point::new(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_move_without_begin_is_ignored() {
        let mut state = DrawingState::new();
        assert!(state.extend(Point::new(5.0, 5.0)).is_none());
        assert!(state.segments().is_empty());
    }

    #[test]
    fn test_stroke_logs_segments() {
        let mut state = DrawingState::new();
        state.begin(Point::new(1.0, 1.0));
        assert!(state.extend(Point::new(2.0, 3.0)).is_some());
        assert!(state.extend(Point::new(4.0, 4.0)).is_some());

        assert_eq!(
            state.segments(),
            &[
                StrokeSegment {
                    start: Point::new(1.0, 1.0),
                    end: Point::new(2.0, 3.0)
                },
                StrokeSegment {
                    start: Point::new(2.0, 3.0),
                    end: Point::new(4.0, 4.0)
                },
            ]
        );
        assert_eq!(state.last_point(), Some(Point::new(4.0, 4.0)));
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut state = DrawingState::new();
        assert!(!state.end());
        state.begin(Point::ZERO);
        assert!(state.end());
        assert!(!state.end());
        assert!(state.extend(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_clear_keeps_pointer_state() {
        let mut state = DrawingState::new();
        state.begin(Point::ZERO);
        state.extend(Point::new(3.0, 3.0));
        state.clear_segments();
        assert!(state.segments().is_empty());
        assert!(state.is_drawing());

        state.reset();
        assert!(!state.is_drawing());
        assert_eq!(state.last_point(), None);
    }
}
