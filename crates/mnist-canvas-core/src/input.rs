//! Pointer and touch input on the canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The kinds of device events the canvas listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl EventKind {
    /// Every kind, in registration order.
    pub const ALL: [EventKind; 7] = [
        EventKind::MouseDown,
        EventKind::MouseMove,
        EventKind::MouseUp,
        EventKind::MouseLeave,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
    ];

    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseLeave => "mouseleave",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
        }
    }

    /// Look up a kind by DOM event type name.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.dom_name() == name)
    }

    /// Whether this kind starts a stroke.
    pub fn is_press(self) -> bool {
        matches!(self, EventKind::MouseDown | EventKind::TouchStart)
    }

    /// Whether this kind continues a stroke.
    pub fn is_motion(self) -> bool {
        matches!(self, EventKind::MouseMove | EventKind::TouchMove)
    }

    /// Whether this kind ends a stroke.
    pub fn is_release(self) -> bool {
        matches!(
            self,
            EventKind::MouseUp | EventKind::MouseLeave | EventKind::TouchEnd
        )
    }

    /// Whether this kind comes from a touch screen.
    pub fn is_touch(self) -> bool {
        matches!(
            self,
            EventKind::TouchStart | EventKind::TouchMove | EventKind::TouchEnd
        )
    }

    /// Whether the browser's default handling (scroll, text selection) must be cancelled.
    pub fn suppresses_default(self) -> bool {
        self.is_press()
    }
}

/// A device event in the coordinates the browser reports it in.
///
/// Mouse events carry the canvas-local offset. Touch events carry the
/// client coordinates of all active touches together with the canvas's
/// bounding-rect origin, since touches have no offset of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Mouse {
        kind: EventKind,
        offset: Point,
    },
    Touch {
        kind: EventKind,
        touches: Vec<Point>,
        canvas_origin: Point,
    },
}

impl InputEvent {
    /// Mouse event at a canvas-local offset.
    pub fn mouse(kind: EventKind, x: f64, y: f64) -> Self {
        InputEvent::Mouse {
            kind,
            offset: Point::new(x, y),
        }
    }

    /// Single-finger touch event for a canvas whose top-left sits at `canvas_origin`.
    pub fn touch(kind: EventKind, client: Point, canvas_origin: Point) -> Self {
        InputEvent::Touch {
            kind,
            touches: vec![client],
            canvas_origin,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Mouse { kind, .. } | InputEvent::Touch { kind, .. } => *kind,
        }
    }

    /// Position of the event in canvas pixel space.
    ///
    /// Touches use the first active touch. A touch event without touches
    /// (the usual shape of `touchend`) has no position.
    pub fn canvas_point(&self) -> Option<Point> {
        match self {
            InputEvent::Mouse { offset, .. } => Some(*offset),
            InputEvent::Touch {
                touches,
                canvas_origin,
                ..
            } => touches
                .first()
                .map(|t| Point::new(t.x - canvas_origin.x, t.y - canvas_origin.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_point_is_offset() {
        let event = InputEvent::mouse(EventKind::MouseDown, 12.0, 34.0);
        assert_eq!(event.canvas_point(), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_touch_point_is_translated() {
        let event = InputEvent::Touch {
            kind: EventKind::TouchMove,
            touches: vec![Point::new(110.0, 60.0), Point::new(500.0, 500.0)],
            canvas_origin: Point::new(100.0, 50.0),
        };
        assert_eq!(event.canvas_point(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_touch_without_touches_has_no_point() {
        let event = InputEvent::Touch {
            kind: EventKind::TouchMove,
            touches: Vec::new(),
            canvas_origin: Point::ZERO,
        };
        assert_eq!(event.canvas_point(), None);
    }

    #[test]
    fn test_dom_name_table() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_dom_name(kind.dom_name()), Some(kind));
        }
        assert_eq!(EventKind::from_dom_name("click"), None);
    }

    #[test]
    fn test_kind_classes() {
        assert!(EventKind::TouchStart.suppresses_default());
        assert!(!EventKind::MouseMove.suppresses_default());
        assert!(EventKind::MouseLeave.is_release());
        assert!(EventKind::TouchMove.is_motion());
        assert!(EventKind::TouchEnd.is_touch());
        assert!(!EventKind::MouseUp.is_touch());
    }

    #[test]
    fn test_event_json_shape() {
        let event: InputEvent = serde_json::from_str(
            r#"{"type":"mouse","kind":"MouseDown","offset":{"x":1.0,"y":2.0}}"#,
        )
        .unwrap();
        assert_eq!(event, InputEvent::mouse(EventKind::MouseDown, 1.0, 2.0));
    }
}
