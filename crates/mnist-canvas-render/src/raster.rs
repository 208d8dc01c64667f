//! tiny-skia backed canvas.

use crate::png_codec::encode_png;
use kurbo::{BezPath, PathEl, Point, Rect};
use mnist_canvas_core::data_url::{PNG_MIME, encode_data_url};
use mnist_canvas_core::{Canvas, ColorValue, StrokeStyle, SurfaceError, SurfaceResult};
use tiny_skia::{BlendMode, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// A canvas rasterized on the CPU.
///
/// Starts empty (0x0); the first `resize` allocates pixels.
#[derive(Default)]
pub struct PixmapCanvas {
    pixmap: Option<Pixmap>,
}

impl PixmapCanvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas of the given size, fully transparent.
    pub fn with_size(width: u32, height: u32) -> SurfaceResult<Self> {
        let mut canvas = Self::new();
        canvas.resize(width, height)?;
        Ok(canvas)
    }

    /// Straight (non-premultiplied) RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight RGBA bytes of the whole surface.
    pub fn rgba(&self) -> Vec<u8> {
        let Some(pixmap) = &self.pixmap else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode the surface as PNG bytes.
    pub fn to_png(&self) -> SurfaceResult<Vec<u8>> {
        let (width, height) = self.size();
        if self.pixmap.is_none() {
            return Err(SurfaceError::Allocation { width, height });
        }
        encode_png(&self.rgba(), width, height).map_err(|e| SurfaceError::Encode(e.to_string()))
    }
}

fn solid_paint(color: &ColorValue) -> Paint<'static> {
    let [r, g, b, a] = color.rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(Point { x, y }) => builder.move_to(x as f32, y as f32),
            PathEl::LineTo(Point { x, y }) => builder.line_to(x as f32, y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

impl Canvas for PixmapCanvas {
    fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;
        self.pixmap = Some(pixmap);
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map_or((0, 0), |p| (p.width(), p.height()))
    }

    fn fill_rect(&mut self, rect: Rect, color: &ColorValue) {
        let (Some(pixmap), Some(rect)) = (self.pixmap.as_mut(), to_skia_rect(rect)) else {
            return;
        };
        pixmap.fill_rect(rect, &solid_paint(color), Transform::identity(), None);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let (Some(pixmap), Some(rect)) = (self.pixmap.as_mut(), to_skia_rect(rect)) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke_curve(&mut self, path: &BezPath, style: &StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping degenerate stroke");
            return;
        };
        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &path,
            &solid_paint(&style.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn to_image_string(&self) -> SurfaceResult<String> {
        Ok(encode_data_url(PNG_MIME, &self.to_png()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png_codec::decode_png;
    use mnist_canvas_core::data_url::decode_data_url;
    use mnist_canvas_core::input::{EventKind, InputEvent};
    use mnist_canvas_core::{
        AverageAdvanceMeasure, ButtonKind, DrawingResults, RecordingHost, Widget, WidgetContext,
        WidgetEvent,
    };
    use serde_json::json;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    struct Session {
        widget: Widget,
        canvas: PixmapCanvas,
        host: RecordingHost,
        measure: AverageAdvanceMeasure,
    }

    impl Session {
        fn new(width: u32, height: u32) -> Self {
            let mut session = Self {
                widget: Widget::new(),
                canvas: PixmapCanvas::new(),
                host: RecordingHost::new(),
                measure: AverageAdvanceMeasure::default(),
            };
            session.send(WidgetEvent::Render(json!({
                "strokeWidth": 8,
                "strokeColor": "#FFFFFF",
                "backgroundColor": "#000000",
                "canvasWidth": width,
                "canvasHeight": height,
                "buttonHeight": 30,
                "submitButtonLabel": "Submit",
                "submitBackgroundColor": "#FBFBFB",
                "clearButtonLabel": "Clear",
                "clearBackgroundColor": "#FBFBFB",
            })));
            session
        }

        fn send(&mut self, event: WidgetEvent) {
            let mut ctx = WidgetContext {
                canvas: &mut self.canvas,
                host: &mut self.host,
                measure: &self.measure,
            };
            self.widget.handle(event, &mut ctx);
        }

        fn mouse(&mut self, kind: EventKind, x: f64, y: f64) {
            self.send(WidgetEvent::Input(InputEvent::mouse(kind, x, y)));
        }
    }

    #[test]
    fn test_background_fill() {
        let session = Session::new(40, 30);
        assert_eq!(session.canvas.size(), (40, 30));
        assert_eq!(session.canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(session.canvas.pixel(39, 29), Some(BLACK));
        assert_eq!(session.canvas.pixel(40, 0), None);
    }

    #[test]
    fn test_clear_rect_is_transparent() {
        let mut canvas = PixmapCanvas::with_size(4, 4).unwrap();
        canvas.fill_rect(canvas.bounds(), &ColorValue::from_rgba8(255, 0, 0, 255));
        canvas.clear_rect(Rect::new(0.0, 0.0, 2.0, 4.0));
        assert_eq!(canvas.pixel(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(canvas.pixel(3, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_zero_size_is_an_error() {
        assert!(matches!(
            PixmapCanvas::with_size(0, 10),
            Err(SurfaceError::Allocation { width: 0, height: 10 })
        ));
        assert!(PixmapCanvas::new().to_image_string().is_err());
    }

    #[test]
    fn test_straight_stroke_submit_pixels() {
        let mut session = Session::new(100, 100);
        session.mouse(EventKind::MouseDown, 20.0, 50.0);
        for x in [30.0, 40.0, 50.0, 60.0, 70.0, 80.0] {
            session.mouse(EventKind::MouseMove, x, 50.0);
        }
        session.mouse(EventKind::MouseUp, 80.0, 50.0);
        session.send(WidgetEvent::Button(ButtonKind::Submit));

        let value = session.host.values().last().unwrap().clone();
        assert!(value.is_submitted);
        let url = value.image_data.clone().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let results = DrawingResults::from_value(Some(&value)).unwrap();
        let image = decode_png(&results.raw_image_bytes.unwrap()).unwrap();
        assert_eq!((image.width, image.height), (100, 100));

        // Along the stroke.
        for x in [20, 35, 50, 65, 80] {
            assert_eq!(image.pixel(x, 50), Some(WHITE), "pixel ({x}, 50)");
        }
        // Away from it.
        for (x, y) in [(5, 5), (50, 10), (50, 90), (95, 50), (5, 50)] {
            assert_eq!(image.pixel(x, y), Some(BLACK), "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_clear_twice_same_image() {
        let mut session = Session::new(50, 50);
        session.mouse(EventKind::MouseDown, 10.0, 10.0);
        session.mouse(EventKind::MouseMove, 40.0, 40.0);
        session.mouse(EventKind::MouseUp, 40.0, 40.0);

        session.send(WidgetEvent::Button(ButtonKind::Clear));
        let first = session.canvas.to_png().unwrap();
        session.send(WidgetEvent::Button(ButtonKind::Clear));
        let second = session.canvas.to_png().unwrap();

        assert_eq!(first, second);
        let image = decode_png(&first).unwrap();
        assert!(image.rgba.chunks_exact(4).all(|px| px == BLACK));

        let values: Vec<_> = session.host.values().cloned().collect();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| !v.is_submitted && v.image_data.is_none()));
    }

    #[test]
    fn test_data_url_round_trip_mime() {
        let canvas = PixmapCanvas::with_size(2, 2).unwrap();
        let url = canvas.to_image_string().unwrap();
        assert_eq!(decode_data_url(&url).unwrap().mime, PNG_MIME);
    }
}
