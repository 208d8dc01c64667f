//! `<canvas>` element behind the [`Canvas`] trait.

use kurbo::{BezPath, PathEl, Rect};
use mnist_canvas_core::{Canvas, ColorValue, StrokeStyle, SurfaceError, SurfaceResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Element id of the drawing canvas in the component page.
pub const CANVAS_ID: &str = "canvas";

/// The page's drawing canvas and its 2D context.
pub struct DomCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl DomCanvas {
    /// Use the page's `#canvas` element, creating one if the page has none.
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        let element: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el.dyn_into()?,
            None => {
                let el: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                el.set_id(CANVAS_ID);
                document
                    .body()
                    .ok_or("Document has no body")?
                    .append_child(&el)?;
                el
            }
        };
        let ctx: CanvasRenderingContext2d = element
            .get_context("2d")?
            .ok_or("2D context unavailable")?
            .dyn_into()?;

        Ok(Self { element, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }
}

impl Canvas for DomCanvas {
    fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        self.element.set_width(width);
        self.element.set_height(height);
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.element.width(), self.element.height())
    }

    fn fill_rect(&mut self, rect: Rect, color: &ColorValue) {
        self.ctx.set_fill_style_str(color.css());
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn stroke_curve(&mut self, path: &BezPath, style: &StrokeStyle) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
        ctx.set_stroke_style_str(style.color.css());
        ctx.set_line_width(style.width);
        ctx.set_line_join("round");
        ctx.set_line_cap("round");
        ctx.stroke();
    }

    fn to_image_string(&self) -> SurfaceResult<String> {
        self.element
            .to_data_url()
            .map_err(|e| SurfaceError::Backend(format!("{e:?}")))
    }
}
