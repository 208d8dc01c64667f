//! DOM rendering of the submit/clear bar and the off-screen text probe.

use mnist_canvas_core::{ActionBar, ButtonSpec, TextMeasure};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// Element id of the button container.
pub const ACTION_BAR_ID: &str = "actionBar";

/// Measures label widths with a hidden `<span>` appended to the body.
pub struct DomTextMeasure {
    document: Document,
    font_family: String,
}

impl DomTextMeasure {
    /// Measure in the body's computed font family.
    pub fn new(document: Document) -> Self {
        let font_family = document
            .body()
            .and_then(|body| {
                let window = document.default_view()?;
                window.get_computed_style(&body).ok().flatten()
            })
            .and_then(|style| style.get_property_value("font-family").ok())
            .unwrap_or_default();
        Self {
            document,
            font_family,
        }
    }

    fn probe(&self, text: &str, font_size: u32) -> Result<f64, JsValue> {
        let body = self.document.body().ok_or("Document has no body")?;
        let span: HtmlElement = self.document.create_element("span")?.dyn_into()?;
        let style = span.style();
        style.set_property("font-family", &self.font_family)?;
        style.set_property("font-size", &format!("{font_size}px"))?;
        style.set_property("position", "absolute")?;
        style.set_property("left", "-9999px")?;
        style.set_property("white-space", "nowrap")?;
        span.set_text_content(Some(text));

        body.append_child(&span)?;
        let width = span.offset_width();
        span.remove();
        Ok(f64::from(width))
    }
}

impl TextMeasure for DomTextMeasure {
    fn measure(&self, text: &str, font_size: u32) -> Option<f64> {
        self.probe(text, font_size)
            .map_err(|e| log::warn!("Text probe failed: {e:?}"))
            .ok()
    }
}

/// Build the button container for `bar`. Buttons carry their kind's element id.
pub fn build_container(document: &Document, bar: &ActionBar) -> Result<HtmlElement, JsValue> {
    let container: HtmlElement = document.create_element("div")?.dyn_into()?;
    container.set_id(ACTION_BAR_ID);
    let style = container.style();
    style.set_property("display", "flex")?;
    style.set_property("justify-content", "space-between")?;
    style.set_property("margin-top", &format!("{}px", bar.margin_top))?;
    style.set_property("width", &format!("{}px", bar.width))?;

    for spec in bar.buttons() {
        container.append_child(&build_button(document, spec)?)?;
    }
    Ok(container)
}

fn build_button(document: &Document, spec: &ButtonSpec) -> Result<HtmlElement, JsValue> {
    let button: HtmlElement = document.create_element("button")?.dyn_into()?;
    button.set_id(spec.kind.element_id());
    button.set_text_content(Some(&spec.label));
    button.class_list().add_1("button")?;

    let style = button.style();
    style.set_property("height", &format!("{}px", spec.height))?;
    style.set_property("width", &format!("{}px", spec.width))?;
    style.set_property("font-size", &format!("{}px", spec.font_size))?;
    style.set_property("color", spec.text_color.css())?;
    style.set_property("background-color", spec.background.css())?;
    style.set_property("border-radius", &format!("{}px", spec.corner_radius))?;
    Ok(button)
}

/// Replace any previous bar and insert `container` right after the canvas.
pub fn mount_after(canvas: &Element, container: &HtmlElement) -> Result<(), JsValue> {
    if let Some(document) = canvas.owner_document() {
        if let Some(old) = document.get_element_by_id(ACTION_BAR_ID) {
            old.remove();
        }
    }
    canvas.after_with_node_1(container)
}
