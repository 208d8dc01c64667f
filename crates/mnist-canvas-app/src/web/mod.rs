//! WebAssembly entry point: wires the widget to the DOM and the Streamlit host.

mod action_bar;
mod dom_canvas;
mod streamlit;

use action_bar::DomTextMeasure;
use dom_canvas::DomCanvas;
use kurbo::Point;
use mnist_canvas_core::input::{EventKind, InputEvent};
use mnist_canvas_core::{EventResponse, RenderOutcome, Widget, WidgetContext, WidgetEvent};
use std::cell::RefCell;
use std::rc::Rc;
use streamlit::StreamlitHost;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlCanvasElement, MessageEvent, MouseEvent, TouchEvent, Window};

type Listener = Closure<dyn FnMut(Event)>;

/// The mounted component: widget state plus its browser collaborators.
struct WebApp {
    widget: Widget,
    canvas: DomCanvas,
    host: StreamlitHost,
    measure: DomTextMeasure,
    document: Document,
    /// Click handlers of the current button bar, dropped when it is rebuilt.
    button_listeners: Vec<Listener>,
}

impl WebApp {
    fn dispatch(&mut self, event: WidgetEvent) -> EventResponse {
        let mut ctx = WidgetContext {
            canvas: &mut self.canvas,
            host: &mut self.host,
            measure: &self.measure,
        };
        self.widget.handle(event, &mut ctx)
    }
}

/// Translate a DOM event on the canvas into widget input.
fn input_event(kind: EventKind, event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    if kind.is_touch() {
        let list = event.dyn_ref::<TouchEvent>()?.touches();
        let touches = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
            .collect();
        let rect = canvas.get_bounding_client_rect();
        return Some(InputEvent::Touch {
            kind,
            touches,
            canvas_origin: Point::new(rect.left(), rect.top()),
        });
    }
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(InputEvent::mouse(
        kind,
        f64::from(mouse.offset_x()),
        f64::from(mouse.offset_y()),
    ))
}

/// Register a shared listener for every [`EventKind`] on the canvas.
///
/// The kind is looked up from the DOM event type on each call.
fn attach_canvas_listeners(app: &Rc<RefCell<WebApp>>) -> Result<(), JsValue> {
    let canvas = app.borrow().canvas.element().clone();

    let target = canvas.clone();
    let app = Rc::clone(app);
    let listener = Listener::new(move |event: Event| {
        let Some(kind) = EventKind::from_dom_name(&event.type_()) else {
            return;
        };
        let Some(input) = input_event(kind, &event, &target) else {
            return;
        };
        let response = app.borrow_mut().dispatch(WidgetEvent::Input(input));
        if response == (EventResponse::Input { prevent_default: true }) {
            event.prevent_default();
        }
    });

    for kind in EventKind::ALL {
        let callback = listener.as_ref().unchecked_ref();
        canvas.add_event_listener_with_callback(kind.dom_name(), callback)?;
    }
    listener.forget();
    Ok(())
}

/// Rebuild the button bar from the widget's current layout.
fn rebuild_action_bar(app: &Rc<RefCell<WebApp>>) -> Result<(), JsValue> {
    let (document, canvas, bar) = {
        let state = app.borrow();
        let Some(bar) = state.widget.action_bar().cloned() else {
            return Ok(());
        };
        (state.document.clone(), state.canvas.element().clone(), bar)
    };

    let container = action_bar::build_container(&document, &bar)?;
    let mut listeners = Vec::new();
    for spec in bar.buttons() {
        let selector = format!("#{}", spec.kind.element_id());
        let Some(button) = container.query_selector(&selector)? else {
            continue;
        };
        let kind = spec.kind;
        let app = Rc::clone(app);
        let listener = Listener::new(move |_event: Event| {
            app.borrow_mut().dispatch(WidgetEvent::Button(kind));
        });
        let callback = listener.as_ref().unchecked_ref();
        button.add_event_listener_with_callback("click", callback)?;
        listeners.push(listener);
    }
    action_bar::mount_after(&canvas, &container)?;

    app.borrow_mut().button_listeners = listeners;
    Ok(())
}

/// Listen for render messages from the host page.
fn attach_render_listener(app: &Rc<RefCell<WebApp>>, window: &Window) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let listener = Listener::new(move |event: Event| {
        let Some(message) = event.dyn_ref::<MessageEvent>() else {
            return;
        };
        let Some(args) = streamlit::render_args(message.data()) else {
            return;
        };
        let response = app.borrow_mut().dispatch(WidgetEvent::Render(args));
        if response == EventResponse::Render(RenderOutcome::Applied) {
            if let Err(e) = rebuild_action_bar(&app) {
                log::error!("Failed to build buttons: {e:?}");
            }
        }
    });
    let callback = listener.as_ref().unchecked_ref();
    window.add_event_listener_with_callback("message", callback)?;
    listener.forget();
    Ok(())
}

/// Initialize and run the component.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting MNIST canvas (WASM)");

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let app = Rc::new(RefCell::new(WebApp {
        widget: Widget::new(),
        canvas: DomCanvas::attach(&document)?,
        host: StreamlitHost::new(window.clone()),
        measure: DomTextMeasure::new(document.clone()),
        document,
        button_listeners: Vec::new(),
    }));

    attach_canvas_listeners(&app)?;
    attach_render_listener(&app, &window)?;

    let mut state = app.borrow_mut();
    let WebApp { widget, host, .. } = &mut *state;
    widget.announce_ready(host);
    Ok(())
}
