//! The drawing widget: render configuration, stroke input and the action buttons.

use crate::config::DisplayConfig;
use crate::drawing::{DrawingState, StrokeStyle};
use crate::host::Host;
use crate::input::InputEvent;
use crate::layout::{ActionBar, ButtonKind, TextMeasure, frame_height};
use crate::output::OutputValue;
use crate::surface::Canvas;
use serde_json::Value;

/// Everything a handler may touch outside the widget itself.
pub struct WidgetContext<'a> {
    /// The drawing surface.
    pub canvas: &'a mut dyn Canvas,
    /// The embedding host.
    pub host: &'a mut dyn Host,
    /// Label measurement for the action bar.
    pub measure: &'a dyn TextMeasure,
}

/// An event delivered to the widget by its host adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Render event with the host's argument payload.
    Render(Value),
    /// Pointer or touch input on the canvas.
    Input(InputEvent),
    /// An action button was clicked.
    Button(ButtonKind),
}

/// What a render event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Canvas and action bar were rebuilt.
    Applied,
    /// The event was the host echoing our own value back and was skipped.
    Suppressed,
}

/// What the adapter has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// A render event was processed. On `Applied` the adapter rebuilds its button bar.
    Render(RenderOutcome),
    /// Input was processed; cancel the browser default if requested.
    Input { prevent_default: bool },
    /// A component value was sent to the host.
    ValueSent,
}

/// The freehand drawing widget.
///
/// Owned by the host adapter and handed by `&mut` into each handler. All
/// handlers run to completion synchronously, in event-arrival order.
#[derive(Debug, Default)]
pub struct Widget {
    config: DisplayConfig,
    drawing: DrawingState,
    action_bar: Option<ActionBar>,
    /// Single-shot latch: set right before a value goes out, cleared by the next render event.
    suppress_next_render: bool,
}

impl Widget {
    /// Create an unconfigured widget. Nothing is drawn until the first render event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal readiness to the host. Call once at startup.
    pub fn announce_ready(&self, host: &mut dyn Host) {
        log::debug!("Component ready");
        host.set_component_ready();
    }

    /// Dispatch one event to its handler.
    pub fn handle(&mut self, event: WidgetEvent, ctx: &mut WidgetContext<'_>) -> EventResponse {
        match event {
            WidgetEvent::Render(args) => EventResponse::Render(self.render(&args, ctx)),
            WidgetEvent::Input(input) => EventResponse::Input {
                prevent_default: self.handle_input(&input, ctx),
            },
            WidgetEvent::Button(ButtonKind::Submit) => {
                self.submit(ctx);
                EventResponse::ValueSent
            }
            WidgetEvent::Button(ButtonKind::Clear) => {
                self.clear(ctx);
                EventResponse::ValueSent
            }
        }
    }

    /// Handle a render event carrying the host's argument payload.
    pub fn render(&mut self, args: &Value, ctx: &mut WidgetContext<'_>) -> RenderOutcome {
        if std::mem::take(&mut self.suppress_next_render) {
            log::debug!("Skipping render echo of our own value");
            return RenderOutcome::Suppressed;
        }
        self.configure(DisplayConfig::from_args_lenient(args), ctx);
        RenderOutcome::Applied
    }

    /// Rebuild canvas and action bar from scratch for `config`.
    ///
    /// If the surface cannot be resized it keeps its old contents and the
    /// reported frame height follows the size it actually has.
    pub fn configure(&mut self, config: DisplayConfig, ctx: &mut WidgetContext<'_>) {
        match ctx.canvas.resize(config.canvas_width, config.canvas_height) {
            Ok(()) => {
                let bounds = ctx.canvas.bounds();
                ctx.canvas.fill_rect(bounds, &config.background_color);
            }
            Err(e) => log::error!("Failed to size canvas: {e}"),
        }

        self.drawing.reset();
        self.action_bar = Some(ActionBar::build(&config, ctx.measure));
        let (_, canvas_height) = ctx.canvas.size();
        ctx.host.set_frame_height(frame_height(canvas_height, config.button_height));

        log::debug!(
            "Configured {}x{} canvas, button height {}",
            config.canvas_width,
            config.canvas_height,
            config.button_height
        );
        self.config = config;
    }

    /// Feed pointer or touch input. Returns whether the browser default must be cancelled.
    pub fn handle_input(&mut self, event: &InputEvent, ctx: &mut WidgetContext<'_>) -> bool {
        let kind = event.kind();

        if kind.is_press() {
            if let Some(point) = event.canvas_point() {
                self.drawing.begin(point);
            }
        } else if kind.is_motion() {
            let path = event
                .canvas_point()
                .and_then(|point| self.drawing.extend(point));
            if let Some(path) = path {
                ctx.canvas.stroke_curve(&path, &self.stroke_style());
            }
        } else if kind.is_release() {
            self.drawing.end();
        }

        kind.suppresses_default()
    }

    /// Submit button: send the canvas contents to the host.
    pub fn submit(&mut self, ctx: &mut WidgetContext<'_>) {
        let image_data = match ctx.canvas.to_image_string() {
            Ok(data) => Some(data),
            Err(e) => {
                log::error!("Failed to encode drawing: {e}");
                None
            }
        };
        log::info!(
            "Submitting drawing ({} segments)",
            self.drawing.segments().len()
        );
        self.send_value(&OutputValue::submitted(image_data), ctx.host);
    }

    /// Clear button: repaint the background, drop the stroke log and tell the host.
    pub fn clear(&mut self, ctx: &mut WidgetContext<'_>) {
        let bounds = ctx.canvas.bounds();
        ctx.canvas.clear_rect(bounds);
        ctx.canvas.fill_rect(bounds, &self.config.background_color);
        self.drawing.clear_segments();
        log::info!("Canvas cleared");
        self.send_value(&OutputValue::cleared(), ctx.host);
    }

    fn send_value(&mut self, value: &OutputValue, host: &mut dyn Host) {
        self.suppress_next_render = true;
        host.set_component_value(value);
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.config.stroke_width,
            color: self.config.stroke_color.clone(),
        }
    }

    /// The configuration applied by the last accepted render.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn drawing(&self) -> &DrawingState {
        &self.drawing
    }

    /// Button bar layout, available once the widget has been configured.
    pub fn action_bar(&self) -> Option<&ActionBar> {
        self.action_bar.as_ref()
    }
}
