//! Headless replay of scripted widget sessions.
//!
//! A script is a JSON document listing render events, pointer input and
//! button clicks. Replaying it drives the real widget against the raster
//! canvas and records what the host would have received.

use kurbo::Point;
use mnist_canvas_core::input::{EventKind, InputEvent};
use mnist_canvas_core::{
    AverageAdvanceMeasure, ButtonKind, ConfigError, DisplayConfig, HostMessage, RecordingHost,
    SurfaceError, Widget, WidgetContext, WidgetEvent,
};
use mnist_canvas_render::PixmapCanvas;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Canvas error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("Render event {index}: {source}")]
    Config {
        index: usize,
        #[source]
        source: ConfigError,
    },
}

/// One scripted step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Host render event with its argument payload.
    Render { args: serde_json::Value },
    /// Mouse event at a canvas-local offset.
    Mouse { kind: EventKind, x: f64, y: f64 },
    /// Touch event in client coordinates.
    Touch {
        kind: EventKind,
        #[serde(default)]
        touches: Vec<Point>,
        #[serde(default)]
        canvas_origin: Point,
    },
    Submit,
    Clear,
}

impl From<ScriptEvent> for WidgetEvent {
    fn from(event: ScriptEvent) -> Self {
        match event {
            ScriptEvent::Render { args } => WidgetEvent::Render(args),
            ScriptEvent::Mouse { kind, x, y } => WidgetEvent::Input(InputEvent::mouse(kind, x, y)),
            ScriptEvent::Touch {
                kind,
                touches,
                canvas_origin,
            } => WidgetEvent::Input(InputEvent::Touch {
                kind,
                touches,
                canvas_origin,
            }),
            ScriptEvent::Submit => WidgetEvent::Button(ButtonKind::Submit),
            ScriptEvent::Clear => WidgetEvent::Button(ButtonKind::Clear),
        }
    }
}

/// A scripted session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script file.
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Check every render payload strictly, without the per-field fallbacks
    /// the widget applies at runtime.
    pub fn validate(&self) -> Result<(), ReplayError> {
        for (index, event) in self.events.iter().enumerate() {
            if let ScriptEvent::Render { args } = event {
                DisplayConfig::from_args(args)
                    .map_err(|source| ReplayError::Config { index, source })?;
            }
        }
        Ok(())
    }
}

/// The state left behind by a replay.
pub struct Replay {
    /// Every host call, in order, starting with the readiness signal.
    pub messages: Vec<HostMessage>,
    /// Final canvas contents.
    pub canvas: PixmapCanvas,
    /// Final widget state.
    pub widget: Widget,
}

impl Replay {
    /// Write the final canvas as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), ReplayError> {
        std::fs::write(path, self.canvas.to_png()?)?;
        Ok(())
    }
}

/// Run every event of `script` through a fresh widget.
pub fn run_script(script: Script) -> Replay {
    let mut widget = Widget::new();
    let mut canvas = PixmapCanvas::new();
    let mut host = RecordingHost::new();
    let measure = AverageAdvanceMeasure::default();

    widget.announce_ready(&mut host);
    for event in script.events {
        let mut ctx = WidgetContext {
            canvas: &mut canvas,
            host: &mut host,
            measure: &measure,
        };
        let response = widget.handle(event.into(), &mut ctx);
        log::debug!("{response:?}");
    }

    Replay {
        messages: host.drain(),
        canvas,
        widget,
    }
}
