//! MNIST Canvas Core Library
//!
//! Platform-agnostic state and logic for the freehand drawing widget: render
//! configuration, stroke smoothing, action bar layout and the host value
//! protocol. Platform side effects sit behind the [`Canvas`], [`Host`] and
//! [`TextMeasure`] traits.

pub mod color;
pub mod config;
pub mod data_url;
pub mod drawing;
pub mod host;
pub mod input;
pub mod layout;
pub mod output;
pub mod surface;
pub mod widget;

pub use color::{ColorValue, parse_css_color};
pub use config::{ConfigError, ConfigResult, DisplayConfig};
pub use data_url::{DataUrl, DataUrlError, decode_data_url, encode_data_url};
pub use drawing::{DrawingState, StrokeSegment, StrokeStyle, smoothed_segment};
pub use host::{Host, HostMessage, RecordingHost};
pub use input::{EventKind, InputEvent};
pub use layout::{
    ActionBar, AverageAdvanceMeasure, ButtonKind, ButtonSpec, TextMeasure, fit_font_size,
    frame_height,
};
pub use output::{DrawingResults, OutputValue};
pub use surface::{Canvas, CanvasOp, RecordingCanvas, SurfaceError, SurfaceResult};
pub use widget::{EventResponse, RenderOutcome, Widget, WidgetContext, WidgetEvent};
