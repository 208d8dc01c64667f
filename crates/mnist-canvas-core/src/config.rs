//! Display configuration carried by the host's render event.

use crate::color::{ColorValue, parse_css_color};
use serde_json::Value;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Render arguments must be a JSON object")]
    NotAnObject,
    #[error("Missing field: {0}")]
    Missing(&'static str),
    #[error("Field {field} should be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Field {field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("Field {field} is not a valid color: {value}")]
    InvalidColor { field: &'static str, value: String },
}

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render payload field names, as sent by the host.
pub mod fields {
    pub const STROKE_WIDTH: &str = "strokeWidth";
    pub const STROKE_COLOR: &str = "strokeColor";
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    pub const CANVAS_WIDTH: &str = "canvasWidth";
    pub const CANVAS_HEIGHT: &str = "canvasHeight";
    pub const BUTTON_HEIGHT: &str = "buttonHeight";
    pub const SUBMIT_LABEL: &str = "submitButtonLabel";
    pub const SUBMIT_BACKGROUND: &str = "submitBackgroundColor";
    pub const CLEAR_LABEL: &str = "clearButtonLabel";
    pub const CLEAR_BACKGROUND: &str = "clearBackgroundColor";
}

/// Everything the widget needs to lay itself out and draw.
///
/// Supplied anew on every render event. Frame height and button widths are
/// derived from it, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Stroke width in canvas pixels.
    pub stroke_width: f64,
    /// Stroke color.
    pub stroke_color: ColorValue,
    /// Canvas background color.
    pub background_color: ColorValue,
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Height of both action buttons.
    pub button_height: u32,
    pub submit_label: String,
    pub submit_background: ColorValue,
    pub clear_label: String,
    pub clear_background: ColorValue,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            stroke_width: 20.0,
            stroke_color: ColorValue::from_rgba8(255, 255, 255, 255),
            background_color: ColorValue::from_rgba8(0, 0, 0, 255),
            canvas_width: 280,
            canvas_height: 280,
            button_height: 30,
            submit_label: "Submit".to_string(),
            submit_background: ColorValue::from_rgba8(0xFB, 0xFB, 0xFB, 255),
            clear_label: "Clear".to_string(),
            clear_background: ColorValue::from_rgba8(0xFB, 0xFB, 0xFB, 255),
        }
    }
}

impl DisplayConfig {
    /// Parse a render payload strictly. The first invalid or missing field is an error.
    pub fn from_args(args: &Value) -> ConfigResult<Self> {
        let args = Args::new(args)?;
        Ok(Self {
            stroke_width: args.positive_number(fields::STROKE_WIDTH)?,
            stroke_color: args.color(fields::STROKE_COLOR)?,
            background_color: args.color(fields::BACKGROUND_COLOR)?,
            canvas_width: args.dimension(fields::CANVAS_WIDTH)?,
            canvas_height: args.dimension(fields::CANVAS_HEIGHT)?,
            button_height: args.dimension(fields::BUTTON_HEIGHT)?,
            submit_label: args.text(fields::SUBMIT_LABEL)?,
            submit_background: args.color(fields::SUBMIT_BACKGROUND)?,
            clear_label: args.text(fields::CLEAR_LABEL)?,
            clear_background: args.color(fields::CLEAR_BACKGROUND)?,
        })
    }

    /// Parse a render payload, replacing each bad field with its default.
    ///
    /// Never fails: a malformed render event must not take the widget down.
    /// Every substitution is logged.
    pub fn from_args_lenient(args: &Value) -> Self {
        let defaults = Self::default();
        let args = match Args::new(args) {
            Ok(args) => args,
            Err(e) => {
                log::warn!("{e}; using default display configuration");
                return defaults;
            }
        };

        Self {
            stroke_width: or_default(
                args.positive_number(fields::STROKE_WIDTH),
                defaults.stroke_width,
            ),
            stroke_color: or_default(args.color(fields::STROKE_COLOR), defaults.stroke_color),
            background_color: or_default(
                args.color(fields::BACKGROUND_COLOR),
                defaults.background_color,
            ),
            canvas_width: or_default(args.dimension(fields::CANVAS_WIDTH), defaults.canvas_width),
            canvas_height: or_default(
                args.dimension(fields::CANVAS_HEIGHT),
                defaults.canvas_height,
            ),
            button_height: or_default(
                args.dimension(fields::BUTTON_HEIGHT),
                defaults.button_height,
            ),
            submit_label: or_default(args.text(fields::SUBMIT_LABEL), defaults.submit_label),
            submit_background: or_default(
                args.color(fields::SUBMIT_BACKGROUND),
                defaults.submit_background,
            ),
            clear_label: or_default(args.text(fields::CLEAR_LABEL), defaults.clear_label),
            clear_background: or_default(
                args.color(fields::CLEAR_BACKGROUND),
                defaults.clear_background,
            ),
        }
    }
}

fn or_default<T: std::fmt::Debug>(result: ConfigResult<T>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{e}; falling back to {default:?}");
            default
        }
    }
}

/// Typed accessors over the render payload object.
struct Args<'a> {
    map: &'a serde_json::Map<String, Value>,
}

impl<'a> Args<'a> {
    fn new(value: &'a Value) -> ConfigResult<Self> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or(ConfigError::NotAnObject)
    }

    fn get(&self, field: &'static str) -> ConfigResult<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => Err(ConfigError::Missing(field)),
            Some(value) => Ok(value),
        }
    }

    fn positive_number(&self, field: &'static str) -> ConfigResult<f64> {
        let value = self.get(field)?.as_f64().ok_or(ConfigError::InvalidType {
            field,
            expected: "a number",
        })?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::NonPositive { field, value })
        }
    }

    fn dimension(&self, field: &'static str) -> ConfigResult<u32> {
        let value = self.positive_number(field)?;
        // Fractional pixel sizes round down, as the DOM does for canvas dimensions.
        let floored = value.floor();
        if floored < 1.0 {
            return Err(ConfigError::NonPositive { field, value });
        }
        Ok(floored.min(f64::from(u32::MAX)) as u32)
    }

    fn text(&self, field: &'static str) -> ConfigResult<String> {
        match self.get(field)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ConfigError::InvalidType {
                field,
                expected: "a string",
            }),
        }
    }

    fn color(&self, field: &'static str) -> ConfigResult<ColorValue> {
        let text = self.get(field)?.as_str().ok_or(ConfigError::InvalidType {
            field,
            expected: "a color string",
        })?;
        parse_css_color(text).ok_or_else(|| ConfigError::InvalidColor {
            field,
            value: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_args() -> Value {
        json!({
            "strokeWidth": 12,
            "strokeColor": "#FF0000",
            "backgroundColor": "#FFFFFF",
            "canvasWidth": 300,
            "canvasHeight": 200,
            "buttonHeight": 40,
            "submitButtonLabel": "Send",
            "submitBackgroundColor": "#00FF00",
            "clearButtonLabel": "Reset",
            "clearBackgroundColor": "#0000FF",
        })
    }

    #[test]
    fn test_strict_parse() {
        let config = DisplayConfig::from_args(&full_args()).unwrap();
        assert!((config.stroke_width - 12.0).abs() < f64::EPSILON);
        assert_eq!(config.stroke_color.rgba8(), [255, 0, 0, 255]);
        assert_eq!(config.canvas_width, 300);
        assert_eq!(config.canvas_height, 200);
        assert_eq!(config.button_height, 40);
        assert_eq!(config.submit_label, "Send");
        assert_eq!(config.clear_label, "Reset");
        assert_eq!(config.clear_background.css(), "#0000FF");
    }

    #[test]
    fn test_strict_rejects_non_positive() {
        let mut args = full_args();
        args["canvasWidth"] = json!(0);
        assert_eq!(
            DisplayConfig::from_args(&args),
            Err(ConfigError::NonPositive {
                field: fields::CANVAS_WIDTH,
                value: 0.0
            })
        );
    }

    #[test]
    fn test_strict_reports_missing() {
        let mut args = full_args();
        args.as_object_mut().unwrap().remove("strokeColor");
        assert_eq!(
            DisplayConfig::from_args(&args),
            Err(ConfigError::Missing(fields::STROKE_COLOR))
        );
    }

    #[test]
    fn test_lenient_falls_back_per_field() {
        let mut args = full_args();
        args["canvasHeight"] = json!(-5);
        args["strokeWidth"] = json!("thick");
        args["backgroundColor"] = json!("not-a-color");

        let config = DisplayConfig::from_args_lenient(&args);
        let defaults = DisplayConfig::default();
        assert_eq!(config.canvas_height, defaults.canvas_height);
        assert!((config.stroke_width - defaults.stroke_width).abs() < f64::EPSILON);
        assert_eq!(config.background_color, defaults.background_color);
        // Valid fields survive.
        assert_eq!(config.canvas_width, 300);
        assert_eq!(config.submit_label, "Send");
    }

    #[test]
    fn test_lenient_non_object() {
        assert_eq!(
            DisplayConfig::from_args_lenient(&json!([1, 2, 3])),
            DisplayConfig::default()
        );
        assert_eq!(DisplayConfig::from_args(&Value::Null), Err(ConfigError::NotAnObject));
    }

    #[test]
    fn test_lenient_keeps_any_css_color() {
        for css in ["lightgray", "darkgreen", "hsl(120, 100%, 25%)", "pink"] {
            let config = DisplayConfig::from_args_lenient(&json!({ "backgroundColor": css }));
            assert_eq!(config.background_color.css(), css);
        }
    }

    #[test]
    fn test_fractional_dimension_floors() {
        let mut args = full_args();
        args["canvasWidth"] = json!(280.9);
        args["buttonHeight"] = json!(0.5);
        assert_eq!(DisplayConfig::from_args_lenient(&args).canvas_width, 280);
        assert_eq!(DisplayConfig::from_args_lenient(&args).button_height, 30);
    }
}
