//! Action bar layout, label font fitting and frame sizing.

use crate::color::ColorValue;
use crate::config::DisplayConfig;

/// Space the host page adds above the component.
pub const AUTO_MARGIN: u32 = 18;
/// Gap between the canvas and the button bar.
pub const BUTTON_MARGIN_TOP: u32 = 10;
/// Top plus bottom border of the frame.
pub const BORDER_ALLOWANCE: u32 = 4;

/// Largest label font size in pixels.
pub const MAX_FONT_SIZE: u32 = 20;
/// Smallest label font size in pixels.
pub const MIN_FONT_SIZE: u32 = 1;
/// Share of the button width the label may occupy.
pub const LABEL_WIDTH_RATIO: f64 = 0.8;

/// Share of the canvas width given to the submit button.
pub const SUBMIT_WIDTH_RATIO: f64 = 0.6;
/// Share of the canvas width given to the clear button.
pub const CLEAR_WIDTH_RATIO: f64 = 0.4;

/// Total iframe height so the component shows without scrollbars or clipping.
pub const fn frame_height(canvas_height: u32, button_height: u32) -> u32 {
    canvas_height
        .saturating_add(AUTO_MARGIN)
        .saturating_add(button_height)
        .saturating_add(BUTTON_MARGIN_TOP)
        .saturating_add(BORDER_ALLOWANCE)
}

/// Measures rendered text width.
///
/// In the browser this is an off-screen probe element; headless code uses
/// [`AverageAdvanceMeasure`].
pub trait TextMeasure {
    /// Width in pixels of `text` at `font_size`, or `None` if measuring failed.
    fn measure(&self, text: &str, font_size: u32) -> Option<f64>;
}

/// Estimates width as character count times a fixed fraction of the font size.
#[derive(Debug, Clone, Copy)]
pub struct AverageAdvanceMeasure {
    /// Average glyph advance in ems.
    pub advance_em: f64,
}

impl Default for AverageAdvanceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for AverageAdvanceMeasure {
    fn measure(&self, text: &str, font_size: u32) -> Option<f64> {
        Some(text.chars().count() as f64 * f64::from(font_size) * self.advance_em)
    }
}

/// Largest font size in `MIN_FONT_SIZE..=MAX_FONT_SIZE` whose label fits the button.
///
/// Starts from the maximum (capped by the button height) and shrinks one
/// pixel at a time until the text fits in [`LABEL_WIDTH_RATIO`] of the
/// button width or the minimum is reached. A failed measurement keeps the
/// starting size.
pub fn fit_font_size(
    text: &str,
    button_width: f64,
    button_height: u32,
    measure: &dyn TextMeasure,
) -> u32 {
    let usable_width = button_width.floor() * LABEL_WIDTH_RATIO;
    let start = MAX_FONT_SIZE.min(button_height).max(MIN_FONT_SIZE);

    let mut size = start;
    while size > MIN_FONT_SIZE {
        match measure.measure(text, size) {
            Some(width) if width <= usable_width => break,
            Some(_) => size -= 1,
            None => {
                log::warn!("Text measurement unavailable; using font size {start}px");
                return start;
            }
        }
    }
    size
}

/// Which action a button triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Submit,
    Clear,
}

impl ButtonKind {
    /// DOM id of the button element.
    pub fn element_id(self) -> &'static str {
        match self {
            ButtonKind::Submit => "submitButton",
            ButtonKind::Clear => "clearButton",
        }
    }

    /// Share of the canvas width.
    pub fn width_ratio(self) -> f64 {
        match self {
            ButtonKind::Submit => SUBMIT_WIDTH_RATIO,
            ButtonKind::Clear => CLEAR_WIDTH_RATIO,
        }
    }
}

/// Resolved look of one action button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub kind: ButtonKind,
    pub label: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: u32,
    pub background: ColorValue,
    pub text_color: ColorValue,
    pub corner_radius: f64,
    /// Label font size in pixels.
    pub font_size: u32,
}

impl ButtonSpec {
    fn build(
        kind: ButtonKind,
        label: &str,
        background: &ColorValue,
        canvas_width: u32,
        height: u32,
        measure: &dyn TextMeasure,
    ) -> Self {
        let width = f64::from(canvas_width) * kind.width_ratio();
        Self {
            kind,
            label: label.to_string(),
            width,
            height,
            background: background.clone(),
            text_color: ColorValue::from_rgba8(0, 0, 0, 255),
            corner_radius: f64::from(height) * 0.5,
            font_size: fit_font_size(label, width, height, measure),
        }
    }
}

/// The horizontal submit/clear bar under the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionBar {
    /// Container width, equal to the canvas width.
    pub width: f64,
    /// Gap above the bar.
    pub margin_top: u32,
    pub submit: ButtonSpec,
    pub clear: ButtonSpec,
}

impl ActionBar {
    /// Lay out both buttons for `config`.
    pub fn build(config: &DisplayConfig, measure: &dyn TextMeasure) -> Self {
        Self {
            width: f64::from(config.canvas_width),
            margin_top: BUTTON_MARGIN_TOP,
            submit: ButtonSpec::build(
                ButtonKind::Submit,
                &config.submit_label,
                &config.submit_background,
                config.canvas_width,
                config.button_height,
                measure,
            ),
            clear: ButtonSpec::build(
                ButtonKind::Clear,
                &config.clear_label,
                &config.clear_background,
                config.canvas_width,
                config.button_height,
                measure,
            ),
        }
    }

    /// Buttons in display order.
    pub fn buttons(&self) -> [&ButtonSpec; 2] {
        [&self.submit, &self.clear]
    }
}
