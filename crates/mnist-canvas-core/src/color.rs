//! CSS color values as supplied by the host.

use peniko::color::{Rgba8, Srgb, parse_color};
use std::fmt;

/// A color given as CSS text, kept together with its parsed RGBA value.
///
/// The browser canvas consumes the original text so any CSS syntax the host
/// passes keeps working there; the raster backend uses the parsed channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorValue {
    css: String,
    rgba: [u8; 4],
}

impl ColorValue {
    /// Build a color from 8-bit channels. The CSS text is the `#rrggbb(aa)` form.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let css = if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        };
        Self { css, rgba: [r, g, b, a] }
    }

    /// Original CSS text.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Red, green, blue, alpha channels.
    pub fn rgba8(&self) -> [u8; 4] {
        self.rgba
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

/// Parse any CSS color string the browser canvas would accept.
///
/// Covers hex, `rgb()`/`hsl()`/`hwb()`/`lab()` and friends, and the full set
/// of CSS named colors. The original text is kept for the DOM canvas.
pub fn parse_css_color(input: &str) -> Option<ColorValue> {
    let trimmed = input.trim();
    let parsed = match parse_color(trimmed) {
        Ok(color) => color,
        Err(e) => {
            log::debug!("Unparseable color {trimmed:?}: {e}");
            return None;
        }
    };
    let Rgba8 { r, g, b, a } = parsed.to_alpha_color::<Srgb>().to_rgba8();

    Some(ColorValue {
        css: trimmed.to_string(),
        rgba: [r, g, b, a],
    })
}
