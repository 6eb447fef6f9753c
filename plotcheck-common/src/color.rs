use crate::error::PlotCommonError;
use serde::{Deserialize, Serialize};

/// Single letter shorthand colors. These take precedence over CSS names.
const BASE_COLORS: [(&str, [f64; 3]); 8] = [
    ("b", [0.0, 0.0, 1.0]),
    ("g", [0.0, 0.5, 0.0]),
    ("r", [1.0, 0.0, 0.0]),
    ("c", [0.0, 0.75, 0.75]),
    ("m", [0.75, 0.0, 0.75]),
    ("y", [0.75, 0.75, 0.0]),
    ("k", [0.0, 0.0, 0.0]),
    ("w", [1.0, 1.0, 1.0]),
];

/// A color as supplied by a caller, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorRepr", into = "ColorRepr")]
pub enum Color {
    Named(String),
    Hex(String),
    Rgb([f64; 3]),
    Rgba([f64; 4]),
}

impl Color {
    /// Parse a color string. A leading `#` marks a hex code, anything else is
    /// treated as a color name.
    pub fn parse(value: &str) -> Self {
        if value.starts_with('#') {
            Color::Hex(value.to_string())
        } else {
            Color::Named(value.to_string())
        }
    }

    /// Resolves the color to RGBA components. Named and hex colors are fully
    /// opaque.
    pub fn rgba(&self) -> Result<[f64; 4], PlotCommonError> {
        match self {
            Color::Named(name) => named_rgb(name)
                .map(|[r, g, b]| [r, g, b, 1.0])
                .ok_or_else(|| {
                    PlotCommonError::InvalidColor(format!("unknown color name `{name}`"))
                }),
            Color::Hex(hex) => hex_rgb(hex)
                .map(|[r, g, b]| [r, g, b, 1.0])
                .ok_or_else(|| PlotCommonError::InvalidColor(format!("invalid hex code `{hex}`"))),
            Color::Rgb([r, g, b]) => Ok([*r, *g, *b, 1.0]),
            Color::Rgba(rgba) => Ok(*rgba),
        }
    }
}

/// Looks up a color name in the shorthand table, then among the CSS color names
pub fn named_rgb(name: &str) -> Option<[f64; 3]> {
    if let Some((_, rgb)) = BASE_COLORS.iter().find(|(n, _)| *n == name) {
        return Some(*rgb);
    }
    if name.starts_with('#') {
        return None;
    }
    css_rgb(name)
}

/// Decodes a `#rgb` or `#rrggbb` hex code
pub fn hex_rgb(hex: &str) -> Option<[f64; 3]> {
    if !hex.starts_with('#') {
        return None;
    }
    css_rgb(hex)
}

fn css_rgb(value: &str) -> Option<[f64; 3]> {
    let color = value.parse::<css_color_parser::Color>().ok()?;
    Some([
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0,
    ])
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::parse(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color::parse(&value)
    }
}

impl From<&String> for Color {
    fn from(value: &String) -> Self {
        Color::parse(value)
    }
}

impl From<[f64; 3]> for Color {
    fn from(value: [f64; 3]) -> Self {
        Color::Rgb(value)
    }
}

impl From<[f64; 4]> for Color {
    fn from(value: [f64; 4]) -> Self {
        Color::Rgba(value)
    }
}

impl From<&[f64; 3]> for Color {
    fn from(value: &[f64; 3]) -> Self {
        Color::Rgb(*value)
    }
}

impl From<&[f64; 4]> for Color {
    fn from(value: &[f64; 4]) -> Self {
        Color::Rgba(*value)
    }
}

/// Integer components are on the same 0 to 1 scale as float components
impl From<[i32; 3]> for Color {
    fn from([r, g, b]: [i32; 3]) -> Self {
        Color::Rgb([r as f64, g as f64, b as f64])
    }
}

impl From<[i32; 4]> for Color {
    fn from([r, g, b, a]: [i32; 4]) -> Self {
        Color::Rgba([r as f64, g as f64, b as f64, a as f64])
    }
}

impl From<(f64, f64, f64)> for Color {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Color::Rgb([r, g, b])
    }
}

impl From<(f64, f64, f64, f64)> for Color {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        Color::Rgba([r, g, b, a])
    }
}

impl From<&Color> for Color {
    fn from(value: &Color) -> Self {
        value.clone()
    }
}

impl TryFrom<&[f64]> for Color {
    type Error = PlotCommonError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match *value {
            [r, g, b] => Ok(Color::Rgb([r, g, b])),
            [r, g, b, a] => Ok(Color::Rgba([r, g, b, a])),
            _ => Err(PlotCommonError::InvalidColor(format!(
                "expected 3 or 4 components, got {}",
                value.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Text(String),
    Rgb([f64; 3]),
    Rgba([f64; 4]),
}

impl From<ColorRepr> for Color {
    fn from(value: ColorRepr) -> Self {
        match value {
            ColorRepr::Text(text) => Color::parse(&text),
            ColorRepr::Rgb(rgb) => Color::Rgb(rgb),
            ColorRepr::Rgba(rgba) => Color::Rgba(rgba),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(value: Color) -> Self {
        match value {
            Color::Named(text) | Color::Hex(text) => ColorRepr::Text(text),
            Color::Rgb(rgb) => ColorRepr::Rgb(rgb),
            Color::Rgba(rgba) => ColorRepr::Rgba(rgba),
        }
    }
}
