//! Options accepted by the drawing calls on [`crate::axes::Axes`]. Unset
//! options fall back to [`crate::defaults`].

use crate::error::SceneGraphError;
use plotcheck_common::color::Color;
use plotcheck_common::types::{LineStyle, MarkerShape};
use plotcheck_common::value::ScalarOrArray;

const FMT_COLORS: [char; 8] = ['b', 'g', 'r', 'c', 'm', 'y', 'k', 'w'];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOpts {
    pub color: Option<Color>,
    pub line_style: Option<LineStyle>,
    pub line_width: Option<f64>,
    pub marker: Option<MarkerShape>,
    pub marker_size: Option<f64>,
    pub marker_face_color: Option<Color>,
    pub marker_edge_color: Option<Color>,
    pub marker_edge_width: Option<f64>,
    pub alpha: Option<f64>,
    pub label: Option<String>,
}

impl LineOpts {
    /// Options from a `[color][marker][line]` shorthand such as `"ro-"`,
    /// `"o"` or `"k--"`. A marker without a line style draws no line.
    pub fn fmt(fmt: &str) -> Result<Self, SceneGraphError> {
        let mut opts = LineOpts::default();
        let mut rest = fmt.to_string();
        for style in ["--", "-."] {
            if rest.contains(style) {
                opts.line_style = Some(LineStyle::parse(style)?);
                rest = rest.replacen(style, "", 1);
            }
        }

        let invalid = |character| SceneGraphError::InvalidFormat {
            fmt: fmt.to_string(),
            character,
        };
        for c in rest.chars() {
            let code = c.to_string();
            if c == '-' || c == ':' {
                if opts.line_style.is_some() {
                    return Err(invalid(c));
                }
                opts.line_style = Some(LineStyle::parse(&code)?);
            } else if let Some(marker) = MarkerShape::parse(&code).ok().filter(|m| m.is_visible()) {
                if opts.marker.is_some() {
                    return Err(invalid(c));
                }
                opts.marker = Some(marker);
            } else if FMT_COLORS.contains(&c) {
                if opts.color.is_some() {
                    return Err(invalid(c));
                }
                opts.color = Some(Color::parse(&code));
            } else {
                return Err(invalid(c));
            }
        }

        if opts.marker.is_some() && opts.line_style.is_none() {
            opts.line_style = Some(LineStyle::None);
        }
        Ok(opts)
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = Some(line_style);
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_marker_size(mut self, marker_size: f64) -> Self {
        self.marker_size = Some(marker_size);
        self
    }

    pub fn with_marker_face_color(mut self, color: impl Into<Color>) -> Self {
        self.marker_face_color = Some(color.into());
        self
    }

    pub fn with_marker_edge_color(mut self, color: impl Into<Color>) -> Self {
        self.marker_edge_color = Some(color.into());
        self
    }

    pub fn with_marker_edge_width(mut self, width: f64) -> Self {
        self.marker_edge_width = Some(width);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterOpts {
    pub color: Option<ScalarOrArray<Color>>,
    pub edge_color: Option<ScalarOrArray<Color>>,
    pub line_width: Option<ScalarOrArray<f64>>,
    /// Marker area in points squared
    pub size: Option<ScalarOrArray<f64>>,
    pub alpha: Option<f64>,
    pub label: Option<String>,
}

impl ScatterOpts {
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(ScalarOrArray::new_scalar(color.into()));
        self
    }

    pub fn with_colors<C: Into<Color>>(mut self, colors: impl IntoIterator<Item = C>) -> Self {
        self.color = Some(ScalarOrArray::new_array(
            colors.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_edge_color(mut self, color: impl Into<Color>) -> Self {
        self.edge_color = Some(ScalarOrArray::new_scalar(color.into()));
        self
    }

    pub fn with_edge_colors<C: Into<Color>>(mut self, colors: impl IntoIterator<Item = C>) -> Self {
        self.edge_color = Some(ScalarOrArray::new_array(
            colors.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_line_width(mut self, line_width: impl Into<ScalarOrArray<f64>>) -> Self {
        self.line_width = Some(line_width.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<ScalarOrArray<f64>>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Where bar positions sit relative to the bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarAlign {
    #[default]
    Center,
    /// Position is the lower edge of the bar
    Edge,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarOpts {
    /// Bar thickness along the category axis
    pub width: Option<ScalarOrArray<f64>>,
    /// Baseline the bars grow from
    pub bottom: Option<ScalarOrArray<f64>>,
    pub align: BarAlign,
    pub color: Option<ScalarOrArray<Color>>,
    pub edge_color: Option<ScalarOrArray<Color>>,
    pub line_width: Option<ScalarOrArray<f64>>,
    pub alpha: Option<f64>,
    pub label: Option<String>,
}

impl BarOpts {
    pub fn with_width(mut self, width: impl Into<ScalarOrArray<f64>>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_bottom(mut self, bottom: impl Into<ScalarOrArray<f64>>) -> Self {
        self.bottom = Some(bottom.into());
        self
    }

    pub fn with_align(mut self, align: BarAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(ScalarOrArray::new_scalar(color.into()));
        self
    }

    pub fn with_colors<C: Into<Color>>(mut self, colors: impl IntoIterator<Item = C>) -> Self {
        self.color = Some(ScalarOrArray::new_array(
            colors.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_edge_color(mut self, color: impl Into<Color>) -> Self {
        self.edge_color = Some(ScalarOrArray::new_scalar(color.into()));
        self
    }

    pub fn with_line_width(mut self, line_width: impl Into<ScalarOrArray<f64>>) -> Self {
        self.line_width = Some(line_width.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
