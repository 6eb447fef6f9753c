use crate::defaults;
use itertools::izip;
use plotcheck_common::color::Color;
use plotcheck_common::types::{LineStyle, MarkerShape};
use serde::{Deserialize, Serialize};

use super::mark::SceneMark;
use super::point_bounds;

/// A single line drawn through its points, with optional markers at each point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneLineMark {
    pub label: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    pub stroke_width: f64,
    pub line_style: LineStyle,
    pub marker: MarkerShape,
    pub marker_size: f64,
    pub marker_face_color: Option<Color>,
    pub marker_edge_color: Option<Color>,
    pub marker_edge_width: f64,
    pub alpha: Option<f64>,
}

impl SceneLineMark {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn xy_iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        izip!(self.x.iter(), self.y.iter()).map(|(x, y)| (*x, *y))
    }

    /// Whether consecutive points are joined by a visible segment
    pub fn is_connected(&self) -> bool {
        self.len() > 1 && self.line_style.is_visible()
    }

    /// Marker face color, inheriting the line color when unset
    pub fn marker_face_color(&self) -> &Color {
        self.marker_face_color.as_ref().unwrap_or(&self.color)
    }

    /// Marker edge color. When unset, filled markers get a black edge and all
    /// other markers (including points and pixels) take the line color.
    pub fn marker_edge_color(&self) -> Color {
        if let Some(color) = &self.marker_edge_color {
            return color.clone();
        }
        match self.marker {
            MarkerShape::Point | MarkerShape::Pixel => self.color.clone(),
            marker if marker.is_filled() => Color::parse(defaults::MARKER_EDGE_COLOR),
            _ => self.color.clone(),
        }
    }

    pub fn bounds(&self) -> Option<[f64; 4]> {
        point_bounds(self.xy_iter())
    }
}

impl Default for SceneLineMark {
    fn default() -> Self {
        Self {
            label: None,
            x: vec![],
            y: vec![],
            color: Color::parse(defaults::COLOR_CYCLE[0]),
            stroke_width: defaults::LINE_WIDTH,
            line_style: LineStyle::Solid,
            marker: MarkerShape::None,
            marker_size: defaults::MARKER_SIZE,
            marker_face_color: None,
            marker_edge_color: None,
            marker_edge_width: defaults::MARKER_EDGE_WIDTH,
            alpha: None,
        }
    }
}

impl From<SceneLineMark> for SceneMark {
    fn from(mark: SceneLineMark) -> Self {
        SceneMark::Line(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors_inherit_from_line() {
        let mark = SceneLineMark {
            color: Color::parse("c"),
            marker: MarkerShape::Circle,
            ..Default::default()
        };
        assert_eq!(mark.marker_face_color(), &Color::parse("c"));
        assert_eq!(mark.marker_edge_color(), Color::parse("k"));

        let mark = SceneLineMark {
            color: Color::parse("c"),
            marker: MarkerShape::Point,
            ..Default::default()
        };
        assert_eq!(mark.marker_edge_color(), Color::parse("c"));

        let mark = SceneLineMark {
            color: Color::parse("c"),
            marker: MarkerShape::Plus,
            marker_edge_color: None,
            ..Default::default()
        };
        assert_eq!(mark.marker_edge_color(), Color::parse("c"));
    }

    #[test]
    fn test_single_point_is_not_connected() {
        let mark = SceneLineMark {
            x: vec![1.0],
            y: vec![2.0],
            ..Default::default()
        };
        assert!(!mark.is_connected());

        let mark = SceneLineMark {
            x: vec![1.0, 2.0],
            y: vec![2.0, 3.0],
            ..Default::default()
        };
        assert!(mark.is_connected());
    }

    #[test]
    fn test_bounds_skip_nan() {
        let mark = SceneLineMark {
            x: vec![1.0, f64::NAN, 3.0],
            y: vec![-1.0, 0.0, 2.0],
            ..Default::default()
        };
        assert_eq!(mark.bounds(), Some([1.0, 3.0, -1.0, 2.0]));
    }
}
