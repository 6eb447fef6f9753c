use super::mark::SceneMark;
use super::point_bounds;
use crate::defaults;
use itertools::izip;
use plotcheck_common::color::Color;
use plotcheck_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

/// A batch of unconnected markers drawn by one scatter call.
///
/// The marker shape is not recorded, only the per-point styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneSymbolMark {
    pub label: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub fill: ScalarOrArray<[f64; 4]>,
    pub stroke: ScalarOrArray<[f64; 4]>,
    pub stroke_width: ScalarOrArray<f64>,
    pub size: ScalarOrArray<f64>,
    pub alpha: Option<f64>,
}

impl SceneSymbolMark {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn xy_iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        izip!(self.x.iter(), self.y.iter()).map(|(x, y)| (*x, *y))
    }

    /// Raw face colors. May hold fewer or more entries than there are points.
    pub fn fill_values(&self) -> &[[f64; 4]] {
        self.fill.values()
    }

    pub fn stroke_values(&self) -> &[[f64; 4]] {
        self.stroke.values()
    }

    pub fn stroke_width_values(&self) -> &[f64] {
        self.stroke_width.values()
    }

    pub fn size_values(&self) -> &[f64] {
        self.size.values()
    }

    pub fn bounds(&self) -> Option<[f64; 4]> {
        point_bounds(self.xy_iter())
    }
}

impl Default for SceneSymbolMark {
    fn default() -> Self {
        let fill = Color::parse(defaults::SCATTER_COLOR)
            .rgba()
            .unwrap_or([0.0, 0.0, 1.0, 1.0]);
        let stroke = Color::parse(defaults::SCATTER_EDGE_COLOR)
            .rgba()
            .unwrap_or([0.0, 0.0, 0.0, 1.0]);
        Self {
            label: None,
            x: vec![],
            y: vec![],
            fill: ScalarOrArray::new_scalar(fill),
            stroke: ScalarOrArray::new_scalar(stroke),
            stroke_width: ScalarOrArray::new_scalar(defaults::SCATTER_LINE_WIDTH),
            size: ScalarOrArray::new_scalar(defaults::SCATTER_SIZE),
            alpha: None,
        }
    }
}

impl From<SceneSymbolMark> for SceneMark {
    fn from(mark: SceneSymbolMark) -> Self {
        SceneMark::Symbol(mark)
    }
}
