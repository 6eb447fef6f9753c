use plotcheck_common::types::BarOrientation;
use serde::{Deserialize, Serialize};

use super::mark::SceneMark;

/// One bar. `x`/`y` is the lower left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRectMark {
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub orientation: BarOrientation,
    pub fill: [f64; 4],
    pub stroke: [f64; 4],
    pub stroke_width: f64,
    pub alpha: Option<f64>,
}

impl SceneRectMark {
    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    pub fn y2(&self) -> f64 {
        self.y + self.height
    }

    /// Lower edge along the category axis (x for vertical bars, y for horizontal)
    pub fn category_start(&self) -> f64 {
        match self.orientation {
            BarOrientation::Vertical => self.x,
            BarOrientation::Horizontal => self.y,
        }
    }

    pub fn bounds(&self) -> Option<[f64; 4]> {
        let xs = [self.x, self.x2()];
        let ys = [self.y, self.y2()];
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return None;
        }
        Some([
            xs[0].min(xs[1]),
            xs[0].max(xs[1]),
            ys[0].min(ys[1]),
            ys[0].max(ys[1]),
        ])
    }
}

impl Default for SceneRectMark {
    fn default() -> Self {
        Self {
            label: None,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            orientation: BarOrientation::Vertical,
            fill: [0.0, 0.0, 1.0, 1.0],
            stroke: [0.0, 0.0, 0.0, 1.0],
            stroke_width: crate::defaults::BAR_LINE_WIDTH,
            alpha: None,
        }
    }
}

impl From<SceneRectMark> for SceneMark {
    fn from(mark: SceneRectMark) -> Self {
        SceneMark::Rect(mark)
    }
}
