use crate::error::PlotCommonError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

/// Marker drawn at each data point, identified by its single character code
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum MarkerShape {
    #[default]
    #[strum(to_string = "", serialize = "None", serialize = "none", serialize = " ")]
    None,
    #[strum(to_string = ".")]
    Point,
    #[strum(to_string = ",")]
    Pixel,
    #[strum(to_string = "o")]
    Circle,
    #[strum(to_string = "v")]
    TriangleDown,
    #[strum(to_string = "^")]
    TriangleUp,
    #[strum(to_string = "<")]
    TriangleLeft,
    #[strum(to_string = ">")]
    TriangleRight,
    #[strum(to_string = "8")]
    Octagon,
    #[strum(to_string = "s")]
    Square,
    #[strum(to_string = "p")]
    Pentagon,
    #[strum(to_string = "*")]
    Star,
    #[strum(to_string = "h")]
    Hexagon1,
    #[strum(to_string = "H")]
    Hexagon2,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "x")]
    X,
    #[strum(to_string = "D")]
    Diamond,
    #[strum(to_string = "d")]
    ThinDiamond,
    #[strum(to_string = "|")]
    VLine,
    #[strum(to_string = "_")]
    HLine,
}

impl MarkerShape {
    pub fn parse(code: &str) -> Result<Self, PlotCommonError> {
        MarkerShape::from_str(code).map_err(|_| PlotCommonError::InvalidMarker(code.to_string()))
    }

    pub fn is_visible(&self) -> bool {
        *self != MarkerShape::None
    }

    /// Whether the marker has an interior that takes a face color
    pub fn is_filled(&self) -> bool {
        !matches!(
            self,
            MarkerShape::None
                | MarkerShape::Plus
                | MarkerShape::X
                | MarkerShape::VLine
                | MarkerShape::HLine
        )
    }
}

impl TryFrom<String> for MarkerShape {
    type Error = PlotCommonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MarkerShape::parse(&value)
    }
}

impl From<MarkerShape> for String {
    fn from(value: MarkerShape) -> Self {
        value.as_ref().to_string()
    }
}

/// Style of the segments connecting the points of a line
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum LineStyle {
    #[default]
    #[strum(to_string = "-", serialize = "solid")]
    Solid,
    #[strum(to_string = "--", serialize = "dashed")]
    Dashed,
    #[strum(to_string = "-.", serialize = "dashdot")]
    DashDot,
    #[strum(to_string = ":", serialize = "dotted")]
    Dotted,
    #[strum(to_string = "", serialize = "None", serialize = "none", serialize = " ")]
    None,
}

impl LineStyle {
    pub fn parse(code: &str) -> Result<Self, PlotCommonError> {
        LineStyle::from_str(code).map_err(|_| PlotCommonError::InvalidLineStyle(code.to_string()))
    }

    pub fn is_visible(&self) -> bool {
        *self != LineStyle::None
    }
}

impl TryFrom<String> for LineStyle {
    type Error = PlotCommonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LineStyle::parse(&value)
    }
}

impl From<LineStyle> for String {
    fn from(value: LineStyle) -> Self {
        value.as_ref().to_string()
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarOrientation {
    #[default]
    Vertical,
    Horizontal,
}
