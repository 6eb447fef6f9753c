use crate::assertion::{assert_allclose, assert_equal, Tolerance};
use crate::checker::{memoize, owned, AxesChecker};
use crate::error::{InvalidPlotError, PlotCheckError};
use crate::normalize::{tile_expected, to_alpha, to_rgb, to_rgb_all};
use crate::permutation::{find_permutation, Permutation};
use plotcheck_common::color::Color;
use plotcheck_common::types::{LineStyle, MarkerShape};
use plotcheck_scenegraph::axes::Axes;
use plotcheck_scenegraph::marks::line::SceneLineMark;
use std::cell::OnceCell;
use std::str::FromStr;
use strum::{AsRefStr, EnumString, VariantNames};
use tracing::debug;

/// Per-line attribute usable as the key of [`LinePlotChecker::find_permutation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum LineAttribute {
    Colors,
    MarkerFaceColors,
    MarkerEdgeColors,
    LineWidths,
    MarkerEdgeWidths,
    MarkerSizes,
    Markers,
    LineStyles,
    Labels,
    Alphas,
    #[strum(to_string = "x_data")]
    XData,
    #[strum(to_string = "y_data")]
    YData,
}

impl LineAttribute {
    pub fn parse(name: &str) -> Result<Self, PlotCheckError> {
        LineAttribute::from_str(name).map_err(|_| PlotCheckError::InvalidExpectation {
            attribute: name.to_string(),
            reason: format!(
                "not a line attribute, expected one of {}",
                LineAttribute::VARIANTS.join(", ")
            ),
        })
    }
}

/// Expected values for one attribute of every line, as accepted by
/// [`LinePlotChecker::find_permutation`]. Strings are read as colors, markers
/// or line styles when the attribute calls for one.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    Colors(Vec<Color>),
    Numbers(Vec<f64>),
    Series(Vec<Vec<f64>>),
    Text(Vec<String>),
    Markers(Vec<MarkerShape>),
    LineStyles(Vec<LineStyle>),
}

impl AttributeValues {
    fn kind(&self) -> &'static str {
        match self {
            Self::Colors(_) => "colors",
            Self::Numbers(_) => "numbers",
            Self::Series(_) => "data series",
            Self::Text(_) => "strings",
            Self::Markers(_) => "markers",
            Self::LineStyles(_) => "line styles",
        }
    }

    fn wrong_kind(&self, key: LineAttribute, wanted: &str) -> PlotCheckError {
        PlotCheckError::InvalidExpectation {
            attribute: key.as_ref().to_string(),
            reason: format!("expected {wanted}, got {}", self.kind()),
        }
    }

    fn into_rgb(self, key: LineAttribute) -> Result<Vec<[f64; 3]>, PlotCheckError> {
        match self {
            Self::Colors(colors) => to_rgb_all(colors),
            Self::Text(names) => to_rgb_all(names),
            other => Err(other.wrong_kind(key, "colors")),
        }
    }

    fn into_numbers(self, key: LineAttribute) -> Result<Vec<f64>, PlotCheckError> {
        match self {
            Self::Numbers(values) => Ok(values),
            other => Err(other.wrong_kind(key, "numbers")),
        }
    }

    fn into_series(self, key: LineAttribute) -> Result<Vec<Vec<f64>>, PlotCheckError> {
        match self {
            Self::Series(values) => Ok(values),
            other => Err(other.wrong_kind(key, "data series")),
        }
    }

    fn into_text(self, key: LineAttribute) -> Result<Vec<String>, PlotCheckError> {
        match self {
            Self::Text(values) => Ok(values),
            other => Err(other.wrong_kind(key, "strings")),
        }
    }

    fn into_markers(self, key: LineAttribute) -> Result<Vec<MarkerShape>, PlotCheckError> {
        match self {
            Self::Markers(values) => Ok(values),
            Self::Text(codes) => parse_markers(codes),
            other => Err(other.wrong_kind(key, "markers")),
        }
    }

    fn into_line_styles(self, key: LineAttribute) -> Result<Vec<LineStyle>, PlotCheckError> {
        match self {
            Self::LineStyles(values) => Ok(values),
            Self::Text(codes) => parse_line_styles(codes),
            other => Err(other.wrong_kind(key, "line styles")),
        }
    }
}

impl From<Vec<Color>> for AttributeValues {
    fn from(values: Vec<Color>) -> Self {
        Self::Colors(values)
    }
}

impl From<Vec<f64>> for AttributeValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Numbers(values)
    }
}

impl From<&[f64]> for AttributeValues {
    fn from(values: &[f64]) -> Self {
        Self::Numbers(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for AttributeValues {
    fn from(values: [f64; N]) -> Self {
        Self::Numbers(values.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for AttributeValues {
    fn from(values: Vec<Vec<f64>>) -> Self {
        Self::Series(values)
    }
}

impl From<Vec<String>> for AttributeValues {
    fn from(values: Vec<String>) -> Self {
        Self::Text(values)
    }
}

impl From<Vec<&str>> for AttributeValues {
    fn from(values: Vec<&str>) -> Self {
        Self::Text(owned(&values))
    }
}

impl<const N: usize> From<[&str; N]> for AttributeValues {
    fn from(values: [&str; N]) -> Self {
        Self::Text(owned(&values))
    }
}

impl From<Vec<MarkerShape>> for AttributeValues {
    fn from(values: Vec<MarkerShape>) -> Self {
        Self::Markers(values)
    }
}

impl From<Vec<LineStyle>> for AttributeValues {
    fn from(values: Vec<LineStyle>) -> Self {
        Self::LineStyles(values)
    }
}

fn parse_markers<S: AsRef<str>>(
    codes: impl IntoIterator<Item = S>,
) -> Result<Vec<MarkerShape>, PlotCheckError> {
    codes
        .into_iter()
        .map(|code| MarkerShape::parse(code.as_ref()).map_err(PlotCheckError::from))
        .collect()
}

fn parse_line_styles<S: AsRef<str>>(
    codes: impl IntoIterator<Item = S>,
) -> Result<Vec<LineStyle>, PlotCheckError> {
    codes
        .into_iter()
        .map(|code| LineStyle::parse(code.as_ref()).map_err(PlotCheckError::from))
        .collect()
}

/// Checker for line plots. Every line mark is one element, in draw order.
///
/// When the draw order of the lines is not known in advance,
/// [`find_permutation`](Self::find_permutation) matches expected lines to
/// drawn lines by one attribute. The match then reorders the expected values
/// of every later per-line assertion until it is cleared or replaced.
#[derive(Debug)]
pub struct LinePlotChecker<'a> {
    axes: &'a Axes,
    lines: Vec<(usize, &'a SceneLineMark)>,
    permutation: Option<Permutation>,
    colors: OnceCell<Vec<[f64; 3]>>,
    markerfacecolors: OnceCell<Vec<[f64; 3]>>,
    markeredgecolors: OnceCell<Vec<[f64; 3]>>,
    alphas: OnceCell<Vec<f64>>,
}

impl<'a> LinePlotChecker<'a> {
    pub fn new(axes: &'a Axes) -> Result<Self, PlotCheckError> {
        let lines = axes.lines().collect::<Vec<_>>();
        if lines.is_empty() {
            return Err(InvalidPlotError::NoData.into());
        }
        debug!(lines = lines.len(), "line plot checker");
        Ok(Self {
            axes,
            lines,
            permutation: None,
            colors: OnceCell::new(),
            markerfacecolors: OnceCell::new(),
            markeredgecolors: OnceCell::new(),
            alphas: OnceCell::new(),
        })
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn assert_num_lines(&self, num_lines: usize) -> Result<(), PlotCheckError> {
        if num_lines != self.num_lines() {
            return Err(PlotCheckError::AssertionFailed(format!(
                "plot has incorrect number of lines: {} (expected {num_lines})",
                self.num_lines()
            )));
        }
        Ok(())
    }

    /// The active permutation, `None` when lines are compared in draw order
    pub fn permutation(&self) -> Option<&Permutation> {
        self.permutation.as_ref()
    }

    /// Finds how the expected lines map onto the drawn lines by comparing
    /// `key` values exactly, and keeps that mapping for later assertions.
    /// Expected colors are normalized before comparison.
    pub fn find_permutation(
        &mut self,
        key: LineAttribute,
        expected: impl Into<AttributeValues>,
    ) -> Result<&Permutation, PlotCheckError> {
        let expected = expected.into();
        let name = key.as_ref();
        let permutation = match key {
            LineAttribute::Colors => {
                find_permutation(name, &expected.into_rgb(key)?, self.colors()?)?
            }
            LineAttribute::MarkerFaceColors => {
                find_permutation(name, &expected.into_rgb(key)?, self.markerfacecolors()?)?
            }
            LineAttribute::MarkerEdgeColors => {
                find_permutation(name, &expected.into_rgb(key)?, self.markeredgecolors()?)?
            }
            LineAttribute::LineWidths => {
                find_permutation(name, &expected.into_numbers(key)?, &self.linewidths())?
            }
            LineAttribute::MarkerEdgeWidths => {
                find_permutation(name, &expected.into_numbers(key)?, &self.markeredgewidths())?
            }
            LineAttribute::MarkerSizes => {
                find_permutation(name, &expected.into_numbers(key)?, &self.markersizes())?
            }
            LineAttribute::Alphas => {
                find_permutation(name, &expected.into_numbers(key)?, self.alphas()?)?
            }
            LineAttribute::Markers => {
                find_permutation(name, &expected.into_markers(key)?, &self.markers())?
            }
            LineAttribute::LineStyles => {
                find_permutation(name, &expected.into_line_styles(key)?, &self.linestyles())?
            }
            LineAttribute::Labels => {
                find_permutation(name, &expected.into_text(key)?, &self.labels()?)?
            }
            LineAttribute::XData => {
                find_permutation(name, &expected.into_series(key)?, &self.x_data())?
            }
            LineAttribute::YData => {
                find_permutation(name, &expected.into_series(key)?, &self.y_data())?
            }
        };
        Ok(self.permutation.insert(permutation))
    }

    /// Compares lines in draw order again
    pub fn clear_permutation(&mut self) {
        self.permutation = None;
    }

    /// Tiles a single expected value to every line, then reorders the expected
    /// values into draw order through the active permutation
    fn arrange<T: Clone>(&self, expected: Vec<T>) -> Vec<T> {
        let expected = tile_expected(self.lines.len(), expected);
        match &self.permutation {
            Some(permutation) => permutation.apply(&expected).unwrap_or(expected),
            None => expected,
        }
    }

    fn per_line<T>(&self, f: impl Fn(&SceneLineMark) -> T) -> Vec<T> {
        self.lines.iter().map(|(_, line)| f(*line)).collect()
    }

    fn try_per_line<T>(
        &self,
        f: impl Fn(&SceneLineMark) -> Result<T, PlotCheckError>,
    ) -> Result<Vec<T>, PlotCheckError> {
        self.lines.iter().map(|(_, line)| f(*line)).collect()
    }

    /// x values of each line
    pub fn x_data(&self) -> Vec<Vec<f64>> {
        self.per_line(|line| line.x.clone())
    }

    /// x values as one row per point and one column per line. `None` when the
    /// lines differ in length.
    pub fn x_data_stacked(&self) -> Option<Vec<Vec<f64>>> {
        stack(self.x_data())
    }

    pub fn assert_x_data_equal(&self, x_data: &[Vec<f64>]) -> Result<(), PlotCheckError> {
        assert_equal("x_data", &self.arrange(x_data.to_vec()), &self.x_data())
    }

    pub fn assert_x_data_allclose(
        &self,
        x_data: &[Vec<f64>],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose("x_data", &self.arrange(x_data.to_vec()), &self.x_data(), &tolerance)
    }

    pub fn y_data(&self) -> Vec<Vec<f64>> {
        self.per_line(|line| line.y.clone())
    }

    pub fn y_data_stacked(&self) -> Option<Vec<Vec<f64>>> {
        stack(self.y_data())
    }

    pub fn assert_y_data_equal(&self, y_data: &[Vec<f64>]) -> Result<(), PlotCheckError> {
        assert_equal("y_data", &self.arrange(y_data.to_vec()), &self.y_data())
    }

    pub fn assert_y_data_allclose(
        &self,
        y_data: &[Vec<f64>],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose("y_data", &self.arrange(y_data.to_vec()), &self.y_data(), &tolerance)
    }

    pub fn colors(&self) -> Result<&[[f64; 3]], PlotCheckError> {
        memoize(&self.colors, || self.try_per_line(|line| to_rgb(&line.color)))
            .map(Vec::as_slice)
    }

    pub fn assert_colors_equal<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        assert_equal("colors", &self.arrange(to_rgb_all(colors)?), self.colors()?)
    }

    pub fn assert_colors_allclose<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "colors",
            &self.arrange(to_rgb_all(colors)?),
            self.colors()?,
            &tolerance,
        )
    }

    pub fn linewidths(&self) -> Vec<f64> {
        self.per_line(|line| line.stroke_width)
    }

    pub fn assert_linewidths_equal(&self, linewidths: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("linewidths", &self.arrange(linewidths.to_vec()), &self.linewidths())
    }

    pub fn assert_linewidths_allclose(
        &self,
        linewidths: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "linewidths",
            &self.arrange(linewidths.to_vec()),
            &self.linewidths(),
            &tolerance,
        )
    }

    pub fn linestyles(&self) -> Vec<LineStyle> {
        self.per_line(|line| line.line_style)
    }

    pub fn assert_linestyles_equal<S: AsRef<str>>(
        &self,
        linestyles: impl IntoIterator<Item = S>,
    ) -> Result<(), PlotCheckError> {
        let expected = self.arrange(parse_line_styles(linestyles)?);
        assert_equal("linestyles", &expected, &self.linestyles())
    }

    /// Marker face color of each line, inheriting the line color when unset
    pub fn markerfacecolors(&self) -> Result<&[[f64; 3]], PlotCheckError> {
        memoize(&self.markerfacecolors, || {
            self.try_per_line(|line| to_rgb(line.marker_face_color()))
        })
        .map(Vec::as_slice)
    }

    pub fn assert_markerfacecolors_equal<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        assert_equal(
            "markerfacecolors",
            &self.arrange(to_rgb_all(colors)?),
            self.markerfacecolors()?,
        )
    }

    pub fn assert_markerfacecolors_allclose<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "markerfacecolors",
            &self.arrange(to_rgb_all(colors)?),
            self.markerfacecolors()?,
            &tolerance,
        )
    }

    pub fn markeredgecolors(&self) -> Result<&[[f64; 3]], PlotCheckError> {
        memoize(&self.markeredgecolors, || {
            self.try_per_line(|line| to_rgb(&line.marker_edge_color()))
        })
        .map(Vec::as_slice)
    }

    pub fn assert_markeredgecolors_equal<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        assert_equal(
            "markeredgecolors",
            &self.arrange(to_rgb_all(colors)?),
            self.markeredgecolors()?,
        )
    }

    pub fn assert_markeredgecolors_allclose<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "markeredgecolors",
            &self.arrange(to_rgb_all(colors)?),
            self.markeredgecolors()?,
            &tolerance,
        )
    }

    pub fn markeredgewidths(&self) -> Vec<f64> {
        self.per_line(|line| line.marker_edge_width)
    }

    pub fn assert_markeredgewidths_equal(&self, widths: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal(
            "markeredgewidths",
            &self.arrange(widths.to_vec()),
            &self.markeredgewidths(),
        )
    }

    pub fn assert_markeredgewidths_allclose(
        &self,
        widths: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "markeredgewidths",
            &self.arrange(widths.to_vec()),
            &self.markeredgewidths(),
            &tolerance,
        )
    }

    pub fn markersizes(&self) -> Vec<f64> {
        self.per_line(|line| line.marker_size)
    }

    pub fn assert_markersizes_equal(&self, sizes: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("markersizes", &self.arrange(sizes.to_vec()), &self.markersizes())
    }

    pub fn assert_markersizes_allclose(
        &self,
        sizes: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "markersizes",
            &self.arrange(sizes.to_vec()),
            &self.markersizes(),
            &tolerance,
        )
    }

    pub fn markers(&self) -> Vec<MarkerShape> {
        self.per_line(|line| line.marker)
    }

    pub fn assert_markers_equal<S: AsRef<str>>(
        &self,
        markers: impl IntoIterator<Item = S>,
    ) -> Result<(), PlotCheckError> {
        let expected = self.arrange(parse_markers(markers)?);
        assert_equal("markers", &expected, &self.markers())
    }

    /// Opacity of each line: its explicit alpha, else the alpha channel of its
    /// color
    pub fn alphas(&self) -> Result<&[f64], PlotCheckError> {
        memoize(&self.alphas, || {
            self.try_per_line(|line| match line.alpha {
                Some(alpha) => Ok(alpha),
                None => to_alpha(&line.color),
            })
        })
        .map(Vec::as_slice)
    }

    pub fn assert_alphas_equal(&self, alphas: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("alphas", &self.arrange(alphas.to_vec()), self.alphas()?)
    }

    pub fn assert_alphas_allclose(
        &self,
        alphas: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose(
            "alphas",
            &self.arrange(alphas.to_vec()),
            self.alphas()?,
            &tolerance,
        )
    }

    /// Legend text of each line. Lines without a legend entry report an empty
    /// label; an axes without a legend has no labels at all.
    pub fn labels(&self) -> Result<Vec<String>, PlotCheckError> {
        let legend = self
            .axes
            .legend()
            .ok_or_else(|| PlotCheckError::AssertionFailed("no legend drawn".to_string()))?;
        Ok(self
            .lines
            .iter()
            .map(|(mark, _)| legend.label_for(*mark).unwrap_or_default().to_string())
            .collect())
    }

    pub fn assert_labels_equal(&self, labels: &[&str]) -> Result<(), PlotCheckError> {
        let actual = self.labels()?;
        assert_equal("labels", &self.arrange(owned(labels)), &actual)
    }
}

impl AxesChecker for LinePlotChecker<'_> {
    fn axes(&self) -> &Axes {
        self.axes
    }
}

/// Transposes per-line rows into per-point rows when all lines share a length
fn stack(rows: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let len = rows.first().map(Vec::len)?;
    if rows.iter().any(|row| row.len() != len) {
        return None;
    }
    Some(
        (0..len)
            .map(|i| rows.iter().map(|row| row[i]).collect())
            .collect(),
    )
}
