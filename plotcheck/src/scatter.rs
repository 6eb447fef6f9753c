use crate::assertion::{assert_allclose, assert_equal, Tolerance};
use crate::checker::{memoize, AxesChecker};
use crate::error::{InvalidPlotError, PlotCheckError};
use crate::normalize::{reconcile, rgba_to_rgb, tile_expected, to_alpha, to_rgb, to_rgb_all};
use plotcheck_common::color::Color;
use plotcheck_common::types::MarkerShape;
use plotcheck_scenegraph::axes::Axes;
use plotcheck_scenegraph::marks::line::SceneLineMark;
use plotcheck_scenegraph::marks::symbol::SceneSymbolMark;
use std::cell::OnceCell;
use tracing::debug;

/// Checker for plots of unconnected points.
///
/// Points may come from line marks drawn with a marker and no connecting line,
/// or from scatter batches. Attributes are flattened into one value per point,
/// line marks first and then scatter batches, each in draw order.
#[derive(Debug)]
pub struct ScatterPlotChecker<'a> {
    axes: &'a Axes,
    lines: Vec<&'a SceneLineMark>,
    symbols: Vec<&'a SceneSymbolMark>,
    colors: OnceCell<Vec<[f64; 3]>>,
    edgecolors: OnceCell<Vec<[f64; 3]>>,
    alphas: OnceCell<Vec<f64>>,
}

impl<'a> ScatterPlotChecker<'a> {
    pub fn new(axes: &'a Axes) -> Result<Self, PlotCheckError> {
        let mut lines = Vec::new();
        for (index, line) in axes.lines() {
            if line.is_connected() {
                return Err(InvalidPlotError::ConnectedLine { index }.into());
            }
            if !line.marker.is_visible() {
                return Err(InvalidPlotError::EmptyMarker { index }.into());
            }
            lines.push(line);
        }
        let symbols = axes.symbols().map(|(_, mark)| mark).collect::<Vec<_>>();
        if lines.is_empty() && symbols.is_empty() {
            return Err(InvalidPlotError::NoData.into());
        }

        debug!(
            lines = lines.len(),
            batches = symbols.len(),
            "scatter plot checker"
        );
        Ok(Self {
            axes,
            lines,
            symbols,
            colors: OnceCell::new(),
            edgecolors: OnceCell::new(),
            alphas: OnceCell::new(),
        })
    }

    /// Collects one value per point. `line_value` gives the single value of a
    /// line mark and `batch_values` the raw values of a scatter batch; both are
    /// tiled or trimmed to the number of points they cover.
    fn per_point<T: Clone>(
        &self,
        line_value: impl Fn(&SceneLineMark) -> Result<T, PlotCheckError>,
        batch_values: impl Fn(&SceneSymbolMark) -> Result<Vec<T>, PlotCheckError>,
    ) -> Result<Vec<T>, PlotCheckError> {
        let mut values = Vec::with_capacity(self.num_points());
        for line in self.lines.iter().copied() {
            values.extend(reconcile(line.len(), &[line_value(line)?])?);
        }
        for symbol in self.symbols.iter().copied() {
            values.extend(reconcile(symbol.len(), &batch_values(symbol)?)?);
        }
        Ok(values)
    }

    pub fn num_points(&self) -> usize {
        self.lines.iter().map(|l| l.len()).sum::<usize>()
            + self.symbols.iter().map(|s| s.len()).sum::<usize>()
    }

    pub fn assert_num_points(&self, num_points: usize) -> Result<(), PlotCheckError> {
        if num_points != self.num_points() {
            return Err(PlotCheckError::AssertionFailed(format!(
                "plot has incorrect number of points: {} (expected {num_points})",
                self.num_points()
            )));
        }
        Ok(())
    }

    pub fn x_data(&self) -> Vec<f64> {
        self.lines
            .iter()
            .flat_map(|l| l.x.iter())
            .chain(self.symbols.iter().flat_map(|s| s.x.iter()))
            .copied()
            .collect()
    }

    pub fn assert_x_data_equal(&self, x_data: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("x_data", x_data, &self.x_data())
    }

    pub fn assert_x_data_allclose(
        &self,
        x_data: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose("x_data", x_data, &self.x_data(), &tolerance)
    }

    pub fn y_data(&self) -> Vec<f64> {
        self.lines
            .iter()
            .flat_map(|l| l.y.iter())
            .chain(self.symbols.iter().flat_map(|s| s.y.iter()))
            .copied()
            .collect()
    }

    pub fn assert_y_data_equal(&self, y_data: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("y_data", y_data, &self.y_data())
    }

    pub fn assert_y_data_allclose(
        &self,
        y_data: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose("y_data", y_data, &self.y_data(), &tolerance)
    }

    /// Face color of each point
    pub fn colors(&self) -> Result<&[[f64; 3]], PlotCheckError> {
        memoize(&self.colors, || {
            self.per_point(
                |line| to_rgb(line.marker_face_color()),
                |symbol| Ok(symbol.fill_values().iter().map(rgba_to_rgb).collect()),
            )
        })
        .map(Vec::as_slice)
    }

    pub fn assert_colors_equal<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        let actual = self.colors()?;
        let expected = tile_expected(actual.len(), to_rgb_all(colors)?);
        assert_equal("colors", &expected, actual)
    }

    pub fn assert_colors_allclose<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.colors()?;
        let expected = tile_expected(actual.len(), to_rgb_all(colors)?);
        assert_allclose("colors", &expected, actual, &tolerance)
    }

    /// Edge color of each point
    pub fn edgecolors(&self) -> Result<&[[f64; 3]], PlotCheckError> {
        memoize(&self.edgecolors, || {
            self.per_point(
                |line| to_rgb(&line.marker_edge_color()),
                |symbol| Ok(symbol.stroke_values().iter().map(rgba_to_rgb).collect()),
            )
        })
        .map(Vec::as_slice)
    }

    pub fn assert_edgecolors_equal<C: Into<Color>>(
        &self,
        edgecolors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        let actual = self.edgecolors()?;
        let expected = tile_expected(actual.len(), to_rgb_all(edgecolors)?);
        assert_equal("edgecolors", &expected, actual)
    }

    pub fn assert_edgecolors_allclose<C: Into<Color>>(
        &self,
        edgecolors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.edgecolors()?;
        let expected = tile_expected(actual.len(), to_rgb_all(edgecolors)?);
        assert_allclose("edgecolors", &expected, actual, &tolerance)
    }

    /// Width of each point's outline
    pub fn edgewidths(&self) -> Result<Vec<f64>, PlotCheckError> {
        self.per_point(
            |line| Ok(line.marker_edge_width),
            |symbol| Ok(symbol.stroke_width_values().to_vec()),
        )
    }

    pub fn assert_edgewidths_equal(&self, edgewidths: &[f64]) -> Result<(), PlotCheckError> {
        let actual = self.edgewidths()?;
        let expected = tile_expected(actual.len(), edgewidths.to_vec());
        assert_equal("edgewidths", &expected, &actual)
    }

    pub fn assert_edgewidths_allclose(
        &self,
        edgewidths: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.edgewidths()?;
        let expected = tile_expected(actual.len(), edgewidths.to_vec());
        assert_allclose("edgewidths", &expected, &actual, &tolerance)
    }

    /// Marker area of each point. Line marks report their marker size squared.
    pub fn sizes(&self) -> Result<Vec<f64>, PlotCheckError> {
        self.per_point(
            |line| Ok(line.marker_size.powi(2)),
            |symbol| Ok(symbol.size_values().to_vec()),
        )
    }

    pub fn assert_sizes_equal(&self, sizes: &[f64]) -> Result<(), PlotCheckError> {
        let actual = self.sizes()?;
        let expected = tile_expected(actual.len(), sizes.to_vec());
        assert_equal("sizes", &expected, &actual)
    }

    pub fn assert_sizes_allclose(
        &self,
        sizes: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.sizes()?;
        let expected = tile_expected(actual.len(), sizes.to_vec());
        assert_allclose("sizes", &expected, &actual, &tolerance)
    }

    /// Marker width of each point, the square root of its area
    pub fn markersizes(&self) -> Result<Vec<f64>, PlotCheckError> {
        Ok(self.sizes()?.into_iter().map(f64::sqrt).collect())
    }

    pub fn assert_markersizes_equal(&self, markersizes: &[f64]) -> Result<(), PlotCheckError> {
        let actual = self.markersizes()?;
        let expected = tile_expected(actual.len(), markersizes.to_vec());
        assert_equal("markersizes", &expected, &actual)
    }

    pub fn assert_markersizes_allclose(
        &self,
        markersizes: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.markersizes()?;
        let expected = tile_expected(actual.len(), markersizes.to_vec());
        assert_allclose("markersizes", &expected, &actual, &tolerance)
    }

    /// Marker of each point. Scatter batches only keep the marker outline, so
    /// any batch makes markers unavailable.
    pub fn markers(&self) -> Result<Vec<MarkerShape>, PlotCheckError> {
        if !self.symbols.is_empty() {
            return Err(PlotCheckError::NotSupported {
                attribute: "markers".to_string(),
                reason: "scatter batches do not record the marker they were drawn with"
                    .to_string(),
            });
        }
        self.per_point(|line| Ok(line.marker), |_| Ok(vec![]))
    }

    pub fn assert_markers_equal<S: AsRef<str>>(
        &self,
        markers: impl IntoIterator<Item = S>,
    ) -> Result<(), PlotCheckError> {
        let expected = markers
            .into_iter()
            .map(|m| MarkerShape::parse(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let actual = self.markers()?;
        let expected = tile_expected(actual.len(), expected);
        assert_equal("markers", &expected, &actual)
    }

    /// Opacity of each point: the explicit alpha of its mark, else the alpha
    /// channel of its face color
    pub fn alphas(&self) -> Result<&[f64], PlotCheckError> {
        memoize(&self.alphas, || {
            self.per_point(
                |line| match line.alpha {
                    Some(alpha) => Ok(alpha),
                    None => to_alpha(line.marker_face_color()),
                },
                |symbol| match symbol.alpha {
                    Some(alpha) => Ok(vec![alpha]),
                    None => Ok(symbol.fill_values().iter().map(|c| c[3]).collect()),
                },
            )
        })
        .map(Vec::as_slice)
    }

    pub fn assert_alphas_equal(&self, alphas: &[f64]) -> Result<(), PlotCheckError> {
        let actual = self.alphas()?;
        let expected = tile_expected(actual.len(), alphas.to_vec());
        assert_equal("alphas", &expected, actual)
    }

    pub fn assert_alphas_allclose(
        &self,
        alphas: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.alphas()?;
        let expected = tile_expected(actual.len(), alphas.to_vec());
        assert_allclose("alphas", &expected, actual, &tolerance)
    }
}

impl AxesChecker for ScatterPlotChecker<'_> {
    fn axes(&self) -> &Axes {
        self.axes
    }
}
