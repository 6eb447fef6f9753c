use crate::assertion::{assert_allclose, assert_equal, Tolerance};
use crate::checker::AxesChecker;
use crate::error::{InvalidPlotError, PlotCheckError};
use crate::normalize::{rgba_to_rgb, tile_expected, to_rgb_all};
use plotcheck_common::color::Color;
use plotcheck_common::types::BarOrientation;
use plotcheck_scenegraph::axes::Axes;
use plotcheck_scenegraph::marks::rect::SceneRectMark;
use std::cell::OnceCell;
use tracing::debug;

/// Checker for bar plots.
///
/// Bars are ordered by their position along the category axis (left to right
/// for vertical bars, bottom to top for horizontal ones), whatever order they
/// were drawn in.
#[derive(Debug)]
pub struct BarPlotChecker<'a> {
    axes: &'a Axes,
    bars: Vec<&'a SceneRectMark>,
    orientation: BarOrientation,
    colors: OnceCell<Vec<[f64; 3]>>,
    edgecolors: OnceCell<Vec<[f64; 3]>>,
}

impl<'a> BarPlotChecker<'a> {
    pub fn new(axes: &'a Axes) -> Result<Self, PlotCheckError> {
        let mut bars = axes.rects().map(|(_, bar)| bar).collect::<Vec<_>>();
        let Some(orientation) = bars.first().map(|bar| bar.orientation) else {
            return Err(InvalidPlotError::NoData.into());
        };
        if bars.iter().any(|bar| bar.orientation != orientation) {
            return Err(InvalidPlotError::MixedPlotKind(
                "both vertical and horizontal bars".to_string(),
            )
            .into());
        }
        bars.sort_by(|a, b| a.category_start().total_cmp(&b.category_start()));

        debug!(bars = bars.len(), ?orientation, "bar plot checker");
        Ok(Self {
            axes,
            bars,
            orientation,
            colors: OnceCell::new(),
            edgecolors: OnceCell::new(),
        })
    }

    pub fn orientation(&self) -> BarOrientation {
        self.orientation
    }

    fn per_bar<T>(&self, f: impl Fn(&SceneRectMark) -> T) -> Vec<T> {
        self.bars.iter().map(|bar| f(*bar)).collect()
    }

    pub fn num_bars(&self) -> usize {
        self.bars.len()
    }

    pub fn assert_num_bars(&self, num_bars: usize) -> Result<(), PlotCheckError> {
        if num_bars != self.num_bars() {
            return Err(PlotCheckError::AssertionFailed(format!(
                "plot has incorrect number of bars: {} (expected {num_bars})",
                self.num_bars()
            )));
        }
        Ok(())
    }

    /// Middle of each bar along the category axis
    pub fn centers(&self) -> Vec<f64> {
        match self.orientation {
            BarOrientation::Vertical => self.per_bar(|bar| bar.x + bar.width / 2.0),
            BarOrientation::Horizontal => self.per_bar(|bar| bar.y + bar.height / 2.0),
        }
    }

    pub fn assert_centers_equal(&self, centers: &[f64]) -> Result<(), PlotCheckError> {
        self.compare_numbers("centers", centers, self.centers(), None)
    }

    pub fn assert_centers_allclose(
        &self,
        centers: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        self.compare_numbers("centers", centers, self.centers(), Some(tolerance))
    }

    /// Length of each bar along the value axis
    pub fn heights(&self) -> Vec<f64> {
        match self.orientation {
            BarOrientation::Vertical => self.per_bar(|bar| bar.height),
            BarOrientation::Horizontal => self.per_bar(|bar| bar.width),
        }
    }

    pub fn assert_heights_equal(&self, heights: &[f64]) -> Result<(), PlotCheckError> {
        self.compare_numbers("heights", heights, self.heights(), None)
    }

    pub fn assert_heights_allclose(
        &self,
        heights: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        self.compare_numbers("heights", heights, self.heights(), Some(tolerance))
    }

    /// Thickness of each bar along the category axis
    pub fn widths(&self) -> Vec<f64> {
        match self.orientation {
            BarOrientation::Vertical => self.per_bar(|bar| bar.width),
            BarOrientation::Horizontal => self.per_bar(|bar| bar.height),
        }
    }

    pub fn assert_widths_equal(&self, widths: &[f64]) -> Result<(), PlotCheckError> {
        self.compare_numbers("widths", widths, self.widths(), None)
    }

    pub fn assert_widths_allclose(
        &self,
        widths: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        self.compare_numbers("widths", widths, self.widths(), Some(tolerance))
    }

    /// Baseline each bar grows from
    pub fn bottoms(&self) -> Vec<f64> {
        match self.orientation {
            BarOrientation::Vertical => self.per_bar(|bar| bar.y),
            BarOrientation::Horizontal => self.per_bar(|bar| bar.x),
        }
    }

    pub fn assert_bottoms_equal(&self, bottoms: &[f64]) -> Result<(), PlotCheckError> {
        self.compare_numbers("bottoms", bottoms, self.bottoms(), None)
    }

    pub fn assert_bottoms_allclose(
        &self,
        bottoms: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        self.compare_numbers("bottoms", bottoms, self.bottoms(), Some(tolerance))
    }

    pub fn colors(&self) -> &[[f64; 3]] {
        self.colors
            .get_or_init(|| self.per_bar(|bar| rgba_to_rgb(&bar.fill)))
    }

    pub fn assert_colors_equal<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        let actual = self.colors();
        assert_equal("colors", &tile_expected(actual.len(), to_rgb_all(colors)?), actual)
    }

    pub fn assert_colors_allclose<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.colors();
        let expected = tile_expected(actual.len(), to_rgb_all(colors)?);
        assert_allclose("colors", &expected, actual, &tolerance)
    }

    pub fn edgecolors(&self) -> &[[f64; 3]] {
        self.edgecolors
            .get_or_init(|| self.per_bar(|bar| rgba_to_rgb(&bar.stroke)))
    }

    pub fn assert_edgecolors_equal<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
    ) -> Result<(), PlotCheckError> {
        let actual = self.edgecolors();
        assert_equal(
            "edgecolors",
            &tile_expected(actual.len(), to_rgb_all(colors)?),
            actual,
        )
    }

    pub fn assert_edgecolors_allclose<C: Into<Color>>(
        &self,
        colors: impl IntoIterator<Item = C>,
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        let actual = self.edgecolors();
        let expected = tile_expected(actual.len(), to_rgb_all(colors)?);
        assert_allclose("edgecolors", &expected, actual, &tolerance)
    }

    pub fn linewidths(&self) -> Vec<f64> {
        self.per_bar(|bar| bar.stroke_width)
    }

    pub fn assert_linewidths_equal(&self, linewidths: &[f64]) -> Result<(), PlotCheckError> {
        self.compare_numbers("linewidths", linewidths, self.linewidths(), None)
    }

    pub fn assert_linewidths_allclose(
        &self,
        linewidths: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        self.compare_numbers("linewidths", linewidths, self.linewidths(), Some(tolerance))
    }

    /// Opacity of each bar: its explicit alpha, else the alpha channel of its
    /// fill
    pub fn alphas(&self) -> Vec<f64> {
        self.per_bar(|bar| bar.alpha.unwrap_or(bar.fill[3]))
    }

    pub fn assert_alphas_equal(&self, alphas: &[f64]) -> Result<(), PlotCheckError> {
        self.compare_numbers("alphas", alphas, self.alphas(), None)
    }

    pub fn assert_alphas_allclose(
        &self,
        alphas: &[f64],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        self.compare_numbers("alphas", alphas, self.alphas(), Some(tolerance))
    }

    fn compare_numbers(
        &self,
        attribute: &str,
        expected: &[f64],
        actual: Vec<f64>,
        tolerance: Option<Tolerance>,
    ) -> Result<(), PlotCheckError> {
        let expected = tile_expected(actual.len(), expected.to_vec());
        match tolerance {
            Some(tolerance) => assert_allclose(attribute, &expected, &actual, &tolerance),
            None => assert_equal(attribute, &expected, &actual),
        }
    }
}

impl AxesChecker for BarPlotChecker<'_> {
    fn axes(&self) -> &Axes {
        self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotcheck_scenegraph::opts::BarOpts;

    #[test]
    fn test_mixed_orientation() {
        let mut axes = Axes::new();
        axes.bar(&[0.0], &[1.0], BarOpts::default()).unwrap();
        axes.barh(&[0.0], &[1.0], BarOpts::default()).unwrap();
        assert!(matches!(
            BarPlotChecker::new(&axes),
            Err(PlotCheckError::InvalidPlot(InvalidPlotError::MixedPlotKind(_)))
        ));
    }

    #[test]
    fn test_horizontal_bars() {
        let mut axes = Axes::new();
        axes.barh(
            &[2.0, 1.0],
            &[4.0, 3.0],
            BarOpts::default().with_width(0.5).with_bottom(1.0),
        )
        .unwrap();
        let checker = BarPlotChecker::new(&axes).unwrap();
        assert_eq!(checker.orientation(), BarOrientation::Horizontal);
        checker.assert_centers_equal(&[1.0, 2.0]).unwrap();
        checker.assert_heights_equal(&[3.0, 4.0]).unwrap();
        checker.assert_widths_equal(&[0.5]).unwrap();
        checker.assert_bottoms_equal(&[1.0]).unwrap();
    }

    #[test]
    fn test_alpha_from_fill() {
        let mut axes = Axes::new();
        axes.bar(
            &[0.0, 1.0],
            &[1.0, 1.0],
            BarOpts::default().with_colors([[1.0, 0.0, 0.0, 0.5], [0.0, 0.0, 1.0, 1.0]]),
        )
        .unwrap();
        axes.bar(&[2.0], &[1.0], BarOpts::default().with_alpha(0.25))
            .unwrap();
        let checker = BarPlotChecker::new(&axes).unwrap();
        checker.assert_alphas_equal(&[0.5, 1.0, 0.25]).unwrap();
        checker.assert_colors_equal(["r", "b", "b"]).unwrap();
        checker.assert_edgecolors_equal(["k"]).unwrap();
        checker.assert_linewidths_equal(&[1.0]).unwrap();
    }
}
