use crate::assertion::{assert_allclose, assert_equal, Tolerance};
use crate::error::PlotCheckError;
use plotcheck_scenegraph::axes::Axes;
use std::cell::OnceCell;

/// Assertions on the parts of an axes shared by every kind of plot: title,
/// axis labels, view limits and ticks
pub trait AxesChecker {
    fn axes(&self) -> &Axes;

    fn title(&self) -> &str {
        self.axes().title()
    }

    fn assert_title_exists(&self) -> Result<(), PlotCheckError> {
        assert_text_exists("title", self.title())
    }

    fn assert_title_equal(&self, title: &str) -> Result<(), PlotCheckError> {
        assert_text_equal("title", title, self.title())
    }

    fn xlabel(&self) -> &str {
        self.axes().xlabel()
    }

    fn assert_xlabel_exists(&self) -> Result<(), PlotCheckError> {
        assert_text_exists("xlabel", self.xlabel())
    }

    fn assert_xlabel_equal(&self, xlabel: &str) -> Result<(), PlotCheckError> {
        assert_text_equal("xlabel", xlabel, self.xlabel())
    }

    fn ylabel(&self) -> &str {
        self.axes().ylabel()
    }

    fn assert_ylabel_exists(&self) -> Result<(), PlotCheckError> {
        assert_text_exists("ylabel", self.ylabel())
    }

    fn assert_ylabel_equal(&self, ylabel: &str) -> Result<(), PlotCheckError> {
        assert_text_equal("ylabel", ylabel, self.ylabel())
    }

    fn xlim(&self) -> [f64; 2] {
        self.axes().xlim()
    }

    fn assert_xlim_equal(&self, xlim: [f64; 2]) -> Result<(), PlotCheckError> {
        assert_equal("xlim", &xlim, &self.xlim())
    }

    fn assert_xlim_allclose(
        &self,
        xlim: [f64; 2],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose("xlim", &xlim, &self.xlim(), &tolerance)
    }

    fn ylim(&self) -> [f64; 2] {
        self.axes().ylim()
    }

    fn assert_ylim_equal(&self, ylim: [f64; 2]) -> Result<(), PlotCheckError> {
        assert_equal("ylim", &ylim, &self.ylim())
    }

    fn assert_ylim_allclose(
        &self,
        ylim: [f64; 2],
        tolerance: Tolerance,
    ) -> Result<(), PlotCheckError> {
        assert_allclose("ylim", &ylim, &self.ylim(), &tolerance)
    }

    fn xticks(&self) -> Vec<f64> {
        self.axes().xticks()
    }

    fn assert_xticks_equal(&self, xticks: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("xticks", xticks, &self.xticks())
    }

    fn yticks(&self) -> Vec<f64> {
        self.axes().yticks()
    }

    fn assert_yticks_equal(&self, yticks: &[f64]) -> Result<(), PlotCheckError> {
        assert_equal("yticks", yticks, &self.yticks())
    }

    fn xticklabels(&self) -> Vec<String> {
        self.axes().xticklabels()
    }

    fn assert_xticklabels_equal(&self, labels: &[&str]) -> Result<(), PlotCheckError> {
        assert_equal("xticklabels", &owned(labels), &self.xticklabels())
    }

    fn yticklabels(&self) -> Vec<String> {
        self.axes().yticklabels()
    }

    fn assert_yticklabels_equal(&self, labels: &[&str]) -> Result<(), PlotCheckError> {
        assert_equal("yticklabels", &owned(labels), &self.yticklabels())
    }
}

/// Checker for the decorations of an axes of any kind
#[derive(Debug, Clone, Copy)]
pub struct PlotChecker<'a> {
    axes: &'a Axes,
}

impl<'a> PlotChecker<'a> {
    pub fn new(axes: &'a Axes) -> Self {
        Self { axes }
    }
}

impl AxesChecker for PlotChecker<'_> {
    fn axes(&self) -> &Axes {
        self.axes
    }
}

fn assert_text_exists(attribute: &str, text: &str) -> Result<(), PlotCheckError> {
    if text.is_empty() {
        return Err(PlotCheckError::AssertionFailed(format!(
            "no {attribute} set"
        )));
    }
    Ok(())
}

fn assert_text_equal(attribute: &str, expected: &str, actual: &str) -> Result<(), PlotCheckError> {
    if expected != actual {
        return Err(PlotCheckError::AssertionFailed(format!(
            "incorrect {attribute}: expected {expected:?}, actual {actual:?}"
        )));
    }
    Ok(())
}

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Computes a cached value on first use. Failures are not cached.
pub(crate) fn memoize<T>(
    cell: &OnceCell<T>,
    init: impl FnOnce() -> Result<T, PlotCheckError>,
) -> Result<&T, PlotCheckError> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}
