use crate::error::{Mismatch, PlotCheckError};
use ordered_float::OrderedFloat;
use plotcheck_common::types::{LineStyle, MarkerShape};
use std::fmt::Debug;

/// Closeness bounds for approximate comparisons. `actual` is close to
/// `expected` when `|actual - expected| <= atol + rtol * |expected|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-7,
            atol: 0.0,
        }
    }
}

impl Tolerance {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    pub fn absolute(atol: f64) -> Self {
        Self { rtol: 0.0, atol }
    }

    pub fn is_close(&self, expected: f64, actual: f64) -> bool {
        if expected == actual {
            return true;
        }
        if expected.is_nan() || actual.is_nan() {
            return expected.is_nan() && actual.is_nan();
        }
        (actual - expected).abs() <= self.atol + self.rtol * expected.abs()
    }
}

/// Exact equality under which NaN equals NaN
pub trait ExactEq {
    fn exact_eq(&self, other: &Self) -> bool;
}

impl ExactEq for f64 {
    fn exact_eq(&self, other: &Self) -> bool {
        OrderedFloat(*self) == OrderedFloat(*other)
    }
}

impl<const N: usize> ExactEq for [f64; N] {
    fn exact_eq(&self, other: &Self) -> bool {
        self.iter().zip(other).all(|(a, b)| a.exact_eq(b))
    }
}

impl ExactEq for Vec<f64> {
    fn exact_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.exact_eq(b))
    }
}

impl ExactEq for String {
    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl ExactEq for MarkerShape {
    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl ExactEq for LineStyle {
    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// Approximate equality, element by element for compound values
pub trait AllClose {
    fn all_close(&self, other: &Self, tolerance: &Tolerance) -> bool;
}

impl AllClose for f64 {
    fn all_close(&self, other: &Self, tolerance: &Tolerance) -> bool {
        tolerance.is_close(*self, *other)
    }
}

impl<const N: usize> AllClose for [f64; N] {
    fn all_close(&self, other: &Self, tolerance: &Tolerance) -> bool {
        self.iter()
            .zip(other)
            .all(|(e, a)| tolerance.is_close(*e, *a))
    }
}

impl AllClose for Vec<f64> {
    fn all_close(&self, other: &Self, tolerance: &Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(e, a)| tolerance.is_close(*e, *a))
    }
}

/// Asserts that `expected` and `actual` hold exactly the same values
pub fn assert_equal<T: ExactEq + Debug>(
    attribute: &str,
    expected: &[T],
    actual: &[T],
) -> Result<(), PlotCheckError> {
    compare(attribute, expected, actual, |e, a| e.exact_eq(a))
}

/// Asserts that `actual` is within `tolerance` of `expected`, element by element
pub fn assert_allclose<T: AllClose + Debug>(
    attribute: &str,
    expected: &[T],
    actual: &[T],
    tolerance: &Tolerance,
) -> Result<(), PlotCheckError> {
    compare(attribute, expected, actual, |e, a| e.all_close(a, tolerance))
}

fn compare<T: Debug>(
    attribute: &str,
    expected: &[T],
    actual: &[T],
    eq: impl Fn(&T, &T) -> bool,
) -> Result<(), PlotCheckError> {
    if expected.len() != actual.len() {
        return Err(PlotCheckError::LengthMismatch {
            attribute: attribute.to_string(),
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    let mismatches = expected
        .iter()
        .zip(actual)
        .enumerate()
        .filter(|(_, (e, a))| !eq(e, a))
        .map(|(index, (e, a))| Mismatch {
            index,
            expected: format!("{e:?}"),
            actual: format!("{a:?}"),
        })
        .collect::<Vec<_>>();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(PlotCheckError::ValueMismatch {
            attribute: attribute.to_string(),
            len: actual.len(),
            mismatches,
        })
    }
}
