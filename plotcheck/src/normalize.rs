//! Canonical forms for compared values: colors become RGB triples with alpha
//! carried separately, and per-element attributes are tiled or trimmed to the
//! number of elements they describe.

use crate::error::PlotCheckError;
use plotcheck_common::color::Color;

/// Canonical RGB triple of a color. Alpha is dropped.
pub fn to_rgb(color: &Color) -> Result<[f64; 3], PlotCheckError> {
    let [r, g, b, _] = color.rgba()?;
    Ok([r, g, b])
}

/// Alpha channel of a color. Named, hex and RGB colors are fully opaque.
pub fn to_alpha(color: &Color) -> Result<f64, PlotCheckError> {
    let [_, _, _, a] = color.rgba()?;
    Ok(a)
}

/// RGB part of already resolved RGBA components
pub fn rgba_to_rgb(rgba: &[f64; 4]) -> [f64; 3] {
    [rgba[0], rgba[1], rgba[2]]
}

/// Normalizes a sequence of caller supplied colors
pub fn to_rgb_all<C: Into<Color>>(
    colors: impl IntoIterator<Item = C>,
) -> Result<Vec<[f64; 3]>, PlotCheckError> {
    colors.into_iter().map(|c| to_rgb(&c.into())).collect()
}

/// Tiles or trims `values` to exactly `reference_len` elements.
///
/// Shorter input is repeated end to end and then truncated, longer input is
/// truncated, and input of the right length is returned as is. Elements are
/// repeated whole, so a color stays a color.
pub fn reconcile<T: Clone>(reference_len: usize, values: &[T]) -> Result<Vec<T>, PlotCheckError> {
    if values.is_empty() {
        if reference_len == 0 {
            return Ok(vec![]);
        }
        return Err(PlotCheckError::EmptyExpectation { reference_len });
    }
    Ok(values.iter().cycle().take(reference_len).cloned().collect())
}

/// Expected values given as a single element apply to every actual element.
/// Any other length is left for the length check of the assertion.
pub(crate) fn tile_expected<T: Clone>(actual_len: usize, expected: Vec<T>) -> Vec<T> {
    if expected.len() == 1 && actual_len != 1 {
        // reconcile cannot fail on a non-empty input
        reconcile(actual_len, &expected).unwrap_or(expected)
    } else {
        expected
    }
}
