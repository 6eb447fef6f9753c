pub mod line;
pub mod mark;
pub mod rect;
pub mod symbol;

/// Extent of a set of points as `[x_min, x_max, y_min, y_max]`, ignoring
/// non-finite coordinates
pub(crate) fn point_bounds(
    points: impl Iterator<Item = (f64, f64)>,
) -> Option<[f64; 4]> {
    points
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .fold(None, |acc: Option<[f64; 4]>, (x, y)| {
            Some(match acc {
                None => [x, x, y, y],
                Some([x0, x1, y0, y1]) => [x0.min(x), x1.max(x), y0.min(y), y1.max(y)],
            })
        })
}
