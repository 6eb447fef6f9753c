//! Style defaults applied when a drawing call leaves an attribute unset.

/// Colors assigned to successive `plot` calls that do not set a color
pub const COLOR_CYCLE: [&str; 7] = ["b", "g", "r", "c", "m", "y", "k"];

pub const LINE_WIDTH: f64 = 1.0;
pub const MARKER_SIZE: f64 = 6.0;
pub const MARKER_EDGE_WIDTH: f64 = 0.5;
/// Edge color of filled markers on lines
pub const MARKER_EDGE_COLOR: &str = "k";

pub const SCATTER_COLOR: &str = "b";
pub const SCATTER_EDGE_COLOR: &str = "k";
/// Marker area in points squared
pub const SCATTER_SIZE: f64 = 20.0;
pub const SCATTER_LINE_WIDTH: f64 = 1.0;

pub const BAR_WIDTH: f64 = 0.8;
pub const BAR_COLOR: &str = "b";
pub const BAR_EDGE_COLOR: &str = "k";
pub const BAR_LINE_WIDTH: f64 = 1.0;

/// Fraction of the data range added on each side of autoscaled limits
pub const MARGIN: f64 = 0.05;

/// Approximate number of ticks generated for an axis without explicit ticks
pub const TICK_COUNT: f64 = 5.0;
