//! Checks the attributes of a drawn plot against expected values.
//!
//! A checker is built over an [`Axes`](plotcheck_scenegraph::axes::Axes) once
//! drawing is done. Construction validates that the axes holds the kind of
//! plot the checker understands; the `assert_*` methods then compare
//! normalized attributes against the values a test expects.

pub mod assertion;
pub mod bar;
pub mod checker;
pub mod error;
pub mod line;
pub mod normalize;
pub mod permutation;
pub mod scatter;

pub use assertion::Tolerance;
pub use bar::BarPlotChecker;
pub use checker::{AxesChecker, PlotChecker};
pub use error::{InvalidPlotError, PlotCheckError};
pub use line::{LineAttribute, LinePlotChecker};
pub use scatter::ScatterPlotChecker;
