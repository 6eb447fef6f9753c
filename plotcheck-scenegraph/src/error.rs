use plotcheck_common::error::PlotCommonError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneGraphError {
    #[error("x and y must have the same length, got {x_len} and {y_len}")]
    DataLengthMismatch { x_len: usize, y_len: usize },

    #[error("`{attribute}` has {len} values, expected 1 or {expected}")]
    AttributeLengthMismatch {
        attribute: String,
        len: usize,
        expected: usize,
    },

    #[error("Unrecognized character `{character}` in format string `{fmt}`")]
    InvalidFormat { fmt: String, character: char },

    #[error("Invalid legend: {0}")]
    InvalidLegend(String),

    #[error("No axes at index {0}")]
    AxesNotFound(usize),

    #[error("Failed to (de)serialize scene: {0}")]
    Serialization(String),

    #[error(transparent)]
    Value(#[from] PlotCommonError),
}

impl From<serde_json::Error> for SceneGraphError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}
