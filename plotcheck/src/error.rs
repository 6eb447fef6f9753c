use itertools::Itertools;
use plotcheck_common::error::PlotCommonError;
use std::fmt;
use thiserror::Error;

/// The axes does not hold the kind of plot a checker was built for
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidPlotError {
    #[error("No data found")]
    NoData,

    #[error("Mixed plot kinds: {0}")]
    MixedPlotKind(String),

    #[error("Mark {index} connects its points with a line, expected unconnected points")]
    ConnectedLine { index: usize },

    #[error("Mark {index} has no marker, so it draws no points")]
    EmptyMarker { index: usize },
}

/// One element that differs between the expected and actual values
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] expected {}, actual {}",
            self.index, self.expected, self.actual
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotCheckError {
    #[error(transparent)]
    InvalidPlot(#[from] InvalidPlotError),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    #[error("Invalid expected `{attribute}`: {reason}")]
    InvalidExpectation { attribute: String, reason: String },

    #[error("Cannot tile an empty sequence to length {reference_len}")]
    EmptyExpectation { reference_len: usize },

    #[error("`{attribute}` has incorrect length: expected {expected}, actual {actual}")]
    LengthMismatch {
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "`{attribute}` differs at {} of {len} positions: {}",
        .mismatches.len(),
        .mismatches.iter().join("; ")
    )]
    ValueMismatch {
        attribute: String,
        len: usize,
        mismatches: Vec<Mismatch>,
    },

    #[error("No permutation of expected `{attribute}` {expected} matches actual {actual}")]
    PermutationNotFound {
        attribute: String,
        expected: String,
        actual: String,
    },

    #[error("`{attribute}` is not supported: {reason}")]
    NotSupported { attribute: String, reason: String },

    #[error("{0}")]
    AssertionFailed(String),
}

impl PlotCheckError {
    /// Whether this is a failed comparison, as opposed to a misused checker or
    /// an invalid expected value
    pub fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. }
                | Self::ValueMismatch { .. }
                | Self::PermutationNotFound { .. }
                | Self::AssertionFailed(_)
        )
    }
}

impl From<PlotCommonError> for PlotCheckError {
    fn from(value: PlotCommonError) -> Self {
        match value {
            PlotCommonError::InvalidColor(msg) => Self::InvalidColor(msg),
            PlotCommonError::InvalidMarker(marker) => Self::InvalidMarker(marker),
            PlotCommonError::InvalidLineStyle(style) => Self::InvalidExpectation {
                attribute: "linestyles".to_string(),
                reason: format!("unknown line style `{style}`"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_mismatch_lists_every_index() {
        let err = PlotCheckError::ValueMismatch {
            attribute: "sizes".to_string(),
            len: 3,
            mismatches: vec![
                Mismatch {
                    index: 0,
                    expected: "1.0".to_string(),
                    actual: "2.0".to_string(),
                },
                Mismatch {
                    index: 2,
                    expected: "3.0".to_string(),
                    actual: "4.0".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "`sizes` differs at 2 of 3 positions: \
             [0] expected 1.0, actual 2.0; [2] expected 3.0, actual 4.0"
        );
        assert!(err.is_assertion_failure());
    }

    #[test]
    fn test_usage_errors_are_not_assertion_failures() {
        assert!(!PlotCheckError::InvalidColor("foo".to_string()).is_assertion_failure());
        assert!(!PlotCheckError::from(InvalidPlotError::NoData).is_assertion_failure());
        assert!(!PlotCheckError::NotSupported {
            attribute: "markers".to_string(),
            reason: "".to_string()
        }
        .is_assertion_failure());
    }
}
