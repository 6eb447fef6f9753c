use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotCommonError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid marker: `{0}`")]
    InvalidMarker(String),

    #[error("Invalid line style: `{0}`")]
    InvalidLineStyle(String),
}
