use thiserror::Error;

/// Errors raised by the price history chart core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// One input record could not be parsed; the record is dropped.
    #[error("Malformed observation #{index}: {reason}")]
    MalformedObservation { index: usize, reason: String },

    /// A selection event pointed outside the current index or series.
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// The currency formatter only accepts finite, non-negative values.
    #[error("Formatter domain error: {0} is not a finite non-negative amount")]
    FormatterDomain(f64),

    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("year {0} is not in the year index")]
    UnknownYear(i32),

    #[error("point index {index} is outside a series of {len} points")]
    PointOutOfRange { index: i64, len: usize },
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Deserialize(err.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
