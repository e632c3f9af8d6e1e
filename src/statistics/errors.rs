//! Errors raised when constructing windows for the sliding statistics.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type StatisticResult<T> = Result<T, StatisticError>;

#[derive(Debug, Clone, PartialEq)]
pub enum StatisticError {
    /// Window bounds are non-finite or reversed (`lower > upper`).
    InvalidWindow { lower: f64, upper: f64 },

    /// Half-widths must be finite and strictly positive.
    InvalidHalfWidth { half_width: f64 },
}

impl std::error::Error for StatisticError {}

impl std::fmt::Display for StatisticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatisticError::InvalidWindow { lower, upper } => write!(
                f,
                "Statistic Error: window [{lower}, {upper}] must be finite with lower <= upper"
            ),
            StatisticError::InvalidHalfWidth { half_width } => write!(
                f,
                "Statistic Error: half width {half_width} must be finite and strictly positive"
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<StatisticError> for PyErr {
    fn from(err: StatisticError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
