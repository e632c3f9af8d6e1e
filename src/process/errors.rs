//! Errors for event-sequence and process-set construction.
//!
//! This module defines [`ProcessError`], the error type returned when raw
//! per-dimension timestamp arrays are turned into validated
//! [`EventSequence`](crate::process::EventSequence) and
//! [`ProcessSet`](crate::process::ProcessSet) values. An alias
//! [`ProcessResult<T>`] standardizes the return type across the subtree.
//!
//! ## Conventions
//! - **Indices are 0-based** (dimension and position within a sequence).
//! - Timestamps must be **finite and non-negative**; `ProcessSet::new`
//!   additionally requires them to be sorted ascending (ties allowed).
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for process construction paths.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Validation failures for raw timestamp input.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    // ---- Timestamp validation ----
    /// A timestamp is NaN or ±inf.
    NonFiniteTimestamp { dim: usize, index: usize, value: f64 },

    /// A timestamp is strictly negative.
    NegativeTimestamp { dim: usize, index: usize, value: f64 },

    /// `data[index] < data[index - 1]` in a sequence declared as sorted.
    UnsortedTimestamps { dim: usize, index: usize, previous: f64, value: f64 },

    // ---- Set-level validation ----
    /// A process set needs at least one dimension.
    EmptyProcessSet,

    /// An explicit horizon is smaller than the largest observed timestamp.
    HorizonTooSmall { horizon: f64, max_timestamp: f64 },

    /// An explicit horizon is NaN, ±inf or negative.
    InvalidHorizon { horizon: f64 },
}

impl ProcessError {
    /// Re-label a sequence-level error with the dimension it belongs to.
    ///
    /// [`EventSequence::new`](crate::process::EventSequence::new) has no
    /// notion of its position inside a process set and reports `dim = 0`;
    /// `ProcessSet` constructors call this to attach the real index.
    pub fn in_dimension(self, dim: usize) -> ProcessError {
        match self {
            ProcessError::NonFiniteTimestamp { index, value, .. } => {
                ProcessError::NonFiniteTimestamp { dim, index, value }
            }
            ProcessError::NegativeTimestamp { index, value, .. } => {
                ProcessError::NegativeTimestamp { dim, index, value }
            }
            ProcessError::UnsortedTimestamps { index, previous, value, .. } => {
                ProcessError::UnsortedTimestamps { dim, index, previous, value }
            }
            other => other,
        }
    }
}

impl std::error::Error for ProcessError {}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Timestamp validation ----
            ProcessError::NonFiniteTimestamp { dim, index, value } => write!(
                f,
                "Process Error: timestamp {value} at index {index} of dimension {dim} is not finite"
            ),
            ProcessError::NegativeTimestamp { dim, index, value } => write!(
                f,
                "Process Error: timestamp {value} at index {index} of dimension {dim} is negative"
            ),
            ProcessError::UnsortedTimestamps { dim, index, previous, value } => write!(
                f,
                "Process Error: dimension {dim} is not sorted ({value} at index {index} follows {previous})"
            ),

            // ---- Set-level validation ----
            ProcessError::EmptyProcessSet => {
                write!(f, "Process Error: a process set needs at least one dimension")
            }
            ProcessError::HorizonTooSmall { horizon, max_timestamp } => write!(
                f,
                "Process Error: horizon {horizon} is smaller than the last timestamp {max_timestamp}"
            ),
            ProcessError::InvalidHorizon { horizon } => {
                write!(f, "Process Error: horizon {horizon} must be finite and non-negative")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ProcessError> for PyErr {
    fn from(err: ProcessError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
