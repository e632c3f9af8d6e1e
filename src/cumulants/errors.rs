//! cumulants::errors — error taxonomy for cumulant assembly.
//!
//! Purpose
//! -------
//! Provide [`CumulantError`] and the [`CumulantResult`] alias used by the
//! assembler, the dispatcher, the theoretical counterparts and the
//! optimizer-side preprocessing helpers.
//!
//! Key behaviors
//! -------------
//! - `PrecursorMissing` / `StalePrecursor` make stage ordering explicit: a
//!   stage invoked before its prerequisites (or after they were computed with
//!   another window) fails fast and names the missing stage.
//! - `InvariantViolation` reports symmetry/orthogonality breaches together
//!   with their magnitude and the tolerance that was exceeded.
//! - Lower-level errors (`ProcessError`, `StatisticError`) convert via `From`
//!   so `?` works across the subtree boundary.
//!
//! Conventions
//! -----------
//! - Degenerate inputs (zero horizon, empty sequences) and starved windows
//!   are *not* errors: they produce zeros, per the statistics' policy.
//! - Every variant has a human-readable `Display`; at the Python boundary the
//!   message is surfaced as a `ValueError`.
use crate::{cumulants::stage::StageName, process::ProcessError, statistics::StatisticError};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type CumulantResult<T> = Result<T, CumulantError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CumulantError {
    // ---- Stage ordering ----
    /// `stage` was invoked before `missing` was computed.
    PrecursorMissing { stage: StageName, missing: StageName },

    /// `stage` was invoked while `stale` holds values for another window.
    StalePrecursor { stage: StageName, stale: StageName },

    /// An accessor was called on a stage that has not been computed.
    NotComputed { stage: StageName },

    // ---- Invariants ----
    /// A numeric invariant (symmetry, orthogonality) does not hold.
    InvariantViolation { what: &'static str, magnitude: f64, tol: f64 },

    // ---- Configuration ----
    /// A window half-width matrix does not match the process dimension.
    WindowShapeMismatch { expected: usize, found: (usize, usize) },

    /// A matrix/vector argument has the wrong shape.
    DimensionMismatch { what: &'static str, expected: usize, found: usize },

    /// Heuristic window search needs at least one grid point.
    InvalidGridSize { grid_size: usize },

    /// Unknown computation method name.
    InvalidMethod { name: String, reason: &'static str },

    /// Unknown cumulant variant name.
    InvalidVariant { name: String, reason: &'static str },

    /// Unknown window-selection name.
    InvalidSelection { name: String, reason: &'static str },

    // ---- Realizations / preprocessing ----
    /// An operation over realizations received none.
    NoRealizations,

    /// Realizations disagree on their dimension.
    InconsistentRealizations { expected: usize, found: usize },

    /// A matrix expected to be invertible is singular.
    SingularMatrix { what: &'static str },

    /// Rates must be strictly positive for this operation.
    NonPositiveRate { dim: usize, value: f64 },

    /// A reference-parameter entry is NaN or ±inf.
    NonFiniteReference { row: usize, col: usize, value: f64 },

    /// Internal array reshaping failed.
    Shape { text: String },

    // ---- Wrapped ----
    Process(ProcessError),
    Statistic(StatisticError),
}

impl From<ProcessError> for CumulantError {
    fn from(err: ProcessError) -> Self {
        CumulantError::Process(err)
    }
}

impl From<StatisticError> for CumulantError {
    fn from(err: StatisticError) -> Self {
        CumulantError::Statistic(err)
    }
}

impl From<ndarray::ShapeError> for CumulantError {
    fn from(err: ndarray::ShapeError) -> Self {
        CumulantError::Shape { text: err.to_string() }
    }
}

impl std::error::Error for CumulantError {}

impl std::fmt::Display for CumulantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Stage ordering ----
            CumulantError::PrecursorMissing { stage, missing } => write!(
                f,
                "Cumulant Error: stage {stage} requires {missing}; compute {missing} first"
            ),
            CumulantError::StalePrecursor { stage, stale } => write!(
                f,
                "Cumulant Error: stage {stage} requires {stale} for the current window; recompute {stale}"
            ),
            CumulantError::NotComputed { stage } => {
                write!(f, "Cumulant Error: stage {stage} has not been computed")
            }

            // ---- Invariants ----
            CumulantError::InvariantViolation { what, magnitude, tol } => write!(
                f,
                "Cumulant Error: {what} violated (magnitude {magnitude:e} exceeds tolerance {tol:e})"
            ),

            // ---- Configuration ----
            CumulantError::WindowShapeMismatch { expected, found } => write!(
                f,
                "Cumulant Error: window matrix must be {expected}x{expected}, found {}x{}",
                found.0, found.1
            ),
            CumulantError::DimensionMismatch { what, expected, found } => {
                write!(f, "Cumulant Error: {what} has dimension {found}, expected {expected}")
            }
            CumulantError::InvalidGridSize { grid_size } => {
                write!(f, "Cumulant Error: window grid size {grid_size} must be at least 1")
            }
            CumulantError::InvalidMethod { name, reason } => {
                write!(f, "Cumulant Error: invalid computation method {name:?}. {reason}")
            }
            CumulantError::InvalidVariant { name, reason } => {
                write!(f, "Cumulant Error: invalid cumulant variant {name:?}. {reason}")
            }
            CumulantError::InvalidSelection { name, reason } => {
                write!(f, "Cumulant Error: invalid window selection {name:?}. {reason}")
            }

            // ---- Realizations / preprocessing ----
            CumulantError::NoRealizations => {
                write!(f, "Cumulant Error: at least one realization is required")
            }
            CumulantError::InconsistentRealizations { expected, found } => write!(
                f,
                "Cumulant Error: realization has dimension {found}, expected {expected}"
            ),
            CumulantError::SingularMatrix { what } => {
                write!(f, "Cumulant Error: {what} is singular")
            }
            CumulantError::NonPositiveRate { dim, value } => {
                write!(f, "Cumulant Error: rate {value} of dimension {dim} must be positive")
            }
            CumulantError::NonFiniteReference { row, col, value } => write!(
                f,
                "Cumulant Error: reference matrix entry ({row}, {col}) = {value} is not finite"
            ),
            CumulantError::Shape { text } => write!(f, "Cumulant Error: {text}"),

            // ---- Wrapped ----
            CumulantError::Process(err) => write!(f, "{err}"),
            CumulantError::Statistic(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CumulantError> for PyErr {
    fn from(err: CumulantError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
