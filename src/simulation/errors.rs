//! simulation::errors — validation failures of synthetic-data generators.
use crate::process::ProcessError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Baseline intensity must be finite and non-negative.
    InvalidBaseline { dim: usize, value: f64 },

    /// Kernel integral `G[row, col]` must be finite and non-negative.
    InvalidKernel { row: usize, col: usize, value: f64 },

    /// Exponential decay must be finite and strictly positive.
    InvalidDecay { decay: f64 },

    /// Adjacency matrix shape does not match the baseline.
    DimensionMismatch { expected: usize, found: (usize, usize) },

    /// Spectral radius of `G` must be `< 1` for a stationary process.
    Unstable { spectral_radius: f64 },

    /// Horizon must be finite and strictly positive.
    InvalidHorizon { horizon: f64 },

    /// The sampling distribution could not be constructed.
    Distribution { text: String },

    Process(ProcessError),
}

impl From<ProcessError> for SimulationError {
    fn from(err: ProcessError) -> Self {
        SimulationError::Process(err)
    }
}

impl std::error::Error for SimulationError {}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidBaseline { dim, value } => write!(
                f,
                "Simulation Error: baseline {value} of dimension {dim} must be finite and non-negative"
            ),
            SimulationError::InvalidKernel { row, col, value } => write!(
                f,
                "Simulation Error: kernel integral G[{row}, {col}] = {value} must be finite and non-negative"
            ),
            SimulationError::InvalidDecay { decay } => {
                write!(f, "Simulation Error: decay {decay} must be finite and positive")
            }
            SimulationError::DimensionMismatch { expected, found } => write!(
                f,
                "Simulation Error: adjacency must be {expected}x{expected}, found {}x{}",
                found.0, found.1
            ),
            SimulationError::Unstable { spectral_radius } => write!(
                f,
                "Simulation Error: spectral radius {spectral_radius} of G must be below 1"
            ),
            SimulationError::InvalidHorizon { horizon } => {
                write!(f, "Simulation Error: horizon {horizon} must be finite and positive")
            }
            SimulationError::Distribution { text } => write!(f, "Simulation Error: {text}"),
            SimulationError::Process(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
