//! simulation — synthetic event data with known ground truth.
//!
//! Used by the integration tests and by callers validating the estimators:
//! independent Poisson sequences (zero cross-cumulants) and exponential-kernel
//! Hawkes processes (closed-form cumulants through `R = (I − G)⁻¹`).

pub mod errors;
pub mod hawkes;
pub mod poisson;

pub use self::errors::{SimulationError, SimulationResult};
pub use self::hawkes::{HawkesParams, HawkesSample, simulate_hawkes, spectral_radius};
pub use self::poisson::simulate_poisson;
