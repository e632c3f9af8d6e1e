//! cumulants — integrated cumulants of multivariate point processes.
//!
//! Purpose
//! -------
//! Turn a [`ProcessSet`](crate::process::ProcessSet) into the rate vector
//! `L`, the covariance matrix `C` and the skewness tensor `K` (or its partial
//! matrix `K_part`), plus their closed-form counterparts for a known
//! kernel-integral matrix `R`.
//!
//! Key behaviors
//! -------------
//! - [`CumulantAssembler`] holds one stage slot per intermediate array and
//!   checks precursors explicitly.
//! - [`ExecutionStrategy`] evaluates independent per-pair/per-triple units
//!   sequentially or on the rayon pool and gathers them in index order.
//! - [`estimate_realizations`] / [`CumulantSummary`] handle multi-realization
//!   datasets.
//!
//! Invariants & assumptions
//! ------------------------
//! - `C` is symmetric and `K` cyclically symmetric after their stages; both
//!   are enforced by explicit symmetrization and checked with tolerance.
//! - Degenerate inputs yield zeros rather than errors.
//!
//! Conventions
//! -----------
//! - Notation: `H` window half-width, `B` past-only windowed covariance,
//!   `E`/`E_c` triple statistics, `J` lag-weighted correlation.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end checks on synthetic
//!   Poisson and Hawkes data live in `tests/`.

pub mod assembler;
pub mod dispatch;
pub mod errors;
pub mod options;
pub mod realizations;
pub mod selection;
pub mod stage;
pub mod tensor;
pub mod theoretical;
pub mod window;
pub mod windowed;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::assembler::CumulantAssembler;
pub use self::dispatch::ExecutionStrategy;
pub use self::errors::{CumulantError, CumulantResult};
pub use self::options::{
    ComputationMethod, CovarianceSource, CumulantOptions, CumulantVariant, SkewnessFormula,
    WindowSelection,
};
pub use self::realizations::{
    CumulantBundle, CumulantSummary, Skewness, estimate, estimate_realizations,
};
pub use self::stage::{Stage, StageName};
pub use self::theoretical::{
    theoretical_covariance, theoretical_partial_skewness, theoretical_skewness,
};
pub use self::window::WindowParameter;

/// Common imports for estimation call sites.
pub mod prelude {
    pub use super::{
        ComputationMethod, CovarianceSource, CumulantAssembler, CumulantBundle, CumulantOptions,
        CumulantSummary, CumulantVariant, ExecutionStrategy, SkewnessFormula, WindowParameter,
        WindowSelection, estimate_realizations,
    };
}
