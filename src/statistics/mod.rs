//! statistics — sliding-window estimators over sorted event sequences.
//!
//! Purpose
//! -------
//! Provide the three primitive estimators from which every integrated
//! cumulant is assembled:
//!
//! - [`pairwise_window`]: centered windowed counts `A_ij(a, b)`,
//! - [`triple_window`]: products of centered windowed counts `E_ijk(a, b)`,
//! - [`integrated_lag`]: lag-weighted integrated correlation `I_ij(H)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are sorted slices borrowed from a `ProcessSet`; the estimators
//!   never allocate and never mutate their inputs.
//! - Every estimator is a pure function of its arguments, which is what lets
//!   the dispatcher evaluate all pairs/triples independently.
//! - Boundary handling follows one shared rule (see [`window`]): dropped
//!   reference points are compensated by an `n / admissible` rescaling, and a
//!   fully starved window returns its raw zero accumulation. For `I_ij` the
//!   count is the number of accumulated lag terms.
//!
//! Testing notes
//! -------------
//! - Each estimator is checked against hand-worked or brute-force values on
//!   small sequences; statistical behaviour on long synthetic data is
//!   covered by the integration tests.

pub mod errors;
pub mod lag;
pub mod pairwise;
pub mod triple;
pub mod window;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{StatisticError, StatisticResult};
pub use self::lag::integrated_lag;
pub use self::pairwise::pairwise_window;
pub use self::triple::triple_window;
pub use self::window::{Window, WindowEstimate, validate_half_width};
