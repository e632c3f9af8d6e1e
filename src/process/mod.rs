//! process — validated event sequences and process sets.
//!
//! Purpose
//! -------
//! Turn raw per-dimension timestamp arrays into the immutable inputs consumed
//! by the window statistics and the cumulant assembler.
//!
//! Key behaviors
//! -------------
//! - [`EventSequence`] validates one dimension (finite, non-negative, sorted).
//! - [`ProcessSet`] owns `d` sequences, derives the horizon `T` and the rate
//!   vector `L`, and flags degenerate (`T == 0`) realizations.
//!
//! Downstream usage
//! ----------------
//! - Loaders sort (or call [`ProcessSet::from_unsorted`]) before building a
//!   set; every later stage borrows the set immutably.

pub mod errors;
pub mod sequence;
pub mod set;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{ProcessError, ProcessResult};
pub use self::sequence::EventSequence;
pub use self::set::ProcessSet;
