//! preprocessing — helpers consumed by the downstream `R` optimizer.
//!
//! The optimizer itself is an external collaborator; this module provides
//! what it needs from the averaged cumulants: the symmetric square root of
//! the covariance (with its orthogonality guard), the starting point `R₀`
//! and the default cost weight `α`.

pub mod sqrt;
pub mod start;

pub use self::sqrt::{eigen_decomposition, symmetric_sqrt};
pub use self::start::{Rotation, default_alpha, random_orthogonal_matrix, starting_point};
