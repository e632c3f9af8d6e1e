//! cumulants::dispatch — fan-out of independent per-pair/per-triple units.
//!
//! Purpose
//! -------
//! Evaluate a pure unit function on every index pair `(i, j)` or triple
//! `(i, j, k)` of a `d`-dimensional process and gather the results into a
//! dense array in row-major index order.
//!
//! Key behaviors
//! -------------
//! - [`ExecutionStrategy::Sequential`] runs the units in nested-loop order on
//!   the calling thread.
//! - [`ExecutionStrategy::FanOut`] hands the flat index range to the rayon
//!   work-stealing pool. Indexed parallel collection preserves order, so the
//!   reshape is identical to the sequential one.
//! - The gather is the only synchronization point; if any unit fails the
//!   whole gather fails with the first error and nothing is returned.
//!
//! Conventions
//! -----------
//! - Without the `parallel` feature `FanOut` degrades to sequential
//!   execution.
//! - Units must be side-effect-free: they borrow immutable slices and return
//!   a value.
use crate::cumulants::errors::CumulantResult;
use ndarray::{Array2, Array3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Execution strategy for a gather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    Sequential,
    #[default]
    FanOut,
}

impl ExecutionStrategy {
    /// Evaluate `unit(i, j)` for all `i, j < dim`; result `[i, j]` holds
    /// `unit(i, j)`.
    pub fn gather_pairs<T, F>(self, dim: usize, unit: F) -> CumulantResult<Array2<T>>
    where
        T: Send,
        F: Fn(usize, usize) -> CumulantResult<T> + Send + Sync,
    {
        let flat = self.run(dim * dim, |idx| unit(idx / dim, idx % dim))?;
        Ok(Array2::from_shape_vec((dim, dim), flat)?)
    }

    /// Evaluate `unit(i, j, k)` for all `i, j, k < dim`; result `[i, j, k]`
    /// holds `unit(i, j, k)`.
    pub fn gather_triples<T, F>(self, dim: usize, unit: F) -> CumulantResult<Array3<T>>
    where
        T: Send,
        F: Fn(usize, usize, usize) -> CumulantResult<T> + Send + Sync,
    {
        let sq = dim * dim;
        let flat = self.run(sq * dim, |idx| unit(idx / sq, (idx / dim) % dim, idx % dim))?;
        Ok(Array3::from_shape_vec((dim, dim, dim), flat)?)
    }

    /// Evaluate a list of independent jobs, preserving their order.
    pub fn gather_list<I, T, F>(self, items: &[I], unit: F) -> CumulantResult<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> CumulantResult<T> + Send + Sync,
    {
        self.run(items.len(), |idx| unit(&items[idx]))
    }

    #[cfg(feature = "parallel")]
    fn run<T, F>(self, n: usize, unit: F) -> CumulantResult<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> CumulantResult<T> + Send + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => (0..n).map(unit).collect(),
            ExecutionStrategy::FanOut => (0..n).into_par_iter().map(unit).collect(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run<T, F>(self, n: usize, unit: F) -> CumulantResult<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> CumulantResult<T> + Send + Sync,
    {
        (0..n).map(unit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulants::errors::CumulantError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Row-major placement of pair and triple results.
    // - Agreement of the two strategies.
    // - Failure propagation from a single unit.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each result lands at its own index, for both strategies.
    //
    // Given
    // -----
    // - Units that encode their indices as `100 i + 10 j + k`.
    //
    // Expect
    // ------
    // - `out[[i, j, k]] == 100 i + 10 j + k` and identical arrays for
    //   sequential and fan-out execution.
    fn gather_places_results_in_row_major_order() {
        for strategy in [ExecutionStrategy::Sequential, ExecutionStrategy::FanOut] {
            let pairs = strategy.gather_pairs(3, |i, j| Ok(10 * i + j)).unwrap();
            let triples = strategy.gather_triples(3, |i, j, k| Ok(100 * i + 10 * j + k)).unwrap();
            for i in 0..3 {
                for j in 0..3 {
                    assert_eq!(pairs[[i, j]], 10 * i + j);
                    for k in 0..3 {
                        assert_eq!(triples[[i, j, k]], 100 * i + 10 * j + k);
                    }
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // One failing unit fails the whole gather.
    fn gather_fails_when_any_unit_fails() {
        let err = ExecutionStrategy::FanOut
            .gather_pairs(4, |i, j| {
                if i == 2 && j == 1 { Err(CumulantError::NoRealizations) } else { Ok(0.0) }
            })
            .unwrap_err();
        assert_eq!(err, CumulantError::NoRealizations);
    }

    #[test]
    fn gather_handles_zero_dimension_and_lists() {
        let empty = ExecutionStrategy::Sequential.gather_pairs(0, |_, _| Ok(1.0)).unwrap();
        assert_eq!(empty.dim(), (0, 0));
        let doubled = ExecutionStrategy::FanOut.gather_list(&[1, 2, 3], |x| Ok(2 * x)).unwrap();
        assert_eq!(doubled, vec![2, 4, 6]);
    }
}
