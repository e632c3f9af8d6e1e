//! cumulants::selection — per-pair window selection heuristic.
//!
//! For each ordered pair `(i, j)` the half-width is chosen as
//!
//! ```text
//! H_ij = argmin_{h ∈ logspace(-3, 3, N)} I_ij(h) / h
//! ```
//!
//! i.e. the scale at which the normalised lag-weighted correlation is most
//! negative. Ties resolve to the smallest `h`. Pairs are independent and run
//! through the dispatcher.
use crate::{
    cumulants::{
        dispatch::ExecutionStrategy,
        errors::CumulantResult,
        options::validate_grid_size,
        window::WindowParameter,
    },
    process::ProcessSet,
    statistics::integrated_lag,
};
use ndarray::Array1;

/// `N` points log-spaced between `10^start` and `10^stop`, endpoints
/// included.
pub fn logspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from_elem(1, 10f64.powf(start));
    }
    let step = (stop - start) / (n - 1) as f64;
    Array1::from_shape_fn(n, |k| 10f64.powf(start + step * k as f64))
}

/// Heuristic half-width of a single pair.
pub fn select_pair_half_width(
    processes: &ProcessSet, i: usize, j: usize, grid: &Array1<f64>,
) -> f64 {
    let (z_i, z_j) = (processes.timestamps(i), processes.timestamps(j));
    let (horizon, rate_i, rate_j) = (processes.horizon(), processes.rate(i), processes.rate(j));

    let mut best_h = grid[0];
    let mut best = f64::INFINITY;
    for &h in grid {
        let score = integrated_lag(z_i, z_j, h, horizon, rate_i, rate_j).value / h;
        if score < best {
            best = score;
            best_h = h;
        }
    }
    best_h
}

/// Per-pair half-widths for the whole process set.
///
/// Errors
/// ------
/// - `InvalidGridSize` when `grid_size == 0`.
pub fn select_window(
    processes: &ProcessSet, grid_size: usize, strategy: ExecutionStrategy,
) -> CumulantResult<WindowParameter> {
    validate_grid_size(grid_size)?;
    let grid = logspace(-3.0, 3.0, grid_size);
    let dim = processes.dim();
    let half_widths =
        strategy.gather_pairs(dim, |i, j| Ok(select_pair_half_width(processes, i, j, &grid)))?;
    WindowParameter::matrix(half_widths, dim)
}
