//! cumulants::windowed — one-shot skewness estimator on a centered window.
//!
//! Purpose
//! -------
//! An alternative to the staged `B/E/J/C` assembly that needs no precursor
//! stage. For each triple the raw term is
//!
//! ```text
//! F1[a,b,c] = E_abc([-H, H]) − L_c ( 2H A_ab([-2H, 2H]) − 2 I_ab(2H) )
//! ```
//!
//! with `H = H[a, b]`, and the tensor is averaged over the three cyclic
//! rotations:
//!
//! ```text
//! F[i,j,k]  = ( F1[i,j,k] + F1[j,k,i] + F1[k,i,j] ) / 3
//! F_c[i,j]  = F[i,j,j]
//! ```
//!
//! Conventions
//! -----------
//! - `F_c` is evaluated directly from the three rotations of `(i, j, j)`, so
//!   it costs `3 d²` triple statistics instead of `d³`.
use crate::{
    cumulants::{
        dispatch::ExecutionStrategy, errors::CumulantResult, tensor::cyclic_sum,
        window::WindowParameter,
    },
    process::ProcessSet,
    statistics::{Window, integrated_lag, pairwise_window, triple_window},
};
use ndarray::{Array2, Array3};

/// Raw windowed term `F1[a, b, c]`.
pub fn windowed_term(
    processes: &ProcessSet, window: &WindowParameter, a: usize, b: usize, c: usize,
) -> CumulantResult<f64> {
    let h = window.half_width(a, b);
    let (z_a, z_b, z_c) = (processes.timestamps(a), processes.timestamps(b), processes.timestamps(c));
    let (l_a, l_b, l_c) = (processes.rate(a), processes.rate(b), processes.rate(c));
    let horizon = processes.horizon();

    let e = triple_window(z_a, z_b, z_c, Window::centered(h)?, horizon, (l_a, l_b));
    let wide = pairwise_window(z_a, z_b, Window::centered(2.0 * h)?, horizon, l_a, l_b);
    let lag = integrated_lag(z_a, z_b, 2.0 * h, horizon, l_a, l_b);
    Ok(e.value - l_c * (2.0 * h * wide.value - 2.0 * lag.value))
}

/// Full windowed skewness tensor `F`.
pub fn windowed_skewness(
    processes: &ProcessSet, window: &WindowParameter, strategy: ExecutionStrategy,
) -> CumulantResult<Array3<f64>> {
    let raw = strategy
        .gather_triples(processes.dim(), |i, j, k| windowed_term(processes, window, i, j, k))?;
    Ok(cyclic_sum(&raw) / 3.0)
}

/// Partial windowed skewness matrix `F_c[i, j] = F[i, j, j]`.
pub fn windowed_partial_skewness(
    processes: &ProcessSet, window: &WindowParameter, strategy: ExecutionStrategy,
) -> CumulantResult<Array2<f64>> {
    strategy.gather_pairs(processes.dim(), |i, j| {
        let sum = windowed_term(processes, window, i, j, j)?
            + windowed_term(processes, window, j, j, i)?
            + windowed_term(processes, window, j, i, j)?;
        Ok(sum / 3.0)
    })
}
