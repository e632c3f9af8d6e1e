//! statistics::pairwise — centered windowed counts `A_ij`.
//!
//! Purpose
//! -------
//! Estimate, for two event sequences `Z_i` and `Z_j`,
//!
//! ```text
//! A_ij(a, b) = (1/T) Σ_{τ ∈ Z_i} ( N_j(τ + b) − N_j(τ + a) − L_j (b − a) )
//! ```
//!
//! i.e. the integral of the cross-covariance density of `N_i` and `N_j` over
//! lags in `(a, b)`. The covariance stage uses `[-H, H]`; the `B` stage uses
//! the past-only window `[-H, 0]`.
//!
//! Key behaviors
//! -------------
//! - One forward scan over `Z_i` drives two monotone cursors into `Z_j` (left
//!   and right window edges): `O(n_i + n_j)`.
//! - Reference points with `τ + a < 0`, or whose window is not bracketed by
//!   observed `Z_j` events on both sides, are dropped; the sum is rescaled by
//!   `n_i / admissible` (see [`boundary_rescale`]).
//! - The mean trend `(b − a) L_i L_j` is subtracted after normalisation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both slices are sorted ascending (guaranteed by `EventSequence`).
//! - `T == 0` yields a zero estimate.
use crate::statistics::window::{
    Window, WindowEstimate, advance_below, advance_past, boundary_rescale,
};

/// Centered windowed count of `z_j` around the points of `z_i`.
///
/// Parameters
/// ----------
/// - `z_i`, `z_j`: `&[f64]`
///   Sorted reference and counted sequences.
/// - `window`: [`Window`]
///   Lag window `[a, b]`, `a ≤ b`.
/// - `horizon`: `f64`
///   Observation horizon `T`.
/// - `rate_i`, `rate_j`: `f64`
///   Empirical rates `L_i`, `L_j`.
///
/// Returns
/// -------
/// [`WindowEstimate`] with the corrected value and the admissible count.
///
/// Examples
/// --------
/// ```rust
/// # use hawkes_cumulants::statistics::{Window, pairwise_window};
/// let z = [1.0, 2.0, 3.0, 4.0];
/// let est = pairwise_window(&z, &z, Window::lagged(1.5).unwrap(), 4.0, 1.0, 1.0);
/// assert_eq!(est.references, 4);
/// assert!(est.value.is_finite());
/// ```
pub fn pairwise_window(
    z_i: &[f64], z_j: &[f64], window: Window, horizon: f64, rate_i: f64, rate_j: f64,
) -> WindowEstimate {
    let n_i = z_i.len();
    let n_j = z_j.len();
    if horizon <= 0.0 {
        return WindowEstimate::degenerate(n_i);
    }
    let (a, b) = (window.lower(), window.upper());

    let mut acc: usize = 0;
    let mut admissible: usize = 0;
    let mut u: usize = 0;
    let mut v: usize = 0;
    for &tau in z_i {
        if tau + a < 0.0 {
            continue;
        }
        u = advance_past(z_j, u, tau + a);
        if u == n_j {
            continue;
        }
        v = advance_below(z_j, v.max(u), tau + b);
        if v < n_j && u > 0 {
            admissible += 1;
            acc += v - u;
        }
    }

    let value = boundary_rescale(acc as f64, n_i, admissible) / horizon
        - window.width() * rate_i * rate_j;
    WindowEstimate { value, admissible, references: n_i }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact values on a small hand-worked scenario.
    // - Boundary starvation and degenerate horizons.
    // -------------------------------------------------------------------------

    const Z0: [f64; 9] = [1.0, 5.0, 9.0, 20.0, 24.0, 48.0, 52.0, 75.0, 80.0];
    const Z1: [f64; 5] = [2.0, 6.0, 24.0, 50.0, 76.0];

    #[test]
    // Purpose
    // -------
    // Reproduce the hand-computed cross statistic on the reference scenario.
    //
    // Given
    // -----
    // - `Z0`, `Z1` above, `T = 100`, window `[-10, 10]`.
    //
    // Expect
    // ------
    // - `A_01`: four admissible points (τ = 20, 24, 48, 52) counting one event
    //   each, rescaled by 9/4 → 9/100 − 20·0.09·0.05 = 0.
    // - `A_10`: two admissible points counting two events each, rescaled by
    //   5/2 → 10/100 − 0.09 = 0.01.
    fn pairwise_matches_hand_computed_scenario() {
        let w = Window::centered(10.0).unwrap();

        let a01 = pairwise_window(&Z0, &Z1, w, 100.0, 0.09, 0.05);
        assert_eq!(a01.admissible, 4);
        assert_eq!(a01.references, 9);
        assert!(a01.is_rescaled());
        assert!(a01.value.abs() < 1e-12);

        let a10 = pairwise_window(&Z1, &Z0, w, 100.0, 0.05, 0.09);
        assert_eq!(a10.admissible, 2);
        assert!((a10.value - 0.01).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The diagonal statistic counts the reference point itself inside a
    // centered window.
    //
    // Expect
    // ------
    // - `A_00 = 8·(9/4)/100 − 20·0.09² = 0.018`.
    // - `A_11 = 2·(5/2)/100 − 20·0.05² = 0`.
    fn pairwise_diagonal_includes_reference_point() {
        let w = Window::centered(10.0).unwrap();
        let a00 = pairwise_window(&Z0, &Z0, w, 100.0, 0.09, 0.09);
        let a11 = pairwise_window(&Z1, &Z1, w, 100.0, 0.05, 0.05);
        assert!((a00.value - 0.018).abs() < 1e-12);
        assert!(a11.value.abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Identical inputs give bit-identical outputs (no hidden state).
    fn pairwise_is_deterministic() {
        let w = Window::lagged(10.0).unwrap();
        let first = pairwise_window(&Z0, &Z1, w, 100.0, 0.09, 0.05);
        let second = pairwise_window(&Z0, &Z1, w, 100.0, 0.09, 0.05);
        assert_eq!(first.value.to_bits(), second.value.to_bits());
    }

    #[test]
    // Purpose
    // -------
    // With no admissible reference point the raw zero accumulation is kept
    // (no division by zero) and only the trend is subtracted.
    fn pairwise_starved_window_is_not_rescaled() {
        let w = Window::centered(50.0).unwrap();
        let est = pairwise_window(&[10.0, 20.0], &[15.0], w, 100.0, 0.02, 0.01);
        assert!(est.is_starved());
        assert!((est.value + 100.0 * 0.02 * 0.01).abs() < 1e-15);
    }

    #[test]
    fn pairwise_degenerate_horizon_is_zero() {
        let w = Window::centered(1.0).unwrap();
        let est = pairwise_window(&[0.0], &[0.0], w, 0.0, 0.0, 0.0);
        assert_eq!(est.value, 0.0);
        assert!(est.is_starved());
    }

    #[test]
    fn pairwise_empty_sequences_are_zero() {
        let w = Window::lagged(1.0).unwrap();
        let est = pairwise_window(&[], &[1.0, 2.0], w, 2.0, 0.0, 1.0);
        assert_eq!(est.value, 0.0);
        assert_eq!(est.references, 0);
    }
}
