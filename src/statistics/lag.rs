//! statistics::lag — lag-weighted integrated cross-correlation `I_ij`.
//!
//! Estimates `∫_0^H t c_ij(t) dt` through
//!
//! ```text
//! I_ij(H) = (1/T) Σ_{τ ∈ Z_i} Σ_{τ' ∈ Z_j, τ − H < τ' < τ} (τ − τ')  −  ½ H² L_i L_j
//! ```
//!
//! A single cursor into `Z_j` tracks the left boundary `τ − H`; for each
//! reference point a bounded inner scan accumulates the lags of the events
//! strictly preceding `τ`. Reference points with `τ − H < 0` are dropped.
//!
//! Unlike the windowed counts, the correction counts accumulated lag
//! terms, not reference points: with `count` terms summed, the raw sum is
//! rescaled by `n_i / count` when `0 < count < n_i`. The returned
//! [`WindowEstimate::admissible`] therefore holds the lag-term count.
use crate::statistics::window::{WindowEstimate, advance_past, boundary_rescale};

/// Lag-weighted integral of the cross-correlation of `z_i` and `z_j` over
/// `(0, half_width)`.
///
/// `half_width` must be strictly positive; callers validate it through
/// [`validate_half_width`](crate::statistics::validate_half_width).
pub fn integrated_lag(
    z_i: &[f64], z_j: &[f64], half_width: f64, horizon: f64, rate_i: f64, rate_j: f64,
) -> WindowEstimate {
    let n_i = z_i.len();
    if horizon <= 0.0 {
        return WindowEstimate::degenerate(n_i);
    }

    let mut acc = 0.0_f64;
    let mut terms: usize = 0;
    let mut u: usize = 0;
    for &tau in z_i {
        let left = tau - half_width;
        if left < 0.0 {
            continue;
        }
        u = advance_past(z_j, u, left);
        for &tau_p in &z_j[u..] {
            let lag = tau - tau_p;
            if lag <= 0.0 {
                break;
            }
            acc += lag;
            terms += 1;
        }
    }

    let value = boundary_rescale(acc, n_i, terms) / horizon
        - 0.5 * half_width * half_width * rate_i * rate_j;
    WindowEstimate { value, admissible: terms, references: n_i }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check the lag sum on a tiny input by hand.
    //
    // Given
    // -----
    // - `z_i = [5, 10]`, `z_j = [1, 4, 8, 9.5]`, `H = 5`, `T = 10`,
    //   `L = (0.2, 0.4)`.
    //
    // Expect
    // ------
    // - τ = 5: lags from 1 (4) and 4 (1) → 5; τ = 10: lags from 8 (2) and
    //   9.5 (0.5) → 2.5. Total 7.5 over four lag terms; 4 ≥ n_i, so no
    //   rescaling.
    // - `I = 7.5 / 10 − 0.5 · 25 · 0.08 = −0.25`.
    fn integrated_lag_matches_hand_computation() {
        let est = integrated_lag(&[5.0, 10.0], &[1.0, 4.0, 8.0, 9.5], 5.0, 10.0, 0.2, 0.4);
        assert_eq!(est.admissible, 4);
        assert!(!est.is_rescaled());
        assert!((est.value + 0.25).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Events coinciding with the reference point contribute nothing, and
    // fewer lag terms than reference points trigger the count-ratio
    // correction.
    //
    // Given
    // -----
    // - `z_i = [1, 6]`, `z_j = [3, 6]`, `H = 4`, `T = 6`, zero rates.
    //
    // Expect
    // ------
    // - τ = 1 is dropped (1 − 4 < 0); τ = 6 sees only 3 (lag 3), 6 itself
    //   is excluded. Raw sum 3 from one lag term, rescaled by 2/1 → 6 / 6 = 1.
    fn integrated_lag_excludes_coincident_events_and_rescales() {
        let est = integrated_lag(&[1.0, 6.0], &[3.0, 6.0], 4.0, 6.0, 0.0, 0.0);
        assert_eq!(est.admissible, 1);
        assert!(est.is_rescaled());
        assert!((est.value - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The correction is driven by the number of lag terms, not by the number
    // of reference points that survive the left boundary.
    //
    // Given
    // -----
    // - `z_i = [1, 6, 7]`, `z_j = [3, 5.5]`, `H = 4`, `T = 10`, zero rates.
    //
    // Expect
    // ------
    // - τ = 1 dropped; τ = 6 sees 3 and 5.5 (lags 3, 0.5); τ = 7 sees 5.5
    //   (lag 1.5), 3 is on the open edge. Three terms = n_i, so the sum 5
    //   is not rescaled: `I = 0.5`, although only two reference points were
    //   used.
    fn integrated_lag_counts_lag_terms() {
        let est = integrated_lag(&[1.0, 6.0, 7.0], &[3.0, 5.5], 4.0, 10.0, 0.0, 0.0);
        assert_eq!(est.admissible, 3);
        assert!(!est.is_rescaled());
        assert!((est.value - 0.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Pin `I_01` on the two-dimensional reference scenario.
    //
    // Given
    // -----
    // - `Z0 = [1, 5, 9, 20, 24, 48, 52, 75, 80]`, `Z1 = [2, 6, 24, 50, 76]`,
    //   `H = 10`, `T = 100`, `L = (0.09, 0.05)`.
    //
    // Expect
    // ------
    // - Lags 2 (τ = 52 from 50) and 4 (τ = 80 from 76): sum 6 over two
    //   terms, rescaled by 9/2 → 27 / 100 − 0.5 · 100 · 0.0045 = 0.045.
    fn integrated_lag_reference_scenario() {
        let z0 = [1.0, 5.0, 9.0, 20.0, 24.0, 48.0, 52.0, 75.0, 80.0];
        let z1 = [2.0, 6.0, 24.0, 50.0, 76.0];
        let est = integrated_lag(&z0, &z1, 10.0, 100.0, 0.09, 0.05);
        assert_eq!(est.admissible, 2);
        assert!((est.value - 0.045).abs() < 1e-12);
    }

    #[test]
    fn integrated_lag_degenerate_horizon_is_zero() {
        assert_eq!(integrated_lag(&[0.0], &[0.0], 1.0, 0.0, 0.0, 0.0).value, 0.0);
    }
}
