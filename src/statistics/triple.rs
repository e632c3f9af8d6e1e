//! statistics::triple — products of centered windowed counts `E_ijk`.
//!
//! Purpose
//! -------
//! Estimate, for three event sequences,
//!
//! ```text
//! E_ijk(a, b) = (1/T) Σ_{τ ∈ Z_k} ( N_i(τ+b) − N_i(τ+a) − L_i (b − a) )
//!                                · ( N_j(τ+b) − N_j(τ+a) − L_j (b − a) )
//! ```
//!
//! the third-order building block of the skewness tensor. This is the most
//! expensive primitive: the assembler evaluates it on all `d³` triples.
//!
//! Key behaviors
//! -------------
//! - A single scan over `Z_k` drives two independent two-pointer scans, one
//!   into `Z_i` (`u`, `v`) and one into `Z_j` (`x`, `y`).
//! - A reference point is admissible only if *both* windows are bracketed by
//!   observed events on both sides; the sum is rescaled by
//!   `n_k / admissible` like the pairwise statistic.
//! - Each factor is centered by its own rate.
use crate::statistics::window::{
    Window, WindowEstimate, advance_below, advance_past, boundary_rescale,
};

/// Mean product of the centered windowed counts of `z_i` and `z_j` around
/// the points of `z_k`.
///
/// Parameters
/// ----------
/// - `z_i`, `z_j`: `&[f64]`
///   Sorted counted sequences.
/// - `z_k`: `&[f64]`
///   Sorted reference sequence.
/// - `window`: [`Window`]
///   Lag window `[a, b]`.
/// - `horizon`: `f64`
///   Observation horizon `T`; `T == 0` yields zero.
/// - `rates`: `(f64, f64)`
///   `(L_i, L_j)`, the centering rates of the two counted sequences.
///
/// Returns
/// -------
/// [`WindowEstimate`] with `references = n_k`.
pub fn triple_window(
    z_i: &[f64], z_j: &[f64], z_k: &[f64], window: Window, horizon: f64,
    rates: (f64, f64),
) -> WindowEstimate {
    let n_i = z_i.len();
    let n_j = z_j.len();
    let n_k = z_k.len();
    if horizon <= 0.0 {
        return WindowEstimate::degenerate(n_k);
    }
    let (a, b) = (window.lower(), window.upper());
    let (rate_i, rate_j) = rates;
    let trend_i = rate_i * window.width();
    let trend_j = rate_j * window.width();

    let mut acc = 0.0_f64;
    let mut admissible: usize = 0;
    let (mut u, mut v) = (0_usize, 0_usize);
    let (mut x, mut y) = (0_usize, 0_usize);
    for &tau in z_k {
        if tau + a < 0.0 {
            continue;
        }
        u = advance_past(z_i, u, tau + a);
        v = advance_below(z_i, v.max(u), tau + b);
        x = advance_past(z_j, x, tau + a);
        y = advance_below(z_j, y.max(x), tau + b);

        if u > 0 && v < n_i && x > 0 && y < n_j {
            admissible += 1;
            acc += ((v - u) as f64 - trend_i) * ((y - x) as f64 - trend_j);
        }
    }

    let value = boundary_rescale(acc, n_k, admissible) / horizon;
    WindowEstimate { value, admissible, references: n_k }
}
