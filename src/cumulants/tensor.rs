//! cumulants::tensor — symmetrization and skewness assembly.
//!
//! Purpose
//! -------
//! Pure array algebra shared by the assembler and the theoretical
//! counterparts:
//!
//! - [`symmetrize`] and [`cyclic_sum`], the explicit symmetrization steps,
//! - [`assemble_skewness`] / [`assemble_partial_skewness`], which combine the
//!   staged statistics into `K` and `K_part`,
//! - tolerance checks ([`check_symmetric`], [`check_cyclic`],
//!   [`check_close`]) reporting `InvariantViolation` with the observed
//!   magnitude.
//!
//! Conventions
//! -----------
//! - Index notation follows the estimators: `B`, `C`, `J` are `d×d`, `E` is
//!   `d×d×d` with `E[i, j, k]` centered on reference sequence `k`.
//! - The window enters the correction term through `H[i, j]`.
//! - Tolerance comparisons use `|a − b| ≤ atol + rtol |b|`, elementwise.
use crate::cumulants::{
    errors::{CumulantError, CumulantResult},
    window::WindowParameter,
};
use ndarray::{Array1, Array2, Array3};

/// Relative tolerance of invariant checks.
pub const DEFAULT_RTOL: f64 = 1e-5;
/// Absolute tolerance of invariant checks.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// `½ (M + Mᵗ)`.
pub fn symmetrize(m: &Array2<f64>) -> Array2<f64> {
    (m + &m.t()) * 0.5
}

/// `K1[i,j,k] + K1[j,k,i] + K1[k,i,j]`.
pub fn cyclic_sum(k1: &Array3<f64>) -> Array3<f64> {
    Array3::from_shape_fn(k1.dim(), |(i, j, k)| k1[[i, j, k]] + k1[[j, k, i]] + k1[[k, i, j]])
}

/// Full skewness tensor from the staged statistics.
///
/// ```text
/// M[i,j,k]  = L_k (H_ij C_ij − 2 J_ij)
/// K1        = E − M + δ_ij B[j,k]
/// K         = K1 + K1[j,k,i] + K1[k,i,j] + δ_ij δ_ik L_i
/// ```
pub fn assemble_skewness(
    b: &Array2<f64>, e: &Array3<f64>, j: &Array2<f64>, c: &Array2<f64>, l: &Array1<f64>,
    window: &WindowParameter,
) -> Array3<f64> {
    let correction = correction_matrix(j, c, window);
    let k1 = Array3::from_shape_fn(e.dim(), |(a, bb, k)| {
        let mut v = e[[a, bb, k]] - l[k] * correction[[a, bb]];
        if a == bb {
            v += b[[bb, k]];
        }
        v
    });
    let mut k = cyclic_sum(&k1);
    for (i, &rate) in l.iter().enumerate() {
        k[[i, i, i]] += rate;
    }
    k
}

/// Partial skewness matrix from the staged statistics.
///
/// ```text
/// M_c[i,j] = L_j (H_ij C_ij − 2 J_ij)
/// K_part   = Bᵗ + diag(L) + 2 diag(diag B) + 2 (E_c − M_c) + (E_c − M_c)ᵗ
/// ```
pub fn assemble_partial_skewness(
    b: &Array2<f64>, e_c: &Array2<f64>, j: &Array2<f64>, c: &Array2<f64>, l: &Array1<f64>,
    window: &WindowParameter,
) -> Array2<f64> {
    let correction = correction_matrix(j, c, window);
    let centered = Array2::from_shape_fn(e_c.dim(), |(a, bb)| {
        e_c[[a, bb]] - l[bb] * correction[[a, bb]]
    });
    let mut k_part = b.t().to_owned() + &(&centered * 2.0) + &centered.t();
    for (i, &rate) in l.iter().enumerate() {
        k_part[[i, i]] += rate + 2.0 * b[[i, i]];
    }
    k_part
}

/// `H_ij C_ij − 2 J_ij`.
fn correction_matrix(j: &Array2<f64>, c: &Array2<f64>, window: &WindowParameter) -> Array2<f64> {
    Array2::from_shape_fn(c.dim(), |(a, b)| window.half_width(a, b) * c[[a, b]] - 2.0 * j[[a, b]])
}

/// Largest `|M − Mᵗ|` entry.
pub fn max_asymmetry(m: &Array2<f64>) -> f64 {
    m.indexed_iter().fold(0.0_f64, |acc, ((i, j), &v)| acc.max((v - m[[j, i]]).abs()))
}

/// Largest `|K[i,j,k] − K[j,k,i]|` entry.
pub fn max_cyclic_asymmetry(k: &Array3<f64>) -> f64 {
    k.indexed_iter().fold(0.0_f64, |acc, ((i, j, l), &v)| acc.max((v - k[[j, l, i]]).abs()))
}

/// Fail with `InvariantViolation` unless `M ≈ Mᵗ`.
pub fn check_symmetric(what: &'static str, m: &Array2<f64>) -> CumulantResult<()> {
    check_close(what, m.view(), m.t(), DEFAULT_RTOL, DEFAULT_ATOL)
}

/// Fail with `InvariantViolation` unless `K` is cyclically symmetric.
pub fn check_cyclic(what: &'static str, k: &Array3<f64>) -> CumulantResult<()> {
    let rotated = Array3::from_shape_fn(k.dim(), |(i, j, l)| k[[j, l, i]]);
    check_close(what, k.view(), rotated.view(), DEFAULT_RTOL, DEFAULT_ATOL)
}

/// Elementwise `|a − b| ≤ atol + rtol |b|`.
///
/// Errors
/// ------
/// - `InvariantViolation { what, magnitude, tol }` with the largest excess
///   `|a − b|` and the tolerance at that entry.
/// - `DimensionMismatch` when the shapes differ.
pub fn check_close<D: ndarray::Dimension>(
    what: &'static str, a: ndarray::ArrayView<f64, D>, b: ndarray::ArrayView<f64, D>, rtol: f64,
    atol: f64,
) -> CumulantResult<()> {
    if a.shape() != b.shape() {
        return Err(CumulantError::DimensionMismatch {
            what,
            expected: b.len(),
            found: a.len(),
        });
    }
    let mut worst: Option<(f64, f64)> = None;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        let violated = diff.is_nan() || diff > tol;
        if violated && worst.map_or(true, |(d, _)| diff > d || diff.is_nan()) {
            worst = Some((diff, tol));
        }
    }
    match worst {
        None => Ok(()),
        Some((magnitude, tol)) => Err(CumulantError::InvariantViolation { what, magnitude, tol }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Symmetrization and cyclic sums.
    // - The K / K_part assembly formulas on small hand-checked inputs.
    // - Tolerance checks reporting magnitudes.
    // -------------------------------------------------------------------------

    #[test]
    fn symmetrize_averages_with_transpose() {
        let m = array![[1.0, 2.0], [4.0, 3.0]];
        assert_eq!(symmetrize(&m), array![[1.0, 3.0], [3.0, 3.0]]);
        assert_eq!(max_asymmetry(&m), 2.0);
        assert_eq!(max_asymmetry(&symmetrize(&m)), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // A cyclic sum of an arbitrary tensor is cyclically symmetric.
    fn cyclic_sum_is_cyclically_symmetric() {
        let k1 = Array3::from_shape_fn((3, 3, 3), |(i, j, k)| (i * 9 + j * 3 + k) as f64 * 0.37);
        let k = cyclic_sum(&k1);
        assert!(max_cyclic_asymmetry(&k1) > 0.0);
        assert!(max_cyclic_asymmetry(&k) < 1e-12);
        assert!(check_cyclic("K", &k).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // In one dimension the formulas collapse to scalars that can be checked
    // by hand.
    //
    // Given
    // -----
    // - `B = 0.2`, `E = 0.5`, `J = 0.1`, `C = 0.3`, `L = 2`, `H = 4`.
    //
    // Expect
    // ------
    // - `M = 2 (1.2 − 0.2) = 2`, `K1 = 0.5 − 2 + 0.2 = −1.3`,
    //   `K = 3 K1 + L = −1.9`.
    // - `K_part = B + L + 2B + 3 (E − M) = 0.2 + 2 + 0.4 − 4.5 = −1.9`.
    fn one_dimensional_assembly_matches_hand_values() {
        let b = array![[0.2]];
        let e = Array3::from_elem((1, 1, 1), 0.5);
        let e_c = array![[0.5]];
        let j = array![[0.1]];
        let c = array![[0.3]];
        let l = array![2.0];
        let w = WindowParameter::Scalar(4.0);

        let k = assemble_skewness(&b, &e, &j, &c, &l, &w);
        assert!((k[[0, 0, 0]] + 1.9).abs() < 1e-12);
        let k_part = assemble_partial_skewness(&b, &e_c, &j, &c, &l, &w);
        assert!((k_part[[0, 0]] + 1.9).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // With every statistic at zero only the Poisson self-term survives.
    //
    // Expect
    // ------
    // - `K = δ_ij δ_ik L_i` and `K_part = diag(L)`.
    fn zero_statistics_leave_only_rate_terms() {
        let d = 3;
        let z2 = Array2::<f64>::zeros((d, d));
        let z3 = Array3::<f64>::zeros((d, d, d));
        let l = array![0.5, 1.0, 1.5];
        let w = WindowParameter::Scalar(2.0);

        let k = assemble_skewness(&z2, &z3, &z2, &z2, &l, &w);
        let k_part = assemble_partial_skewness(&z2, &z2, &z2, &z2, &l, &w);
        for ((i, j, m), &v) in k.indexed_iter() {
            let expected = if i == j && j == m { l[i] } else { 0.0 };
            assert_eq!(v, expected);
        }
        assert_eq!(k_part, Array2::from_diag(&l));
    }

    #[test]
    // Purpose
    // -------
    // A per-pair window matrix enters the correction entrywise.
    //
    // Given
    // -----
    // - `d = 2`, zero `B`, `E_c`, `J`; `C = 1`; `L = (1, 2)`;
    //   `H = [[1, 2], [3, 4]]`.
    //
    // Expect
    // ------
    // - `M_c[i,j] = L_j H_ij`, so `K_part = diag(L) − 2 M_c − M_cᵗ`.
    fn partial_skewness_uses_per_pair_window() {
        let z2 = Array2::<f64>::zeros((2, 2));
        let c = Array2::from_elem((2, 2), 1.0);
        let l = array![1.0, 2.0];
        let w = WindowParameter::Matrix(array![[1.0, 2.0], [3.0, 4.0]]);
        let m_c = array![[1.0, 4.0], [3.0, 8.0]];

        let k_part = assemble_partial_skewness(&z2, &z2, &z2, &c, &l, &w);
        let expected = Array2::from_diag(&l) - &(&m_c * 2.0) - &m_c.t();
        assert_eq!(k_part, expected);
    }

    #[test]
    fn check_close_reports_largest_violation() {
        let a = array![1.0, 2.0, 3.5];
        let b = array![1.0, 2.1, 3.0];
        match check_close("test", a.view(), b.view(), 0.0, 0.01).unwrap_err() {
            CumulantError::InvariantViolation { what, magnitude, tol } => {
                assert_eq!(what, "test");
                assert!((magnitude - 0.5).abs() < 1e-12);
                assert_eq!(tol, 0.01);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(check_close("ok", a.view(), a.view(), 0.0, 0.0).is_ok());
        assert!(check_symmetric("S", &array![[1.0, 2.0], [2.0, 1.0]]).is_ok());
        assert!(check_symmetric("S", &array![[1.0, 2.0], [2.5, 1.0]]).is_err());
    }
}
