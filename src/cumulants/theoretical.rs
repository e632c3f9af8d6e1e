//! cumulants::theoretical — closed-form cumulants of a linear Hawkes process.
//!
//! Purpose
//! -------
//! Given the rate vector `L` and the kernel-integral matrix `R = (I − G)⁻¹`,
//! compute the integrated covariance, skewness and partial skewness that a
//! stationary Hawkes process with those parameters would have. These are the
//! validation targets for the empirical estimators.
//!
//! ```text
//! C_th          = R diag(L) Rᵗ
//! K_th[i,j,k]   = Σ_m ( C_th[i,m] R[j,m] R[k,m] + C_th[j,m] R[k,m] R[i,m]
//!                     + C_th[k,m] R[i,m] R[j,m] − 2 L_m R[i,m] R[j,m] R[k,m] )
//! K_part_th     = (R ∘ R) C_thᵗ + 2 (R ∘ (C_th − R diag(L))) Rᵗ
//! ```
//!
//! Invariants & assumptions
//! ------------------------
//! - `R` is `d×d` with finite entries; a flattened row-major `d²` vector is
//!   accepted through [`reference_from_flat`].
//! - `K_part_th[i, j] = K_th[i, i, j]`, and `K_th` is cyclically symmetric
//!   by construction.
use crate::cumulants::errors::{CumulantError, CumulantResult};
use ndarray::{Array1, Array2, Array3};

/// Validate a square, finite reference matrix of dimension `dim`.
pub fn validate_reference(r: &Array2<f64>, dim: usize) -> CumulantResult<()> {
    if r.nrows() != dim || r.ncols() != dim {
        return Err(CumulantError::DimensionMismatch {
            what: "reference matrix",
            expected: dim * dim,
            found: r.len(),
        });
    }
    if let Some(((row, col), &value)) = r.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(CumulantError::NonFiniteReference { row, col, value });
    }
    Ok(())
}

/// Reshape a row-major `d²` vector into a `d×d` reference matrix.
///
/// Errors
/// ------
/// - `DimensionMismatch` when `flat.len() != dim²`.
/// - `NonFiniteReference` for NaN/±inf entries.
pub fn reference_from_flat(flat: &[f64], dim: usize) -> CumulantResult<Array2<f64>> {
    if flat.len() != dim * dim {
        return Err(CumulantError::DimensionMismatch {
            what: "flattened reference matrix",
            expected: dim * dim,
            found: flat.len(),
        });
    }
    let r = Array2::from_shape_vec((dim, dim), flat.to_vec())?;
    validate_reference(&r, dim)?;
    Ok(r)
}

/// `C_th = R diag(L) Rᵗ`.
pub fn theoretical_covariance(l: &Array1<f64>, r: &Array2<f64>) -> Array2<f64> {
    let scaled = r * &l.view().insert_axis(ndarray::Axis(0));
    scaled.dot(&r.t())
}

/// Theoretical full skewness tensor.
pub fn theoretical_skewness(
    l: &Array1<f64>, c_th: &Array2<f64>, r: &Array2<f64>,
) -> Array3<f64> {
    let d = l.len();
    Array3::from_shape_fn((d, d, d), |(i, j, k)| {
        (0..d)
            .map(|m| {
                c_th[[i, m]] * r[[j, m]] * r[[k, m]]
                    + c_th[[j, m]] * r[[k, m]] * r[[i, m]]
                    + c_th[[k, m]] * r[[i, m]] * r[[j, m]]
                    - 2.0 * l[m] * r[[i, m]] * r[[j, m]] * r[[k, m]]
            })
            .sum()
    })
}

/// Theoretical partial skewness matrix.
pub fn theoretical_partial_skewness(
    l: &Array1<f64>, c_th: &Array2<f64>, r: &Array2<f64>,
) -> Array2<f64> {
    let r_sq = r * r;
    let r_diag_l = r * &l.view().insert_axis(ndarray::Axis(0));
    let inner = r * &(c_th - &r_diag_l);
    r_sq.dot(&c_th.t()) + inner.dot(&r.t()) * 2.0
}
