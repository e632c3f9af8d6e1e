//! preprocessing::sqrt — symmetric square root of a covariance matrix.
//!
//! Purpose
//! -------
//! Provide `C^{1/2} = O diag(√λ) Oᵗ` for a symmetric covariance `C`, the
//! building block of the optimizer's starting point.
//!
//! Key behaviors
//! -------------
//! - The input is copied into a `nalgebra::DMatrix` and decomposed with
//!   `SymmetricEigen`.
//! - The eigenvector matrix is checked to be orthogonal (`Oᵗ ≈ O⁻¹`); a
//!   singular `O` or a mismatch beyond tolerance is an error.
//! - Slightly negative eigenvalues (estimation noise on a PSD matrix) are
//!   clamped to zero and reported with `warn!`.
use crate::cumulants::{
    errors::{CumulantError, CumulantResult},
    tensor::{DEFAULT_ATOL, DEFAULT_RTOL, check_close, check_symmetric},
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use tracing::warn;

/// Eigenvalue square roots and orthogonal eigenvectors of a symmetric `C`.
///
/// Returns
/// -------
/// `(√λ, O)` with `C ≈ O diag(λ) Oᵗ`; eigenvectors are the columns of `O`.
///
/// Errors
/// ------
/// - `DimensionMismatch` if `C` is not square.
/// - `InvariantViolation` if `C` is not symmetric or `O` is not orthogonal.
/// - `SingularMatrix` if `O` cannot be inverted.
pub fn eigen_decomposition(c: &Array2<f64>) -> CumulantResult<(Array1<f64>, Array2<f64>)> {
    let (n, m) = c.dim();
    if n != m {
        return Err(CumulantError::DimensionMismatch { what: "covariance", expected: n, found: m });
    }
    check_symmetric("covariance symmetry", c)?;

    let eigen = to_dmatrix(c).symmetric_eigen();
    let o = eigen.eigenvectors;
    let inverse = o.clone().try_inverse().ok_or(CumulantError::SingularMatrix {
        what: "eigenvector matrix",
    })?;
    let transpose = from_dmatrix(&o.transpose());
    check_close(
        "eigenvector orthogonality",
        transpose.view(),
        from_dmatrix(&inverse).view(),
        DEFAULT_RTOL,
        DEFAULT_ATOL,
    )?;

    let negative = eigen.eigenvalues.iter().filter(|&&l| l < 0.0).count();
    if negative > 0 {
        let smallest = eigen.eigenvalues.iter().cloned().fold(f64::INFINITY, f64::min);
        warn!(negative, smallest, "clamping negative covariance eigenvalues to zero");
    }
    let sqrt_lambda = Array1::from_iter(eigen.eigenvalues.iter().map(|&l| l.max(0.0).sqrt()));
    Ok((sqrt_lambda, from_dmatrix(&o)))
}

/// `C^{1/2} = O diag(√λ) Oᵗ`.
///
/// Examples
/// --------
/// ```rust
/// # use hawkes_cumulants::preprocessing::symmetric_sqrt;
/// # use ndarray::array;
/// let root = symmetric_sqrt(&array![[4.0, 0.0], [0.0, 9.0]]).unwrap();
/// assert!((root[[0, 0]] - 2.0).abs() < 1e-12);
/// assert!((root[[1, 1]] - 3.0).abs() < 1e-12);
/// ```
pub fn symmetric_sqrt(c: &Array2<f64>) -> CumulantResult<Array2<f64>> {
    let (sqrt_lambda, o) = eigen_decomposition(c)?;
    let scaled = &o * &sqrt_lambda.view().insert_axis(ndarray::Axis(0));
    Ok(scaled.dot(&o.t()))
}

/// Copy an `ndarray` matrix into a column-major `DMatrix`.
pub(crate) fn to_dmatrix(m: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| m[[i, j]])
}

pub(crate) fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
