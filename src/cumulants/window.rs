//! cumulants::window — the integration half-width `H`.
//!
//! A window parameter is either one scalar shared by every pair or a `d×d`
//! matrix of per-pair half-widths (as produced by the heuristic search). For
//! the three-index stages the `(i, j)` entry is used for the triple
//! `(i, j, k)`.
use crate::{
    cumulants::errors::{CumulantError, CumulantResult},
    statistics::validate_half_width,
};
use ndarray::Array2;

#[derive(Debug, Clone, PartialEq)]
pub enum WindowParameter {
    Scalar(f64),
    Matrix(Array2<f64>),
}

impl WindowParameter {
    /// Validate a scalar half-width.
    pub fn scalar(half_width: f64) -> CumulantResult<Self> {
        Ok(WindowParameter::Scalar(validate_half_width(half_width)?))
    }

    /// Validate a per-pair half-width matrix for dimension `dim`.
    ///
    /// Errors
    /// ------
    /// - `CumulantError::WindowShapeMismatch` when the matrix is not `dim×dim`.
    /// - `CumulantError::Statistic` when an entry is non-positive or non-finite.
    pub fn matrix(half_widths: Array2<f64>, dim: usize) -> CumulantResult<Self> {
        let param = WindowParameter::Matrix(half_widths);
        param.validate(dim)?;
        Ok(param)
    }

    /// Half-width used for the pair `(i, j)`.
    #[inline]
    pub fn half_width(&self, i: usize, j: usize) -> f64 {
        match self {
            WindowParameter::Scalar(h) => *h,
            WindowParameter::Matrix(m) => m[[i, j]],
        }
    }

    /// Check the parameter against a process dimension.
    pub fn validate(&self, dim: usize) -> CumulantResult<()> {
        match self {
            WindowParameter::Scalar(h) => {
                validate_half_width(*h)?;
            }
            WindowParameter::Matrix(m) => {
                if m.dim() != (dim, dim) {
                    return Err(CumulantError::WindowShapeMismatch { expected: dim, found: m.dim() });
                }
                for &h in m.iter() {
                    validate_half_width(h)?;
                }
            }
        }
        Ok(())
    }

    /// Dense `dim×dim` view of the parameter.
    pub fn to_matrix(&self, dim: usize) -> Array2<f64> {
        match self {
            WindowParameter::Scalar(h) => Array2::from_elem((dim, dim), *h),
            WindowParameter::Matrix(m) => m.clone(),
        }
    }
}

impl std::fmt::Display for WindowParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowParameter::Scalar(h) => write!(f, "H={h}"),
            WindowParameter::Matrix(m) => {
                let (lo, hi) = m
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
                write!(f, "H=matrix[{}x{}, {lo}..{hi}]", m.nrows(), m.ncols())
            }
        }
    }
}

impl From<f64> for WindowParameter {
    fn from(half_width: f64) -> Self {
        WindowParameter::Scalar(half_width)
    }
}
