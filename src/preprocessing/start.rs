//! preprocessing::start — optimizer starting point and cost weighting.
//!
//! The downstream optimizer searches for `R` such that the theoretical
//! cumulants match the averaged empirical ones. Two quantities are derived
//! from a [`CumulantSummary`] before the search starts:
//!
//! - [`starting_point`]: `R₀ = C̄^{1/2} · M · diag(1/√L̄)`, which reproduces
//!   `C̄ = R₀ diag(L̄) R₀ᵗ` exactly for any orthogonal `M`;
//! - [`default_alpha`]: `α = 1 / (1 + ‖C̄‖²_F / ‖K̄_part‖²_F)`, the weight
//!   balancing the covariance and skewness terms of the cost.
use crate::{
    cumulants::{
        CumulantSummary,
        errors::{CumulantError, CumulantResult},
    },
    preprocessing::sqrt::{from_dmatrix, symmetric_sqrt, to_dmatrix},
};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Orthogonal factor `M` of the starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Identity,
    /// Random orthogonal matrix drawn from a seeded generator.
    Random { seed: u64 },
}

/// Orthogonal `Q` factor of a `dim×dim` matrix with iid `U[0, 1)` entries.
pub fn random_orthogonal_matrix<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Array2<f64> {
    let uniform = Array2::from_shape_fn((dim, dim), |_| rng.gen::<f64>());
    let q = to_dmatrix(&uniform).qr().q();
    from_dmatrix(&q)
}

/// `C̄^{1/2} · M · diag(1/√L̄)`.
///
/// Errors
/// ------
/// - `NonPositiveRate` when some averaged rate is `≤ 0`.
/// - Errors of [`symmetric_sqrt`] on the averaged covariance.
pub fn starting_point(summary: &CumulantSummary, rotation: Rotation) -> CumulantResult<Array2<f64>> {
    if let Some((dim, &value)) = summary.rates.iter().enumerate().find(|(_, l)| **l <= 0.0) {
        return Err(CumulantError::NonPositiveRate { dim, value });
    }
    let d = summary.rates.len();
    let sqrt_c = symmetric_sqrt(&summary.covariance)?;
    let rotated = match rotation {
        Rotation::Identity => sqrt_c,
        Rotation::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            sqrt_c.dot(&random_orthogonal_matrix(d, &mut rng))
        }
    };
    let inv_sqrt_l = summary.rates.mapv(|l| 1.0 / l.sqrt());
    Ok(rotated * &inv_sqrt_l.view().insert_axis(ndarray::Axis(0)))
}

/// `1 / (1 + ‖C̄‖²_F / ‖K̄_part‖²_F)`; `0` when the skewness is identically
/// zero.
pub fn default_alpha(summary: &CumulantSummary) -> f64 {
    let c_sq: f64 = summary.covariance.iter().map(|v| v * v).sum();
    let k_sq: f64 = summary.partial_skewness.iter().map(|v| v * v).sum();
    if k_sq == 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + c_sq / k_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    fn summary(rates: Array1<f64>, covariance: Array2<f64>, k: Array2<f64>) -> CumulantSummary {
        CumulantSummary { rates, covariance, partial_skewness: k, realizations: 1 }
    }

    #[test]
    // Purpose
    // -------
    // The starting point reproduces the averaged covariance through
    // `R₀ diag(L̄) R₀ᵗ`, with or without a random rotation.
    fn starting_point_reproduces_covariance() {
        let l = array![0.5, 2.0];
        let c = array![[1.0, 0.3], [0.3, 2.5]];
        let s = summary(l.clone(), c.clone(), Array2::eye(2));
        for rotation in [Rotation::Identity, Rotation::Random { seed: 7 }] {
            let r0 = starting_point(&s, rotation).unwrap();
            let rebuilt = (&r0 * &l.view().insert_axis(ndarray::Axis(0))).dot(&r0.t());
            for (x, y) in rebuilt.iter().zip(c.iter()) {
                assert!((x - y).abs() < 1e-10);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Random rotations are orthogonal and reproducible from the seed.
    fn random_orthogonal_matrix_is_orthogonal_and_seeded() {
        let q1 = random_orthogonal_matrix(4, &mut StdRng::seed_from_u64(3));
        let q2 = random_orthogonal_matrix(4, &mut StdRng::seed_from_u64(3));
        assert_eq!(q1, q2);
        let qtq = q1.t().dot(&q1);
        for ((i, j), &v) in qtq.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((v - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn starting_point_rejects_zero_rate() {
        let s = summary(array![1.0, 0.0], Array2::eye(2), Array2::eye(2));
        assert_eq!(
            starting_point(&s, Rotation::Identity).unwrap_err(),
            CumulantError::NonPositiveRate { dim: 1, value: 0.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Equal Frobenius norms give `α = 1/2`; a zero skewness gives 0.
    fn default_alpha_balances_norms() {
        let s = summary(array![1.0], array![[2.0]], array![[-2.0]]);
        assert!((default_alpha(&s) - 0.5).abs() < 1e-15);
        let flat = summary(array![1.0], array![[2.0]], array![[0.0]]);
        assert_eq!(default_alpha(&flat), 0.0);
    }
}
