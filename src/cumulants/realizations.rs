//! cumulants::realizations — per-realization bundles and their averages.
//!
//! Purpose
//! -------
//! A dataset usually holds several independent realizations of the same
//! process. [`estimate_realizations`] runs the configured pipeline on each one
//! and returns one [`CumulantBundle`] per realization; [`CumulantSummary`]
//! averages them into the inputs of the downstream optimizer.
//!
//! Conventions
//! -----------
//! - Realizations must share their dimension.
//! - The summary always carries a partial skewness matrix: a full tensor is
//!   reduced to its `K[i, i, j]` slice.
use crate::{
    cumulants::{
        assembler::CumulantAssembler,
        errors::{CumulantError, CumulantResult},
        options::{CumulantOptions, WindowSelection},
        window::WindowParameter,
    },
    process::ProcessSet,
};
use ndarray::{Array1, Array2, Array3};
use tracing::info;

/// Skewness output of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum Skewness {
    Full(Array3<f64>),
    Partial(Array2<f64>),
}

impl Skewness {
    /// Partial view: the matrix itself, or `K[i, i, j]` of a full tensor.
    pub fn to_partial(&self) -> Array2<f64> {
        match self {
            Skewness::Partial(k_part) => k_part.clone(),
            Skewness::Full(k) => {
                let d = k.dim().0;
                Array2::from_shape_fn((d, d), |(i, j)| k[[i, i, j]])
            }
        }
    }
}

/// Cumulants of one realization together with the window used.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulantBundle {
    pub rates: Array1<f64>,
    pub covariance: Array2<f64>,
    pub skewness: Skewness,
    pub window: WindowParameter,
}

impl CumulantBundle {
    pub fn dim(&self) -> usize {
        self.rates.len()
    }
}

/// Cumulants averaged over realizations.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulantSummary {
    pub rates: Array1<f64>,
    pub covariance: Array2<f64>,
    pub partial_skewness: Array2<f64>,
    pub realizations: usize,
}

impl CumulantSummary {
    /// Elementwise mean of `L`, `C` and `K_part` over the bundles.
    ///
    /// Errors
    /// ------
    /// - `NoRealizations` for an empty slice.
    /// - `InconsistentRealizations` when dimensions differ.
    pub fn mean(bundles: &[CumulantBundle]) -> CumulantResult<Self> {
        let first = bundles.first().ok_or(CumulantError::NoRealizations)?;
        let d = first.dim();
        let mut rates = Array1::<f64>::zeros(d);
        let mut covariance = Array2::<f64>::zeros((d, d));
        let mut partial_skewness = Array2::<f64>::zeros((d, d));
        for bundle in bundles {
            if bundle.dim() != d {
                return Err(CumulantError::InconsistentRealizations {
                    expected: d,
                    found: bundle.dim(),
                });
            }
            rates += &bundle.rates;
            covariance += &bundle.covariance;
            partial_skewness += &bundle.skewness.to_partial();
        }
        let n = bundles.len() as f64;
        Ok(CumulantSummary {
            rates: rates / n,
            covariance: covariance / n,
            partial_skewness: partial_skewness / n,
            realizations: bundles.len(),
        })
    }
}

/// Run the configured pipeline on one realization.
///
/// Errors
/// ------
/// - Propagates configuration, window and invariant errors from the
///   assembler.
pub fn estimate(processes: ProcessSet, options: &CumulantOptions) -> CumulantResult<CumulantBundle> {
    let mut assembler = CumulantAssembler::from_options(processes, options)?;
    if let WindowSelection::HeuristicSearch { grid_size } = options.selection {
        assembler.select_window(grid_size)?;
    }
    assembler.run(options.variant, options.covariance, options.formula)?;
    assembler.bundle(options.variant)
}

/// Run the configured pipeline on every realization, in order.
///
/// Errors
/// ------
/// - `NoRealizations` for an empty slice.
/// - `InconsistentRealizations` when dimensions differ.
pub fn estimate_realizations(
    realizations: &[ProcessSet], options: &CumulantOptions,
) -> CumulantResult<Vec<CumulantBundle>> {
    let first = realizations.first().ok_or(CumulantError::NoRealizations)?;
    let d = first.dim();
    if let Some(bad) = realizations.iter().find(|p| p.dim() != d) {
        return Err(CumulantError::InconsistentRealizations { expected: d, found: bad.dim() });
    }
    info!(realizations = realizations.len(), dim = d, "estimating cumulants");
    options.method.strategy().gather_list(realizations, |p| estimate(p.clone(), options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulants::options::{ComputationMethod, CumulantVariant};
    use ndarray::array;

    fn bundle(scale: f64) -> CumulantBundle {
        CumulantBundle {
            rates: array![1.0, 2.0] * scale,
            covariance: array![[1.0, 0.5], [0.5, 2.0]] * scale,
            skewness: Skewness::Partial(array![[1.0, 0.0], [0.0, 1.0]] * scale),
            window: WindowParameter::Scalar(1.0),
        }
    }

    #[test]
    // Purpose
    // -------
    // The summary is the elementwise mean of the bundles.
    fn summary_averages_bundles() {
        let s = CumulantSummary::mean(&[bundle(1.0), bundle(3.0)]).unwrap();
        assert_eq!(s.realizations, 2);
        assert_eq!(s.rates, array![2.0, 4.0]);
        assert_eq!(s.covariance, array![[2.0, 1.0], [1.0, 4.0]]);
        assert_eq!(s.partial_skewness, array![[2.0, 0.0], [0.0, 2.0]]);
    }

    #[test]
    fn summary_rejects_empty_and_mixed_dimensions() {
        assert_eq!(CumulantSummary::mean(&[]).unwrap_err(), CumulantError::NoRealizations);
        let mut odd = bundle(1.0);
        odd.rates = array![1.0];
        assert_eq!(
            CumulantSummary::mean(&[bundle(1.0), odd]).unwrap_err(),
            CumulantError::InconsistentRealizations { expected: 2, found: 1 }
        );
    }

    #[test]
    fn full_tensor_reduces_to_iij_slice() {
        let k = Array3::from_shape_fn((2, 2, 2), |(i, j, l)| (4 * i + 2 * j + l) as f64);
        assert_eq!(Skewness::Full(k).to_partial(), array![[0.0, 1.0], [6.0, 7.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Every realization yields a bundle in input order, with the variant
    // requested by the options.
    fn estimate_realizations_preserves_order() {
        let a = ProcessSet::new(vec![vec![1.0, 2.0, 3.5, 7.0], vec![0.5, 4.0, 6.0]]).unwrap();
        let b = ProcessSet::new(vec![vec![1.0, 9.0], vec![2.0, 3.0, 8.0, 10.0]]).unwrap();
        let opts = CumulantOptions::new(
            1.0,
            ComputationMethod::Accelerated,
            CumulantVariant::Full,
            WindowSelection::Fixed,
        )
        .unwrap();
        let bundles = estimate_realizations(&[a.clone(), b.clone()], &opts).unwrap();
        assert_eq!(bundles.len(), 2);
        assert_eq!(&bundles[0].rates, a.rates());
        assert_eq!(&bundles[1].rates, b.rates());
        assert!(matches!(bundles[0].skewness, Skewness::Full(_)));

        let mixed = ProcessSet::new(vec![vec![1.0]]).unwrap();
        assert!(matches!(
            estimate_realizations(&[a, mixed], &opts),
            Err(CumulantError::InconsistentRealizations { expected: 2, found: 1 })
        ));
        assert_eq!(estimate_realizations(&[], &opts).unwrap_err(), CumulantError::NoRealizations);
    }
}
