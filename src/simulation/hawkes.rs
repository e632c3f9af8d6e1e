//! simulation::hawkes — multivariate Hawkes processes with exponential
//! kernels.
//!
//! Purpose
//! -------
//! Generate synthetic realizations with a known kernel-integral matrix, so
//! that empirical cumulants can be compared with their closed forms.
//!
//! Model
//! -----
//! ```text
//! λ_i(t) = μ_i + Σ_j Σ_{t_k ∈ Z_j, t_k < t} G_ij β e^{-β (t − t_k)}
//! ```
//!
//! `G_ij = ∫ φ_ij` is the expected number of direct offspring in `i` of one
//! event in `j`. The process is stationary iff the spectral radius of `G` is
//! below 1, in which case `R = (I − G)⁻¹` and the mean rates are `R μ`.
//!
//! Key behaviors
//! -------------
//! - Ogata thinning: between events the total intensity only decays, so its
//!   value right after the last event bounds it until the next candidate.
//! - With a single decay `β` the excitation of each target is one running sum,
//!   updated by `e^{-β Δt}` per step: `O(d)` work per candidate.
//! - All randomness comes from a seeded `StdRng`; a seed reproduces the
//!   realization exactly.
use crate::{
    cumulants::theoretical::theoretical_covariance,
    preprocessing::sqrt::{from_dmatrix, to_dmatrix},
    process::ProcessSet,
    simulation::{
        errors::{SimulationError, SimulationResult},
        poisson::{exponential, validate_horizon},
    },
};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, distributions::Distribution, rngs::StdRng};
use tracing::debug;

/// Validated parameters of an exponential-kernel Hawkes process.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesParams {
    baseline: Array1<f64>,
    adjacency: Array2<f64>,
    decay: f64,
    spectral_radius: f64,
    kernel_integrals: Array2<f64>,
}

impl HawkesParams {
    /// Validate `μ`, `G` and `β`.
    ///
    /// Errors
    /// ------
    /// - `InvalidBaseline`, `InvalidKernel`, `InvalidDecay` for negative or
    ///   non-finite entries (and `β ≤ 0`).
    /// - `DimensionMismatch` when `G` is not `d×d`.
    /// - `Unstable` when the spectral radius of `G` is `≥ 1`.
    pub fn new(
        baseline: Array1<f64>, adjacency: Array2<f64>, decay: f64,
    ) -> SimulationResult<Self> {
        let d = baseline.len();
        if let Some((dim, &value)) =
            baseline.iter().enumerate().find(|(_, m)| !m.is_finite() || **m < 0.0)
        {
            return Err(SimulationError::InvalidBaseline { dim, value });
        }
        if adjacency.dim() != (d, d) {
            return Err(SimulationError::DimensionMismatch { expected: d, found: adjacency.dim() });
        }
        if let Some(((row, col), &value)) =
            adjacency.indexed_iter().find(|(_, g)| !g.is_finite() || **g < 0.0)
        {
            return Err(SimulationError::InvalidKernel { row, col, value });
        }
        if !decay.is_finite() || decay <= 0.0 {
            return Err(SimulationError::InvalidDecay { decay });
        }
        let spectral_radius = spectral_radius(&adjacency);
        if spectral_radius >= 1.0 {
            return Err(SimulationError::Unstable { spectral_radius });
        }
        let i_minus_g = Array2::<f64>::eye(d) - &adjacency;
        let kernel_integrals = to_dmatrix(&i_minus_g)
            .try_inverse()
            .map(|inv| from_dmatrix(&inv))
            .ok_or(SimulationError::Unstable { spectral_radius })?;
        Ok(HawkesParams { baseline, adjacency, decay, spectral_radius, kernel_integrals })
    }

    pub fn dim(&self) -> usize {
        self.baseline.len()
    }

    pub fn baseline(&self) -> &Array1<f64> {
        &self.baseline
    }

    pub fn adjacency(&self) -> &Array2<f64> {
        &self.adjacency
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn spectral_radius(&self) -> f64 {
        self.spectral_radius
    }

    /// `R = (I − G)⁻¹`.
    pub fn kernel_integrals(&self) -> &Array2<f64> {
        &self.kernel_integrals
    }

    /// Stationary mean rates `R μ`.
    pub fn stationary_rates(&self) -> Array1<f64> {
        self.kernel_integrals.dot(&self.baseline)
    }

    /// Stationary integrated covariance `R diag(Rμ) Rᵗ`.
    pub fn stationary_covariance(&self) -> Array2<f64> {
        theoretical_covariance(&self.stationary_rates(), &self.kernel_integrals)
    }
}

/// One simulated realization with its ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesSample {
    pub processes: ProcessSet,
    /// `R = (I − G)⁻¹`.
    pub reference: Array2<f64>,
}

/// Simulate a Hawkes process on `[0, horizon]` by Ogata thinning.
///
/// Errors
/// ------
/// - `InvalidHorizon` for a non-positive or non-finite horizon.
/// - `Distribution` if the exponential sampler cannot be built.
pub fn simulate_hawkes(
    params: &HawkesParams, horizon: f64, seed: u64,
) -> SimulationResult<HawkesSample> {
    validate_horizon(horizon)?;
    let d = params.dim();
    let beta = params.decay;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut excitation = Array1::<f64>::zeros(d);
    let mut times: Vec<Vec<f64>> = vec![Vec::new(); d];
    let mut t = 0.0_f64;
    let mut candidates: usize = 0;

    loop {
        let bound = params.baseline.sum() + excitation.sum();
        if bound <= 0.0 {
            break;
        }
        let wait = exponential(bound)?.sample(&mut rng);
        t += wait;
        if t > horizon {
            break;
        }
        candidates += 1;
        excitation *= (-beta * wait).exp();
        let intensities = &params.baseline + &excitation;
        let total = intensities.sum();

        let u: f64 = rng.gen::<f64>() * bound;
        if u >= total {
            continue;
        }
        let target = pick_dimension(&intensities, u);
        times[target].push(t);
        for k in 0..d {
            excitation[k] += params.adjacency[[k, target]] * beta;
        }
    }

    let events: usize = times.iter().map(Vec::len).sum();
    debug!(dim = d, horizon, events, candidates, seed, "hawkes realization simulated");
    Ok(HawkesSample {
        processes: ProcessSet::with_horizon(times, horizon)?,
        reference: params.kernel_integrals.clone(),
    })
}

/// Index `i` with `Σ_{k<i} λ_k ≤ u < Σ_{k≤i} λ_k`.
fn pick_dimension(intensities: &Array1<f64>, u: f64) -> usize {
    let mut acc = 0.0;
    for (i, &lambda) in intensities.iter().enumerate() {
        acc += lambda;
        if u < acc {
            return i;
        }
    }
    intensities.len().saturating_sub(1)
}

/// Largest eigenvalue modulus of `G`.
pub fn spectral_radius(adjacency: &Array2<f64>) -> f64 {
    if adjacency.is_empty() {
        return 0.0;
    }
    to_dmatrix(adjacency)
        .complex_eigenvalues()
        .iter()
        .map(|z| z.norm())
        .fold(0.0_f64, f64::max)
}
