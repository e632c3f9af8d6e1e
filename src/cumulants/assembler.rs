//! cumulants::assembler — staged assembly of `L`, `C`, `K` and `K_part`.
//!
//! Purpose
//! -------
//! Orchestrate the window statistics over every pair/triple of a
//! [`ProcessSet`] and hold the intermediate arrays in typed stage slots:
//!
//! ```text
//! B ──┐
//! C ──┼──► K       (full tensor, needs E)
//! E ──┤
//! E_c ┼──► K_part  (partial matrix, needs E_c)
//! J ──┘
//! R_true ──► C_th ──► K_th, K_part_th
//! ```
//!
//! Key behaviors
//! -------------
//! - Each `compute_*` call evaluates its units through the configured
//!   [`ExecutionStrategy`], gathers them, applies the explicit symmetrization
//!   of its stage and only then writes the slot.
//! - Stages read their precursors through `Stage::require`: a stage invoked
//!   before a prerequisite fails with `PrecursorMissing`, and a prerequisite
//!   computed for another window fails with `StalePrecursor`. Nothing is ever
//!   recomputed implicitly; [`CumulantAssembler::run_full`] and
//!   [`CumulantAssembler::run_partial`] are the explicit pipelines.
//! - Recomputing a statistic stage with a new window clears the skewness
//!   slots that were computed for the old one.
//! - Re-running a stage with the same window reproduces the same arrays bit
//!   for bit, whichever strategy is used.
//!
//! Invariants & assumptions
//! ------------------------
//! - `B`, `C` and `J` are symmetric after their stage; `K` is cyclically
//!   symmetric. Both are checked with tolerance and reported as
//!   `InvariantViolation`.
//! - The assembler mutates only its own slots; the process set is immutable.
//!
//! Downstream usage
//! ----------------
//! - Build with [`CumulantAssembler::new`] or
//!   [`CumulantAssembler::from_options`], run a pipeline, then read the
//!   results through the accessors or [`CumulantAssembler::bundle`].
use crate::{
    cumulants::{
        dispatch::ExecutionStrategy,
        errors::CumulantResult,
        options::{CovarianceSource, CumulantOptions, CumulantVariant, SkewnessFormula},
        realizations::{CumulantBundle, Skewness},
        selection::select_window,
        stage::{Stage, StageName},
        tensor::{
            assemble_partial_skewness, assemble_skewness, check_cyclic, check_symmetric,
            symmetrize,
        },
        theoretical::{
            reference_from_flat, theoretical_covariance, theoretical_partial_skewness,
            theoretical_skewness, validate_reference,
        },
        window::WindowParameter,
        windowed::{windowed_partial_skewness, windowed_skewness},
    },
    process::ProcessSet,
    statistics::{Window, WindowEstimate, integrated_lag, pairwise_window, triple_window},
};
use ndarray::{Array, Array1, Array2, Array3, Dimension};
use tracing::{debug, info, warn};

/// Admissible fraction below which the boundary rescaling is reported.
const LOW_ADMISSIBLE_FRACTION: f64 = 0.5;

/// Staged cumulant estimator for one realization.
#[derive(Debug, Clone)]
pub struct CumulantAssembler {
    processes: ProcessSet,
    window: WindowParameter,
    strategy: ExecutionStrategy,

    b: Stage<Array2<f64>>,
    c: Stage<Array2<f64>>,
    e: Stage<Array3<f64>>,
    e_c: Stage<Array2<f64>>,
    j: Stage<Array2<f64>>,
    k: Stage<Array3<f64>>,
    k_part: Stage<Array2<f64>>,

    reference: Stage<Array2<f64>>,
    c_th: Stage<Array2<f64>>,
    k_th: Stage<Array3<f64>>,
    k_part_th: Stage<Array2<f64>>,
}

impl CumulantAssembler {
    /// Create an assembler with every stage empty.
    ///
    /// Errors
    /// ------
    /// - `WindowShapeMismatch` / `Statistic` when `window` is invalid for
    ///   the process dimension.
    pub fn new(
        processes: ProcessSet, window: WindowParameter, strategy: ExecutionStrategy,
    ) -> CumulantResult<Self> {
        window.validate(processes.dim())?;
        Ok(CumulantAssembler {
            processes,
            window,
            strategy,
            b: Stage::NotComputed,
            c: Stage::NotComputed,
            e: Stage::NotComputed,
            e_c: Stage::NotComputed,
            j: Stage::NotComputed,
            k: Stage::NotComputed,
            k_part: Stage::NotComputed,
            reference: Stage::NotComputed,
            c_th: Stage::NotComputed,
            k_th: Stage::NotComputed,
            k_part_th: Stage::NotComputed,
        })
    }

    /// Create an assembler with the fixed window and strategy of `options`.
    pub fn from_options(processes: ProcessSet, options: &CumulantOptions) -> CumulantResult<Self> {
        let window = WindowParameter::scalar(options.window_half_width)?;
        CumulantAssembler::new(processes, window, options.method.strategy())
    }

    // ---- Configuration ----

    pub fn processes(&self) -> &ProcessSet {
        &self.processes
    }

    pub fn dim(&self) -> usize {
        self.processes.dim()
    }

    pub fn window(&self) -> &WindowParameter {
        &self.window
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: ExecutionStrategy) {
        self.strategy = strategy;
    }

    /// Replace the window used by subsequent stages.
    ///
    /// Slots computed with the previous window are kept but become stale:
    /// reading them as precursors fails until they are recomputed.
    pub fn set_window(&mut self, window: WindowParameter) -> CumulantResult<()> {
        window.validate(self.dim())?;
        self.window = window;
        Ok(())
    }

    /// Choose per-pair half-widths by minimizing `I_ij(h) / h` over a
    /// `grid_size`-point log grid, and make them the current window.
    pub fn select_window(&mut self, grid_size: usize) -> CumulantResult<&WindowParameter> {
        let window = select_window(&self.processes, grid_size, self.strategy)?;
        debug!(stage = "H", dim = self.dim(), window = %window, grid_size, "window selected");
        self.window = window;
        Ok(&self.window)
    }

    // ---- Empirical stages ----

    /// Rate vector `L`.
    pub fn rates(&self) -> &Array1<f64> {
        self.processes.rates()
    }

    /// `B[i,j] = A_ij([-H_ij, 0])`, symmetrized.
    pub fn compute_b(&mut self) -> CumulantResult<()> {
        let (p, w) = (&self.processes, &self.window);
        let estimates = self.strategy.gather_pairs(p.dim(), |i, j| {
            let window = Window::lagged(w.half_width(i, j))?;
            Ok(pairwise_window(
                p.timestamps(i), p.timestamps(j), window, p.horizon(), p.rate(i), p.rate(j),
            ))
        })?;
        let b = symmetrize(&settle(StageName::B, &estimates));
        check_symmetric("B symmetry", &b)?;
        self.b = Stage::computed(Some(self.window.clone()), b);
        self.finish_statistic(StageName::B);
        Ok(())
    }

    /// Covariance matrix `C` from the chosen source.
    ///
    /// - `Direct`: `A_ij([-H_ij, H_ij])`, symmetrized.
    /// - `FromB`: `2B + diag(L)`; requires `B` for the current window.
    pub fn compute_c(&mut self, source: CovarianceSource) -> CumulantResult<()> {
        let c = match source {
            CovarianceSource::Direct => {
                let (p, w) = (&self.processes, &self.window);
                let estimates = self.strategy.gather_pairs(p.dim(), |i, j| {
                    let window = Window::centered(w.half_width(i, j))?;
                    Ok(pairwise_window(
                        p.timestamps(i), p.timestamps(j), window, p.horizon(), p.rate(i),
                        p.rate(j),
                    ))
                })?;
                symmetrize(&settle(StageName::C, &estimates))
            }
            CovarianceSource::FromB => {
                let b = self.b.require(StageName::B, StageName::C, Some(&self.window))?;
                let mut c = b * 2.0;
                for (i, &rate) in self.rates().iter().enumerate() {
                    c[[i, i]] += rate;
                }
                c
            }
        };
        check_symmetric("covariance symmetry", &c)?;
        self.c = Stage::computed(Some(self.window.clone()), c);
        self.finish_statistic(StageName::C);
        Ok(())
    }

    /// `E[i,j,k] = E_ijk([-H_ij, 0])` over all triples.
    pub fn compute_e(&mut self) -> CumulantResult<()> {
        let (p, w) = (&self.processes, &self.window);
        let estimates = self.strategy.gather_triples(p.dim(), |i, j, k| {
            let window = Window::lagged(w.half_width(i, j))?;
            Ok(triple_window(
                p.timestamps(i), p.timestamps(j), p.timestamps(k), window, p.horizon(),
                (p.rate(i), p.rate(j)),
            ))
        })?;
        self.e = Stage::computed(Some(self.window.clone()), settle(StageName::E, &estimates));
        self.finish_statistic(StageName::E);
        Ok(())
    }

    /// `E_c[i,j] = E_ijj([-H_ij, 0])`.
    pub fn compute_e_c(&mut self) -> CumulantResult<()> {
        let (p, w) = (&self.processes, &self.window);
        let estimates = self.strategy.gather_pairs(p.dim(), |i, j| {
            let window = Window::lagged(w.half_width(i, j))?;
            Ok(triple_window(
                p.timestamps(i), p.timestamps(j), p.timestamps(j), window, p.horizon(),
                (p.rate(i), p.rate(j)),
            ))
        })?;
        self.e_c = Stage::computed(Some(self.window.clone()), settle(StageName::Ec, &estimates));
        self.finish_statistic(StageName::Ec);
        Ok(())
    }

    /// `J[i,j] = I_ij(H_ij)`, symmetrized.
    pub fn compute_j(&mut self) -> CumulantResult<()> {
        let (p, w) = (&self.processes, &self.window);
        let estimates = self.strategy.gather_pairs(p.dim(), |i, j| {
            Ok(integrated_lag(
                p.timestamps(i), p.timestamps(j), w.half_width(i, j), p.horizon(), p.rate(i),
                p.rate(j),
            ))
        })?;
        let j = symmetrize(&settle(StageName::J, &estimates));
        check_symmetric("J symmetry", &j)?;
        self.j = Stage::computed(Some(self.window.clone()), j);
        self.finish_statistic(StageName::J);
        Ok(())
    }

    /// Full skewness tensor `K`.
    ///
    /// Errors
    /// ------
    /// - `PrecursorMissing` / `StalePrecursor` when the staged formula is
    ///   used and one of `B`, `E`, `J`, `C` is absent or computed for another
    ///   window.
    /// - `InvariantViolation` if the result is not cyclically symmetric.
    pub fn compute_k(&mut self, formula: SkewnessFormula) -> CumulantResult<()> {
        let k = match formula {
            SkewnessFormula::Staged => {
                let w = Some(&self.window);
                let b = self.b.require(StageName::B, StageName::K, w)?;
                let e = self.e.require(StageName::E, StageName::K, w)?;
                let j = self.j.require(StageName::J, StageName::K, w)?;
                let c = self.c.require(StageName::C, StageName::K, w)?;
                assemble_skewness(b, e, j, c, self.processes.rates(), &self.window)
            }
            SkewnessFormula::Windowed => {
                windowed_skewness(&self.processes, &self.window, self.strategy)?
            }
        };
        check_cyclic("skewness cyclic symmetry", &k)?;
        self.k = Stage::computed(Some(self.window.clone()), k);
        self.log_stage(StageName::K);
        Ok(())
    }

    /// Partial skewness matrix `K_part`.
    ///
    /// Errors
    /// ------
    /// - `PrecursorMissing` / `StalePrecursor` when the staged formula is
    ///   used and one of `B`, `E_c`, `J`, `C` is absent or computed for
    ///   another window.
    pub fn compute_k_part(&mut self, formula: SkewnessFormula) -> CumulantResult<()> {
        let k_part = match formula {
            SkewnessFormula::Staged => {
                let w = Some(&self.window);
                let b = self.b.require(StageName::B, StageName::KPart, w)?;
                let e_c = self.e_c.require(StageName::Ec, StageName::KPart, w)?;
                let j = self.j.require(StageName::J, StageName::KPart, w)?;
                let c = self.c.require(StageName::C, StageName::KPart, w)?;
                assemble_partial_skewness(b, e_c, j, c, self.processes.rates(), &self.window)
            }
            SkewnessFormula::Windowed => {
                windowed_partial_skewness(&self.processes, &self.window, self.strategy)?
            }
        };
        self.k_part = Stage::computed(Some(self.window.clone()), k_part);
        self.log_stage(StageName::KPart);
        Ok(())
    }

    // ---- Pipelines ----

    /// `B → C → E → J → K` with the direct covariance and staged formula.
    pub fn run_full(&mut self) -> CumulantResult<()> {
        self.run(CumulantVariant::Full, CovarianceSource::Direct, SkewnessFormula::Staged)
    }

    /// `B → C → E_c → J → K_part` with the direct covariance and staged
    /// formula.
    pub fn run_partial(&mut self) -> CumulantResult<()> {
        self.run(CumulantVariant::Partial, CovarianceSource::Direct, SkewnessFormula::Staged)
    }

    /// Run every stage needed for `variant` in dependency order.
    pub fn run(
        &mut self, variant: CumulantVariant, covariance: CovarianceSource,
        formula: SkewnessFormula,
    ) -> CumulantResult<()> {
        let label = match variant {
            CumulantVariant::Full => "full",
            CumulantVariant::Partial => "partial",
        };
        info!(
            variant = label,
            dim = self.dim(),
            events = self.processes.total_events(),
            window = %self.window,
            strategy = ?self.strategy,
            "starting computation of cumulants"
        );
        self.compute_b()?;
        self.compute_c(covariance)?;
        match (variant, formula) {
            (CumulantVariant::Full, SkewnessFormula::Staged) => {
                self.compute_e()?;
                self.compute_j()?;
            }
            (CumulantVariant::Partial, SkewnessFormula::Staged) => {
                self.compute_e_c()?;
                self.compute_j()?;
            }
            (_, SkewnessFormula::Windowed) => {}
        }
        match variant {
            CumulantVariant::Full => self.compute_k(formula)?,
            CumulantVariant::Partial => self.compute_k_part(formula)?,
        }
        info!(variant = label, "all cumulants computed");
        Ok(())
    }

    // ---- Theoretical counterparts ----

    /// Provide the ground-truth `R = (I − G)⁻¹`; clears previously computed
    /// theoretical counterparts.
    pub fn set_reference(&mut self, r: Array2<f64>) -> CumulantResult<()> {
        validate_reference(&r, self.dim())?;
        self.reference = Stage::computed(None, r);
        self.c_th.clear();
        self.k_th.clear();
        self.k_part_th.clear();
        Ok(())
    }

    /// As [`set_reference`](Self::set_reference), from a row-major `d²`
    /// vector.
    pub fn set_reference_flat(&mut self, flat: &[f64]) -> CumulantResult<()> {
        let r = reference_from_flat(flat, self.dim())?;
        self.set_reference(r)
    }

    /// `C_th = R diag(L) Rᵗ`.
    pub fn compute_c_th(&mut self) -> CumulantResult<()> {
        let r = self.reference.require(StageName::Reference, StageName::CTheory, None)?;
        let c_th = theoretical_covariance(self.processes.rates(), r);
        self.c_th = Stage::computed(None, c_th);
        self.log_stage(StageName::CTheory);
        Ok(())
    }

    /// Theoretical full skewness; requires `C_th`.
    pub fn compute_k_th(&mut self) -> CumulantResult<()> {
        let r = self.reference.require(StageName::Reference, StageName::KTheory, None)?;
        let c_th = self.c_th.require(StageName::CTheory, StageName::KTheory, None)?;
        let k_th = theoretical_skewness(self.processes.rates(), c_th, r);
        self.k_th = Stage::computed(None, k_th);
        self.log_stage(StageName::KTheory);
        Ok(())
    }

    /// Theoretical partial skewness; requires `C_th`.
    pub fn compute_k_part_th(&mut self) -> CumulantResult<()> {
        let r = self.reference.require(StageName::Reference, StageName::KPartTheory, None)?;
        let c_th = self.c_th.require(StageName::CTheory, StageName::KPartTheory, None)?;
        let k_part_th = theoretical_partial_skewness(self.processes.rates(), c_th, r);
        self.k_part_th = Stage::computed(None, k_part_th);
        self.log_stage(StageName::KPartTheory);
        Ok(())
    }

    // ---- Accessors ----

    pub fn b(&self) -> CumulantResult<&Array2<f64>> {
        self.b.get(StageName::B)
    }

    pub fn c(&self) -> CumulantResult<&Array2<f64>> {
        self.c.get(StageName::C)
    }

    pub fn e(&self) -> CumulantResult<&Array3<f64>> {
        self.e.get(StageName::E)
    }

    pub fn e_c(&self) -> CumulantResult<&Array2<f64>> {
        self.e_c.get(StageName::Ec)
    }

    pub fn j(&self) -> CumulantResult<&Array2<f64>> {
        self.j.get(StageName::J)
    }

    pub fn k(&self) -> CumulantResult<&Array3<f64>> {
        self.k.get(StageName::K)
    }

    pub fn k_part(&self) -> CumulantResult<&Array2<f64>> {
        self.k_part.get(StageName::KPart)
    }

    pub fn reference(&self) -> CumulantResult<&Array2<f64>> {
        self.reference.get(StageName::Reference)
    }

    pub fn c_th(&self) -> CumulantResult<&Array2<f64>> {
        self.c_th.get(StageName::CTheory)
    }

    pub fn k_th(&self) -> CumulantResult<&Array3<f64>> {
        self.k_th.get(StageName::KTheory)
    }

    pub fn k_part_th(&self) -> CumulantResult<&Array2<f64>> {
        self.k_part_th.get(StageName::KPartTheory)
    }

    /// Stage slot of a statistic, for callers inspecting windows.
    pub fn stage_window(&self, stage: StageName) -> Option<&WindowParameter> {
        match stage {
            StageName::B => self.b.window(),
            StageName::C => self.c.window(),
            StageName::E => self.e.window(),
            StageName::Ec => self.e_c.window(),
            StageName::J => self.j.window(),
            StageName::K => self.k.window(),
            StageName::KPart => self.k_part.window(),
            _ => None,
        }
    }

    /// Package `L`, `C` and the requested skewness for the current window.
    ///
    /// Errors
    /// ------
    /// - `PrecursorMissing` / `StalePrecursor` when `C` or the skewness stage
    ///   is absent or was computed for another window.
    pub fn bundle(&self, variant: CumulantVariant) -> CumulantResult<CumulantBundle> {
        let w = Some(&self.window);
        let (stage, skewness) = match variant {
            CumulantVariant::Full => (
                StageName::K,
                Skewness::Full(self.k.require(StageName::K, StageName::K, w)?.clone()),
            ),
            CumulantVariant::Partial => (
                StageName::KPart,
                Skewness::Partial(
                    self.k_part.require(StageName::KPart, StageName::KPart, w)?.clone(),
                ),
            ),
        };
        let covariance = self.c.require(StageName::C, stage, w)?.clone();
        Ok(CumulantBundle {
            rates: self.processes.rates().clone(),
            covariance,
            skewness,
            window: self.window.clone(),
        })
    }

    // ---- Internals ----

    /// Drop skewness slots computed for a window other than the current one.
    fn finish_statistic(&mut self, stage: StageName) {
        if self.k.is_computed() && self.k.window() != Some(&self.window) {
            self.k.clear();
        }
        if self.k_part.is_computed() && self.k_part.window() != Some(&self.window) {
            self.k_part.clear();
        }
        self.log_stage(stage);
    }

    fn log_stage(&self, stage: StageName) {
        debug!(
            stage = %stage,
            dim = self.dim(),
            window = %self.window,
            strategy = ?self.strategy,
            "stage computed"
        );
    }
}

/// Extract the values of a gathered stage, reporting heavy boundary
/// rescaling.
fn settle<D: Dimension>(stage: StageName, estimates: &Array<WindowEstimate, D>) -> Array<f64, D> {
    let low = estimates
        .iter()
        .filter(|e| e.references > 0 && e.admissible_fraction() < LOW_ADMISSIBLE_FRACTION)
        .count();
    if low > 0 {
        let starved = estimates.iter().filter(|e| e.references > 0 && e.is_starved()).count();
        warn!(
            stage = %stage,
            units = low,
            starved,
            total = estimates.len(),
            "fewer than half of the reference points were admissible; boundary rescaling applied"
        );
    }
    estimates.mapv(|e| e.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulants::errors::CumulantError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Stage ordering errors and staleness after a window change.
    // - The golden two-dimensional scenario.
    // - Idempotence and strategy independence.
    // - Theoretical counterparts wiring.
    // -------------------------------------------------------------------------

    fn scenario() -> ProcessSet {
        ProcessSet::with_horizon(
            vec![
                vec![1.0, 5.0, 9.0, 20.0, 24.0, 48.0, 52.0, 75.0, 80.0],
                vec![2.0, 6.0, 24.0, 50.0, 76.0],
            ],
            100.0,
        )
        .unwrap()
    }

    fn assembler(strategy: ExecutionStrategy) -> CumulantAssembler {
        CumulantAssembler::new(scenario(), WindowParameter::Scalar(10.0), strategy).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Skewness stages invoked before their precursors fail and name the
    // first missing stage; nothing is recomputed implicitly.
    fn skewness_before_precursors_fails() {
        let mut a = assembler(ExecutionStrategy::Sequential);
        assert_eq!(
            a.compute_k_part(SkewnessFormula::Staged).unwrap_err(),
            CumulantError::PrecursorMissing { stage: StageName::KPart, missing: StageName::B }
        );
        a.compute_b().unwrap();
        a.compute_c(CovarianceSource::Direct).unwrap();
        assert_eq!(
            a.compute_k(SkewnessFormula::Staged).unwrap_err(),
            CumulantError::PrecursorMissing { stage: StageName::K, missing: StageName::E }
        );
        assert!(!a.k.is_computed());
        assert!(a.compute_c(CovarianceSource::FromB).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // After a window change, precursors computed for the old window are
    // reported as stale, and recomputing a statistic clears old skewness.
    fn window_change_makes_precursors_stale() {
        let mut a = assembler(ExecutionStrategy::Sequential);
        a.run_partial().unwrap();
        assert!(a.k_part().is_ok());

        a.set_window(WindowParameter::Scalar(5.0)).unwrap();
        a.compute_b().unwrap();
        assert!(a.k_part().is_err());
        assert_eq!(
            a.compute_k_part(SkewnessFormula::Staged).unwrap_err(),
            CumulantError::StalePrecursor { stage: StageName::KPart, stale: StageName::Ec }
        );
        assert!(matches!(
            a.bundle(CumulantVariant::Partial),
            Err(CumulantError::PrecursorMissing { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the hand-worked covariance on the reference scenario.
    //
    // Given
    // -----
    // - `Z0`, `Z1`, `T = 100`, `H = 10`.
    //
    // Expect
    // ------
    // - `L = (0.09, 0.05)`.
    // - `A_00 = 0.018`, `A_11 = 0`, `A_01 = 0`, `A_10 = 0.01`, so after
    //   symmetrization `C = [[0.018, 0.005], [0.005, 0]]`.
    fn golden_scenario_covariance() {
        let mut a = assembler(ExecutionStrategy::FanOut);
        a.compute_c(CovarianceSource::Direct).unwrap();
        assert_eq!(a.rates(), &array![0.09, 0.05]);
        let c = a.c().unwrap();
        let expected = array![[0.018, 0.005], [0.005, 0.0]];
        for (x, y) in c.iter().zip(expected.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Re-running a pipeline, or switching strategy, reproduces every array
    // bit for bit.
    fn pipelines_are_idempotent_across_strategies() {
        let mut seq = assembler(ExecutionStrategy::Sequential);
        let mut fan = assembler(ExecutionStrategy::FanOut);
        seq.run_full().unwrap();
        fan.run_full().unwrap();
        let first = seq.k().unwrap().clone();
        seq.run_full().unwrap();

        assert_eq!(seq.k().unwrap(), &first);
        assert_eq!(fan.k().unwrap(), &first);
        assert_eq!(fan.c().unwrap(), seq.c().unwrap());
        assert_eq!(fan.b().unwrap(), seq.b().unwrap());
    }

    #[test]
    // Purpose
    // -------
    // The partial pipeline bundles `L`, `C` and `K_part` for the current
    // window, and the full pipeline produces a cyclically symmetric `K`.
    fn bundles_carry_current_window() {
        let mut a = assembler(ExecutionStrategy::Sequential);
        a.run_partial().unwrap();
        let bundle = a.bundle(CumulantVariant::Partial).unwrap();
        assert_eq!(bundle.window, WindowParameter::Scalar(10.0));
        assert!(matches!(bundle.skewness, Skewness::Partial(ref m) if m.dim() == (2, 2)));
        assert!(a.bundle(CumulantVariant::Full).is_err());

        a.run_full().unwrap();
        assert!(check_cyclic("K", a.k().unwrap()).is_ok());
        assert!(a.bundle(CumulantVariant::Full).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Theoretical stages require the reference matrix and `C_th`.
    fn theoretical_stages_require_reference() {
        let mut a = assembler(ExecutionStrategy::Sequential);
        assert_eq!(
            a.compute_c_th().unwrap_err(),
            CumulantError::PrecursorMissing {
                stage: StageName::CTheory,
                missing: StageName::Reference
            }
        );
        a.set_reference_flat(&[1.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(
            a.compute_k_th().unwrap_err(),
            CumulantError::PrecursorMissing {
                stage: StageName::KTheory,
                missing: StageName::CTheory
            }
        );
        a.compute_c_th().unwrap();
        a.compute_k_th().unwrap();
        a.compute_k_part_th().unwrap();
        assert_eq!(a.c_th().unwrap(), &Array2::from_diag(&array![0.09, 0.05]));
        assert_eq!(a.k_part_th().unwrap(), &Array2::from_diag(&array![0.09, 0.05]));
        assert!(a.set_reference(Array2::eye(3)).is_err());
    }

    #[test]
    fn degenerate_process_set_gives_zero_statistics() {
        let p = ProcessSet::new(vec![vec![], vec![]]).unwrap();
        let mut a =
            CumulantAssembler::new(p, WindowParameter::Scalar(1.0), ExecutionStrategy::Sequential)
                .unwrap();
        a.run_full().unwrap();
        assert!(a.c().unwrap().iter().all(|&v| v == 0.0));
        assert!(a.k().unwrap().iter().all(|&v| v == 0.0));
    }
}
