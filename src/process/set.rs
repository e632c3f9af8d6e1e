//! Process sets — `d` event sequences observed over a shared horizon.
//!
//! Purpose
//! -------
//! Bundle the per-dimension [`EventSequence`]s of one realization of a
//! multivariate point process together with its observation horizon `T` and
//! the empirical rate vector `L`. Every cumulant stage borrows a `ProcessSet`
//! immutably, which is what makes the per-pair computations independent.
//!
//! Key behaviors
//! -------------
//! - Derive `T = max` last timestamp over non-empty sequences (0 when all
//!   sequences are empty), or accept an explicit horizon `T ≥ max`.
//! - Derive `L[i] = n_i / T`, defaulting to 0 when `T == 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `dim() ≥ 1`.
//! - `horizon()` is finite and non-negative.
//! - The rate vector is computed once at construction and never mutated.
//!
//! Conventions
//! -----------
//! - A process set with `T == 0` is *degenerate*: rates are zero and every
//!   downstream statistic evaluates to zero instead of raising an error.
use crate::process::{
    errors::{ProcessError, ProcessResult},
    sequence::EventSequence,
};
use ndarray::Array1;

/// `ProcessSet` — one realization of a `d`-dimensional point process.
///
/// Fields
/// ------
/// - `sequences`: one [`EventSequence`] per dimension.
/// - `horizon`: observation length `T`.
/// - `rates`: empirical rate vector `L` (length `d`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSet {
    sequences: Vec<EventSequence>,
    horizon: f64,
    rates: Array1<f64>,
}

impl ProcessSet {
    /// Build a process set from already-sorted timestamp arrays.
    ///
    /// Errors
    /// ------
    /// - `ProcessError::EmptyProcessSet` when `raw` is empty.
    /// - Any validation error from [`EventSequence::new`], labelled with its
    ///   dimension.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use hawkes_cumulants::process::ProcessSet;
    /// let set = ProcessSet::new(vec![vec![1.0, 2.0, 4.0], vec![3.0]]).unwrap();
    /// assert_eq!(set.dim(), 2);
    /// assert_eq!(set.horizon(), 4.0);
    /// assert_eq!(set.rates()[0], 0.75);
    /// ```
    pub fn new(raw: Vec<Vec<f64>>) -> ProcessResult<Self> {
        let sequences = collect_sequences(raw, EventSequence::new)?;
        let horizon = max_timestamp(&sequences);
        Ok(Self::assemble(sequences, horizon))
    }

    /// Build a process set from arbitrary-order timestamp arrays, sorting each
    /// dimension first.
    pub fn from_unsorted(raw: Vec<Vec<f64>>) -> ProcessResult<Self> {
        let sequences = collect_sequences(raw, EventSequence::from_unsorted)?;
        let horizon = max_timestamp(&sequences);
        Ok(Self::assemble(sequences, horizon))
    }

    /// Build a process set from sorted arrays observed over an explicit
    /// horizon, e.g. when the observation window extends past the last event.
    ///
    /// Errors
    /// ------
    /// - `ProcessError::InvalidHorizon` when `horizon` is not finite or is
    ///   negative.
    /// - `ProcessError::HorizonTooSmall` when some timestamp exceeds `horizon`.
    pub fn with_horizon(raw: Vec<Vec<f64>>, horizon: f64) -> ProcessResult<Self> {
        if !horizon.is_finite() || horizon < 0.0 {
            return Err(ProcessError::InvalidHorizon { horizon });
        }
        let sequences = collect_sequences(raw, EventSequence::new)?;
        let max_timestamp = max_timestamp(&sequences);
        if max_timestamp > horizon {
            return Err(ProcessError::HorizonTooSmall { horizon, max_timestamp });
        }
        Ok(Self::assemble(sequences, horizon))
    }

    /// Build a process set from validated sequences.
    pub fn from_sequences(sequences: Vec<EventSequence>) -> ProcessResult<Self> {
        if sequences.is_empty() {
            return Err(ProcessError::EmptyProcessSet);
        }
        let horizon = max_timestamp(&sequences);
        Ok(Self::assemble(sequences, horizon))
    }

    fn assemble(sequences: Vec<EventSequence>, horizon: f64) -> Self {
        let rates = Array1::from_iter(sequences.iter().map(|seq| {
            if horizon > 0.0 && !seq.is_empty() { seq.len() as f64 / horizon } else { 0.0 }
        }));
        ProcessSet { sequences, horizon, rates }
    }

    /// Number of dimensions `d`.
    pub fn dim(&self) -> usize {
        self.sequences.len()
    }

    /// Observation horizon `T`.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Empirical rate vector `L`.
    pub fn rates(&self) -> &Array1<f64> {
        &self.rates
    }

    pub fn rate(&self, dim: usize) -> f64 {
        self.rates[dim]
    }

    pub fn sequence(&self, dim: usize) -> &EventSequence {
        &self.sequences[dim]
    }

    /// Timestamps of dimension `dim`.
    pub fn timestamps(&self, dim: usize) -> &[f64] {
        self.sequences[dim].as_slice()
    }

    pub fn sequences(&self) -> &[EventSequence] {
        &self.sequences
    }

    /// Total number of events across all dimensions.
    pub fn total_events(&self) -> usize {
        self.sequences.iter().map(EventSequence::len).sum()
    }

    /// `true` when the horizon is zero (all sequences empty, or every event
    /// at time 0). Rates and statistics then default to zero.
    pub fn is_degenerate(&self) -> bool {
        self.horizon <= 0.0
    }
}

fn collect_sequences<F>(raw: Vec<Vec<f64>>, build: F) -> ProcessResult<Vec<EventSequence>>
where
    F: Fn(Vec<f64>) -> ProcessResult<EventSequence>,
{
    if raw.is_empty() {
        return Err(ProcessError::EmptyProcessSet);
    }
    raw.into_iter()
        .enumerate()
        .map(|(dim, times)| build(times).map_err(|err| err.in_dimension(dim)))
        .collect()
}

fn max_timestamp(sequences: &[EventSequence]) -> f64 {
    sequences.iter().filter_map(EventSequence::last).fold(0.0, f64::max)
}
