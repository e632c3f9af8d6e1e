//! Event sequences — validated, ascending timestamps for one dimension.
//!
//! Purpose
//! -------
//! Provide the smallest building block of the crate: a single component of a
//! multivariate point process, stored as an ascending run of event times.
//! Every window statistic in [`crate::statistics`] walks these slices with
//! monotone cursors, so sortedness is checked once here and then assumed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps are finite and `>= 0`.
//! - Timestamps are sorted ascending; ties are tolerated.
//! - An empty sequence is a valid (silent) component.
use crate::process::errors::{ProcessError, ProcessResult};

/// `EventSequence` — ascending event times of one point-process component.
///
/// Fields
/// ------
/// - `times`: `Vec<f64>`
///   Event timestamps, finite, non-negative and sorted ascending.
///
/// Notes
/// -----
/// - The type is immutable after construction; statistics borrow the
///   timestamps through [`EventSequence::as_slice`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventSequence {
    times: Vec<f64>,
}

impl EventSequence {
    /// Validate an already-sorted timestamp vector.
    ///
    /// Errors
    /// ------
    /// - `ProcessError::NonFiniteTimestamp` for NaN / ±inf entries.
    /// - `ProcessError::NegativeTimestamp` for entries `< 0`.
    /// - `ProcessError::UnsortedTimestamps` when an entry is smaller than its
    ///   predecessor.
    ///
    /// All variants report `dim = 0`; see [`ProcessError::in_dimension`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use hawkes_cumulants::process::EventSequence;
    /// let seq = EventSequence::new(vec![0.5, 1.0, 1.0, 4.2]).unwrap();
    /// assert_eq!(seq.len(), 4);
    /// assert!(EventSequence::new(vec![2.0, 1.0]).is_err());
    /// ```
    pub fn new(times: Vec<f64>) -> ProcessResult<Self> {
        validate_values(&times)?;
        for index in 1..times.len() {
            if times[index] < times[index - 1] {
                return Err(ProcessError::UnsortedTimestamps {
                    dim: 0,
                    index,
                    previous: times[index - 1],
                    value: times[index],
                });
            }
        }
        Ok(EventSequence { times })
    }

    /// Validate and sort an arbitrary timestamp vector.
    ///
    /// Finiteness and sign are checked before sorting so that the reported
    /// index refers to the caller's original ordering.
    pub fn from_unsorted(mut times: Vec<f64>) -> ProcessResult<Self> {
        validate_values(&times)?;
        times.sort_by(f64::total_cmp);
        Ok(EventSequence { times })
    }

    /// Empty sequence (a component that never fired).
    pub fn empty() -> Self {
        EventSequence { times: Vec::new() }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Last (largest) timestamp, if any.
    pub fn last(&self) -> Option<f64> {
        self.times.last().copied()
    }
}

fn validate_values(times: &[f64]) -> ProcessResult<()> {
    for (index, &value) in times.iter().enumerate() {
        if !value.is_finite() {
            return Err(ProcessError::NonFiniteTimestamp { dim: 0, index, value });
        }
        if value < 0.0 {
            return Err(ProcessError::NegativeTimestamp { dim: 0, index, value });
        }
    }
    Ok(())
}
