//! Shared window types and the boundary-correction rule.
//!
//! Purpose
//! -------
//! Define the lag window `[a, b]` scanned around each reference point, the
//! [`WindowEstimate`] returned by every statistic, and the count-ratio
//! rescaling applied when reference points are dropped near the horizon.
//!
//! Conventions
//! -----------
//! - A reference point `τ` looks at events in `(τ + a, τ + b)`; the left edge
//!   is exclusive (`≤ τ + a` is skipped) and the right edge is exclusive
//!   (`< τ + b` is counted).
//! - Reference points whose window leaves the observed range are excluded
//!   from the sum; the accumulated value is then scaled by
//!   `total / admissible` whenever `0 < admissible < total`. With no
//!   admissible point the raw (zero) accumulation is kept.
use crate::statistics::errors::{StatisticError, StatisticResult};

/// Lag window `[lower, upper]` relative to a reference timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    lower: f64,
    upper: f64,
}

impl Window {
    /// Validate an arbitrary window.
    ///
    /// Errors
    /// ------
    /// - `StatisticError::InvalidWindow` when a bound is non-finite or
    ///   `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> StatisticResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(StatisticError::InvalidWindow { lower, upper });
        }
        Ok(Window { lower, upper })
    }

    /// Past-only window `[-h, 0]` used by the `B`, `E` and `E_c` stages.
    pub fn lagged(half_width: f64) -> StatisticResult<Self> {
        validate_half_width(half_width)?;
        Ok(Window { lower: -half_width, upper: 0.0 })
    }

    /// Symmetric window `[-h, h]` used by the direct covariance stage.
    pub fn centered(half_width: f64) -> StatisticResult<Self> {
        validate_half_width(half_width)?;
        Ok(Window { lower: -half_width, upper: half_width })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Window length `b - a`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Check that a half-width is finite and strictly positive.
pub fn validate_half_width(half_width: f64) -> StatisticResult<f64> {
    if !half_width.is_finite() || half_width <= 0.0 {
        return Err(StatisticError::InvalidHalfWidth { half_width });
    }
    Ok(half_width)
}

/// Value of one window statistic together with its boundary bookkeeping.
///
/// Fields
/// ------
/// - `value`: the corrected, centered estimate.
/// - `admissible`: number of reference points actually used (accumulated
///   lag terms for `I_ij`).
/// - `references`: number of candidate reference points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowEstimate {
    pub value: f64,
    pub admissible: usize,
    pub references: usize,
}

impl WindowEstimate {
    /// Estimate for a degenerate input (`T == 0`): everything is zero.
    pub(crate) fn degenerate(references: usize) -> Self {
        WindowEstimate { value: 0.0, admissible: 0, references }
    }

    /// `true` when no reference point was admissible.
    pub fn is_starved(&self) -> bool {
        self.admissible == 0
    }

    /// `true` when the count-ratio correction was applied.
    pub fn is_rescaled(&self) -> bool {
        self.admissible > 0 && self.admissible < self.references
    }

    /// Fraction of reference points used (1.0 for an empty reference set).
    pub fn admissible_fraction(&self) -> f64 {
        if self.references == 0 { 1.0 } else { self.admissible as f64 / self.references as f64 }
    }
}

/// Apply the count-ratio boundary correction to a raw accumulation.
#[inline]
pub(crate) fn boundary_rescale(acc: f64, references: usize, admissible: usize) -> f64 {
    if admissible > 0 && admissible < references {
        acc * (references as f64 / admissible as f64)
    } else {
        acc
    }
}

/// Advance `cursor` past every entry `<= edge`.
#[inline]
pub(crate) fn advance_past(times: &[f64], mut cursor: usize, edge: f64) -> usize {
    while cursor < times.len() && times[cursor] <= edge {
        cursor += 1;
    }
    cursor
}

/// Advance `cursor` past every entry `< edge`.
#[inline]
pub(crate) fn advance_below(times: &[f64], mut cursor: usize, edge: f64) -> usize {
    while cursor < times.len() && times[cursor] < edge {
        cursor += 1;
    }
    cursor
}
