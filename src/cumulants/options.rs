//! cumulants::options — configuration for cumulant estimation.
//!
//! Purpose
//! -------
//! Collect the knobs of one estimation run in a validated [`CumulantOptions`]
//! value and provide the closed enums the assembler dispatches on:
//!
//! - [`ComputationMethod`]: sequential nested loops or the fan-out pool,
//! - [`CumulantVariant`]: full skewness tensor `K` or partial matrix `K_part`,
//! - [`WindowSelection`]: fixed half-width or per-pair heuristic search,
//! - [`CovarianceSource`]: direct centered window or `2B + diag(L)`,
//! - [`SkewnessFormula`]: staged `B/E/J/C` assembly or the one-shot windowed
//!   estimator.
//!
//! Conventions
//! -----------
//! - String parsing (`FromStr`, case-insensitive) exists only at the
//!   configuration boundary; internally everything is matched on enums.
//! - `CumulantOptions::default()` is half-width 100, accelerated, partial,
//!   fixed window.
use crate::{
    cumulants::{
        dispatch::ExecutionStrategy,
        errors::{CumulantError, CumulantResult},
    },
    statistics::validate_half_width,
};
use std::str::FromStr;

/// Default heuristic grid size (points of `logspace(-3, 3, N)`).
pub const DEFAULT_GRID_SIZE: usize = 1000;

/// How the per-pair/per-triple units are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComputationMethod {
    /// Direct nested loops on the calling thread.
    Direct,
    /// Independent units fanned out to the work-stealing pool.
    #[default]
    Accelerated,
}

impl ComputationMethod {
    pub fn strategy(self) -> ExecutionStrategy {
        match self {
            ComputationMethod::Direct => ExecutionStrategy::Sequential,
            ComputationMethod::Accelerated => ExecutionStrategy::FanOut,
        }
    }
}

impl FromStr for ComputationMethod {
    type Err = CumulantError;

    /// Accepts `"direct"` / `"classic"` and `"accelerated"` / `"parallel"`,
    /// case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "classic" => Ok(ComputationMethod::Direct),
            "accelerated" | "parallel" => Ok(ComputationMethod::Accelerated),
            _ => Err(CumulantError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Direct' or 'Accelerated'.",
            }),
        }
    }
}

/// Which skewness object the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CumulantVariant {
    Full,
    #[default]
    Partial,
}

impl FromStr for CumulantVariant {
    type Err = CumulantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(CumulantVariant::Full),
            "partial" => Ok(CumulantVariant::Partial),
            _ => Err(CumulantError::InvalidVariant {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Full' or 'Partial'.",
            }),
        }
    }
}

/// How the integration half-width is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowSelection {
    /// Use `window_half_width` for every pair.
    #[default]
    Fixed,
    /// Per pair, minimize `I_ij(h) / h` over `grid_size` log-spaced points.
    HeuristicSearch { grid_size: usize },
}

impl FromStr for WindowSelection {
    type Err = CumulantError;

    /// Accepts `"fixed"` and `"heuristic"` (grid of [`DEFAULT_GRID_SIZE`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(WindowSelection::Fixed),
            "heuristic" | "heuristicsearch" => {
                Ok(WindowSelection::HeuristicSearch { grid_size: DEFAULT_GRID_SIZE })
            }
            _ => Err(CumulantError::InvalidSelection {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Fixed' or 'Heuristic'.",
            }),
        }
    }
}

/// Source of the covariance matrix in the C stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceSource {
    /// Centered window `[-H, H]` evaluated directly.
    #[default]
    Direct,
    /// `C = 2B + diag(L)`; requires the B stage.
    FromB,
}

/// Formula used by the K and K_part stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkewnessFormula {
    /// Assembly from the B, E (or E_c), J and C stages.
    #[default]
    Staged,
    /// One-shot estimator on `[-H, H]` with `A` on `[-2H, 2H]` and `I(2H)`.
    Windowed,
}

/// Validated configuration of one estimation run.
///
/// Fields
/// ------
/// - `window_half_width`: strictly positive, finite half-width `H`.
/// - `method`: execution strategy of the per-pair units.
/// - `variant`: full tensor or partial matrix.
/// - `selection`: fixed window or heuristic search.
/// - `covariance`: source of `C`.
/// - `formula`: skewness formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulantOptions {
    pub window_half_width: f64,
    pub method: ComputationMethod,
    pub variant: CumulantVariant,
    pub selection: WindowSelection,
    pub covariance: CovarianceSource,
    pub formula: SkewnessFormula,
}

impl CumulantOptions {
    /// Build options, validating the half-width and the grid size.
    ///
    /// Errors
    /// ------
    /// - `CumulantError::Statistic` for a non-positive or non-finite
    ///   half-width.
    /// - `CumulantError::InvalidGridSize` for a heuristic grid of size 0.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use hawkes_cumulants::cumulants::{CumulantOptions, ComputationMethod, CumulantVariant, WindowSelection};
    /// let opts = CumulantOptions::new(
    ///     50.0, ComputationMethod::Direct, CumulantVariant::Full, WindowSelection::Fixed,
    /// ).unwrap();
    /// assert_eq!(opts.window_half_width, 50.0);
    /// ```
    pub fn new(
        window_half_width: f64, method: ComputationMethod, variant: CumulantVariant,
        selection: WindowSelection,
    ) -> CumulantResult<Self> {
        validate_half_width(window_half_width)?;
        if let WindowSelection::HeuristicSearch { grid_size } = selection {
            validate_grid_size(grid_size)?;
        }
        Ok(CumulantOptions {
            window_half_width,
            method,
            variant,
            selection,
            covariance: CovarianceSource::default(),
            formula: SkewnessFormula::default(),
        })
    }

    pub fn with_covariance(mut self, covariance: CovarianceSource) -> Self {
        self.covariance = covariance;
        self
    }

    pub fn with_formula(mut self, formula: SkewnessFormula) -> Self {
        self.formula = formula;
        self
    }

    /// Parse the string-keyed configuration used at the Python boundary.
    pub fn from_names(
        window_half_width: f64, method: &str, variant: &str, selection: &str,
    ) -> CumulantResult<Self> {
        CumulantOptions::new(window_half_width, method.parse()?, variant.parse()?, selection.parse()?)
    }
}

impl Default for CumulantOptions {
    fn default() -> Self {
        CumulantOptions {
            window_half_width: 100.0,
            method: ComputationMethod::default(),
            variant: CumulantVariant::default(),
            selection: WindowSelection::default(),
            covariance: CovarianceSource::default(),
            formula: SkewnessFormula::default(),
        }
    }
}

pub(crate) fn validate_grid_size(grid_size: usize) -> CumulantResult<usize> {
    if grid_size == 0 {
        return Err(CumulantError::InvalidGridSize { grid_size });
    }
    Ok(grid_size)
}
