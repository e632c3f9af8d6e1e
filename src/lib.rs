//! hawkes_cumulants — integrated cumulant estimation for multivariate point
//! processes, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the cumulant estimators to Python via the `_hawkes_cumulants` extension
//! module. Given `d` sequences of event timestamps on `[0, T]`, the crate
//! estimates the mean rates `L`, the integrated covariance `C` and the
//! integrated skewness (full tensor `K` or partial matrix `K_part`) used to fit
//! the kernel-integral matrix `R` of a Hawkes process.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules: `process` (validated inputs), `statistics`
//!   (sliding-window estimators), `cumulants` (staged assembly, theoretical
//!   cumulants, multi-realization estimation), `preprocessing` (optimizer
//!   starting point) and `simulation` (synthetic Poisson/Hawkes data).
//! - Define the `#[pyclass]` wrapper and the `#[pymodule]` initializer for the
//!   `_hawkes_cumulants` extension when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion and error mapping.
//! - Converted inputs satisfy the invariants documented on
//!   [`process::ProcessSet`] before any estimator runs.
//!
//! Conventions
//! -----------
//! - Notation follows [`cumulants`]: `H` window half-width, `B` past-only
//!   windowed covariance, `E`/`E_c` triple statistics, `J` lag-weighted
//!   correlation.
//! - Errors are per-module enums (`ProcessError`, `StatisticError`,
//!   `CumulantError`, `SimulationError`) mapped to `ValueError` at the Python
//!   boundary.
//! - The library emits `tracing` events and never installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! - Rust callers typically build a [`process::ProcessSet`] and call
//!   [`cumulants::estimate`] / [`cumulants::estimate_realizations`], or drive a
//!   [`cumulants::CumulantAssembler`] stage by stage.
//! - The Python packaging layer imports `_hawkes_cumulants` and wraps the
//!   `Cumulants` class in user-facing helpers.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each module; `tests/` exercises the pipeline end
//!   to end on synthetic Poisson and Hawkes realizations.

pub mod cumulants;
pub mod preprocessing;
pub mod process;
pub mod simulation;
pub mod statistics;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2, PyArray3};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    cumulants::{CumulantAssembler, CumulantOptions, CumulantVariant, WindowSelection},
    process::ProcessSet,
    utils::{extract_f64_matrix, extract_options, extract_timestamps, extract_window},
};

/// Cumulants — Python-facing wrapper around [`CumulantAssembler`].
///
/// Purpose
/// -------
/// Let Python callers compute the integrated cumulants of one realization
/// and, optionally, their closed forms for a known `R`.
///
/// Key behaviors
/// -------------
/// - Construction converts the timestamp arrays into a [`ProcessSet`]
///   (sorting them), builds [`CumulantOptions`] from the keyword arguments
///   and runs the heuristic window search when `selection="heuristic"`.
/// - `compute()` runs the configured full or partial pipeline.
/// - `set_reference(R)` followed by `compute_theoretical()` fills `C_th` and
///   `K_th` or `K_part_th`.
/// - Getters copy the stage arrays into fresh numpy arrays.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Cumulants(timestamps, half_width=100.0, method=None, variant=None,
/// selection=None, grid_size=None, horizon=None)`:
/// - `timestamps`: iterable of 1-D float arrays, one per dimension.
/// - `half_width`: `float | ndarray` scalar or per-pair window.
/// - `method`: `"direct"` or `"accelerated"` (default).
/// - `variant`: `"full"` or `"partial"` (default).
/// - `selection`: `"fixed"` (default) or `"heuristic"`.
/// - `grid_size`: heuristic grid size, default 1000.
/// - `horizon`: observation length `T`; defaults to the last timestamp.
///
/// Notes
/// -----
/// - Reading a stage that was never computed raises `ValueError` with the
///   missing stage name.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "hawkes_cumulants.cumulants")]
pub struct Cumulants {
    inner: CumulantAssembler,
    options: CumulantOptions,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Cumulants {
    #[new]
    #[pyo3(
        signature = (
            timestamps,
            half_width = None,
            method = None,
            variant = None,
            selection = None,
            grid_size = None,
            horizon = None,
        ),
        text_signature = "(timestamps, /, half_width=100.0, method=None, variant=None, \
                          selection=None, grid_size=None, horizon=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, timestamps: &Bound<'py, PyAny>, half_width: Option<&Bound<'py, PyAny>>,
        method: Option<&str>, variant: Option<&str>, selection: Option<&str>,
        grid_size: Option<usize>, horizon: Option<f64>,
    ) -> PyResult<Self> {
        let raw = extract_timestamps(py, timestamps)?;
        let processes = match horizon {
            Some(t) => {
                let mut sorted = raw;
                for seq in sorted.iter_mut() {
                    seq.sort_by(f64::total_cmp);
                }
                ProcessSet::with_horizon(sorted, t)?
            }
            None => ProcessSet::from_unsorted(raw)?,
        };
        let scalar_width = match half_width {
            Some(obj) => obj.extract::<f64>().ok(),
            None => None,
        };
        let options = extract_options(scalar_width, method, variant, selection, grid_size)?;
        let mut inner = CumulantAssembler::from_options(processes, &options)?;
        if let Some(obj) = half_width {
            if scalar_width.is_none() {
                let window = extract_window(obj, inner.dim())?;
                inner.set_window(window)?;
            }
        }
        if let WindowSelection::HeuristicSearch { grid_size } = options.selection {
            inner.select_window(grid_size)?;
        }
        Ok(Cumulants { inner, options })
    }

    /// Run the configured pipeline (`K_part` for `"partial"`, `K` for `"full"`).
    pub fn compute(&mut self) -> PyResult<()> {
        self.inner.run(self.options.variant, self.options.covariance, self.options.formula)?;
        Ok(())
    }

    /// Store the reference kernel-integral matrix `R` (`d×d`, or flat `d²`).
    pub fn set_reference(&mut self, r: &Bound<'_, PyAny>) -> PyResult<()> {
        if let Ok(flat) = r.extract::<Vec<f64>>() {
            self.inner.set_reference_flat(&flat)?;
            return Ok(());
        }
        let m = extract_f64_matrix(r)?;
        self.inner.set_reference(m)?;
        Ok(())
    }

    /// Closed-form `C_th` and the skewness matching the configured variant.
    pub fn compute_theoretical(&mut self) -> PyResult<()> {
        self.inner.compute_c_th()?;
        match self.options.variant {
            CumulantVariant::Full => self.inner.compute_k_th()?,
            CumulantVariant::Partial => self.inner.compute_k_part_th()?,
        }
        Ok(())
    }

    #[getter]
    pub fn dim(&self) -> usize {
        self.inner.dim()
    }

    #[getter]
    pub fn horizon(&self) -> f64 {
        self.inner.processes().horizon()
    }

    #[getter(L)]
    pub fn rates(&self) -> Vec<f64> {
        self.inner.rates().to_vec()
    }

    /// Effective window as a `d×d` matrix of half-widths.
    #[getter]
    pub fn window<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.window().to_matrix(self.inner.dim()).into_pyarray(py)
    }

    #[getter(C)]
    pub fn covariance<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.c()?.clone().into_pyarray(py))
    }

    #[getter(K)]
    pub fn skewness<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray3<f64>>> {
        Ok(self.inner.k()?.clone().into_pyarray(py))
    }

    #[getter(K_part)]
    pub fn partial_skewness<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.k_part()?.clone().into_pyarray(py))
    }

    #[getter(C_th)]
    pub fn theoretical_covariance<'py>(
        &self, py: Python<'py>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.c_th()?.clone().into_pyarray(py))
    }

    #[getter(K_th)]
    pub fn theoretical_skewness<'py>(
        &self, py: Python<'py>,
    ) -> PyResult<Bound<'py, PyArray3<f64>>> {
        Ok(self.inner.k_th()?.clone().into_pyarray(py))
    }

    #[getter(K_part_th)]
    pub fn theoretical_partial_skewness<'py>(
        &self, py: Python<'py>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.k_part_th()?.clone().into_pyarray(py))
    }

    pub fn __repr__(&self) -> String {
        format!(
            "Cumulants(dim={}, T={}, {})",
            self.inner.dim(),
            self.inner.processes().horizon(),
            self.inner.window()
        )
    }
}

/// _hawkes_cumulants — PyO3 module initializer for the Python extension.
///
/// Creates the `cumulants` submodule, attaches it to the parent module and
/// registers it in `sys.modules` so `hawkes_cumulants.cumulants` imports
/// work with dot notation.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _hawkes_cumulants<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let cumulants_mod = PyModule::new(_py, "cumulants")?;
    cumulants_module(_py, m, &cumulants_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("hawkes_cumulants.cumulants", cumulants_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn cumulants_module<'py>(
    _py: Python, hawkes_cumulants: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Cumulants>()?;
    hawkes_cumulants.add_submodule(m)?;
    Ok(())
}
