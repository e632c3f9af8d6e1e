//! utils — Python-side input conversion for the binding layer.
//!
//! Every helper here turns loosely typed Python objects (numpy arrays, pandas
//! Series, plain sequences) into the validated Rust inputs of the core
//! modules. Nothing in this file is compiled without `python-bindings`.
#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::cumulants::{
    ComputationMethod, CumulantOptions, CumulantVariant, WindowParameter, WindowSelection,
    options::DEFAULT_GRID_SIZE,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

/// Borrow a 1-D float64 array from numpy, pandas, or any float sequence.
///
/// Contiguous numpy input is borrowed without copying; anything else is
/// collected into a fresh array.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Collect one timestamp array per dimension from an iterable of arrays.
///
/// Errors
/// ------
/// - `TypeError` when `raw` is not iterable or an element is not a float
///   array.
#[cfg(feature = "python-bindings")]
pub fn extract_timestamps<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<Vec<Vec<f64>>> {
    let mut out = Vec::new();
    for item in raw.try_iter()? {
        let item = item?;
        let arr = extract_f64_array(py, &item)?;
        let slice = arr
            .as_slice()
            .map_err(|_| PyTypeError::new_err("timestamps must be contiguous float64 arrays"))?;
        out.push(slice.to_vec());
    }
    Ok(out)
}

/// Read a square float64 matrix (numpy 2-D array or nested sequence).
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }
    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 2-D numpy.ndarray or nested sequence of float64")
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("matrix rows must all have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|err| PyValueError::new_err(err.to_string()))
}

/// Window argument: a float gives a scalar half-width, a matrix a per-pair
/// one.
#[cfg(feature = "python-bindings")]
pub fn extract_window(raw: &Bound<'_, PyAny>, dim: usize) -> PyResult<WindowParameter> {
    if let Ok(h) = raw.extract::<f64>() {
        return Ok(WindowParameter::scalar(h)?);
    }
    let m = extract_f64_matrix(raw)?;
    Ok(WindowParameter::matrix(m, dim)?)
}

/// Build [`CumulantOptions`] from the keyword arguments of the Python
/// constructor.
///
/// `method`, `variant` and `selection` accept the same case-insensitive
/// names as their `FromStr` impls; `grid_size` only applies to the heuristic
/// selection and defaults to [`DEFAULT_GRID_SIZE`].
#[cfg(feature = "python-bindings")]
pub fn extract_options(
    half_width: Option<f64>, method: Option<&str>, variant: Option<&str>,
    selection: Option<&str>, grid_size: Option<usize>,
) -> PyResult<CumulantOptions> {
    use std::str::FromStr;

    let defaults = CumulantOptions::default();
    let method = method.map(ComputationMethod::from_str).transpose()?.unwrap_or(defaults.method);
    let variant =
        variant.map(CumulantVariant::from_str).transpose()?.unwrap_or(defaults.variant);
    let selection = match selection.map(WindowSelection::from_str).transpose()? {
        Some(WindowSelection::HeuristicSearch { .. }) => WindowSelection::HeuristicSearch {
            grid_size: grid_size.unwrap_or(DEFAULT_GRID_SIZE),
        },
        Some(other) => other,
        None => defaults.selection,
    };
    let options = CumulantOptions::new(
        half_width.unwrap_or(defaults.window_half_width),
        method,
        variant,
        selection,
    )?;
    Ok(options)
}
