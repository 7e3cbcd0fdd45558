//! utils — conversion helpers for the PyO3 boundary.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python arguments into the crate's Rust types.

#[cfg(feature = "python-bindings")]
use ndarray::ArrayD;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArrayDyn;

#[cfg(feature = "python-bindings")]
use crate::signal::options::RebinPolicy;

/// Copy an N-D float64 array-like into an owned `ArrayD`.
///
/// Accepts a `numpy.ndarray`, anything with a `to_numpy()` method, or a
/// (nested) sequence convertible by `numpy.asarray`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array_dyn<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<ArrayD<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method0("to_numpy") {
        if let Ok(arr_ro) = obj.extract::<PyReadonlyArrayDyn<f64>>() {
            return Ok(arr_ro.as_array().to_owned());
        }
    }

    let converted = py
        .import("numpy")?
        .call_method1("asarray", (raw_data, "float64"))
        .map_err(|_| {
            pyo3::exceptions::PyTypeError::new_err(
                "expected a numpy.ndarray or a nested sequence of float64",
            )
        })?;
    let arr_ro = converted.extract::<PyReadonlyArrayDyn<f64>>()?;
    Ok(arr_ro.as_array().to_owned())
}

#[cfg(feature = "python-bindings")]
pub fn extract_rebin_policy(policy: Option<&str>) -> PyResult<RebinPolicy> {
    match policy.unwrap_or("strict").to_lowercase().as_str() {
        "strict" => Ok(RebinPolicy::Strict),
        "truncate" => Ok(RebinPolicy::Truncate),
        other => Err(PyValueError::new_err(format!(
            "invalid rebin policy {:?} (expected 'strict' or 'truncate')",
            other
        ))),
    }
}

#[cfg(feature = "python-bindings")]
pub fn array_to_py<'py>(
    py: Python<'py>, data: ArrayD<f64>,
) -> Bound<'py, numpy::PyArrayDyn<f64>> {
    use numpy::IntoPyArray;
    data.into_pyarray(py)
}
