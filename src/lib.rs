//! rust_signal — calibrated N-dimensional signals with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes signals to Python via the `_rust_signal` extension module. A
//! signal is an N-D `f64` buffer plus one calibrated axis per dimension;
//! the crate keeps both consistent through every shape transformation.
//!
//! Key behaviors
//! -------------
//! - [`axes`]: axis descriptors, the navigation/signal partition, frame
//!   slicing and storage-position renumbering.
//! - [`signal`]: the [`signal::Signal`] composition root, its dictionary
//!   form and the shape-transform engine (squeeze, crop, rebin, reduce,
//!   split, swap, unfold/fold, iterate, roll).
//! - [`decomposition`]: export of factor/score matrices as calibrated
//!   signals.
//! - With `python-bindings`, a `PySignal` class under
//!   `_rust_signal.signal`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical and bookkeeping work lives in the inner modules; the
//!   PyO3 items here only convert arguments and map errors.
//! - Errors from core Rust code are rich enums internally and become
//!   `ValueError`s at the Python boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code uses `rust_signal::signal::prelude::*` and can
//!   ignore everything behind the `python-bindings` feature.
//! - The library emits `tracing` events and never installs a subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds an end-to-end
//!   pipeline over a random (64, 64, 1024) cube.

pub mod axes;
pub mod decomposition;
pub mod signal;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::PyArrayDyn;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    signal::{
        dictionary::SignalDictionary,
        options::SignalOptions,
        parameters::MappedParameters,
        signal::{ReduceMode, Signal, SplitSpec},
    },
    utils::{array_to_py, extract_f64_array_dyn, extract_rebin_policy},
};

/// PySignal — Python-facing wrapper around [`Signal`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Signal(data, title=None, signal_dimension=1, rebin_policy="strict")`:
/// - `data`: N-D array-like of float64.
/// - `title`: optional title stored in the mapped parameters.
/// - `signal_dimension`: number of trailing dimensions treated as signal
///   axes.
/// - `rebin_policy`: `"strict"` or `"truncate"`.
///
/// Notes
/// -----
/// - Viewers are not exposed; plotting happens on the Python side using
///   `frame`, `explorer` and `axes`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "Signal", module = "rust_signal.signal", unsendable)]
pub struct PySignal {
    inner: Signal,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PySignal {
    #[new]
    #[pyo3(
        signature = (data, title = None, signal_dimension = None, rebin_policy = None),
        text_signature = "(data, /, title=None, signal_dimension=1, rebin_policy='strict')"
    )]
    pub fn new<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, title: Option<String>,
        signal_dimension: Option<usize>, rebin_policy: Option<&str>,
    ) -> PyResult<PySignal> {
        let data = extract_f64_array_dyn(py, data)?;
        let options = SignalOptions::new(
            extract_rebin_policy(rebin_policy)?,
            signal_dimension.unwrap_or(1),
            true,
        );
        let dictionary = SignalDictionary::new(data)
            .with_mapped_parameters(MappedParameters::with_title(title.unwrap_or_default()));
        let inner = Signal::from_dictionary_with_options(dictionary, options)?;
        Ok(PySignal { inner })
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<PySignal> {
        let inner = Signal::from_dictionary(SignalDictionary::from_json(json)?)?;
        Ok(PySignal { inner })
    }

    pub fn to_json(&self) -> PyResult<String> {
        Ok(self.inner.snapshot().to_json()?)
    }

    #[getter]
    pub fn shape(&self) -> Vec<usize> {
        self.inner.data().shape().to_vec()
    }

    #[getter]
    pub fn title(&self) -> String {
        self.inner.title().to_string()
    }

    #[getter]
    pub fn signal_dimension(&self) -> usize {
        self.inner.axes_manager().signal_dimension()
    }

    #[getter]
    pub fn navigation_dimension(&self) -> usize {
        self.inner.axes_manager().navigation_dimension()
    }

    /// `(name, units, scale, offset, size, storage_position, navigate)` per
    /// axis, presentation order.
    #[getter]
    pub fn axes(&self) -> Vec<(String, String, f64, f64, usize, usize, bool)> {
        self.inner
            .axes_manager()
            .axes()
            .iter()
            .map(|axis| {
                (
                    axis.name.clone(),
                    axis.units.clone(),
                    axis.scale,
                    axis.offset,
                    axis.size(),
                    axis.storage_position(),
                    axis.is_navigation(),
                )
            })
            .collect()
    }

    pub fn data<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        array_to_py(py, self.inner.data().clone())
    }

    #[pyo3(signature = (navigation = None))]
    pub fn frame<'py>(
        &self, py: Python<'py>, navigation: Option<Vec<usize>>,
    ) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        let frame = self.inner.extract(navigation.as_deref())?.to_owned();
        Ok(array_to_py(py, frame))
    }

    pub fn explorer<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArrayDyn<f64>>> {
        self.inner.explorer().map(|overview| array_to_py(py, overview))
    }

    pub fn squeeze(&mut self) -> PyResult<usize> {
        Ok(self.inner.squeeze()?)
    }

    #[pyo3(signature = (axis, start = None, end = None))]
    pub fn crop_in_pixels(
        &mut self, axis: isize, start: Option<usize>, end: Option<usize>,
    ) -> PyResult<()> {
        Ok(self.inner.crop_in_pixels(axis, start, end)?)
    }

    #[pyo3(signature = (axis, start = None, end = None))]
    pub fn crop_in_units(
        &mut self, axis: isize, start: Option<f64>, end: Option<f64>,
    ) -> PyResult<()> {
        Ok(self.inner.crop_in_units(axis, start, end)?)
    }

    pub fn rebin(&mut self, new_shape: Vec<usize>) -> PyResult<()> {
        Ok(self.inner.rebin(&new_shape)?)
    }

    #[pyo3(signature = (axis, return_signal = false))]
    pub fn sum(&mut self, axis: isize, return_signal: bool) -> PyResult<Option<PySignal>> {
        let reduced = self.inner.sum(axis, reduce_mode(return_signal))?;
        Ok(reduced.map(|inner| PySignal { inner }))
    }

    #[pyo3(signature = (axis, return_signal = false))]
    pub fn mean(&mut self, axis: isize, return_signal: bool) -> PyResult<Option<PySignal>> {
        let reduced = self.inner.mean(axis, reduce_mode(return_signal))?;
        Ok(reduced.map(|inner| PySignal { inner }))
    }

    #[pyo3(signature = (axis, number_of_parts = None, steps = None))]
    pub fn split_in(
        &self, axis: isize, number_of_parts: Option<usize>, steps: Option<Vec<usize>>,
    ) -> PyResult<Vec<PySignal>> {
        let parts = self.inner.split_in(axis, SplitSpec::from_options(number_of_parts, steps))?;
        Ok(parts.into_iter().map(|inner| PySignal { inner }).collect())
    }

    pub fn swap_axis(&mut self, a: isize, b: isize) -> PyResult<()> {
        Ok(self.inner.swap_axis(a, b)?)
    }

    pub fn unfold(&mut self) -> PyResult<bool> {
        Ok(self.inner.unfold()?)
    }

    pub fn unfold_if_multidim(&mut self) -> PyResult<bool> {
        Ok(self.inner.unfold_if_multidim()?)
    }

    pub fn fold(&mut self) -> PyResult<bool> {
        Ok(self.inner.fold()?)
    }

    pub fn roll_xy(&mut self, n_x: usize, n_y: isize) -> PyResult<()> {
        Ok(self.inner.roll_xy(n_x, n_y)?)
    }

    pub fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// `sum`/`mean` reduce in place unless Python asks for the result.
#[cfg(feature = "python-bindings")]
fn reduce_mode(return_signal: bool) -> ReduceMode {
    if return_signal { ReduceMode::NewSignal } else { ReduceMode::InPlace }
}

/// _rust_signal — PyO3 module initializer for the Python extension.
///
/// Creates the `signal` submodule, attaches it to `_rust_signal` and
/// registers it in `sys.modules` as `rust_signal.signal` so dotted imports
/// work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_signal<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let signal_mod = PyModule::new(_py, "signal")?;
    signal_mod.add_class::<PySignal>()?;
    m.add_submodule(&signal_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_signal.signal", signal_mod)?;
    Ok(())
}
