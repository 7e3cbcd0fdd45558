//! decomposition::errors — failures while exporting factors and scores.
//!
//! Purpose
//! -------
//! Provide [`DecompositionError`] / [`DecompositionResult`] for the export
//! helpers that turn decomposition matrices back into calibrated signals.
//!
//! Conventions
//! -----------
//! - Signal and axes failures raised while building the exported signals
//!   are wrapped transparently.
//! - `what` payloads name the matrix involved (`"factors"` or `"scores"`).
use crate::{axes::errors::AxesError, signal::errors::SignalError};
use thiserror::Error;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type DecompositionResult<T> = Result<T, DecompositionError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecompositionError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Axes(#[from] AxesError),

    // ---- Formats ----
    #[error("Decomposition Error: format '{extension}' is not supported for saving")]
    UnsupportedFormat { extension: String },

    // ---- Matrices ----
    /// The matrix does not have one entry per element of the space it maps.
    #[error("Decomposition Error: {what} cover {actual} elements, the space has {expected}")]
    MatrixSizeMismatch { what: &'static str, expected: usize, actual: usize },

    // ---- Selection ----
    #[error("Decomposition Error: component {component} is out of range for {n_components} components")]
    ComponentOutOfRange { component: usize, n_components: usize },

    #[error("Decomposition Error: no components selected")]
    EmptySelection,

    // ---- Layout ----
    #[error("Decomposition Error: cannot export {what} for signal dimension {signal_dimension}")]
    UnsupportedSignalDimension { what: &'static str, signal_dimension: usize },

    #[error(
        "Decomposition Error: cannot export {what} for navigation dimension {navigation_dimension}"
    )]
    UnsupportedNavigationDimension { what: &'static str, navigation_dimension: usize },
}

impl From<ndarray::ShapeError> for DecompositionError {
    fn from(err: ndarray::ShapeError) -> DecompositionError {
        DecompositionError::Signal(SignalError::from(err))
    }
}

#[cfg(feature = "python-bindings")]
impl From<DecompositionError> for PyErr {
    fn from(err: DecompositionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
