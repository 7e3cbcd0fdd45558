//! signal::errors — error types for signals, transformations and viewers.
//!
//! Purpose
//! -------
//! Provide [`SignalError`] / [`SignalResult`] for every operation on a
//! [`Signal`](crate::signal::Signal) and its shape-transform engine, plus
//! the small [`ViewerError`] / [`ViewerResult`] pair used by attached
//! viewer collaborators.
//!
//! Key behaviors
//! -------------
//! - Wrap [`AxesError`] transparently so axis bookkeeping failures surface
//!   unchanged through signal operations.
//! - Store `ndarray::ShapeError` and `serde_json::Error` as rendered
//!   messages so the enum stays `Clone + PartialEq` for tests.
//! - With the `python-bindings` feature, map every variant to a Python
//!   `ValueError` carrying the `Display` text.
//!
//! Conventions
//! -----------
//! - `axis` payloads are presentation indices; `dim` payloads are storage
//!   positions (buffer dimensions).
//! - Every variant describes an "abort" failure: the operation returned
//!   before mutating anything.
use crate::axes::errors::AxesError;
use thiserror::Error;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Result alias for viewer callbacks.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Failure reported by an attached viewer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Viewer Error: {message}")]
pub struct ViewerError {
    pub message: String,
}

impl ViewerError {
    pub fn new(message: impl Into<String>) -> ViewerError {
        ViewerError { message: message.into() }
    }
}

/// Failures raised by [`Signal`](crate::signal::Signal) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    // ---- Wrapped ----
    #[error(transparent)]
    Axes(#[from] AxesError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    /// Buffer reshape/broadcast failure from ndarray.
    #[error("Signal Error: shape error: {0}")]
    Shape(String),

    /// Dictionary (de)serialization failure.
    #[error("Signal Error: serialization error: {0}")]
    Serialization(String),

    // ---- Construction ----
    /// Buffer dimensionality disagrees with what the operation expects.
    #[error("Signal Error: expected a {expected}-dimensional buffer, got {actual}")]
    DataDimensionMismatch { expected: usize, actual: usize },

    /// Operation needs at least one dimension.
    #[error("Signal Error: {operation} requires a buffer with at least one dimension")]
    ZeroDimensional { operation: &'static str },

    // ---- Crop ----
    #[error("Signal Error: crop start {start} is out of range for axis {axis} of size {size}")]
    CropOutOfRange { axis: usize, start: usize, size: usize },

    #[error("Signal Error: crop [{start}, {end}) on axis {axis} would leave no elements")]
    EmptyCrop { axis: usize, start: usize, end: usize },

    // ---- Rebin ----
    #[error("Signal Error: rebin shape has {actual} dimensions, buffer has {expected}")]
    RebinDimensionMismatch { expected: usize, actual: usize },

    #[error("Signal Error: rebin target for dimension {dim} is 0")]
    RebinZeroTarget { dim: usize },

    #[error("Signal Error: cannot rebin dimension {dim} from {size} up to {new_size}")]
    RebinTooLarge { dim: usize, size: usize, new_size: usize },

    #[error(
        "Signal Error: rebin target {new_size} does not divide size {size} of dimension {dim}"
    )]
    RebinNotDivisor { dim: usize, size: usize, new_size: usize },

    // ---- Split ----
    #[error(
        "Signal Error: split needs a number of parts, a steps list, or remembered splitting steps"
    )]
    SplitUnspecified,

    #[error("Signal Error: cannot split an axis of size {size} into {parts} parts")]
    InvalidPartCount { parts: usize, size: usize },

    #[error(
        "Signal Error: split steps {steps:?} must be non-empty, non-zero and sum to at most {size}"
    )]
    InvalidSplitSteps { steps: Vec<usize>, size: usize },

    // ---- Unfold ----
    #[error("Signal Error: unfold target dimension {dim} is out of range for {ndim} dimensions")]
    InvalidUnfoldTarget { dim: usize, ndim: usize },

    #[error("Signal Error: unfold target dimension {dim} is also listed as steady")]
    TargetIsSteady { dim: usize },

    #[error(
        "Signal Error: merged dimensions {positions:?} are not contiguous in storage order"
    )]
    NonContiguousMerge { positions: Vec<usize> },

    // ---- Viewing ----
    #[error(
        "Signal Error: plotting is not supported for signal dimension {signal_dimension}"
    )]
    UnsupportedPlotDimension { signal_dimension: usize },

    // ---- Misc ----
    #[error("Signal Error: roll requires at least {required} dimensions, got {actual}")]
    RollDimension { required: usize, actual: usize },

    #[error("Signal Error: navigation mask has {actual} elements, navigation space has {expected}")]
    MaskSizeMismatch { expected: usize, actual: usize },
}

impl From<ndarray::ShapeError> for SignalError {
    fn from(err: ndarray::ShapeError) -> SignalError {
        SignalError::Shape(err.to_string())
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> SignalError {
        SignalError::Serialization(err.to_string())
    }
}

#[cfg(feature = "python-bindings")]
impl From<SignalError> for PyErr {
    fn from(err: SignalError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Transparent wrapping of `AxesError` and `ViewerError`.
    // - Conversion of ndarray shape errors into `SignalError::Shape`.
    // - Payload embedding in a representative message.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Wrapped axes errors keep their own message.
    //
    // Given
    // -----
    // - `AxesError::ZeroSize { axis: 2 }` converted with `?`-style `From`.
    //
    // Expect
    // ------
    // - Identical `Display` text.
    fn axes_error_is_transparent() {
        let inner = AxesError::ZeroSize { axis: 2 };

        let err: SignalError = inner.clone().into();

        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err, SignalError::Axes(inner));
    }

    #[test]
    // Purpose
    // -------
    // ndarray shape errors are captured as text.
    //
    // Given
    // -----
    // - A reshape of 6 elements into (4,).
    //
    // Expect
    // ------
    // - `SignalError::Shape` with a non-empty message.
    fn shape_error_converts_to_message() {
        let data = ndarray::Array1::<f64>::zeros(6);
        let shape_err = data.into_shape_with_order(4).unwrap_err();

        let err = SignalError::from(shape_err);

        assert!(matches!(err, SignalError::Shape(ref msg) if !msg.is_empty()));
    }

    #[test]
    // Purpose
    // -------
    // Rebin divisor failures name dimension, size and target.
    //
    // Given
    // -----
    // - `RebinNotDivisor { dim: 1, size: 10, new_size: 3 }`.
    //
    // Expect
    // ------
    // - All three numbers appear in the message.
    fn rebin_not_divisor_message_embeds_payload() {
        let msg = SignalError::RebinNotDivisor { dim: 1, size: 10, new_size: 3 }.to_string();

        assert!(msg.contains("target 3"));
        assert!(msg.contains("size 10"));
        assert!(msg.contains("dimension 1"));
    }
}
