//! axes::errors — error type for axis descriptors and the axes manager.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`AxesError`], and result alias,
//! [`AxesResult`], for everything that can go wrong while building or
//! querying the logical coordinate system: calibration values, storage
//! position permutations, size/extent agreement with a buffer, and
//! navigation cursor bounds.
//!
//! Conventions
//! -----------
//! - Axis arguments reported in errors are **presentation indices** (position
//!   in [`AxesManager::axes`](crate::axes::AxesManager::axes)) unless the
//!   field is named `position`, which always means a storage position.
//! - Messages are phrased in terms of the violated invariant, so they read
//!   well when surfaced unchanged through `SignalError` or a Python
//!   `ValueError`.
use thiserror::Error;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for axis bookkeeping operations.
pub type AxesResult<T> = Result<T, AxesError>;

/// Failures raised by [`AxisDescriptor`](crate::axes::AxisDescriptor) and
/// [`AxesManager`](crate::axes::AxesManager).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxesError {
    // ---- Calibration ----
    /// `scale` is zero, NaN or ±∞.
    #[error("Axes Error: axis {axis} has invalid scale {value}; scale must be finite and non-zero")]
    InvalidScale { axis: usize, value: f64 },

    /// `offset` is NaN or ±∞.
    #[error("Axes Error: axis {axis} has invalid offset {value}; offset must be finite")]
    InvalidOffset { axis: usize, value: f64 },

    /// Axes cannot have zero length.
    #[error("Axes Error: axis {axis} has size 0; every axis must have size >= 1")]
    ZeroSize { axis: usize },

    // ---- Storage layout ----
    /// Storage positions are not exactly `{0, ..., ndim - 1}`.
    #[error(
        "Axes Error: storage positions {positions:?} are not a permutation of 0..{ndim}"
    )]
    InvalidStoragePositions { positions: Vec<usize>, ndim: usize },

    /// Number of axes differs from the buffer dimensionality.
    #[error("Axes Error: expected {expected} axes for the buffer, got {actual}")]
    AxisCountMismatch { expected: usize, actual: usize },

    /// Axis size disagrees with the buffer extent at its storage position.
    #[error(
        "Axes Error: axis {axis} has size {size} but the buffer extent at storage position {position} is {extent}"
    )]
    SizeMismatch { axis: usize, position: usize, size: usize, extent: usize },

    /// Presentation index outside `-naxes..naxes`.
    #[error("Axes Error: axis {axis} is out of range for {naxes} axes")]
    AxisOutOfRange { axis: isize, naxes: usize },

    /// No axis currently sits at the requested storage position.
    #[error("Axes Error: no axis at storage position {position}")]
    StoragePositionNotFound { position: usize },

    // ---- Navigation / partition ----
    /// Navigation coordinate vector length differs from the navigation
    /// dimension.
    #[error("Axes Error: expected {expected} navigation coordinates, got {actual}")]
    NavigationCoordinateCount { expected: usize, actual: usize },

    /// Navigation coordinate beyond the axis extent.
    #[error("Axes Error: navigation index {index} is out of range for axis {axis} of size {size}")]
    NavigationIndexOutOfRange { axis: usize, index: usize, size: usize },

    /// Requested more signal axes than exist.
    #[error("Axes Error: cannot flag {requested} signal axes among {naxes} axes")]
    InvalidSignalDimension { requested: usize, naxes: usize },
}

#[cfg(feature = "python-bindings")]
impl From<AxesError> for PyErr {
    fn from(err: AxesError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
