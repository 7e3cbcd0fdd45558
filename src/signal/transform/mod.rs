//! signal::transform — shape transformations over a `(buffer, axes)` pair.
//!
//! Purpose
//! -------
//! Implement every structural rewrite of a signal as a function over a
//! [`Geometry`]: the buffer and the [`AxesManager`] describing it. Each
//! operation rewrites both in lock-step and either returns a fresh
//! `Geometry` or mutates one in place after all checks passed.
//!
//! Key behaviors
//! -------------
//! - [`squeeze`]: drop size-1 dimensions.
//! - [`crop`]: contiguous sub-range along one axis.
//! - [`rebin`]: sum-binning to a smaller shape.
//! - [`reduce`]: collapse one axis by sum or mean.
//! - [`split`]: contiguous segments along one axis.
//! - [`swap_axes`]: exchange two storage dimensions.
//! - [`unfold`] / [`fold`]: merge a contiguous run of dimensions into one
//!   and restore it from an [`UnfoldSnapshot`].
//! - [`iterate_axis`]: 1-D frames along one dimension.
//! - [`roll_xy`]: acquisition fix-up along storage dims 0 and 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input geometries are consistent: `axes.shape() == data.shape()`.
//! - "Validate or fully apply": every check runs before the first
//!   mutation, so an `Err` leaves the input untouched.
//! - Axis sizes are re-read from the resulting buffer
//!   ([`AxesManager::refresh_sizes`]) instead of computed.
//!
//! Conventions
//! -----------
//! - `axis` parameters are normalized presentation indices; `dim` parameters
//!   are storage positions. `Signal` does the normalization.
//! - Results are standard-layout (C-contiguous) buffers except after
//!   [`swap_axes`], which only permutes strides; every later reshape goes
//!   through a row-major `to_shape` and copies when needed.
use ndarray::ArrayD;

use crate::{axes::manager::AxesManager, signal::errors::SignalResult};

pub mod crop;
pub mod iterate;
pub mod rebin;
pub mod reduce;
pub mod roll;
pub mod split;
pub mod squeeze;
pub mod swap;
pub mod unfold;

pub use self::crop::crop;
pub use self::iterate::{AxisFrames, iterate_axis};
pub use self::rebin::rebin;
pub use self::reduce::{Reduction, reduce};
pub use self::roll::{roll_axis, roll_xy};
pub use self::split::{cut_nodes_for_parts, cut_nodes_for_steps, split};
pub use self::squeeze::squeeze;
pub use self::swap::swap_axes;
pub use self::unfold::{UnfoldSnapshot, effective_dimension, fold, unfold};

/// A buffer together with the axes describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub data: ArrayD<f64>,
    pub axes: AxesManager,
}

impl Geometry {
    /// Pair `data` with `axes` after checking they agree.
    pub fn new(data: ArrayD<f64>, axes: AxesManager) -> SignalResult<Geometry> {
        axes.validate_shape(data.shape())?;
        Ok(Geometry { data, axes })
    }

    /// Pair `data` with undefined axes.
    pub fn from_data(data: ArrayD<f64>, default_signal_dimension: usize) -> SignalResult<Geometry> {
        let axes = AxesManager::from_shape(data.shape(), default_signal_dimension)?;
        Ok(Geometry { data, axes })
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Storage position of presentation axis `axis`.
    pub(crate) fn dim_of(&self, axis: usize) -> usize {
        self.axes.axes()[axis].storage_position()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use ndarray::{ArrayD, IxDyn};

    use crate::axes::{descriptor::AxisSpec, manager::AxesManager};

    use super::Geometry;

    /// Buffer whose element at `(i, j, k, ...)` encodes its own index as
    /// `i * 100 + j * 10 + k ...` (row-major counter).
    pub fn counter(shape: &[usize]) -> ArrayD<f64> {
        let len: usize = shape.iter().product();
        ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|v| v as f64).collect()).unwrap()
    }

    /// Geometry with named, calibrated axes `a0, a1, ...` (scale 0.5,
    /// offset 10 * position), one signal axis.
    pub fn calibrated(shape: &[usize]) -> Geometry {
        let specs: Vec<AxisSpec> = shape
            .iter()
            .enumerate()
            .map(|(p, &size)| {
                AxisSpec::new(format!("a{p}"), 0.5, 10.0 * p as f64, size, format!("u{p}"), p)
            })
            .collect();
        let axes = AxesManager::with_shape(&specs, shape, 1).unwrap();
        Geometry::new(counter(shape), axes).unwrap()
    }
}
