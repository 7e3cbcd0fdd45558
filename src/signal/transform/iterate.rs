//! 1-D frames along one storage dimension.
use ndarray::{Array2, ArrayD, ArrayView1, Ix1, iter::AxisIter};

use crate::{
    axes::errors::AxesError,
    signal::errors::{SignalError, SignalResult},
};

/// Every 1-D line of a buffer along one dimension, held in one contiguous
/// `(frames, len)` block.
///
/// Iteration borrows the block, so it can be restarted by calling
/// [`AxisFrames::iter`] again; the source buffer is not referenced.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFrames {
    sweep: Array2<f64>,
}

impl AxisFrames {
    pub fn len(&self) -> usize {
        self.sweep.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.sweep.nrows() == 0
    }

    /// Length of each frame (the extent of the iterated dimension).
    pub fn frame_len(&self) -> usize {
        self.sweep.ncols()
    }

    pub fn iter(&self) -> AxisIter<'_, f64, Ix1> {
        self.sweep.outer_iter()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.sweep
    }
}

impl<'a> IntoIterator for &'a AxisFrames {
    type Item = ArrayView1<'a, f64>;
    type IntoIter = AxisIter<'a, f64, Ix1>;

    fn into_iter(self) -> Self::IntoIter {
        self.sweep.outer_iter()
    }
}

/// Collect the lines of `data` along storage dimension `dim`.
///
/// The iterated dimension is moved last and every other dimension is
/// collapsed, in row-major order, into one sweep dimension. Frames come
/// out in row-major order of the remaining indices.
///
/// Errors
/// ------
/// - `SignalError::ZeroDimensional` for a 0-D buffer.
/// - `AxesError::StoragePositionNotFound` when `dim >= ndim`.
pub fn iterate_axis(data: &ArrayD<f64>, dim: usize) -> SignalResult<AxisFrames> {
    let ndim = data.ndim();
    if ndim == 0 {
        return Err(SignalError::ZeroDimensional { operation: "iterate_axis" });
    }
    if dim >= ndim {
        return Err(AxesError::StoragePositionNotFound { position: dim }.into());
    }
    let len = data.shape()[dim];
    let mut order: Vec<usize> = (0..ndim).filter(|&d| d != dim).collect();
    order.push(dim);
    let moved = data.view().permuted_axes(order);
    let frames = if len == 0 { 0 } else { moved.len() / len };
    let sweep = moved.as_standard_layout().into_owned().into_shape_with_order((frames, len))?;
    Ok(AxisFrames { sweep })
}
