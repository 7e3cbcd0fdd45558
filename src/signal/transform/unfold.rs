//! Merge a run of dimensions into one (unfold) and restore it (fold).
//!
//! Unfolding keeps a set of "steady" storage dimensions and collapses all
//! others into a single target dimension with a row-major reshape. The
//! absorbed descriptors disappear; the target's name and units record what
//! was merged (`"target,absorbed1,absorbed2"`, absorbed in storage order).
//!
//! A row-major reshape only keeps element identity when the merged
//! dimensions are adjacent, so the merged positions (target included) must
//! form one contiguous run.
use ndarray::ArrayD;

use crate::{
    axes::manager::{AxesManager, ReshapeMapping},
    signal::{
        errors::{SignalError, SignalResult},
        transform::Geometry,
    },
};

/// Pre-unfold state needed by [`fold`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnfoldSnapshot {
    pub shape: Vec<usize>,
    pub axes: AxesManager,
}

impl UnfoldSnapshot {
    pub fn of(geometry: &Geometry) -> UnfoldSnapshot {
        UnfoldSnapshot { shape: geometry.data.shape().to_vec(), axes: geometry.axes.deep_copy() }
    }
}

/// Number of dimensions with extent greater than 1.
pub fn effective_dimension(data: &ArrayD<f64>) -> usize {
    data.shape().iter().filter(|&&n| n > 1).count()
}

/// Merge every non-steady dimension into storage dimension `target`.
///
/// Parameters
/// ----------
/// - `steady`: `&[usize]`
///   Storage positions that keep their extent.
/// - `target`: `usize`
///   Storage position of the surviving merged dimension.
///
/// Returns
/// -------
/// - `Ok(None)` when there is nothing sensible to do: fewer than 3
///   effective dimensions, or only the target left to merge.
/// - `Ok(Some(geometry))` with the merged buffer and renumbered axes.
///
/// Errors
/// ------
/// - `InvalidUnfoldTarget` for positions outside the buffer.
/// - `TargetIsSteady` when `target` is listed in `steady`.
/// - `NonContiguousMerge` when the merged positions are not adjacent.
pub fn unfold(
    geometry: &Geometry, steady: &[usize], target: usize,
) -> SignalResult<Option<Geometry>> {
    let ndim = geometry.ndim();
    if let Some(&dim) = steady.iter().chain(std::iter::once(&target)).find(|&&dim| dim >= ndim) {
        return Err(SignalError::InvalidUnfoldTarget { dim, ndim });
    }
    if steady.contains(&target) {
        return Err(SignalError::TargetIsSteady { dim: target });
    }
    if effective_dimension(&geometry.data) < 3 {
        return Ok(None);
    }
    let merged: Vec<usize> = (0..ndim).filter(|dim| !steady.contains(dim)).collect();
    if merged.len() < 2 {
        return Ok(None);
    }
    if merged.windows(2).any(|pair| pair[1] != pair[0] + 1) {
        return Err(SignalError::NonContiguousMerge { positions: merged });
    }

    let shape = geometry.data.shape();
    let (first, last) = (merged[0], merged[merged.len() - 1]);
    let merged_size: usize = merged.iter().map(|&dim| shape[dim]).product();
    let mut new_shape = shape[..first].to_vec();
    new_shape.push(merged_size);
    new_shape.extend_from_slice(&shape[last + 1..]);

    let mut axes = geometry.axes.deep_copy();
    let absorbed = merged.iter().copied().filter(|&dim| dim != target).collect();
    axes.renumber_after_reshape(&ReshapeMapping { target, absorbed, merged_size })?;
    let data = geometry.data.to_shape(new_shape)?.into_owned();
    Ok(Some(Geometry { data, axes }))
}

/// Restore the buffer shape and axes recorded in `snapshot`.
///
/// Errors
/// ------
/// - `SignalError::Shape` when the current element count no longer matches
///   the snapshot (the buffer was cropped or rebinned while unfolded).
pub fn fold(geometry: &Geometry, snapshot: &UnfoldSnapshot) -> SignalResult<Geometry> {
    let data = geometry.data.to_shape(snapshot.shape.clone())?.into_owned();
    Ok(Geometry { data, axes: snapshot.axes.deep_copy() })
}
