//! Contiguous crop along one axis.
use ndarray::{Axis, Slice};

use crate::signal::{
    errors::{SignalError, SignalResult},
    transform::{Geometry, squeeze::squeeze},
};

/// Restrict presentation axis `axis` to storage indices `[start, end)`.
///
/// Parameters
/// ----------
/// - `axis`: `usize`
///   Normalized presentation index.
/// - `start`: `Option<usize>`
///   First kept index, default 0. When given, the axis `offset` moves to
///   the coordinate of `start`.
/// - `end`: `Option<usize>`
///   One past the last kept index, default and upper clamp `size`.
///
/// Returns
/// -------
/// A new, squeezed geometry holding a contiguous copy of the range.
///
/// Errors
/// ------
/// - `SignalError::CropOutOfRange` when `start >= size`.
/// - `SignalError::EmptyCrop` when the clamped `end <= start`.
pub fn crop(
    geometry: &Geometry, axis: usize, start: Option<usize>, end: Option<usize>,
) -> SignalResult<Geometry> {
    let descriptor = &geometry.axes.axes()[axis];
    let size = descriptor.size();
    let first = start.unwrap_or(0);
    if first >= size {
        return Err(SignalError::CropOutOfRange { axis, start: first, size });
    }
    let last = end.unwrap_or(size).min(size);
    if last <= first {
        return Err(SignalError::EmptyCrop { axis, start: first, end: last });
    }

    let dim = descriptor.storage_position();
    let data = geometry
        .data
        .slice_axis(Axis(dim), Slice::from(first..last))
        .as_standard_layout()
        .into_owned();

    let mut axes = geometry.axes.clone();
    if start.is_some() {
        let offset = descriptor.index_to_value(first);
        axes.axis_mut(axis as isize)?.offset = offset;
    }
    axes.refresh_sizes(data.shape())?;

    let mut cropped = Geometry { data, axes };
    squeeze(&mut cropped)?;
    Ok(cropped)
}
