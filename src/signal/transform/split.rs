//! Contiguous segmentation along one axis.
use ndarray::{Axis, Slice};

use crate::signal::{
    errors::{SignalError, SignalResult},
    transform::{Geometry, squeeze::squeeze},
};

/// Segment boundaries for `parts` floor-sized segments of an axis of
/// length `size`; the last segment absorbs the remainder.
///
/// Returns `parts + 1` nodes starting at 0 and ending at `size`.
///
/// Errors
/// ------
/// - `SignalError::InvalidPartCount` when `parts == 0` or `parts > size`.
pub fn cut_nodes_for_parts(size: usize, parts: usize) -> SignalResult<Vec<usize>> {
    if parts == 0 || parts > size {
        return Err(SignalError::InvalidPartCount { parts, size });
    }
    let step = size / parts;
    let mut nodes: Vec<usize> = (0..parts).map(|i| i * step).collect();
    nodes.push(size);
    Ok(nodes)
}

/// Segment boundaries from explicit segment lengths (cumulative sums
/// starting at 0). A total below `size` leaves the tail out.
///
/// Errors
/// ------
/// - `SignalError::InvalidSplitSteps` when `steps` is empty, contains a 0,
///   or sums to more than `size`.
pub fn cut_nodes_for_steps(size: usize, steps: &[usize]) -> SignalResult<Vec<usize>> {
    let total: usize = steps.iter().sum();
    if steps.is_empty() || steps.contains(&0) || total > size {
        return Err(SignalError::InvalidSplitSteps { steps: steps.to_vec(), size });
    }
    let mut nodes = Vec::with_capacity(steps.len() + 1);
    nodes.push(0);
    let mut acc = 0;
    for &step in steps {
        acc += step;
        nodes.push(acc);
    }
    Ok(nodes)
}

/// Cut presentation axis `axis` at `nodes` into independent geometries.
///
/// Each segment owns a contiguous copy of its range and a copy of the
/// parent's axes with the split axis offset moved to the segment start.
/// Sizes are re-read from the segment, then the segment is squeezed.
pub fn split(geometry: &Geometry, axis: usize, nodes: &[usize]) -> SignalResult<Vec<Geometry>> {
    let descriptor = &geometry.axes.axes()[axis];
    let dim = descriptor.storage_position();
    let mut segments = Vec::with_capacity(nodes.len().saturating_sub(1));
    for bounds in nodes.windows(2) {
        let (start, end) = (bounds[0], bounds[1]);
        let data = geometry
            .data
            .slice_axis(Axis(dim), Slice::from(start..end))
            .as_standard_layout()
            .into_owned();
        let mut axes = geometry.axes.deep_copy();
        axes.axis_mut(axis as isize)?.offset = descriptor.index_to_value(start);
        axes.refresh_sizes(data.shape())?;
        let mut segment = Geometry { data, axes };
        squeeze(&mut segment)?;
        segments.push(segment);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::transform::fixtures::calibrated;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Floor-division boundaries put the remainder in the last part.
    //
    // Given
    // -----
    // - size 10 in 3 parts; size 5 in 5 parts.
    //
    // Expect
    // ------
    // - [0, 3, 6, 10]; [0, 1, 2, 3, 4, 5].
    fn cut_nodes_for_parts_absorbs_remainder() {
        assert_eq!(cut_nodes_for_parts(10, 3).unwrap(), vec![0, 3, 6, 10]);
        assert_eq!(cut_nodes_for_parts(5, 5).unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(
            cut_nodes_for_parts(5, 6),
            Err(SignalError::InvalidPartCount { parts: 6, size: 5 })
        );
        assert!(cut_nodes_for_parts(5, 0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Steps accumulate into nodes and are validated.
    //
    // Given
    // -----
    // - size 10 with steps [2, 3]; [4, 7]; [2, 0].
    //
    // Expect
    // ------
    // - [0, 2, 5]; the last two are rejected.
    fn cut_nodes_for_steps_accumulates() {
        assert_eq!(cut_nodes_for_steps(10, &[2, 3]).unwrap(), vec![0, 2, 5]);
        assert!(cut_nodes_for_steps(10, &[4, 7]).is_err());
        assert!(cut_nodes_for_steps(10, &[2, 0]).is_err());
        assert!(cut_nodes_for_steps(10, &[]).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Splitting (4, 5, 1024) into 5 parts along axis 1 gives five (4, 1024)
    // geometries after squeeze.
    //
    // Given
    // -----
    // - Calibrated (4, 5, 1024).
    //
    // Expect
    // ------
    // - 5 segments of shape (4, 1024) with 2 axes at positions {0, 1}.
    fn split_into_unit_parts_squeezes_each_segment() {
        let geometry = calibrated(&[4, 5, 1024]);
        let nodes = cut_nodes_for_parts(5, 5).unwrap();

        let segments = split(&geometry, 1, &nodes).unwrap();

        assert_eq!(segments.len(), 5);
        for segment in &segments {
            assert_eq!(segment.data.shape(), &[4, 1024]);
            assert_eq!(segment.axes.len(), 2);
            assert!(segment.axes.validate_shape(&[4, 1024]).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // Segments keep calibration and move the split axis offset.
    //
    // Given
    // -----
    // - Calibrated (6, 4) (axis 0: scale 0.5, offset 0), nodes [0, 2, 6].
    //
    // Expect
    // ------
    // - Sizes 2 and 4; offsets 0.0 and 1.0; scale 0.5 kept; data of the
    //   second segment starts at element (2, 0) = 8.
    fn split_moves_offset_to_segment_start() {
        let geometry = calibrated(&[6, 4]);

        let segments = split(&geometry, 0, &[0, 2, 6]).unwrap();

        assert_eq!(segments[0].axes.axes()[0].size(), 2);
        assert_eq!(segments[1].axes.axes()[0].size(), 4);
        assert_relative_eq!(segments[0].axes.axes()[0].offset, 0.0);
        assert_relative_eq!(segments[1].axes.axes()[0].offset, 1.0);
        assert_relative_eq!(segments[1].axes.axes()[0].scale, 0.5);
        assert_relative_eq!(segments[1].data[[0, 0]], 8.0);
    }
}
