//! Sum-binning to a coarser shape.
use ndarray::{ArrayD, Axis, Slice};
use tracing::debug;

use crate::signal::{
    errors::{SignalError, SignalResult},
    options::RebinPolicy,
    transform::Geometry,
};

/// Rebin the buffer to `new_shape` (storage order) by summing blocks.
///
/// Every dimension `d` is grouped into bins of `size[d] / new_shape[d]`
/// consecutive elements. Each axis's `scale` is multiplied by the bin
/// factor of its storage dimension, and sizes are re-read from the result.
///
/// Errors
/// ------
/// - `RebinDimensionMismatch` when `new_shape.len() != ndim`.
/// - `RebinZeroTarget` / `RebinTooLarge` for a target of 0 or above the
///   current extent.
/// - `RebinNotDivisor` under [`RebinPolicy::Strict`] when a target does not
///   divide its extent. Under [`RebinPolicy::Truncate`] trailing elements
///   are dropped instead.
pub fn rebin(
    geometry: &Geometry, new_shape: &[usize], policy: RebinPolicy,
) -> SignalResult<Geometry> {
    let shape = geometry.data.shape().to_vec();
    if new_shape.len() != shape.len() {
        return Err(SignalError::RebinDimensionMismatch {
            expected: shape.len(),
            actual: new_shape.len(),
        });
    }
    let mut factors = Vec::with_capacity(shape.len());
    for (dim, (&size, &new_size)) in shape.iter().zip(new_shape).enumerate() {
        if new_size == 0 {
            return Err(SignalError::RebinZeroTarget { dim });
        }
        if new_size > size {
            return Err(SignalError::RebinTooLarge { dim, size, new_size });
        }
        if size % new_size != 0 && policy == RebinPolicy::Strict {
            return Err(SignalError::RebinNotDivisor { dim, size, new_size });
        }
        factors.push(size / new_size);
    }

    let mut data = geometry.data.clone();
    for dim in 0..shape.len() {
        let keep = new_shape[dim] * factors[dim];
        if keep < shape[dim] {
            debug!(dim, dropped = shape[dim] - keep, "truncating before rebin");
            data = data.slice_axis(Axis(dim), Slice::from(0..keep)).to_owned();
        }
    }
    for (dim, &factor) in factors.iter().enumerate() {
        if factor > 1 {
            data = bin_dimension(&data, dim, factor)?;
        }
    }

    let mut axes = geometry.axes.clone();
    for axis in 0..axes.len() {
        let descriptor = axes.axis_mut(axis as isize)?;
        descriptor.scale *= factors[descriptor.storage_position()] as f64;
    }
    axes.refresh_sizes(data.shape())?;
    Ok(Geometry { data, axes })
}

/// Sum consecutive blocks of `factor` elements along `dim`.
///
/// `data.shape()[dim]` must be a multiple of `factor`.
fn bin_dimension(data: &ArrayD<f64>, dim: usize, factor: usize) -> SignalResult<ArrayD<f64>> {
    let shape = data.shape();
    let mut blocked = shape[..dim].to_vec();
    blocked.push(shape[dim] / factor);
    blocked.push(factor);
    blocked.extend_from_slice(&shape[dim + 1..]);
    let blocks = data.to_shape(blocked)?;
    Ok(blocks.sum_axis(Axis(dim + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::transform::fixtures::calibrated;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Exact-divisor rebin scales every axis and preserves the total.
    //
    // Given
    // -----
    // - Shape (4, 6, 8) counter buffer, scale 0.5 everywhere; target
    //   (2, 3, 2).
    //
    // Expect
    // ------
    // - Shape (2, 3, 2); scales 1.0, 1.0, 2.0; identical sums.
    fn rebin_scales_axes_and_preserves_sum() {
        let geometry = calibrated(&[4, 6, 8]);

        let rebinned = rebin(&geometry, &[2, 3, 2], RebinPolicy::Strict).unwrap();

        assert_eq!(rebinned.data.shape(), &[2, 3, 2]);
        let scales: Vec<f64> = rebinned.axes.axes().iter().map(|a| a.scale).collect();
        assert_eq!(scales, vec![1.0, 1.0, 2.0]);
        assert_relative_eq!(rebinned.data.sum(), geometry.data.sum());
        assert_eq!(rebinned.axes.shape(), vec![2, 3, 2]);
    }

    #[test]
    // Purpose
    // -------
    // Bins sum consecutive elements.
    //
    // Given
    // -----
    // - 2x4 counter [[0..4], [4..8]] rebinned to (1, 2).
    //
    // Expect
    // ------
    // - [[0+1+4+5, 2+3+6+7]] = [[10, 18]].
    fn rebin_sums_blocks() {
        let geometry = calibrated(&[2, 4]);

        let rebinned = rebin(&geometry, &[1, 2], RebinPolicy::Strict).unwrap();

        assert_eq!(rebinned.data, array![[10.0, 18.0]].into_dyn());
    }

    #[test]
    // Purpose
    // -------
    // Strict policy rejects non-divisors without touching the input;
    // Truncate drops the tail.
    //
    // Given
    // -----
    // - Shape (5, 4) rebinned to (2, 4).
    //
    // Expect
    // ------
    // - Strict -> `RebinNotDivisor { dim: 0, size: 5, new_size: 2 }`.
    // - Truncate -> shape (2, 4), axis 0 scale doubled, last row dropped.
    fn rebin_policies_handle_non_divisors() {
        let geometry = calibrated(&[5, 4]);

        assert_eq!(
            rebin(&geometry, &[2, 4], RebinPolicy::Strict),
            Err(SignalError::RebinNotDivisor { dim: 0, size: 5, new_size: 2 })
        );

        let truncated = rebin(&geometry, &[2, 4], RebinPolicy::Truncate).unwrap();
        assert_eq!(truncated.data.shape(), &[2, 4]);
        assert_relative_eq!(truncated.axes.axes()[0].scale, 1.0);
        assert_relative_eq!(truncated.axes.axes()[1].scale, 0.5);
        // rows 0..4 of a counter with 4 columns sum to 0 + ... + 15
        assert_relative_eq!(truncated.data.sum(), 120.0);
    }

    #[test]
    // Purpose
    // -------
    // Shape arguments are validated.
    //
    // Given
    // -----
    // - Shape (4, 6).
    //
    // Expect
    // ------
    // - Wrong length, zero target and larger target each fail.
    fn rebin_validates_target_shape() {
        let geometry = calibrated(&[4, 6]);

        assert_eq!(
            rebin(&geometry, &[2], RebinPolicy::Strict),
            Err(SignalError::RebinDimensionMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(
            rebin(&geometry, &[0, 6], RebinPolicy::Strict),
            Err(SignalError::RebinZeroTarget { dim: 0 })
        );
        assert_eq!(
            rebin(&geometry, &[4, 12], RebinPolicy::Truncate),
            Err(SignalError::RebinTooLarge { dim: 1, size: 6, new_size: 12 })
        );
    }
}
