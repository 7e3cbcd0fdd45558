//! Circular shifts of the buffer.
use ndarray::{ArrayD, Axis, Slice};

use crate::signal::errors::{SignalError, SignalResult};

/// Circularly shift `data` by `shift` along storage dimension `dim`:
/// element `i` moves to `(i + shift) mod len`.
pub fn roll_axis(data: &ArrayD<f64>, dim: usize, shift: isize) -> ArrayD<f64> {
    let len = data.shape()[dim];
    if len == 0 {
        return data.clone();
    }
    let k = shift.rem_euclid(len as isize) as usize;
    if k == 0 {
        return data.clone();
    }
    let mut rolled = ArrayD::zeros(data.raw_dim());
    rolled
        .slice_axis_mut(Axis(dim), Slice::from(k..))
        .assign(&data.slice_axis(Axis(dim), Slice::from(..len - k)));
    rolled
        .slice_axis_mut(Axis(dim), Slice::from(..k))
        .assign(&data.slice_axis(Axis(dim), Slice::from(len - k..)));
    rolled
}

/// Roll storage dimension 0 by `n_x`, then roll the first `n_x` rows
/// along storage dimension 1 by `n_y`.
///
/// Fixes scans whose columns were stored shifted by the acquisition
/// software. Shapes and axes are unchanged.
///
/// Errors
/// ------
/// - `SignalError::RollDimension` for buffers with fewer than 2 dimensions.
pub fn roll_xy(data: &ArrayD<f64>, n_x: usize, n_y: isize) -> SignalResult<ArrayD<f64>> {
    if data.ndim() < 2 {
        return Err(SignalError::RollDimension { required: 2, actual: data.ndim() });
    }
    let mut rolled = roll_axis(data, 0, n_x as isize);
    let rows = n_x.min(data.shape()[0]);
    let head = roll_axis(&rolled.slice_axis(Axis(0), Slice::from(..rows)).to_owned(), 1, n_y);
    rolled.slice_axis_mut(Axis(0), Slice::from(..rows)).assign(&head);
    Ok(rolled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::transform::fixtures::counter;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Positive and negative shifts wrap around.
    //
    // Given
    // -----
    // - [0, 1, 2, 3, 4] rolled by 2 and by -1.
    //
    // Expect
    // ------
    // - [3, 4, 0, 1, 2] and [1, 2, 3, 4, 0].
    fn roll_axis_wraps_both_directions() {
        let data = counter(&[5]);

        assert_eq!(roll_axis(&data, 0, 2), array![3.0, 4.0, 0.0, 1.0, 2.0].into_dyn());
        assert_eq!(roll_axis(&data, 0, -1), array![1.0, 2.0, 3.0, 4.0, 0.0].into_dyn());
        assert_eq!(roll_axis(&data, 0, 5), data);
    }

    #[test]
    // Purpose
    // -------
    // roll_xy shifts rows, then shifts the first `n_x` rows sideways.
    //
    // Given
    // -----
    // - Counter (3, 3) = [[0,1,2],[3,4,5],[6,7,8]], n_x = 1, n_y = 1.
    //
    // Expect
    // ------
    // - Rows rolled: [[6,7,8],[0,1,2],[3,4,5]]; first row rolled by 1:
    //   [8,6,7].
    fn roll_xy_fixes_shifted_rows() {
        let rolled = roll_xy(&counter(&[3, 3]), 1, 1).unwrap();

        assert_eq!(
            rolled,
            array![[8.0, 6.0, 7.0], [0.0, 1.0, 2.0], [3.0, 4.0, 5.0]].into_dyn()
        );
    }

    #[test]
    // Purpose
    // -------
    // 1-D buffers are rejected.
    //
    // Given
    // -----
    // - Counter (4,).
    //
    // Expect
    // ------
    // - `RollDimension { required: 2, actual: 1 }`.
    fn roll_xy_requires_two_dimensions() {
        assert_eq!(
            roll_xy(&counter(&[4]), 1, 1),
            Err(SignalError::RollDimension { required: 2, actual: 1 })
        );
    }
}
