//! Exchange two storage dimensions.
use crate::signal::{errors::SignalResult, transform::Geometry};

/// Transpose the storage dimensions of presentation axes `a` and `b`.
///
/// Descriptor order is unchanged; only their storage positions swap. The
/// partition is re-derived afterwards so the signal flags stay on the
/// highest storage positions. Only strides change: the buffer is not copied.
pub fn swap_axes(geometry: &mut Geometry, a: usize, b: usize) -> SignalResult<()> {
    let (dim_a, dim_b) = (geometry.dim_of(a), geometry.dim_of(b));
    geometry.axes.swap_storage_positions(a as isize, b as isize)?;
    geometry.data.swap_axes(dim_a, dim_b);
    geometry.axes.rederive_partition();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::transform::fixtures::calibrated;
    use proptest::prelude::*;

    #[test]
    // Purpose
    // -------
    // A swap transposes the buffer and exchanges positions.
    //
    // Given
    // -----
    // - Calibrated counter (2, 3, 4); swap axes 0 and 2.
    //
    // Expect
    // ------
    // - Buffer shape (4, 3, 2) with data[k, j, i] == original[i, j, k];
    //   a0 now at position 2 and flagged signal.
    fn swap_transposes_buffer_and_positions() {
        let original = calibrated(&[2, 3, 4]);
        let mut geometry = original.clone();

        swap_axes(&mut geometry, 0, 2).unwrap();

        assert_eq!(geometry.data.shape(), &[4, 3, 2]);
        assert_eq!(geometry.data[[3, 1, 0]], original.data[[0, 1, 3]]);
        assert_eq!(geometry.axes.axes()[0].storage_position(), 2);
        assert!(geometry.axes.axes()[0].is_signal());
        assert!(geometry.axes.validate_shape(geometry.data.shape()).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        // Purpose
        // -------
        // Swapping the same pair twice restores axes and buffer.
        fn swap_twice_is_identity(
            shape in prop::collection::vec(2usize..5, 2..5),
            picks in (0usize..8, 0usize..8),
        ) {
            let original = calibrated(&shape);
            let (a, b) = (picks.0 % shape.len(), picks.1 % shape.len());
            let mut geometry = original.clone();

            swap_axes(&mut geometry, a, b).unwrap();
            swap_axes(&mut geometry, a, b).unwrap();

            prop_assert_eq!(geometry, original);
        }
    }
}
