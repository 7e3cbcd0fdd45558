//! Drop every size-1 dimension from a geometry.
use ndarray::Axis;
use tracing::debug;

use crate::signal::{errors::SignalResult, transform::Geometry};

/// Remove all size-1 dimensions from buffer and axes, highest storage
/// position first. Returns how many dimensions were removed; a second call
/// returns 0.
pub fn squeeze(geometry: &mut Geometry) -> SignalResult<usize> {
    let mut positions: Vec<usize> = geometry
        .axes
        .axes()
        .iter()
        .filter(|axis| axis.size() == 1)
        .map(|axis| axis.storage_position())
        .collect();
    positions.sort_unstable_by(|a, b| b.cmp(a));

    for &position in &positions {
        let data = std::mem::take(&mut geometry.data);
        geometry.data = data.index_axis_move(Axis(position), 0);
        let removed = geometry.axes.renumber_after_removal(position)?;
        debug!(axis = %removed.name, position, "squeezed size-1 axis");
    }
    Ok(positions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::transform::fixtures::{calibrated, counter};
    use proptest::prelude::*;

    #[test]
    // Purpose
    // -------
    // Size-1 dimensions disappear from both buffer and axes and positions
    // stay dense.
    //
    // Given
    // -----
    // - Shape (3, 1, 4, 1).
    //
    // Expect
    // ------
    // - 2 removed; shape (3, 4); positions {0, 1}; names a0, a2; data
    //   unchanged element-wise.
    fn squeeze_drops_unit_dimensions() {
        let mut geometry = calibrated(&[3, 1, 4, 1]);

        let removed = squeeze(&mut geometry).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(geometry.data.shape(), &[3, 4]);
        let names: Vec<&str> = geometry.axes.axes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a0", "a2"]);
        assert_eq!(geometry.axes.shape(), vec![3, 4]);
        assert_eq!(geometry.data.as_slice().unwrap(), counter(&[3, 4]).as_slice().unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Squeezing twice is a no-op the second time.
    //
    // Given
    // -----
    // - Shape (1, 5).
    //
    // Expect
    // ------
    // - First call removes 1, second removes 0 and changes nothing.
    fn squeeze_is_idempotent() {
        let mut geometry = calibrated(&[1, 5]);

        assert_eq!(squeeze(&mut geometry).unwrap(), 1);
        let once = geometry.clone();
        assert_eq!(squeeze(&mut geometry).unwrap(), 0);

        assert_eq!(geometry, once);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        // Purpose
        // -------
        // For any shape, no axis of size 1 survives and storage positions
        // remain a permutation matching the buffer.
        fn squeeze_leaves_no_unit_axes(shape in prop::collection::vec(1usize..4, 0..5)) {
            let mut geometry = calibrated(&shape);

            squeeze(&mut geometry).unwrap();

            prop_assert!(geometry.axes.axes().iter().all(|a| a.size() != 1));
            prop_assert!(geometry.axes.validate_shape(geometry.data.shape()).is_ok());
            let expected: Vec<usize> = shape.iter().copied().filter(|&n| n != 1).collect();
            prop_assert_eq!(geometry.data.shape(), expected.as_slice());
        }
    }
}
