//! Collapse one axis by sum or mean.
use ndarray::Axis;

use crate::signal::{
    errors::{SignalError, SignalResult},
    transform::Geometry,
};

/// Reduction applied along the collapsed axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
}

/// Collapse presentation axis `axis`, dropping its descriptor and closing
/// the gap in storage positions.
///
/// The remaining signal flags are left where they are, so reducing the only
/// signal axis yields a signal with `signal_dimension() == 0`.
pub fn reduce(geometry: &Geometry, axis: usize, reduction: Reduction) -> SignalResult<Geometry> {
    let dim = geometry.dim_of(axis);
    let data = match reduction {
        Reduction::Sum => geometry.data.sum_axis(Axis(dim)),
        Reduction::Mean => geometry
            .data
            .mean_axis(Axis(dim))
            .ok_or(SignalError::ZeroDimensional { operation: "mean" })?,
    };
    let mut axes = geometry.axes.clone();
    axes.renumber_after_removal(dim)?;
    axes.validate_shape(data.shape())?;
    Ok(Geometry { data, axes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{descriptor::AxisSpec, manager::AxesManager};
    use crate::signal::transform::fixtures::{calibrated, counter};
    use approx::assert_relative_eq;
    use ndarray::{Array, Axis as NdAxis};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // Summing the last axis of a (64, 64, 1024) cube leaves two axes at
    // storage positions {0, 1}.
    //
    // Given
    // -----
    // - Seeded random buffer of shape (64, 64, 1024), undefined axes.
    //
    // Expect
    // ------
    // - Shape (64, 64); positions [0, 1]; values equal ndarray's sum.
    fn sum_last_axis_of_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = Array::from_shape_fn((64, 64, 1024), |_| rng.random::<f64>()).into_dyn();
        let geometry = Geometry::from_data(data.clone(), 1).unwrap();

        let reduced = reduce(&geometry, 2, Reduction::Sum).unwrap();

        assert_eq!(reduced.data.shape(), &[64, 64]);
        let positions: Vec<usize> =
            reduced.axes.axes().iter().map(|a| a.storage_position()).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_relative_eq!(reduced.data[[3, 5]], data.sum_axis(NdAxis(2))[[3, 5]]);
    }

    #[test]
    // Purpose
    // -------
    // Reductions follow the descriptor's storage position, not its
    // presentation index.
    //
    // Given
    // -----
    // - Counter buffer (2, 3); presentation [b@1, a@0]; mean over
    //   presentation axis 0 (storage dim 1).
    //
    // Expect
    // ------
    // - Row means [1, 4]; remaining axis "a" at position 0.
    fn mean_uses_storage_position() {
        let specs = [
            AxisSpec::new("b", 1.0, 0.0, 3, "", 1),
            AxisSpec::new("a", 1.0, 0.0, 2, "", 0),
        ];
        let axes = AxesManager::with_shape(&specs, &[2, 3], 1).unwrap();
        let geometry = Geometry::new(counter(&[2, 3]), axes).unwrap();

        let reduced = reduce(&geometry, 0, Reduction::Mean).unwrap();

        assert_eq!(reduced.data, ndarray::arr1(&[1.0, 4.0]).into_dyn());
        assert_eq!(reduced.axes.axes()[0].name, "a");
        assert_eq!(reduced.axes.axes()[0].storage_position(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Reducing the only signal axis leaves zero signal axes.
    //
    // Given
    // -----
    // - Calibrated (3, 4), signal axis a1.
    //
    // Expect
    // ------
    // - signal_dimension 0, navigation_dimension 1; input untouched.
    fn reducing_signal_axis_leaves_zero_signal_dimension() {
        let geometry = calibrated(&[3, 4]);

        let reduced = reduce(&geometry, 1, Reduction::Sum).unwrap();

        assert_eq!(reduced.axes.signal_dimension(), 0);
        assert_eq!(reduced.axes.navigation_dimension(), 1);
        assert_eq!(geometry.data.shape(), &[3, 4]);
    }
}
