//! Integration tests for signals, shape transformations and exports.
//!
//! Purpose
//! -------
//! - Validate the end-to-end signal pipeline: from a portable dictionary
//!   (including its JSON form), through crops, rebinning, reductions,
//!   splits and unfold/fold, to decomposition exports.
//! - Use realistic buffer sizes (a random (64, 64, 1024) cube) alongside
//!   small hand-checkable cubes.
//!
//! Coverage
//! --------
//! - `signal::Signal`: construction, snapshot/JSON round trip, crop in
//!   units, strict rebin, sum, split, unfold/fold.
//! - `axes::AxesManager`: partition, storage positions and calibration
//!   after each step.
//! - `decomposition`: stacked factor and score exports of a folded signal.
//!
//! Exclusions
//! ----------
//! - Per-function edge cases and error variants; those are covered by unit
//!   tests next to each module.
//! - Python bindings.
use approx::assert_relative_eq;
use ndarray::{Array2, ArrayD, IxDyn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_signal::{
    axes::AxisSpec,
    decomposition::{
        ComponentSelection, FormatTable, export_plan, factors_to_signal, scores_to_signal,
    },
    signal::{MappedParameters, ReduceMode, Signal, SignalDictionary, SplitSpec},
};

fn random_buffer(shape: &[usize], seed: u64) -> ArrayD<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.random::<f64>())
}

/// (8, 6, 32) cube over x, y (2 nm pixels) and energy (0.5 eV from
/// 100 eV); every element holds its energy index.
fn energy_cube() -> SignalDictionary {
    let data = ArrayD::from_shape_fn(IxDyn(&[8, 6, 32]), |index| index[2] as f64);
    let axes = vec![
        AxisSpec::new("x", 2.0, 0.0, 8, "nm", 0),
        AxisSpec::new("y", 2.0, 0.0, 6, "nm", 1),
        AxisSpec::new("Energy", 0.5, 100.0, 32, "eV", 2),
    ];
    SignalDictionary::new(data).with_axes(axes).with_mapped_parameters(MappedParameters {
        original_filename: Some("sample.msa".to_string()),
        record_by: Some("spectrum".to_string()),
        ..MappedParameters::default()
    })
}

#[test]
// Purpose
// -------
// Summing a random spectrum image over its signal axis keeps the
// navigation axes calibrated and densely numbered.
//
// Given
// -----
// - Random (64, 64, 1024) buffer, undefined axes, one signal axis.
//
// Expect
// ------
// - Result shape (64, 64) with storage positions [0, 1]; element (3, 5)
//   equals the sum of the source spectrum at (3, 5); source untouched.
fn random_cube_sum_over_signal_axis() {
    let mut signal = Signal::new(random_buffer(&[64, 64, 1024], 7)).unwrap();
    assert_eq!(signal.axes_manager().signal_dimension(), 1);

    let summed = signal.sum(-1, ReduceMode::NewSignal).unwrap().unwrap();

    assert_eq!(summed.data().shape(), &[64, 64]);
    let positions: Vec<usize> =
        summed.axes_manager().axes().iter().map(|axis| axis.storage_position()).collect();
    assert_eq!(positions, vec![0, 1]);
    let expected: f64 = signal.extract(Some(&[3, 5])).unwrap().sum();
    assert_relative_eq!(summed.data()[[3, 5]], expected, epsilon = 1e-9);
    assert_eq!(signal.data().shape(), &[64, 64, 1024]);
}

#[test]
// Purpose
// -------
// A dictionary loaded from JSON survives crop, rebin and an unfold/fold
// cycle with consistent calibration.
//
// Given
// -----
// - The energy cube, serialized to JSON and loaded back.
// - Crop energy to [102, 110) eV, rebin to (4, 3, 8), unfold, fold.
//
// Expect
// ------
// - Title "sample"; crop keeps 16 channels from offset 102 eV; rebin
//   doubles every scale and preserves the total; unfold gives (12, 8)
//   with a "y,x" axis; fold restores the rebinned geometry exactly.
fn dictionary_crop_rebin_unfold_fold_pipeline() {
    let json = energy_cube().to_json().unwrap();
    let mut signal = Signal::from_dictionary(SignalDictionary::from_json(&json).unwrap()).unwrap();
    assert_eq!(signal.title(), "sample");

    signal.crop_in_units(-1, Some(102.0), Some(110.0)).unwrap();
    assert_eq!(signal.data().shape(), &[8, 6, 16]);
    assert_relative_eq!(signal.axes_manager().axes()[2].offset, 102.0);
    let total = signal.data().sum();

    signal.rebin(&[4, 3, 8]).unwrap();
    let scales: Vec<f64> = signal.axes_manager().axes().iter().map(|axis| axis.scale).collect();
    assert_eq!(scales, vec![4.0, 4.0, 1.0]);
    assert_relative_eq!(signal.data().sum(), total);
    assert_relative_eq!(signal.data()[[0, 0, 0]], 36.0);
    let rebinned = signal.snapshot();

    assert!(signal.unfold().unwrap());
    assert_eq!(signal.data().shape(), &[12, 8]);
    assert_eq!(signal.axes_manager().axis_at_storage(0).unwrap().name, "y,x");

    assert!(signal.fold().unwrap());
    assert_eq!(signal.snapshot(), rebinned);
    assert_eq!(
        signal.to_string(),
        "Signal\n\tTitle: sample\n\tData dimensions: (4, 3, 8)\n\tData representation: spectrum"
    );
}

#[test]
// Purpose
// -------
// Splitting yields independent, squeezed segments with shifted offsets.
//
// Given
// -----
// - Random (4, 5, 1024) buffer; split axis 1 into 5 parts.
//
// Expect
// ------
// - Five (4, 1024) signals; segment 3 equals the source slice at y = 3;
//   mutating a segment leaves the source unchanged.
fn split_produces_independent_segments() {
    let signal = Signal::new(random_buffer(&[4, 5, 1024], 11)).unwrap();

    let mut parts = signal.split_in(1, SplitSpec::Parts(5)).unwrap();

    assert_eq!(parts.len(), 5);
    assert!(parts.iter().all(|part| part.data().shape() == [4, 1024]));
    assert_relative_eq!(parts[3].data()[[2, 100]], signal.data()[[2, 3, 100]]);

    let before = signal.data()[[0, 0, 0]];
    parts[0].data_mut()[[0, 0]] = -1.0;
    assert_relative_eq!(signal.data()[[0, 0, 0]], before);
}

#[test]
// Purpose
// -------
// Factors and scores computed on the unfolded form export back into the
// folded calibration.
//
// Given
// -----
// - Random (6, 5, 16) signal, unfolded to (30, 16) and folded back.
// - Factors 16 × 3 and scores 3 × 30.
//
// Expect
// ------
// - A "rpl" plan stacks all 3 components; factors export to (3, 16),
//   scores to (3, 6, 5) with score (c, i, j) = scores[c, i * 5 + j].
fn decomposition_exports_follow_source_axes() {
    let mut signal = Signal::new(random_buffer(&[6, 5, 16], 3)).unwrap();
    assert!(signal.unfold().unwrap());
    let navigation_size = signal.axes_manager().navigation_size();
    assert_eq!(navigation_size, 30);
    let factors = Array2::from_shape_fn((16, 3), |(r, c)| (r + 16 * c) as f64);
    let scores = Array2::from_shape_fn((3, navigation_size), |(c, k)| (c * 1000 + k) as f64);
    assert!(signal.fold().unwrap());

    let plan = export_plan(&FormatTable::default(), "rpl", &ComponentSelection::All, 3).unwrap();
    assert_eq!(plan.components(), &[0, 1, 2]);

    let factor_signal =
        factors_to_signal(&signal, &factors, &ComponentSelection::All, false).unwrap();
    let score_signal = scores_to_signal(&signal, &scores, &ComponentSelection::All).unwrap();

    assert_eq!(factor_signal.data().shape(), &[3, 16]);
    assert_relative_eq!(factor_signal.data()[[2, 4]], 36.0);
    assert_eq!(score_signal.data().shape(), &[3, 6, 5]);
    assert_relative_eq!(score_signal.data()[[1, 4, 2]], 1022.0);
    assert_eq!(score_signal.axes_manager().navigation_dimension(), 1);
}
