//! signal::explorer — overview arrays and labels for plotting collaborators.
//!
//! Purpose
//! -------
//! Compute what a viewer needs besides the current frame: a reduced
//! "overview" of the navigation space ([`explorer`]) and the labels and
//! scalebar for the axes ([`plot_labels`]).
//!
//! Key behaviors
//! -------------
//! - One signal axis, one navigation axis: the whole buffer, oriented
//!   `(navigation, signal)`.
//! - One signal axis, two navigation axes: sum over the signal axis.
//! - Two signal axes, one or two navigation axes: sum over both signal axes.
//! - Any other combination has no overview.
use ndarray::{Array1, ArrayD, Axis};

use crate::signal::{transform::Geometry, viewer::PlotKind};

/// Overview array of the navigation space, or `None` when the
/// dimensionality has no overview layout.
pub fn explorer(geometry: &Geometry) -> Option<ArrayD<f64>> {
    let (navigation, signal) = geometry.axes.partition();
    let data = &geometry.data;
    match (signal.len(), navigation.len()) {
        (1, 1) => {
            if signal[0].storage_position() > navigation[0].storage_position() {
                Some(data.clone())
            } else {
                Some(data.t().as_standard_layout().into_owned())
            }
        }
        (1, 2) => Some(data.sum_axis(Axis(signal[0].storage_position()))),
        (2, 1) | (2, 2) => {
            // signal axes come sorted by storage position: remove the higher one first
            let (low, high) = (signal[0].storage_position(), signal[1].storage_position());
            Some(data.sum_axis(Axis(high)).sum_axis(Axis(low)))
        }
        _ => None,
    }
}

/// Physical size of one navigation pixel, for scalebars.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalebar {
    pub pixel_size: f64,
    pub units: String,
}

/// Everything a viewer prints around the data.
///
/// Fields
/// ------
/// - `title`: the signal title.
/// - `kind`: spectrum or image layout.
/// - `signal_labels`: `"name (units)"` per signal axis, storage order.
/// - `signal_coordinates`: calibrated coordinates of the first signal axis.
/// - `intensity_label`: y-label for spectra.
/// - `scalebar`: present when there is a navigation space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLabels {
    pub title: String,
    pub kind: PlotKind,
    pub signal_labels: Vec<String>,
    pub signal_coordinates: Array1<f64>,
    pub intensity_label: String,
    pub scalebar: Option<Scalebar>,
}

/// Labels for `geometry`, or `None` when its signal space cannot be shown.
pub fn plot_labels(geometry: &Geometry, title: &str) -> Option<PlotLabels> {
    let kind = PlotKind::for_signal_dimension(geometry.axes.signal_dimension())?;
    let (navigation, signal) = geometry.axes.partition();
    let scalebar_axis = match navigation.len() {
        0 => None,
        1 => Some(signal[0]),
        _ => navigation.last().copied(),
    };
    Some(PlotLabels {
        title: title.to_string(),
        kind,
        signal_labels: signal.iter().map(|axis| axis.label()).collect(),
        signal_coordinates: signal[0].coordinate_array(),
        intensity_label: "Intensity".to_string(),
        scalebar: scalebar_axis
            .map(|axis| Scalebar { pixel_size: axis.scale, units: axis.units.clone() }),
    })
}
