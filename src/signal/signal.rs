//! signal::signal — the `Signal` composition root.
//!
//! Purpose
//! -------
//! Own one N-D buffer together with its [`AxesManager`], metadata
//! containers, options, the unfold restoration slot and an optional
//! attached [`Viewer`]. Every shape transformation in
//! [`crate::signal::transform`] is exposed here with axis normalization,
//! bookkeeping of derived signals and viewer notification.
//!
//! Key behaviors
//! -------------
//! - Construction from a [`SignalDictionary`] synthesizes undefined axes
//!   when none are given, resolves the title, and squeezes.
//! - In-place transformations compute a new geometry first and commit it
//!   only on success, so every `Err` leaves the signal untouched.
//! - After each committed change the attached viewer (if active) is told to
//!   redraw; its failures are logged at `warn` and never propagate.
//! - Unfold operations report "nothing to do" as `Ok(false)` plus an
//!   `info` event; the first unfold snapshots the pre-unfold geometry and
//!   later unfolds keep that snapshot until `fold`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `axes.shape() == data.shape()` between public calls. Code that
//!   replaces the buffer through [`Signal::data_mut`] must call
//!   [`Signal::get_dimensions_from_data`] afterwards.
//! - Derived signals (split segments, reduced copies) share nothing with
//!   their parent: parameters, attributes and options are cloned and they
//!   start without a viewer or an unfold snapshot.
//!
//! Conventions
//! -----------
//! - `axis: isize` arguments are presentation indices; negative values
//!   count from the last axis.
//! - `rebin` shapes, `iterate_axis` dimensions and `roll_xy` act in
//!   storage order.
use std::fmt;

use ndarray::{ArrayD, ArrayViewD};
use tracing::{debug, info, warn};

use crate::{
    axes::{
        descriptor::AxisSpec,
        manager::{AxesManager, undefined_specs},
        validation::normalize_axis,
    },
    signal::{
        dictionary::SignalDictionary,
        errors::{SignalError, SignalResult},
        explorer::{PlotLabels, explorer, plot_labels},
        options::SignalOptions,
        parameters::{MappedParameters, OriginalParameters, SignalAttributes},
        transform::{
            self, AxisFrames, Geometry, Reduction, UnfoldSnapshot, cut_nodes_for_parts,
            cut_nodes_for_steps, effective_dimension,
        },
        viewer::{PlotKind, Viewer},
    },
};

/// Where the result of `sum` / `mean` goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceMode {
    /// Replace this signal's geometry.
    InPlace,
    /// Leave this signal untouched and return the reduced copy.
    NewSignal,
}

/// How `split_in` chooses its segment boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitSpec {
    /// `n` floor-sized segments; the last one absorbs the remainder.
    Parts(usize),
    /// Explicit segment lengths.
    Steps(Vec<usize>),
    /// Reuse `attributes.splitting_steps`.
    Remembered,
}

impl SplitSpec {
    /// Build from the two optional knobs. Steps win when both are given.
    pub fn from_options(number_of_parts: Option<usize>, steps: Option<Vec<usize>>) -> SplitSpec {
        match (number_of_parts, steps) {
            (Some(parts), Some(steps)) => {
                info!(
                    parts,
                    ?steps,
                    "both a number of parts and steps were given, splitting by steps"
                );
                SplitSpec::Steps(steps)
            }
            (None, Some(steps)) => SplitSpec::Steps(steps),
            (Some(parts), None) => SplitSpec::Parts(parts),
            (None, None) => SplitSpec::Remembered,
        }
    }
}

/// An N-D calibrated dataset.
pub struct Signal {
    geometry: Geometry,
    mapped_parameters: MappedParameters,
    original_parameters: OriginalParameters,
    attributes: SignalAttributes,
    options: SignalOptions,
    unfolded: Option<UnfoldSnapshot>,
    viewer: Option<Box<dyn Viewer>>,
}

impl Signal {
    // ---- Construction ----

    /// Signal over `data` with undefined axes and default options.
    pub fn new(data: ArrayD<f64>) -> SignalResult<Signal> {
        Signal::from_dictionary(SignalDictionary::new(data))
    }

    /// Signal over `data` described by `axes`.
    pub fn with_axes(data: ArrayD<f64>, axes: Vec<AxisSpec>) -> SignalResult<Signal> {
        Signal::from_dictionary(SignalDictionary::new(data).with_axes(axes))
    }

    pub fn from_dictionary(dictionary: SignalDictionary) -> SignalResult<Signal> {
        Signal::from_dictionary_with_options(dictionary, SignalOptions::default())
    }

    /// Build a signal from its portable record.
    ///
    /// Parameters
    /// ----------
    /// - `dictionary`: [`SignalDictionary`]
    ///   Buffer, optional axis specs and metadata. Missing specs become
    ///   undefined axes (scale 1, offset 0).
    /// - `options`: [`SignalOptions`]
    ///   Partition default when specs carry no flags, rebin policy and
    ///   squeeze behavior.
    ///
    /// Errors
    /// ------
    /// - `SignalError::Axes` when the specs are invalid or disagree with the
    ///   buffer shape.
    ///
    /// Notes
    /// -----
    /// - An empty title is replaced by `original_filename` without its
    ///   extension.
    /// - Without explicit navigate flags the default partition is applied
    ///   to the squeezed axes, so a trailing size-1 dimension does not
    ///   cost the signal its signal axis.
    pub fn from_dictionary_with_options(
        dictionary: SignalDictionary, options: SignalOptions,
    ) -> SignalResult<Signal> {
        let SignalDictionary {
            data,
            axes,
            mut mapped_parameters,
            original_parameters,
            attributes,
        } = dictionary;
        let specs = axes.unwrap_or_else(|| undefined_specs(data.shape()));
        let flagged = specs.iter().any(|spec| spec.navigate.is_some());
        let manager =
            AxesManager::with_shape(&specs, data.shape(), options.default_signal_dimension)?;
        mapped_parameters.resolve_title();

        let mut signal = Signal {
            geometry: Geometry { data, axes: manager },
            mapped_parameters,
            original_parameters,
            attributes,
            options,
            unfolded: None,
            viewer: None,
        };
        if signal.options.squeeze_on_load {
            let removed = transform::squeeze(&mut signal.geometry)?;
            if removed > 0 && !flagged {
                let axes = &mut signal.geometry.axes;
                let signal_dimension = signal.options.default_signal_dimension.min(axes.len());
                axes.set_signal_dimension(signal_dimension)?;
            }
        }
        debug!(
            shape = ?signal.geometry.data.shape(),
            title = %signal.mapped_parameters.title,
            "signal loaded"
        );
        Ok(signal)
    }

    /// Replace buffer, axes and metadata from `dictionary`, keeping the
    /// options and the attached viewer. The unfold snapshot is dropped.
    pub fn load_dictionary(&mut self, dictionary: SignalDictionary) -> SignalResult<()> {
        let loaded = Signal::from_dictionary_with_options(dictionary, self.options.clone())?;
        let viewer = self.viewer.take();
        *self = Signal { viewer, ..loaded };
        self.notify_geometry_changed();
        Ok(())
    }

    /// Portable record of the current state (buffer copied, axes
    /// serialized with their navigate flags).
    pub fn snapshot(&self) -> SignalDictionary {
        SignalDictionary {
            data: self.geometry.data.clone(),
            axes: Some(self.geometry.axes.to_specs()),
            mapped_parameters: self.mapped_parameters.clone(),
            original_parameters: self.original_parameters.clone(),
            attributes: self.attributes.clone(),
        }
    }

    /// Independent copy without the viewer.
    pub fn deep_copy(&self) -> Signal {
        self.clone()
    }

    // ---- Accessors ----

    pub fn data(&self) -> &ArrayD<f64> {
        &self.geometry.data
    }

    /// Mutable buffer access. Values may be changed freely; after replacing
    /// the buffer with one of a different shape call
    /// [`Signal::get_dimensions_from_data`].
    pub fn data_mut(&mut self) -> &mut ArrayD<f64> {
        &mut self.geometry.data
    }

    pub fn axes_manager(&self) -> &AxesManager {
        &self.geometry.axes
    }

    pub fn axes_manager_mut(&mut self) -> &mut AxesManager {
        &mut self.geometry.axes
    }

    pub fn mapped_parameters(&self) -> &MappedParameters {
        &self.mapped_parameters
    }

    pub fn mapped_parameters_mut(&mut self) -> &mut MappedParameters {
        &mut self.mapped_parameters
    }

    pub fn original_parameters(&self) -> &OriginalParameters {
        &self.original_parameters
    }

    pub fn original_parameters_mut(&mut self) -> &mut OriginalParameters {
        &mut self.original_parameters
    }

    pub fn attributes(&self) -> &SignalAttributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut SignalAttributes {
        &mut self.attributes
    }

    pub fn options(&self) -> &SignalOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SignalOptions {
        &mut self.options
    }

    pub fn title(&self) -> &str {
        &self.mapped_parameters.title
    }

    // ---- Read path ----

    /// Signal-space frame at `navigation` (one index per navigation axis,
    /// ascending storage order), or at the navigation cursor when `None`.
    pub fn extract(&self, navigation: Option<&[usize]>) -> SignalResult<ArrayViewD<'_, f64>> {
        self.extract_with(&self.geometry.axes, navigation)
    }

    /// Like [`Signal::extract`] with the partition taken from `axes`, which
    /// must describe this buffer's shape.
    pub fn extract_with(
        &self, axes: &AxesManager, navigation: Option<&[usize]>,
    ) -> SignalResult<ArrayViewD<'_, f64>> {
        axes.validate_shape(self.geometry.data.shape())?;
        let tuple = match navigation {
            Some(coordinates) => axes.slice_tuple_for(coordinates)?,
            None => axes.current_slice_tuple(),
        };
        let info = tuple.to_slice_info();
        Ok(self.geometry.data.slice(info.as_slice()))
    }

    /// Move the navigation cursor and redraw.
    pub fn set_navigation_position(&mut self, navigation: &[usize]) -> SignalResult<()> {
        self.geometry.axes.set_navigation_position(navigation)?;
        self.notify_geometry_changed();
        Ok(())
    }

    /// Re-read every axis size from the buffer.
    ///
    /// Errors
    /// ------
    /// - `AxesError::AxisCountMismatch` when the buffer gained or lost
    ///   dimensions; `AxesError::ZeroSize` for an empty dimension.
    pub fn get_dimensions_from_data(&mut self) -> SignalResult<()> {
        let shape = self.geometry.data.shape().to_vec();
        self.geometry.axes.refresh_sizes(&shape)?;
        for axis in self.geometry.axes.axes() {
            info!(name = %axis.name, size = axis.size(), "axis size read from data");
        }
        self.notify_geometry_changed();
        Ok(())
    }

    // ---- Transformations ----

    /// Drop size-1 dimensions; returns how many were removed.
    pub fn squeeze(&mut self) -> SignalResult<usize> {
        let removed = transform::squeeze(&mut self.geometry)?;
        if removed > 0 {
            self.notify_geometry_changed();
        }
        Ok(removed)
    }

    /// Crop axis `axis` to storage indices `[start, end)`, then squeeze.
    pub fn crop_in_pixels(
        &mut self, axis: isize, start: Option<usize>, end: Option<usize>,
    ) -> SignalResult<()> {
        let axis = self.geometry.axes.normalize(axis)?;
        let geometry = transform::crop(&self.geometry, axis, start, end)?;
        self.commit(geometry, "crop");
        Ok(())
    }

    /// Crop axis `axis` to the coordinate range `[start, end)`.
    ///
    /// Coordinates convert to indices with `value_to_index` (nearest,
    /// clamped), then the pixel crop applies.
    pub fn crop_in_units(
        &mut self, axis: isize, start: Option<f64>, end: Option<f64>,
    ) -> SignalResult<()> {
        let descriptor = self.geometry.axes.axis(axis)?;
        let first = start.map(|x| descriptor.value_to_index(x));
        let last = end.map(|x| descriptor.value_to_index(x));
        self.crop_in_pixels(axis, first, last)
    }

    /// Sum-bin to `new_shape` (storage order) under the configured
    /// [`RebinPolicy`](crate::signal::options::RebinPolicy).
    pub fn rebin(&mut self, new_shape: &[usize]) -> SignalResult<()> {
        let geometry = transform::rebin(&self.geometry, new_shape, self.options.rebin_policy)?;
        self.commit(geometry, "rebin");
        Ok(())
    }

    /// Sum over axis `axis`. Returns the reduced copy for
    /// [`ReduceMode::NewSignal`], `None` for [`ReduceMode::InPlace`].
    pub fn sum(&mut self, axis: isize, mode: ReduceMode) -> SignalResult<Option<Signal>> {
        self.reduce_with(axis, Reduction::Sum, mode)
    }

    /// Average over axis `axis`; see [`Signal::sum`].
    pub fn mean(&mut self, axis: isize, mode: ReduceMode) -> SignalResult<Option<Signal>> {
        self.reduce_with(axis, Reduction::Mean, mode)
    }

    fn reduce_with(
        &mut self, axis: isize, reduction: Reduction, mode: ReduceMode,
    ) -> SignalResult<Option<Signal>> {
        let axis = self.geometry.axes.normalize(axis)?;
        let geometry = transform::reduce(&self.geometry, axis, reduction)?;
        match mode {
            ReduceMode::InPlace => {
                self.commit(geometry, "reduce");
                Ok(None)
            }
            ReduceMode::NewSignal => Ok(Some(self.derive(geometry))),
        }
    }

    /// Split axis `axis` into independent signals.
    ///
    /// Errors
    /// ------
    /// - `SignalError::SplitUnspecified` for [`SplitSpec::Remembered`] when
    ///   `attributes.splitting_steps` is unset.
    /// - `InvalidPartCount` / `InvalidSplitSteps` for unusable boundaries.
    pub fn split_in(&self, axis: isize, spec: SplitSpec) -> SignalResult<Vec<Signal>> {
        let axis = self.geometry.axes.normalize(axis)?;
        let size = self.geometry.axes.axes()[axis].size();
        let nodes = match spec {
            SplitSpec::Parts(parts) => cut_nodes_for_parts(size, parts)?,
            SplitSpec::Steps(steps) => cut_nodes_for_steps(size, &steps)?,
            SplitSpec::Remembered => {
                let steps =
                    self.attributes.splitting_steps.as_ref().ok_or(SignalError::SplitUnspecified)?;
                info!(?steps, "splitting with the remembered splitting steps");
                cut_nodes_for_steps(size, steps)?
            }
        };
        let segments = transform::split(&self.geometry, axis, &nodes)?;
        Ok(segments.into_iter().map(|geometry| self.derive(geometry)).collect())
    }

    /// Exchange the storage positions of axes `a` and `b` and transpose
    /// the buffer accordingly.
    pub fn swap_axis(&mut self, a: isize, b: isize) -> SignalResult<()> {
        let a = self.geometry.axes.normalize(a)?;
        let b = self.geometry.axes.normalize(b)?;
        transform::swap_axes(&mut self.geometry, a, b)?;
        self.notify_geometry_changed();
        Ok(())
    }

    /// Circularly shift storage dim 0 by `n_x`, then the first `n_x` rows
    /// along storage dim 1 by `n_y`.
    pub fn roll_xy(&mut self, n_x: usize, n_y: isize) -> SignalResult<()> {
        let data = transform::roll_xy(&self.geometry.data, n_x, n_y)?;
        self.geometry.data = data;
        self.notify_geometry_changed();
        Ok(())
    }

    /// 1-D frames along storage dimension `dim` (negative counts from the
    /// last dimension).
    pub fn iterate_axis(&self, dim: isize) -> SignalResult<AxisFrames> {
        let dim = normalize_axis(dim, self.geometry.ndim())?;
        transform::iterate_axis(&self.geometry.data, dim)
    }

    // ---- Unfold / fold ----

    /// Unfold the navigation space, then the signal space. `true` when
    /// either step changed the geometry.
    pub fn unfold(&mut self) -> SignalResult<bool> {
        let navigation = self.unfold_navigation_space()?;
        let signal = self.unfold_signal_space()?;
        Ok(navigation || signal)
    }

    /// Merge every navigation axis into the last one.
    pub fn unfold_navigation_space(&mut self) -> SignalResult<bool> {
        let (navigation, signal) = self.geometry.axes.partition();
        if navigation.len() < 2 {
            info!(
                navigation_dimension = navigation.len(),
                "nothing to unfold, the navigation space is already at most 1-D"
            );
            return Ok(false);
        }
        let steady: Vec<usize> = signal.iter().map(|axis| axis.storage_position()).collect();
        let target = navigation[navigation.len() - 1].storage_position();
        self.unfold_axes(&steady, target)
    }

    /// Merge every signal axis into the last one.
    pub fn unfold_signal_space(&mut self) -> SignalResult<bool> {
        let (navigation, signal) = self.geometry.axes.partition();
        if signal.len() < 2 {
            info!(
                signal_dimension = signal.len(),
                "nothing to unfold, the signal space is already at most 1-D"
            );
            return Ok(false);
        }
        let steady: Vec<usize> = navigation.iter().map(|axis| axis.storage_position()).collect();
        let target = signal[signal.len() - 1].storage_position();
        self.unfold_axes(&steady, target)
    }

    /// Keep the storage dimensions in `steady` and merge all others into
    /// `target`.
    ///
    /// Returns `Ok(false)` (with an `info` event) when the buffer has fewer
    /// than 3 dimensions larger than 1 or nothing is left to merge.
    pub fn unfold_axes(&mut self, steady: &[usize], target: usize) -> SignalResult<bool> {
        match transform::unfold(&self.geometry, steady, target)? {
            None => {
                info!(
                    effective_dimension = effective_dimension(&self.geometry.data),
                    "nothing to unfold"
                );
                Ok(false)
            }
            Some(geometry) => {
                if self.unfolded.is_none() {
                    self.unfolded = Some(UnfoldSnapshot::of(&self.geometry));
                }
                self.commit(geometry, "unfold");
                Ok(true)
            }
        }
    }

    /// Unfold when the signal has more than two axes. Returns whether the
    /// attempt was made.
    pub fn unfold_if_multidim(&mut self) -> SignalResult<bool> {
        if self.geometry.axes.len() > 2 {
            info!("automatically unfolding the data");
            self.unfold()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Restore the pre-unfold geometry. `Ok(false)` when not unfolded.
    ///
    /// A crop, rebin or in-place reduction applied while unfolded changes
    /// the element count and discards the folded form, after which the
    /// signal is no longer unfolded.
    pub fn fold(&mut self) -> SignalResult<bool> {
        let Some(snapshot) = self.unfolded.as_ref() else {
            return Ok(false);
        };
        let geometry = transform::fold(&self.geometry, snapshot)?;
        self.unfolded = None;
        self.commit(geometry, "fold");
        Ok(true)
    }

    pub fn is_unfolded(&self) -> bool {
        self.unfolded.is_some()
    }

    /// Flatten a navigation mask to 1-D (row-major) while unfolded; any
    /// other mask is returned unchanged.
    ///
    /// Errors
    /// ------
    /// - `SignalError::MaskSizeMismatch` when an unfolded signal receives a
    ///   mask whose element count differs from the navigation size.
    pub fn correct_navigation_mask(&self, mask: &ArrayD<bool>) -> SignalResult<ArrayD<bool>> {
        if !self.is_unfolded() {
            return Ok(mask.clone());
        }
        let expected = self.geometry.axes.navigation_size();
        if mask.len() != expected {
            return Err(SignalError::MaskSizeMismatch { expected, actual: mask.len() });
        }
        Ok(mask.to_shape(vec![mask.len()])?.into_owned())
    }

    // ---- Viewing ----

    pub fn plot_kind(&self) -> Option<PlotKind> {
        PlotKind::for_signal_dimension(self.geometry.axes.signal_dimension())
    }

    /// Overview of the navigation space for the attached viewer.
    pub fn explorer(&self) -> Option<ArrayD<f64>> {
        explorer(&self.geometry)
    }

    pub fn plot_labels(&self) -> Option<PlotLabels> {
        plot_labels(&self.geometry, &self.mapped_parameters.title)
    }

    /// Attach and open `viewer`, closing any previous one first.
    ///
    /// Errors
    /// ------
    /// - `SignalError::UnsupportedPlotDimension` for a signal dimension
    ///   other than 1 or 2; nothing is closed or opened.
    /// - `SignalError::Viewer` when `viewer.open` fails; the viewer is not
    ///   attached.
    pub fn plot(&mut self, viewer: Box<dyn Viewer>) -> SignalResult<()> {
        let signal_dimension = self.geometry.axes.signal_dimension();
        if PlotKind::for_signal_dimension(signal_dimension).is_none() {
            return Err(SignalError::UnsupportedPlotDimension { signal_dimension });
        }
        self.close_viewer();
        let mut viewer = viewer;
        viewer.open(self)?;
        self.viewer = Some(viewer);
        Ok(())
    }

    /// Detach the viewer, closing it best-effort.
    pub fn close_viewer(&mut self) {
        if let Some(mut viewer) = self.viewer.take() {
            if let Err(err) = viewer.close() {
                warn!(error = %err, "failed to close the previous viewer");
            }
        }
    }

    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    // ---- Internals ----

    fn commit(&mut self, geometry: Geometry, operation: &'static str) {
        debug!(operation, shape = ?geometry.data.shape(), "geometry updated");
        let folded_len =
            self.unfolded.as_ref().map(|snapshot| snapshot.shape.iter().product::<usize>());
        if folded_len.is_some_and(|len| len != geometry.data.len()) {
            warn!(operation, "element count changed while unfolded, the folded form is discarded");
            self.unfolded = None;
        }
        self.geometry = geometry;
        self.notify_geometry_changed();
    }

    fn notify_geometry_changed(&mut self) {
        let Some(mut viewer) = self.viewer.take() else {
            return;
        };
        if viewer.is_active() {
            if let Err(err) = viewer.geometry_changed(self) {
                warn!(error = %err, "viewer failed to redraw");
            }
        }
        self.viewer = Some(viewer);
    }

    fn derive(&self, geometry: Geometry) -> Signal {
        Signal {
            geometry,
            mapped_parameters: self.mapped_parameters.clone(),
            original_parameters: self.original_parameters.clone(),
            attributes: self.attributes.clone(),
            options: self.options.clone(),
            unfolded: None,
            viewer: None,
        }
    }
}

impl Clone for Signal {
    /// Deep copy; the viewer stays with the original.
    fn clone(&self) -> Signal {
        Signal { unfolded: self.unfolded.clone(), ..self.derive(self.geometry.clone()) }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("geometry", &self.geometry)
            .field("mapped_parameters", &self.mapped_parameters)
            .field("original_parameters", &self.original_parameters)
            .field("attributes", &self.attributes)
            .field("options", &self.options)
            .field("unfolded", &self.unfolded)
            .field("viewer_attached", &self.viewer.is_some())
            .finish()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Signal")?;
        write!(f, "\tTitle: {}", self.mapped_parameters.title)?;
        if let Some(signal_type) = &self.mapped_parameters.signal_type {
            write!(f, "\n\tSignal type: {signal_type}")?;
        }
        let dims: Vec<String> = self.geometry.data.shape().iter().map(|n| n.to_string()).collect();
        write!(f, "\n\tData dimensions: ({})", dims.join(", "))?;
        if let Some(record_by) = &self.mapped_parameters.record_by {
            write!(f, "\n\tData representation: {record_by}")?;
        }
        Ok(())
    }
}
