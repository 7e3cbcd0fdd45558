//! axes::manager — ordered axis collection and its derived views.
//!
//! Purpose
//! -------
//! Own the [`AxisDescriptor`]s of one signal and answer every question that
//! depends on all of them together: which axes navigate and which are
//! sliced over, what indexing tuple extracts one frame, and how storage
//! positions must be rewritten after an axis disappears or several axes
//! merge.
//!
//! Key behaviors
//! -------------
//! - Build from [`AxisSpec`]s, validating calibration and the storage
//!   permutation; optionally check agreement with a buffer shape.
//! - Derive the navigation/signal partition from per-axis flags on every
//!   call ([`AxesManager::partition`]). Nothing derived is cached.
//! - Build [`SliceTuple`]s in storage order for frame extraction.
//! - Renumber storage positions after removal
//!   ([`AxesManager::renumber_after_removal`]) or after a fold-style reshape
//!   ([`AxesManager::renumber_after_reshape`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `{axis.storage_position()}` is exactly `{0, ..., len - 1}`.
//! - Presentation order (the order of [`AxesManager::axes`]) is independent
//!   of storage order and is never changed by renumbering.
//! - By convention the signal axes occupy the highest storage positions;
//!   [`AxesManager::set_signal_dimension`] and
//!   [`AxesManager::rederive_partition`] re-establish that convention.
//!
//! Conventions
//! -----------
//! - "axis" arguments are presentation indices; "position" arguments are
//!   storage positions.
//! - Derived axis lists are always ordered by ascending storage position.
//!
//! Testing notes
//! -------------
//! - Unit tests below cover construction, partition derivation, slice
//!   tuples, both renumbering paths and size refresh. Signal-level
//!   properties (squeeze, unfold/fold, swap involution) are exercised in
//!   `signal::transform` and the integration tests.
use ndarray::SliceInfoElem;

use crate::axes::{
    descriptor::{AxisDescriptor, AxisSpec},
    errors::{AxesError, AxesResult},
    validation::{normalize_axis, validate_against_shape, validate_storage_positions},
};

/// One entry of a [`SliceTuple`]: a fixed index or the whole dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexExpr {
    /// Fixed index along a navigation dimension.
    Fixed(usize),
    /// Full range along a signal dimension.
    Full,
}

/// Per-storage-dimension indexing expression extracting one frame.
///
/// Entry `k` applies to buffer dimension `k`, regardless of presentation
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceTuple(Vec<IndexExpr>);

impl SliceTuple {
    pub fn exprs(&self) -> &[IndexExpr] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into ndarray slicing arguments, usable as
    /// `array.slice(tuple.to_slice_info().as_slice())`.
    pub fn to_slice_info(&self) -> Vec<SliceInfoElem> {
        self.0
            .iter()
            .map(|expr| match *expr {
                IndexExpr::Fixed(i) => SliceInfoElem::Index(i as isize),
                IndexExpr::Full => SliceInfoElem::Slice { start: 0, end: None, step: 1 },
            })
            .collect()
    }
}

/// Description of a fold-style merge for
/// [`AxesManager::renumber_after_reshape`].
///
/// Fields
/// ------
/// - `target`: storage position of the axis that survives and absorbs.
/// - `absorbed`: storage positions of the axes merged into `target` and
///   removed.
/// - `merged_size`: extent of `target` after the merge (product of all
///   merged extents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeMapping {
    pub target: usize,
    pub absorbed: Vec<usize>,
    pub merged_size: usize,
}

/// `AxesManager` — ordered collection of calibrated axes.
///
/// Purpose
/// -------
/// Be the single owner of axis bookkeeping for one signal. Transformations
/// replace or renumber it in lock-step with the buffer; readers (frame
/// extraction, plotting, decomposition export) only query it.
///
/// Notes
/// -----
/// - `Clone` is a deep copy: descriptors are plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesManager {
    axes: Vec<AxisDescriptor>,
}

impl AxesManager {
    /// Build a manager from dictionary specs.
    ///
    /// Parameters
    /// ----------
    /// - `specs`: `&[AxisSpec]`
    ///   One spec per axis, in presentation order.
    /// - `default_signal_dimension`: `usize`
    ///   Used only when no spec carries a `navigate` flag: the
    ///   `default_signal_dimension` highest storage positions become signal
    ///   axes (clamped to the number of axes). When any spec carries a flag,
    ///   unflagged specs are treated as navigation axes.
    ///
    /// Errors
    /// ------
    /// - `AxesError::InvalidStoragePositions` when positions are not a
    ///   permutation.
    /// - Calibration and size errors from [`AxisDescriptor::from_spec`].
    pub fn new(specs: &[AxisSpec], default_signal_dimension: usize) -> AxesResult<AxesManager> {
        let positions: Vec<usize> = specs.iter().map(|spec| spec.storage_position).collect();
        validate_storage_positions(&positions)?;

        let flagged = specs.iter().any(|spec| spec.navigate.is_some());
        let first_signal = specs.len() - default_signal_dimension.min(specs.len());
        let axes = specs
            .iter()
            .enumerate()
            .map(|(axis, spec)| {
                let navigate = if flagged {
                    spec.navigate.unwrap_or(true)
                } else {
                    spec.storage_position < first_signal
                };
                AxisDescriptor::from_spec(axis, spec, navigate)
            })
            .collect::<AxesResult<Vec<_>>>()?;
        Ok(AxesManager { axes })
    }

    /// [`AxesManager::new`] followed by a check against `shape`.
    pub fn with_shape(
        specs: &[AxisSpec], shape: &[usize], default_signal_dimension: usize,
    ) -> AxesResult<AxesManager> {
        let manager = AxesManager::new(specs, default_signal_dimension)?;
        manager.validate_shape(shape)?;
        Ok(manager)
    }

    /// One undefined axis per buffer dimension, presentation order equal to
    /// storage order.
    pub fn from_shape(shape: &[usize], default_signal_dimension: usize) -> AxesResult<AxesManager> {
        AxesManager::new(&undefined_specs(shape), default_signal_dimension)
    }

    // ---- Read access ----

    pub fn axes(&self) -> &[AxisDescriptor] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Axis at presentation index `axis`; negative values count from the end.
    pub fn axis(&self, axis: isize) -> AxesResult<&AxisDescriptor> {
        let i = self.normalize(axis)?;
        Ok(&self.axes[i])
    }

    /// Mutable access for recalibration (`name`, `units`, `scale`,
    /// `offset`, cursor). Storage bookkeeping stays crate-private.
    pub fn axis_mut(&mut self, axis: isize) -> AxesResult<&mut AxisDescriptor> {
        let i = self.normalize(axis)?;
        Ok(&mut self.axes[i])
    }

    /// Resolve a possibly-negative presentation index.
    pub fn normalize(&self, axis: isize) -> AxesResult<usize> {
        normalize_axis(axis, self.axes.len())
    }

    /// Presentation index of the axis stored at `position`.
    pub fn presentation_index(&self, position: usize) -> AxesResult<usize> {
        self.axes
            .iter()
            .position(|axis| axis.storage_position() == position)
            .ok_or(AxesError::StoragePositionNotFound { position })
    }

    pub fn axis_at_storage(&self, position: usize) -> Option<&AxisDescriptor> {
        self.axes.iter().find(|axis| axis.storage_position() == position)
    }

    /// Axis sizes in storage order; the buffer shape this manager describes.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = vec![0; self.axes.len()];
        for axis in &self.axes {
            shape[axis.storage_position()] = axis.size();
        }
        shape
    }

    /// Dictionary form of every axis, in presentation order.
    pub fn to_specs(&self) -> Vec<AxisSpec> {
        self.axes.iter().map(AxisDescriptor::to_spec).collect()
    }

    /// Independent copy; descriptors are copied by value.
    pub fn deep_copy(&self) -> AxesManager {
        self.clone()
    }

    // ---- Partition ----

    /// Number of axes currently flagged as signal axes.
    pub fn signal_dimension(&self) -> usize {
        self.axes.iter().filter(|axis| axis.is_signal()).count()
    }

    pub fn navigation_dimension(&self) -> usize {
        self.axes.len() - self.signal_dimension()
    }

    /// `(navigation_axes, signal_axes)`, each ordered by ascending storage
    /// position. Recomputed from the flags on every call.
    pub fn partition(&self) -> (Vec<&AxisDescriptor>, Vec<&AxisDescriptor>) {
        let navigation = self.ordered(true).into_iter().map(|i| &self.axes[i]).collect();
        let signal = self.ordered(false).into_iter().map(|i| &self.axes[i]).collect();
        (navigation, signal)
    }

    /// Signal-space axes, ascending storage position.
    pub fn slicing_axes(&self) -> Vec<&AxisDescriptor> {
        self.partition().1
    }

    /// Navigation-space axes, ascending storage position.
    pub fn non_slicing_axes(&self) -> Vec<&AxisDescriptor> {
        self.partition().0
    }

    /// Sizes of the signal axes, ascending storage position.
    pub fn signal_shape(&self) -> Vec<usize> {
        self.slicing_axes().iter().map(|axis| axis.size()).collect()
    }

    /// Sizes of the navigation axes, ascending storage position.
    pub fn navigation_shape(&self) -> Vec<usize> {
        self.non_slicing_axes().iter().map(|axis| axis.size()).collect()
    }

    /// Number of elements in one frame.
    pub fn signal_size(&self) -> usize {
        self.signal_shape().iter().product()
    }

    /// Number of frames.
    pub fn navigation_size(&self) -> usize {
        self.navigation_shape().iter().product()
    }

    /// Flag the `signal_dimension` highest storage positions as signal axes
    /// and every other axis as navigation.
    ///
    /// Errors
    /// ------
    /// - `AxesError::InvalidSignalDimension` when `signal_dimension > len`.
    pub fn set_signal_dimension(&mut self, signal_dimension: usize) -> AxesResult<()> {
        if signal_dimension > self.axes.len() {
            return Err(AxesError::InvalidSignalDimension {
                requested: signal_dimension,
                naxes: self.axes.len(),
            });
        }
        self.flag_highest_as_signal(signal_dimension);
        Ok(())
    }

    /// Keep the current number of signal axes but move the signal flags back
    /// onto the highest storage positions (needed after positions swap).
    pub fn rederive_partition(&mut self) {
        let signal_dimension = self.signal_dimension();
        self.flag_highest_as_signal(signal_dimension);
    }

    // ---- Frame extraction ----

    /// Indexing tuple selecting the frame at `navigation_coordinates`.
    ///
    /// Parameters
    /// ----------
    /// - `navigation_coordinates`: `&[usize]`
    ///   One storage index per navigation axis, ordered like
    ///   [`AxesManager::non_slicing_axes`] (ascending storage position).
    ///
    /// Returns
    /// -------
    /// A [`SliceTuple`] in storage order: `Fixed` at each navigation axis's
    /// storage position, `Full` at each signal axis's position.
    ///
    /// Errors
    /// ------
    /// - `AxesError::NavigationCoordinateCount` on a length mismatch.
    /// - `AxesError::NavigationIndexOutOfRange` when a coordinate is outside
    ///   its axis.
    pub fn slice_tuple_for(&self, navigation_coordinates: &[usize]) -> AxesResult<SliceTuple> {
        let navigation = self.ordered(true);
        if navigation_coordinates.len() != navigation.len() {
            return Err(AxesError::NavigationCoordinateCount {
                expected: navigation.len(),
                actual: navigation_coordinates.len(),
            });
        }
        let mut exprs = vec![IndexExpr::Full; self.axes.len()];
        for (&axis, &index) in navigation.iter().zip(navigation_coordinates) {
            let descriptor = &self.axes[axis];
            if index >= descriptor.size() {
                return Err(AxesError::NavigationIndexOutOfRange {
                    axis,
                    index,
                    size: descriptor.size(),
                });
            }
            exprs[descriptor.storage_position()] = IndexExpr::Fixed(index);
        }
        Ok(SliceTuple(exprs))
    }

    /// Indexing tuple at the current navigation cursor.
    pub fn current_slice_tuple(&self) -> SliceTuple {
        let mut exprs = vec![IndexExpr::Full; self.axes.len()];
        for axis in self.axes.iter().filter(|axis| axis.is_navigation()) {
            exprs[axis.storage_position()] = IndexExpr::Fixed(axis.index());
        }
        SliceTuple(exprs)
    }

    /// Current cursor of each navigation axis, ascending storage position.
    pub fn navigation_position(&self) -> Vec<usize> {
        self.non_slicing_axes().iter().map(|axis| axis.index()).collect()
    }

    /// Move the navigation cursor. All coordinates are validated before any
    /// cursor moves.
    pub fn set_navigation_position(&mut self, navigation_coordinates: &[usize]) -> AxesResult<()> {
        self.slice_tuple_for(navigation_coordinates)?;
        for (axis, &index) in self.ordered(true).into_iter().zip(navigation_coordinates) {
            self.axes[axis].set_index(index)?;
        }
        Ok(())
    }

    // ---- Structural rewrites ----

    /// Drop the axis stored at `removed_position` and close the gap.
    ///
    /// Every remaining axis whose storage position was greater than
    /// `removed_position` moves down by one. Returns the removed descriptor.
    ///
    /// Errors
    /// ------
    /// - `AxesError::StoragePositionNotFound` when no axis is stored there.
    pub fn renumber_after_removal(&mut self, removed_position: usize) -> AxesResult<AxisDescriptor> {
        let index = self.presentation_index(removed_position)?;
        let removed = self.axes.remove(index);
        for axis in &mut self.axes {
            if axis.storage_position() > removed_position {
                let size = axis.size();
                axis.retarget(axis.storage_position() - 1, size);
            }
        }
        Ok(removed)
    }

    /// Rewrite descriptors after several axes were merged into one.
    ///
    /// Parameters
    /// ----------
    /// - `mapping`: [`ReshapeMapping`]
    ///   `target` survives with size `merged_size`; every position in
    ///   `absorbed` is removed.
    ///
    /// Key behaviors
    /// -------------
    /// - The target's `name` and `units` become the comma-joined names/units
    ///   of target then absorbed axes, the absorbed ones in ascending storage
    ///   order.
    /// - Survivors are renumbered densely, preserving their relative storage
    ///   order; presentation order is untouched.
    /// - The target's cursor resets to 0.
    ///
    /// Errors
    /// ------
    /// - `AxesError::StoragePositionNotFound` when `target` or an absorbed
    ///   position has no axis, or `absorbed` contains `target`.
    /// - `AxesError::ZeroSize` when `merged_size == 0`.
    ///
    /// Notes
    /// -----
    /// - All lookups happen before the first mutation, so an error leaves the
    ///   manager unchanged.
    pub fn renumber_after_reshape(&mut self, mapping: &ReshapeMapping) -> AxesResult<()> {
        let target = self.presentation_index(mapping.target)?;
        if mapping.merged_size == 0 {
            return Err(AxesError::ZeroSize { axis: target });
        }
        let mut absorbed_positions = mapping.absorbed.clone();
        absorbed_positions.sort_unstable();
        absorbed_positions.dedup();
        let mut absorbed = Vec::with_capacity(absorbed_positions.len());
        for &position in &absorbed_positions {
            if position == mapping.target {
                return Err(AxesError::StoragePositionNotFound { position });
            }
            absorbed.push(self.presentation_index(position)?);
        }

        let mut name = self.axes[target].name.clone();
        let mut units = self.axes[target].units.clone();
        for &axis in &absorbed {
            name.push(',');
            name.push_str(&self.axes[axis].name);
            units.push(',');
            units.push_str(&self.axes[axis].units);
        }
        self.axes[target].name = name;
        self.axes[target].units = units;

        let mut removal_order = absorbed;
        removal_order.sort_unstable_by(|a, b| b.cmp(a));
        for axis in removal_order {
            self.axes.remove(axis);
        }

        let mut by_storage: Vec<usize> = (0..self.axes.len()).collect();
        by_storage.sort_by_key(|&i| self.axes[i].storage_position());
        for (new_position, &i) in by_storage.iter().enumerate() {
            let axis = &mut self.axes[i];
            if axis.storage_position() == mapping.target {
                axis.retarget(new_position, mapping.merged_size);
                axis.set_index(0)?;
            } else {
                let size = axis.size();
                axis.retarget(new_position, size);
            }
        }
        Ok(())
    }

    /// Exchange the storage positions of presentation axes `a` and `b`.
    ///
    /// Descriptor order is unchanged; each descriptor keeps its own size.
    pub fn swap_storage_positions(&mut self, a: isize, b: isize) -> AxesResult<()> {
        let a = self.normalize(a)?;
        let b = self.normalize(b)?;
        let (position_a, size_a) = (self.axes[a].storage_position(), self.axes[a].size());
        let (position_b, size_b) = (self.axes[b].storage_position(), self.axes[b].size());
        self.axes[a].retarget(position_b, size_a);
        self.axes[b].retarget(position_a, size_b);
        Ok(())
    }

    /// Check that this manager describes `shape` exactly.
    pub fn validate_shape(&self, shape: &[usize]) -> AxesResult<()> {
        validate_against_shape(&self.layout(), shape)
    }

    /// Re-read every axis size from `shape` (the buffer extents).
    ///
    /// Errors
    /// ------
    /// - `AxesError::AxisCountMismatch` when the dimensionality changed.
    /// - `AxesError::ZeroSize` when an extent is 0.
    ///
    /// Nothing is updated unless every extent is acceptable.
    pub fn refresh_sizes(&mut self, shape: &[usize]) -> AxesResult<()> {
        if shape.len() != self.axes.len() {
            return Err(AxesError::AxisCountMismatch {
                expected: shape.len(),
                actual: self.axes.len(),
            });
        }
        if let Some(axis) = self.axes.iter().position(|axis| shape[axis.storage_position()] == 0) {
            return Err(AxesError::ZeroSize { axis });
        }
        for axis in &mut self.axes {
            let position = axis.storage_position();
            axis.retarget(position, shape[position]);
        }
        Ok(())
    }

    // ---- Helpers ----

    fn layout(&self) -> Vec<(usize, usize)> {
        self.axes.iter().map(|axis| (axis.storage_position(), axis.size())).collect()
    }

    /// Presentation indices of navigation (`true`) or signal (`false`) axes,
    /// sorted by storage position.
    fn ordered(&self, navigate: bool) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.axes.len())
            .filter(|&i| self.axes[i].is_navigation() == navigate)
            .collect();
        indices.sort_by_key(|&i| self.axes[i].storage_position());
        indices
    }

    fn flag_highest_as_signal(&mut self, signal_dimension: usize) {
        let first_signal = self.axes.len() - signal_dimension;
        for axis in &mut self.axes {
            let navigate = axis.storage_position() < first_signal;
            axis.set_navigate(navigate);
        }
    }
}

/// Undefined specs for every dimension of `shape`.
pub fn undefined_specs(shape: &[usize]) -> Vec<AxisSpec> {
    shape.iter().enumerate().map(|(position, &size)| AxisSpec::undefined(size, position)).collect()
}
