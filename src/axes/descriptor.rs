//! Calibrated axis descriptors.
//!
//! Purpose
//! -------
//! Describe one dimension of a signal: display metadata (`name`, `units`),
//! the affine calibration `value(i) = offset + scale * i`, its length, and
//! where it currently lives in the buffer's dimension order.
//!
//! Key behaviors
//! -------------
//! - [`AxisSpec`] is the plain, serializable dictionary form exchanged with
//!   I/O collaborators.
//! - [`AxisDescriptor`] is the validated runtime form owned by an
//!   [`AxesManager`](crate::axes::AxesManager). Its bookkeeping fields
//!   (`size`, `storage_position`, `navigate`) can only be rewritten from
//!   inside the crate, so external callers cannot break the storage
//!   permutation.
//!
//! Invariants & assumptions
//! ------------------------
//! - `scale` is finite and non-zero; `offset` is finite; `size >= 1`.
//! - `index < size` (the navigation cursor).
//! - `storage_position` uniqueness is an invariant of the owning manager, not
//!   of a single descriptor.
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::axes::{
    errors::{AxesError, AxesResult},
    validation::validate_calibration,
};

/// Name and units given to axes synthesized from a bare buffer.
pub const UNDEFINED: &str = "undefined";

/// `AxisSpec` — dictionary form of one axis.
///
/// Fields
/// ------
/// - `name`, `units`: display metadata.
/// - `scale`, `offset`: affine calibration.
/// - `size`: extent along this axis.
/// - `storage_position`: index into the buffer's dimension order.
/// - `navigate`: optional partition flag. `Some(true)` marks a navigation
///   axis, `Some(false)` a signal axis, `None` lets the manager apply its
///   default partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub name: String,
    pub scale: f64,
    pub offset: f64,
    pub size: usize,
    pub units: String,
    pub storage_position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate: Option<bool>,
}

impl AxisSpec {
    /// Build a spec with explicit calibration and no partition flag.
    pub fn new(
        name: impl Into<String>, scale: f64, offset: f64, size: usize, units: impl Into<String>,
        storage_position: usize,
    ) -> AxisSpec {
        AxisSpec {
            name: name.into(),
            scale,
            offset,
            size,
            units: units.into(),
            storage_position,
            navigate: None,
        }
    }

    /// Default spec for a buffer dimension nobody described:
    /// `name = units = "undefined"`, `scale = 1`, `offset = 0`.
    pub fn undefined(size: usize, storage_position: usize) -> AxisSpec {
        AxisSpec::new(UNDEFINED, 1.0, 0.0, size, UNDEFINED, storage_position)
    }

    /// Return the spec with an explicit partition flag.
    pub fn with_navigate(mut self, navigate: bool) -> AxisSpec {
        self.navigate = Some(navigate);
        self
    }
}

/// `AxisDescriptor` — one calibrated dimension of a signal.
///
/// Purpose
/// -------
/// Map storage indices to physical coordinates and record which buffer
/// dimension the axis refers to, whether it belongs to the navigation or the
/// signal subspace, and the current navigation cursor.
///
/// Fields
/// ------
/// - `name`, `units`: `String`
///   Display metadata; never used for computation.
/// - `scale`, `offset`: `f64`
///   Calibration. A negative `scale` means coordinates decrease with index.
/// - `size`: `usize` (read via [`AxisDescriptor::size`])
///   Always equal to the buffer extent at `storage_position`.
/// - `storage_position`: `usize` (read via
///   [`AxisDescriptor::storage_position`])
/// - `navigate`: `bool` (read via [`AxisDescriptor::is_navigation`])
/// - `index`: `usize` (read via [`AxisDescriptor::index`])
///   Navigation cursor used by [`AxesManager::current_slice_tuple`].
///
/// Notes
/// -----
/// - `name`, `units`, `scale` and `offset` are public: recalibrating an axis
///   never affects storage bookkeeping. Callers that assign `scale` directly
///   are responsible for keeping it non-zero.
///
/// [`AxesManager::current_slice_tuple`]: crate::axes::AxesManager::current_slice_tuple
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDescriptor {
    /// Display name.
    pub name: String,
    /// Display units.
    pub units: String,
    /// Coordinate step per storage index.
    pub scale: f64,
    /// Coordinate of storage index 0.
    pub offset: f64,
    size: usize,
    storage_position: usize,
    navigate: bool,
    index: usize,
}

impl AxisDescriptor {
    /// Build a validated descriptor from its dictionary form.
    ///
    /// Parameters
    /// ----------
    /// - `axis`: `usize`
    ///   Presentation index, used for error reporting only.
    /// - `spec`: `&AxisSpec`
    ///   Source values. `spec.navigate` is ignored; the partition flag is
    ///   passed explicitly as `navigate` because the manager resolves
    ///   defaults across all axes at once.
    /// - `navigate`: `bool`
    ///
    /// Errors
    /// ------
    /// - `AxesError::InvalidScale` / `InvalidOffset` from
    ///   [`validate_calibration`].
    /// - `AxesError::ZeroSize` when `spec.size == 0`.
    pub fn from_spec(axis: usize, spec: &AxisSpec, navigate: bool) -> AxesResult<AxisDescriptor> {
        validate_calibration(axis, spec.scale, spec.offset)?;
        if spec.size == 0 {
            return Err(AxesError::ZeroSize { axis });
        }
        Ok(AxisDescriptor {
            name: spec.name.clone(),
            units: spec.units.clone(),
            scale: spec.scale,
            offset: spec.offset,
            size: spec.size,
            storage_position: spec.storage_position,
            navigate,
            index: 0,
        })
    }

    /// Dictionary form, including the resolved partition flag.
    pub fn to_spec(&self) -> AxisSpec {
        AxisSpec {
            name: self.name.clone(),
            scale: self.scale,
            offset: self.offset,
            size: self.size,
            units: self.units.clone(),
            storage_position: self.storage_position,
            navigate: Some(self.navigate),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn storage_position(&self) -> usize {
        self.storage_position
    }

    /// `true` for navigation axes, `false` for signal (slicing) axes.
    pub fn is_navigation(&self) -> bool {
        self.navigate
    }

    pub fn is_signal(&self) -> bool {
        !self.navigate
    }

    /// Current navigation cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the navigation cursor.
    ///
    /// Errors
    /// ------
    /// - `AxesError::NavigationIndexOutOfRange` when `index >= size`. The
    ///   `axis` field of the error is the storage position, since a lone
    ///   descriptor does not know its presentation index.
    pub fn set_index(&mut self, index: usize) -> AxesResult<()> {
        if index >= self.size {
            return Err(AxesError::NavigationIndexOutOfRange {
                axis: self.storage_position,
                index,
                size: self.size,
            });
        }
        self.index = index;
        Ok(())
    }

    /// Physical coordinate of storage index `i`: `offset + scale * i`.
    ///
    /// `i` is not bounds-checked; extrapolation past the axis is allowed.
    pub fn index_to_value(&self, i: usize) -> f64 {
        self.offset + self.scale * i as f64
    }

    /// Coordinate at the navigation cursor.
    pub fn value(&self) -> f64 {
        self.index_to_value(self.index)
    }

    /// Nearest valid storage index for coordinate `x`.
    ///
    /// Inverts the calibration, rounds to the nearest integer and clamps into
    /// `[0, size - 1]`. Because the inversion divides by `scale`, the result
    /// is monotonic in `x` with the sign of `scale`. A NaN `x` maps to 0.
    pub fn value_to_index(&self, x: f64) -> usize {
        let raw = ((x - self.offset) / self.scale).round();
        let last = (self.size - 1) as f64;
        if raw.is_nan() {
            return 0;
        }
        raw.clamp(0.0, last) as usize
    }

    /// All coordinates `offset + scale * i` for `i in 0..size`.
    pub fn coordinate_array(&self) -> Array1<f64> {
        Array1::from_iter((0..self.size).map(|i| self.index_to_value(i)))
    }

    /// `"name (units)"`, the label plotting collaborators put on an axis.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.units)
    }

    /// Point the descriptor at a new buffer dimension with a new extent.
    ///
    /// Pure field update; no buffer access. Clamps the navigation cursor into
    /// the new extent.
    pub(crate) fn retarget(&mut self, new_storage_position: usize, new_size: usize) {
        self.storage_position = new_storage_position;
        self.size = new_size;
        if self.index >= new_size {
            self.index = new_size.saturating_sub(1);
        }
    }

    pub(crate) fn set_navigate(&mut self, navigate: bool) {
        self.navigate = navigate;
    }
}
