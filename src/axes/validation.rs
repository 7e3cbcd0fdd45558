//! axes::validation — shared guards for axis calibration and storage layout.
//!
//! Purpose
//! -------
//! Centralize the checks every axis construction path needs: calibration
//! values, storage-position permutations, agreement between axis sizes and a
//! buffer shape, and normalisation of possibly-negative axis arguments.
//!
//! Conventions
//! -----------
//! - Pure functions, no allocation beyond error payloads.
//! - Callers validate *before* mutating, so a rejected operation never leaves
//!   a manager and its buffer disagreeing.
use crate::axes::errors::{AxesError, AxesResult};

/// Validate the affine calibration of one axis.
///
/// Parameters
/// ----------
/// - `axis`: `usize`
///   Presentation index used only for error reporting.
/// - `scale`: `f64`
///   Must be finite and non-zero. Negative values are allowed.
/// - `offset`: `f64`
///   Must be finite.
///
/// Errors
/// ------
/// - `AxesError::InvalidScale` when `scale == 0.0` or non-finite.
/// - `AxesError::InvalidOffset` when `offset` is non-finite.
pub fn validate_calibration(axis: usize, scale: f64, offset: f64) -> AxesResult<()> {
    if !scale.is_finite() || scale == 0.0 {
        return Err(AxesError::InvalidScale { axis, value: scale });
    }
    if !offset.is_finite() {
        return Err(AxesError::InvalidOffset { axis, value: offset });
    }
    Ok(())
}

/// Check that `positions` is a permutation of `0..positions.len()`.
///
/// Errors
/// ------
/// - `AxesError::InvalidStoragePositions` on any duplicate or out-of-range
///   entry.
pub fn validate_storage_positions(positions: &[usize]) -> AxesResult<()> {
    let ndim = positions.len();
    let mut seen = vec![false; ndim];
    for &position in positions {
        if position >= ndim || seen[position] {
            return Err(AxesError::InvalidStoragePositions { positions: positions.to_vec(), ndim });
        }
        seen[position] = true;
    }
    Ok(())
}

/// Check that `(storage_position, size)` pairs describe `shape` exactly.
///
/// Parameters
/// ----------
/// - `layout`: `&[(usize, usize)]`
///   One `(storage_position, size)` pair per axis, in presentation order.
/// - `shape`: `&[usize]`
///   Buffer shape in storage order.
///
/// Errors
/// ------
/// - `AxesError::AxisCountMismatch` when the lengths differ.
/// - `AxesError::InvalidStoragePositions` when positions are not a
///   permutation.
/// - `AxesError::SizeMismatch` for the first axis whose size differs from
///   the buffer extent at its storage position.
pub fn validate_against_shape(layout: &[(usize, usize)], shape: &[usize]) -> AxesResult<()> {
    if layout.len() != shape.len() {
        return Err(AxesError::AxisCountMismatch { expected: shape.len(), actual: layout.len() });
    }
    let positions: Vec<usize> = layout.iter().map(|&(position, _)| position).collect();
    validate_storage_positions(&positions)?;
    for (axis, &(position, size)) in layout.iter().enumerate() {
        let extent = shape[position];
        if size != extent {
            return Err(AxesError::SizeMismatch { axis, position, size, extent });
        }
    }
    Ok(())
}

/// Map a possibly-negative axis argument onto `0..naxes`.
///
/// `-1` addresses the last axis, `-naxes` the first.
///
/// Errors
/// ------
/// - `AxesError::AxisOutOfRange` when `axis` is outside `-naxes..naxes`.
pub fn normalize_axis(axis: isize, naxes: usize) -> AxesResult<usize> {
    let n = naxes as isize;
    let resolved = if axis < 0 { axis + n } else { axis };
    if resolved < 0 || resolved >= n {
        return Err(AxesError::AxisOutOfRange { axis, naxes });
    }
    Ok(resolved as usize)
}
