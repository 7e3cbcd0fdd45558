//! axes — calibrated logical axes and the manager that orders them.
//!
//! Purpose
//! -------
//! Describe the logical coordinate system of an N-dimensional signal buffer:
//! one calibrated [`AxisDescriptor`] per buffer dimension, collected and
//! ordered by an [`AxesManager`] that derives the navigation/signal
//! partition, builds frame-extraction tuples, and renumbers storage
//! positions when dimensions disappear or merge.
//!
//! Key behaviors
//! -------------
//! - [`AxisSpec`] is the serializable dictionary form of one axis;
//!   [`AxisDescriptor`] is its validated runtime form.
//! - [`AxesManager`] owns the descriptors in presentation order and
//!   recomputes every derived view from per-axis flags on demand.
//! - [`validation`] centralizes calibration, permutation and shape guards.
//!
//! Invariants & assumptions
//! ------------------------
//! - Storage positions of a manager form exactly `{0, ..., n - 1}`.
//! - Axis sizes are `>= 1`; `scale` is finite and non-zero; `offset` is
//!   finite.
//! - This subtree never touches data buffers. Keeping a manager in
//!   lock-step with its buffer is the job of `signal::transform`.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_signal::axes::{AxesManager, AxisSpec};
//!
//! let specs = [
//!     AxisSpec::new("x", 0.5, 0.0, 4, "nm", 0),
//!     AxisSpec::new("Energy", 0.1, 100.0, 16, "eV", 1),
//! ];
//! let manager = AxesManager::with_shape(&specs, &[4, 16], 1).unwrap();
//! assert_eq!(manager.signal_shape(), vec![16]);
//! ```

pub mod descriptor;
pub mod errors;
pub mod manager;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::descriptor::{AxisDescriptor, AxisSpec, UNDEFINED};
pub use self::errors::{AxesError, AxesResult};
pub use self::manager::{AxesManager, IndexExpr, ReshapeMapping, SliceTuple, undefined_specs};

pub mod prelude {
    pub use super::descriptor::{AxisDescriptor, AxisSpec};
    pub use super::errors::{AxesError, AxesResult};
    pub use super::manager::{AxesManager, SliceTuple};
}
