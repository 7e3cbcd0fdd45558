//! signal — calibrated N-D datasets and their shape transformations.
//!
//! Purpose
//! -------
//! Provide the [`Signal`] composition root and everything it is built
//! from: the portable [`SignalDictionary`], metadata containers, options,
//! the [`transform`] engine, the overview/label helpers consumed by
//! viewers, and the [`Viewer`] seam itself.
//!
//! Key behaviors
//! -------------
//! - Load a signal from a dictionary, squeeze it, and snapshot it back.
//! - Crop, rebin, reduce, split, swap, unfold/fold, iterate and roll while
//!   keeping the axes consistent with the buffer.
//! - Notify an attached viewer after every committed geometry change.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every error is an "abort": the signal is unchanged when an operation
//!   returns `Err`.
//! - "Nothing to do" outcomes (unfolding low-dimensional data, folding a
//!   folded signal) are `Ok(false)` with an `info` event.
//!
//! Downstream usage
//! ----------------
//! - Most callers only need `use rust_signal::signal::prelude::*;`.
//! - I/O collaborators exchange [`SignalDictionary`] values (optionally as
//!   JSON); plotting collaborators implement [`Viewer`].
//!
//! Testing notes
//! -------------
//! - Transform functions are tested on bare geometries in their own
//!   modules; `signal.rs` tests cover normalization, ownership of derived
//!   signals, diagnostics and viewer notification.

pub mod dictionary;
pub mod errors;
pub mod explorer;
pub mod options;
pub mod parameters;
pub mod signal;
pub mod transform;
pub mod viewer;

// ---- Re-exports (primary public surface) ---
pub use self::dictionary::SignalDictionary;
pub use self::errors::{SignalError, SignalResult, ViewerError, ViewerResult};
pub use self::explorer::{PlotLabels, Scalebar};
pub use self::options::{RebinPolicy, SignalOptions};
pub use self::parameters::{MappedParameters, OriginalParameters, SignalAttributes};
pub use self::signal::{ReduceMode, Signal, SplitSpec};
pub use self::transform::{AxisFrames, Geometry, UnfoldSnapshot};
pub use self::viewer::{PlotKind, Viewer};

pub mod prelude {
    pub use super::dictionary::SignalDictionary;
    pub use super::errors::{SignalError, SignalResult, ViewerError, ViewerResult};
    pub use super::options::{RebinPolicy, SignalOptions};
    pub use super::parameters::{MappedParameters, OriginalParameters, SignalAttributes};
    pub use super::signal::{ReduceMode, Signal, SplitSpec};
    pub use super::viewer::{PlotKind, Viewer};
}
