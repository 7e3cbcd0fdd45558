//! signal::viewer — seam for an attached plotting collaborator.
//!
//! Purpose
//! -------
//! Define the [`Viewer`] trait a plotting front end implements to be
//! attached to a [`Signal`]. The signal calls it when a view opens, after
//! every geometry change, and when the view is replaced.
//!
//! Invariants & assumptions
//! ------------------------
//! - Viewers only read the signal (`extract`, `explorer`, axis labels);
//!   they never receive mutable access.
//! - Viewer failures during notification or teardown are logged and do not
//!   undo or block the geometry change that triggered them. Only
//!   [`Viewer::open`] failures reach the caller of `Signal::plot`.
use crate::signal::{errors::ViewerResult, signal::Signal};

/// Which explorer layout a signal supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// One signal axis: spectra navigated over 0, 1 or 2 axes.
    Spectrum,
    /// Two signal axes: images navigated over 0, 1 or 2 axes.
    Image,
}

impl PlotKind {
    /// Layout for `signal_dimension`, or `None` when it cannot be shown.
    pub fn for_signal_dimension(signal_dimension: usize) -> Option<PlotKind> {
        match signal_dimension {
            1 => Some(PlotKind::Spectrum),
            2 => Some(PlotKind::Image),
            _ => None,
        }
    }
}

/// A plotting collaborator attached to one signal.
pub trait Viewer {
    /// Draw `signal` for the first time.
    fn open(&mut self, signal: &Signal) -> ViewerResult<()>;

    /// Redraw after the signal's geometry changed. Only called while
    /// [`Viewer::is_active`] returns `true`.
    fn geometry_changed(&mut self, signal: &Signal) -> ViewerResult<()>;

    /// Release the view. May fail if it was already closed.
    fn close(&mut self) -> ViewerResult<()>;

    fn is_active(&self) -> bool;
}
