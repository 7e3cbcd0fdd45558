//! decomposition — exporting factor and score matrices as signals.
//!
//! Purpose
//! -------
//! Give a decomposition (PCA/ICA/NMF, computed elsewhere) a way back into
//! calibrated form: factor and score matrices are reshaped using the
//! source signal's axis groupings and wrapped in new signals, and file
//! formats are mapped to the export layout they can hold.
//!
//! Key behaviors
//! -------------
//! - [`FormatTable`] classifies extensions as multidimensional, image or
//!   spectrum formats.
//! - [`ComponentSelection`] resolves which components to export.
//! - [`export_plan`] + [`export_signals`] build the signals for one format;
//!   the individual builders are public as well.
//!
//! Invariants & assumptions
//! ------------------------
//! - Factor matrices are `signal_size × n_components`; score matrices are
//!   `n_components × navigation_size`.
//! - Nothing here writes files; writers receive the returned signals and
//!   the names from [`ExportPlan::file_names`].

pub mod errors;
pub mod export;
pub mod formats;
pub mod selection;

// ---- Re-exports (primary public surface) ---
pub use self::errors::{DecompositionError, DecompositionResult};
pub use self::export::{
    ExportPlan, ExportTarget, export_plan, export_signals, factor_spectra, factors_to_signal,
    score_spectra, scores_to_signal,
};
pub use self::formats::{ExportFormat, FormatClass, FormatTable};
pub use self::selection::ComponentSelection;

pub mod prelude {
    pub use super::errors::{DecompositionError, DecompositionResult};
    pub use super::export::{ExportPlan, ExportTarget, export_plan, export_signals};
    pub use super::formats::{FormatClass, FormatTable};
    pub use super::selection::ComponentSelection;
}
