//! signal::parameters — passive metadata carried alongside the buffer.
//!
//! Purpose
//! -------
//! Replace free-form attribute injection with explicit containers:
//! [`MappedParameters`] (a closed record of presentation metadata plus an
//! opaque overflow map), [`OriginalParameters`] (provenance metadata kept
//! verbatim) and [`SignalAttributes`] (the dictionary's `attributes`
//! entry).
//!
//! Invariants & assumptions
//! ------------------------
//! - The engine only reads `title`, `signal_type`, `record_by` (for
//!   `Display`) and `splitting_steps` (for `split_in`). Everything in the
//!   `extra` maps and in [`OriginalParameters`] is carried, never inspected.
//! - All containers are plain values; cloning is a deep copy.
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provenance metadata copied verbatim from ingestion.
pub type OriginalParameters = Map<String, Value>;

/// Normalized, semantically meaningful metadata.
///
/// Unknown keys from a dictionary land in `extra` and are written back
/// unchanged by a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedParameters {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MappedParameters {
    pub fn with_title(title: impl Into<String>) -> MappedParameters {
        MappedParameters { title: title.into(), ..MappedParameters::default() }
    }

    /// Fill an empty `title` from `original_filename` with its extension
    /// removed; leaves it empty for synthetic signals.
    pub fn resolve_title(&mut self) {
        if !self.title.is_empty() {
            return;
        }
        if let Some(filename) = &self.original_filename {
            self.title = Path::new(filename).with_extension("").to_string_lossy().into_owned();
        }
    }
}

/// The `attributes` entry of a signal dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalAttributes {
    /// Split configuration reused by `split_in` when called without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitting_steps: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_property: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
