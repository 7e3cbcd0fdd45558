//! Export file formats and what each one can hold.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decomposition::errors::{DecompositionError, DecompositionResult};

/// Capability class of a file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatClass {
    /// Arbitrary dimensionality: every component in one file.
    MultiDim,
    /// 2-D raster images: one rendered file per component.
    Image,
    /// Single 1-D spectra: one file per component.
    Spectrum,
}

/// A supported extension with its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormat {
    pub extension: String,
    pub class: FormatClass,
}

const MULTIDIM_EXTENSIONS: &[&str] = &["rpl"];
const IMAGE_EXTENSIONS: &[&str] = &[
    "bmp", "dib", "gif", "jpeg", "jpe", "jpg", "msp", "pcx", "png", "ppm", "pbm", "pgm", "tiff",
    "tif", "xbm", "spi",
];
const SPECTRUM_EXTENSIONS: &[&str] = &["msa"];

/// Extension → class table handed to the export helpers.
///
/// `FormatTable::default()` knows the built-in writers; callers with more
/// writers extend it with [`FormatTable::with_format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTable {
    formats: Vec<ExportFormat>,
}

impl FormatTable {
    /// A table with no formats.
    pub fn empty() -> FormatTable {
        FormatTable { formats: Vec::new() }
    }

    /// Register `extension` (case-insensitive, leading dot ignored),
    /// replacing any previous class for it.
    pub fn with_format(mut self, extension: &str, class: FormatClass) -> FormatTable {
        let extension = normalize_extension(extension);
        self.formats.retain(|format| format.extension != extension);
        self.formats.push(ExportFormat { extension, class });
        self
    }

    pub fn extensions(&self, class: FormatClass) -> Vec<&str> {
        self.formats
            .iter()
            .filter(|format| format.class == class)
            .map(|format| format.extension.as_str())
            .collect()
    }

    /// Look up `extension`.
    ///
    /// Errors
    /// ------
    /// - `DecompositionError::UnsupportedFormat` (also logged at `warn`)
    ///   for unknown extensions.
    pub fn classify(&self, extension: &str) -> DecompositionResult<ExportFormat> {
        let wanted = normalize_extension(extension);
        match self.formats.iter().find(|format| format.extension == wanted) {
            Some(format) => Ok(format.clone()),
            None => {
                warn!(extension = %wanted, "format not supported for saving");
                Err(DecompositionError::UnsupportedFormat { extension: wanted })
            }
        }
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        let groups = [
            (MULTIDIM_EXTENSIONS, FormatClass::MultiDim),
            (IMAGE_EXTENSIONS, FormatClass::Image),
            (SPECTRUM_EXTENSIONS, FormatClass::Spectrum),
        ];
        groups.iter().fold(FormatTable::empty(), |table, (extensions, class)| {
            extensions.iter().fold(table, |table, extension| table.with_format(extension, *class))
        })
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
