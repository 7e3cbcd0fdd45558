//! decomposition::export — decomposition matrices back to calibrated signals.
//!
//! Purpose
//! -------
//! Turn the factor matrix (`signal_size × n_components`) and the score
//! matrix (`n_components × navigation_size`) of a decomposed signal into
//! [`Signal`]s that carry the source calibration, ready for an I/O writer.
//!
//! Key behaviors
//! -------------
//! - [`factors_to_signal`] / [`scores_to_signal`]: one stacked signal with a
//!   `factor_index` / `score_index` navigation axis at storage position 0
//!   followed by the source's signal / navigation axes as signal axes.
//! - [`factor_spectra`] / [`score_spectra`]: one 1-D signal per component.
//! - [`export_plan`] decides which of the above a file format needs and
//!   [`export_signals`] carries the plan out.
//!
//! Invariants & assumptions
//! ------------------------
//! - Matrix rows (factors) or columns (scores) enumerate the mapped space
//!   in row-major order over its axes sorted by ascending storage
//!   position, the same order an unfold produces.
//! - The source signal is only read.
//!
//! Conventions
//! -----------
//! - Exported axes are renumbered densely: the index axis at 0, the mapped
//!   axes at `1..` in their storage order. Single-component stacks are
//!   squeezed like any other loaded signal.
use ndarray::{Array2, ArrayView2, Axis};

use crate::{
    axes::descriptor::{AxisDescriptor, AxisSpec},
    decomposition::{
        errors::{DecompositionError, DecompositionResult},
        formats::{ExportFormat, FormatClass, FormatTable},
        selection::ComponentSelection,
    },
    signal::{
        dictionary::SignalDictionary,
        parameters::{MappedParameters, SignalAttributes},
        signal::Signal,
    },
};

pub const FACTOR_INDEX: &str = "factor_index";
pub const SCORE_INDEX: &str = "score_index";
pub const PEAK_CHARACTERISTICS: &str = "peak_characteristics";

/// Which decomposition matrix is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Factors,
    Scores,
}

impl ExportTarget {
    fn label(self) -> &'static str {
        match self {
            ExportTarget::Factors => "factors",
            ExportTarget::Scores => "scores",
        }
    }
}

/// What to write for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPlan {
    /// One multidimensional signal holding every selected component.
    Stack { format: ExportFormat, components: Vec<usize> },
    /// One image per component, rendered by a viewer.
    Images { format: ExportFormat, components: Vec<usize> },
    /// One 1-D signal per component.
    Spectra { format: ExportFormat, components: Vec<usize> },
}

impl ExportPlan {
    pub fn format(&self) -> &ExportFormat {
        match self {
            ExportPlan::Stack { format, .. }
            | ExportPlan::Images { format, .. }
            | ExportPlan::Spectra { format, .. } => format,
        }
    }

    pub fn components(&self) -> &[usize] {
        match self {
            ExportPlan::Stack { components, .. }
            | ExportPlan::Images { components, .. }
            | ExportPlan::Spectra { components, .. } => components,
        }
    }

    /// File names for `prefix`: `"{prefix}s.{ext}"` for a stack,
    /// `"{prefix}_{id:02}.{ext}"` per image, `"{prefix}-{id}.{ext}"` per
    /// spectrum.
    pub fn file_names(&self, prefix: &str) -> Vec<String> {
        let extension = &self.format().extension;
        match self {
            ExportPlan::Stack { .. } => vec![format!("{prefix}s.{extension}")],
            ExportPlan::Images { components, .. } => {
                components.iter().map(|id| format!("{prefix}_{id:02}.{extension}")).collect()
            }
            ExportPlan::Spectra { components, .. } => {
                components.iter().map(|id| format!("{prefix}-{id}.{extension}")).collect()
            }
        }
    }
}

/// Resolve `extension` and `selection` into an [`ExportPlan`].
///
/// Errors
/// ------
/// - `UnsupportedFormat` for extensions missing from `table`.
/// - Selection errors from [`ComponentSelection::resolve`].
pub fn export_plan(
    table: &FormatTable, extension: &str, selection: &ComponentSelection, n_components: usize,
) -> DecompositionResult<ExportPlan> {
    let format = table.classify(extension)?;
    let components = selection.resolve(n_components)?;
    Ok(match format.class {
        FormatClass::MultiDim => ExportPlan::Stack { format, components },
        FormatClass::Image => ExportPlan::Images { format, components },
        FormatClass::Spectrum => ExportPlan::Spectra { format, components },
    })
}

/// Build the signals `plan` describes from `matrix`.
///
/// `Stack` yields one signal; `Images` and `Spectra` yield one signal per
/// component (images over the full mapped space, spectra restricted to
/// 1-D spaces).
pub fn export_signals(
    source: &Signal, target: ExportTarget, matrix: &Array2<f64>, plan: &ExportPlan,
    on_peaks: bool,
) -> DecompositionResult<Vec<Signal>> {
    let selection = ComponentSelection::List(plan.components().to_vec());
    match (plan, target) {
        (ExportPlan::Stack { .. }, ExportTarget::Factors) => {
            Ok(vec![factors_to_signal(source, matrix, &selection, on_peaks)?])
        }
        (ExportPlan::Stack { .. }, ExportTarget::Scores) => {
            Ok(vec![scores_to_signal(source, matrix, &selection)?])
        }
        (ExportPlan::Images { .. }, _) => {
            let (columns, specs) = mapped_space(source, target, matrix, on_peaks)?;
            let components = selection.resolve(columns.ncols())?;
            singles(source, target, columns, &components, specs)
        }
        (ExportPlan::Spectra { .. }, ExportTarget::Factors) => {
            factor_spectra(source, matrix, &selection)
        }
        (ExportPlan::Spectra { .. }, ExportTarget::Scores) => {
            score_spectra(source, matrix, &selection)
        }
    }
}

/// Stack the selected factor columns into one signal.
///
/// Parameters
/// ----------
/// - `factors`: `signal_size × n_components`, or
///   `n_characteristics × n_components` when `on_peaks`.
/// - `on_peaks`: factors describe peak characteristics instead of the
///   signal space; the mapped axis is an uncalibrated
///   `peak_characteristics` axis.
///
/// Returns
/// -------
/// Data shaped `(n_selected, signal_shape...)`; axis 0 is `factor_index`
/// (units `"factor"`, navigation), the source signal axes follow as signal
/// axes.
///
/// Errors
/// ------
/// - `MatrixSizeMismatch` when rows differ from the signal size.
/// - `UnsupportedSignalDimension` for sources without signal axes.
pub fn factors_to_signal(
    source: &Signal, factors: &Array2<f64>, selection: &ComponentSelection, on_peaks: bool,
) -> DecompositionResult<Signal> {
    let components = selection.resolve(factors.ncols())?;
    let (columns, specs) = mapped_space(source, ExportTarget::Factors, factors, on_peaks)?;
    stack(source, ExportTarget::Factors, columns, &components, specs)
}

/// Stack the selected score rows into one signal.
///
/// Data is shaped `(n_selected, navigation_shape...)`; axis 0 is
/// `score_index` (units `"score"`), the source navigation axes follow as
/// signal axes, so every component reads as one map.
///
/// Errors
/// ------
/// - `MatrixSizeMismatch` when columns differ from the navigation size.
/// - `UnsupportedNavigationDimension` for sources without navigation axes.
pub fn scores_to_signal(
    source: &Signal, scores: &Array2<f64>, selection: &ComponentSelection,
) -> DecompositionResult<Signal> {
    let components = selection.resolve(scores.nrows())?;
    let (columns, specs) = mapped_space(source, ExportTarget::Scores, scores, false)?;
    stack(source, ExportTarget::Scores, columns, &components, specs)
}

/// One 1-D signal per selected factor, calibrated by the source's only
/// signal axis.
///
/// Errors
/// ------
/// - `UnsupportedSignalDimension` unless the source has exactly one signal
///   axis.
pub fn factor_spectra(
    source: &Signal, factors: &Array2<f64>, selection: &ComponentSelection,
) -> DecompositionResult<Vec<Signal>> {
    let signal_dimension = source.axes_manager().signal_dimension();
    if signal_dimension != 1 {
        return Err(DecompositionError::UnsupportedSignalDimension {
            what: "factor spectra",
            signal_dimension,
        });
    }
    let components = selection.resolve(factors.ncols())?;
    let (columns, specs) = mapped_space(source, ExportTarget::Factors, factors, false)?;
    singles(source, ExportTarget::Factors, columns, &components, specs)
}

/// One 1-D signal per selected score row, calibrated by the source's only
/// navigation axis.
///
/// Errors
/// ------
/// - `UnsupportedNavigationDimension` unless the source has exactly one
///   navigation axis.
pub fn score_spectra(
    source: &Signal, scores: &Array2<f64>, selection: &ComponentSelection,
) -> DecompositionResult<Vec<Signal>> {
    let navigation_dimension = source.axes_manager().navigation_dimension();
    if navigation_dimension != 1 {
        return Err(DecompositionError::UnsupportedNavigationDimension {
            what: "score spectra",
            navigation_dimension,
        });
    }
    let components = selection.resolve(scores.nrows())?;
    let (columns, specs) = mapped_space(source, ExportTarget::Scores, scores, false)?;
    singles(source, ExportTarget::Scores, columns, &components, specs)
}

/// Column view (`space_len × n_components`) of `matrix` plus the axis specs
/// of the space it maps, positions `0..` in storage order.
fn mapped_space<'m>(
    source: &Signal, target: ExportTarget, matrix: &'m Array2<f64>, on_peaks: bool,
) -> DecompositionResult<(ArrayView2<'m, f64>, Vec<AxisSpec>)> {
    let axes = source.axes_manager();
    let (columns, descriptors): (ArrayView2<'m, f64>, Vec<&AxisDescriptor>) = match target {
        ExportTarget::Factors => (matrix.view(), axes.slicing_axes()),
        ExportTarget::Scores => (matrix.t(), axes.non_slicing_axes()),
    };

    if on_peaks && target == ExportTarget::Factors {
        let spec = AxisSpec::new(
            PEAK_CHARACTERISTICS,
            1.0,
            0.0,
            columns.nrows(),
            PEAK_CHARACTERISTICS,
            0,
        )
        .with_navigate(false);
        return Ok((columns, vec![spec]));
    }

    if descriptors.is_empty() {
        return Err(match target {
            ExportTarget::Factors => DecompositionError::UnsupportedSignalDimension {
                what: target.label(),
                signal_dimension: 0,
            },
            ExportTarget::Scores => DecompositionError::UnsupportedNavigationDimension {
                what: target.label(),
                navigation_dimension: 0,
            },
        });
    }
    let expected: usize = descriptors.iter().map(|axis| axis.size()).product();
    if columns.nrows() != expected {
        return Err(DecompositionError::MatrixSizeMismatch {
            what: target.label(),
            expected,
            actual: columns.nrows(),
        });
    }
    let specs = descriptors
        .iter()
        .enumerate()
        .map(|(position, axis)| AxisSpec {
            storage_position: position,
            navigate: Some(false),
            ..axis.to_spec()
        })
        .collect();
    Ok((columns, specs))
}

fn stack(
    source: &Signal, target: ExportTarget, columns: ArrayView2<'_, f64>, components: &[usize],
    specs: Vec<AxisSpec>,
) -> DecompositionResult<Signal> {
    let (index_name, index_units) = match target {
        ExportTarget::Factors => (FACTOR_INDEX, "factor"),
        ExportTarget::Scores => (SCORE_INDEX, "score"),
    };
    let mut shape = vec![components.len()];
    shape.extend(specs.iter().map(|spec| spec.size));

    let data = columns
        .select(Axis(1), components)
        .t()
        .as_standard_layout()
        .into_owned()
        .into_shape_with_order(shape)?;

    let mut axes = vec![
        AxisSpec::new(index_name, 1.0, 0.0, components.len(), index_units, 0).with_navigate(true),
    ];
    axes.extend(specs.into_iter().map(|spec| AxisSpec {
        storage_position: spec.storage_position + 1,
        ..spec
    }));
    build(source, target, SignalDictionary::new(data).with_axes(axes))
}

fn singles(
    source: &Signal, target: ExportTarget, columns: ArrayView2<'_, f64>, components: &[usize],
    specs: Vec<AxisSpec>,
) -> DecompositionResult<Vec<Signal>> {
    let shape: Vec<usize> = specs.iter().map(|spec| spec.size).collect();
    components
        .iter()
        .map(|&component| {
            let data = columns.column(component).to_owned().into_shape_with_order(shape.clone())?;
            build(source, target, SignalDictionary::new(data).with_axes(specs.clone()))
        })
        .collect()
}

fn build(
    source: &Signal, target: ExportTarget, dictionary: SignalDictionary,
) -> DecompositionResult<Signal> {
    let title = match source.title() {
        "" => target.label().to_string(),
        title => format!("{title} {}", target.label()),
    };
    let dictionary = dictionary
        .with_mapped_parameters(MappedParameters {
            signal_type: source.mapped_parameters().signal_type.clone(),
            ..MappedParameters::with_title(title)
        })
        .with_original_parameters(source.original_parameters().clone())
        .with_attributes(SignalAttributes::default());
    Ok(Signal::from_dictionary_with_options(dictionary, source.options().clone())?)
}
