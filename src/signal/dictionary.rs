//! signal::dictionary — the load/save record shared with I/O collaborators.
//!
//! Purpose
//! -------
//! Define [`SignalDictionary`], the portable form of a signal: the buffer,
//! optional axis specs, both parameter containers and the attributes
//! entry. Readers build one and hand it to
//! [`Signal::from_dictionary`](crate::signal::Signal::from_dictionary);
//! writers receive one from
//! [`Signal::snapshot`](crate::signal::Signal::snapshot).
//!
//! Conventions
//! -----------
//! - Only `data` is required. Missing `axes` are synthesized as undefined
//!   axes; missing parameter maps are empty.
//! - The buffer serializes through ndarray's serde support
//!   (`{"v": 1, "dim": [...], "data": [...]}`).
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::{
    axes::descriptor::AxisSpec,
    signal::{
        errors::SignalResult,
        parameters::{MappedParameters, OriginalParameters, SignalAttributes},
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDictionary {
    pub data: ArrayD<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axes: Option<Vec<AxisSpec>>,
    #[serde(default)]
    pub mapped_parameters: MappedParameters,
    #[serde(default)]
    pub original_parameters: OriginalParameters,
    #[serde(default)]
    pub attributes: SignalAttributes,
}

impl SignalDictionary {
    /// Dictionary holding only a buffer.
    pub fn new(data: ArrayD<f64>) -> SignalDictionary {
        SignalDictionary {
            data,
            axes: None,
            mapped_parameters: MappedParameters::default(),
            original_parameters: OriginalParameters::new(),
            attributes: SignalAttributes::default(),
        }
    }

    pub fn with_axes(mut self, axes: Vec<AxisSpec>) -> SignalDictionary {
        self.axes = Some(axes);
        self
    }

    pub fn with_mapped_parameters(mut self, mapped: MappedParameters) -> SignalDictionary {
        self.mapped_parameters = mapped;
        self
    }

    pub fn with_original_parameters(mut self, original: OriginalParameters) -> SignalDictionary {
        self.original_parameters = original;
        self
    }

    pub fn with_attributes(mut self, attributes: SignalAttributes) -> SignalDictionary {
        self.attributes = attributes;
        self
    }

    pub fn to_json(&self) -> SignalResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SignalResult<SignalDictionary> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::errors::SignalError;
    use ndarray::{Array, IxDyn};
    use serde_json::json;

    #[test]
    // Purpose
    // -------
    // A minimal JSON record with only `data` deserializes with defaults.
    //
    // Given
    // -----
    // - ndarray-serde encoded 2x3 buffer, nothing else.
    //
    // Expect
    // ------
    // - shape [2, 3], no axes, empty title and maps.
    fn from_json_fills_defaults() {
        let text = json!({"data": {"v": 1, "dim": [2, 3], "data": [0., 1., 2., 3., 4., 5.]}})
            .to_string();

        let dict = SignalDictionary::from_json(&text).unwrap();

        assert_eq!(dict.data.shape(), &[2, 3]);
        assert!(dict.axes.is_none());
        assert!(dict.mapped_parameters.title.is_empty());
        assert!(dict.original_parameters.is_empty());
        assert!(dict.attributes.splitting_steps.is_none());
    }

    #[test]
    // Purpose
    // -------
    // A populated dictionary survives a JSON round trip.
    //
    // Given
    // -----
    // - 2x2 buffer, two axis specs, a title and one provenance key.
    //
    // Expect
    // ------
    // - Decoded dictionary equals the original.
    fn json_round_trip_preserves_everything() {
        let data = Array::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut original = OriginalParameters::new();
        original.insert("detector".to_string(), json!("CCD"));
        let dict = SignalDictionary::new(data)
            .with_axes(vec![
                AxisSpec::new("x", 0.5, 1.0, 2, "nm", 0),
                AxisSpec::new("E", 0.1, 100.0, 2, "eV", 1),
            ])
            .with_mapped_parameters(MappedParameters::with_title("sample"))
            .with_original_parameters(original);

        let decoded = SignalDictionary::from_json(&dict.to_json().unwrap()).unwrap();

        assert_eq!(decoded, dict);
    }

    #[test]
    // Purpose
    // -------
    // Malformed JSON surfaces as a serialization error.
    //
    // Given
    // -----
    // - A record without `data`.
    //
    // Expect
    // ------
    // - `SignalError::Serialization`.
    fn from_json_without_data_is_rejected() {
        let result = SignalDictionary::from_json(r#"{"axes": []}"#);

        assert!(matches!(result, Err(SignalError::Serialization(_))));
    }
}
