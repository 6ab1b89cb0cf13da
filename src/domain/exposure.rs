//! Exposure domain model
//!
//! An `Exposure` is one confirmed Temporary Exposure Key as delivered by
//! the publish path. The export engine only ever reads these.

use crate::domain::errors::TekportError;
use crate::domain::interval::KEY_LENGTH;
use crate::domain::result::Result;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diagnosis classification attached to a published key
///
/// The diagnosis type selects the retention window on the read side; it is
/// not carried in the exported wire payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosisType {
    /// Confirmed case
    #[serde(rename = "red-warning")]
    RedWarning,
    /// Suspected case
    #[serde(rename = "yellow-warning")]
    YellowWarning,
    /// All-clear revocation
    #[serde(rename = "green-warning")]
    GreenWarning,
}

impl DiagnosisType {
    /// Returns the wire string for this diagnosis type
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisType::RedWarning => "red-warning",
            DiagnosisType::YellowWarning => "yellow-warning",
            DiagnosisType::GreenWarning => "green-warning",
        }
    }
}

impl fmt::Display for DiagnosisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiagnosisType {
    type Err = TekportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "red-warning" => Ok(DiagnosisType::RedWarning),
            "yellow-warning" => Ok(DiagnosisType::YellowWarning),
            "green-warning" => Ok(DiagnosisType::GreenWarning),
            other => Err(TekportError::Other(format!(
                "unknown diagnosis type: {other}"
            ))),
        }
    }
}

/// One confirmed Temporary Exposure Key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exposure {
    /// The key material, base64-encoded (16 raw bytes)
    pub exposure_key: String,

    /// Transmission risk level reported at publish time
    pub transmission_risk: i32,

    /// Rolling-interval number at which the key became active
    pub interval_number: Option<i32>,

    /// Number of rolling intervals the key was valid for (at most 144)
    pub interval_count: Option<i32>,

    /// Region the key was published for
    pub region: String,

    /// Diagnosis classification
    pub diagnosis_type: DiagnosisType,
}

impl Exposure {
    /// Decodes the base64 key material into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the key is not valid base64 or is
    /// not exactly [`KEY_LENGTH`] bytes long.
    pub fn key_data(&self) -> Result<Vec<u8>> {
        let bytes = general_purpose::STANDARD.decode(&self.exposure_key)?;
        if bytes.len() != KEY_LENGTH {
            return Err(TekportError::Serialization(format!(
                "exposure key decodes to {} bytes, expected {}",
                bytes.len(),
                KEY_LENGTH
            )));
        }
        Ok(bytes)
    }

    /// Encodes raw key bytes the way the publish path stores them.
    pub fn encode_key(raw: &[u8]) -> String {
        general_purpose::STANDARD.encode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exposure_with_key(raw: [u8; 16]) -> Exposure {
        Exposure {
            exposure_key: Exposure::encode_key(&raw),
            transmission_risk: 3,
            interval_number: Some(2_673_792),
            interval_count: Some(144),
            region: "AT".to_string(),
            diagnosis_type: DiagnosisType::RedWarning,
        }
    }

    #[test]
    fn test_key_data_round_trip() {
        let exposure = exposure_with_key([0x11; 16]);
        assert_eq!(exposure.key_data().unwrap(), vec![0x11; 16]);
    }

    #[test]
    fn test_key_data_rejects_wrong_length() {
        let mut exposure = exposure_with_key([0x11; 16]);
        exposure.exposure_key = general_purpose::STANDARD.encode([0u8; 8]);
        assert!(exposure.key_data().is_err());
    }

    #[test]
    fn test_key_data_rejects_invalid_base64() {
        let mut exposure = exposure_with_key([0x11; 16]);
        exposure.exposure_key = "not base64!!".to_string();
        assert!(exposure.key_data().is_err());
    }

    #[test]
    fn test_diagnosis_type_wire_strings() {
        assert_eq!(DiagnosisType::RedWarning.as_str(), "red-warning");
        assert_eq!(DiagnosisType::YellowWarning.as_str(), "yellow-warning");
        assert_eq!(DiagnosisType::GreenWarning.as_str(), "green-warning");
        assert_eq!(
            "red-warning".parse::<DiagnosisType>().unwrap(),
            DiagnosisType::RedWarning
        );
        assert!("purple-warning".parse::<DiagnosisType>().is_err());
    }

    #[test]
    fn test_exposure_serde_camel_case() {
        let exposure = exposure_with_key([0x22; 16]);
        let json = serde_json::to_value(&exposure).unwrap();
        assert!(json.get("exposureKey").is_some());
        assert!(json.get("diagnosisType").is_some());
        assert_eq!(json["diagnosisType"], "red-warning");
    }
}
