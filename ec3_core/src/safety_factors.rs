//! # Partial Safety Factors (EN 1993-1-8 Table 2.1)
//!
//! γ_M factors for connection resistances. The recommended values ship as
//! `data/partial_safety_factors.json`; a national annex or project file with
//! the same keys can replace them via [`PartialSafetyFactors::from_path`].
//!
//! Every key is required. A file that omits one fails with
//! [`CalcError::MissingKey`] naming it, rather than falling back to a default.
//!
//! ```rust
//! use ec3_core::safety_factors::{PartialSafetyFactors, SafetyFactor};
//!
//! let gammas = PartialSafetyFactors::builtin().unwrap();
//! assert_eq!(gammas.gamma_m2, 1.25);
//! assert_eq!(gammas.get(SafetyFactor::M7), 1.1);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

const BUILTIN_JSON: &str = include_str!("../data/partial_safety_factors.json");
const BUILTIN_SOURCE: &str = "partial_safety_factors.json";

static BUILTIN: Lazy<CalcResult<PartialSafetyFactors>> =
    Lazy::new(|| PartialSafetyFactors::parse(BUILTIN_JSON, BUILTIN_SOURCE));

/// Named partial factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyFactor {
    M2,
    M3,
    M3Ser,
    M4,
    M5,
    M6Ser,
    M7,
    CPermanentTransient,
    CAccidental,
}

impl SafetyFactor {
    /// All factors, in file order
    pub const ALL: [SafetyFactor; 9] = [
        SafetyFactor::M2,
        SafetyFactor::M3,
        SafetyFactor::M3Ser,
        SafetyFactor::M4,
        SafetyFactor::M5,
        SafetyFactor::M6Ser,
        SafetyFactor::M7,
        SafetyFactor::CPermanentTransient,
        SafetyFactor::CAccidental,
    ];

    /// JSON key
    pub fn key(&self) -> &'static str {
        match self {
            SafetyFactor::M2 => "gamma_M2",
            SafetyFactor::M3 => "gamma_M3",
            SafetyFactor::M3Ser => "gamma_M3ser",
            SafetyFactor::M4 => "gamma_M4",
            SafetyFactor::M5 => "gamma_M5",
            SafetyFactor::M6Ser => "gamma_M6ser",
            SafetyFactor::M7 => "gamma_M7",
            SafetyFactor::CPermanentTransient => "gamma_c_permanent_transient",
            SafetyFactor::CAccidental => "gamma_c_accidental",
        }
    }

    /// What the factor applies to
    pub fn description(&self) -> &'static str {
        match self {
            SafetyFactor::M2 => "Bolts, rivets, pins, welds, plates in bearing",
            SafetyFactor::M3 => "Slip resistance at ultimate limit state",
            SafetyFactor::M3Ser => "Slip resistance at serviceability limit state",
            SafetyFactor::M4 => "Bearing resistance of an injection bolt",
            SafetyFactor::M5 => "Joints in hollow section lattice girders",
            SafetyFactor::M6Ser => "Pins at serviceability limit state",
            SafetyFactor::M7 => "Preload of high strength bolts",
            SafetyFactor::CPermanentTransient => "Concrete, persistent and transient situations",
            SafetyFactor::CAccidental => "Concrete, accidental situations",
        }
    }

    /// Parse a JSON key ("gamma_M2") back into a factor
    pub fn from_key(key: &str) -> CalcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| CalcError::missing_key(key, "EN 1993-1-8 Table 2.1"))
    }
}

impl std::fmt::Display for SafetyFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Partial factors for connection design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialSafetyFactors {
    #[serde(rename = "gamma_M2")]
    pub gamma_m2: f64,
    #[serde(rename = "gamma_M3")]
    pub gamma_m3: f64,
    #[serde(rename = "gamma_M3ser")]
    pub gamma_m3_ser: f64,
    #[serde(rename = "gamma_M4")]
    pub gamma_m4: f64,
    #[serde(rename = "gamma_M5")]
    pub gamma_m5: f64,
    #[serde(rename = "gamma_M6ser")]
    pub gamma_m6_ser: f64,
    #[serde(rename = "gamma_M7")]
    pub gamma_m7: f64,
    #[serde(rename = "gamma_c_permanent_transient")]
    pub gamma_c_permanent_transient: f64,
    #[serde(rename = "gamma_c_accidental")]
    pub gamma_c_accidental: f64,
}

impl PartialSafetyFactors {
    /// Recommended values embedded in the crate
    pub fn builtin() -> CalcResult<Self> {
        match &*BUILTIN {
            Ok(factors) => Ok(*factors),
            Err(e) => Err(e.clone()),
        }
    }

    /// Parse a JSON object carrying every key of [`SafetyFactor::ALL`]
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        Self::parse(json, "JSON input")
    }

    /// Load factors from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let factors = Self::parse(&contents, &path.display().to_string())?;
        debug!(path = %path.display(), "Loaded partial safety factors");
        Ok(factors)
    }

    fn parse(json: &str, source_name: &str) -> CalcResult<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let read = |factor: SafetyFactor| -> CalcResult<f64> {
            let key = factor.key();
            let value = raw
                .get(key)
                .ok_or_else(|| CalcError::missing_key(key, source_name))?;
            let number = value.as_f64().ok_or_else(|| {
                CalcError::invalid_input(key, value.to_string(), "Partial factor must be a number")
            })?;
            if !number.is_finite() || number <= 0.0 {
                return Err(CalcError::invalid_input(
                    key,
                    number.to_string(),
                    "Partial factor must be positive",
                ));
            }
            Ok(number)
        };

        Ok(PartialSafetyFactors {
            gamma_m2: read(SafetyFactor::M2)?,
            gamma_m3: read(SafetyFactor::M3)?,
            gamma_m3_ser: read(SafetyFactor::M3Ser)?,
            gamma_m4: read(SafetyFactor::M4)?,
            gamma_m5: read(SafetyFactor::M5)?,
            gamma_m6_ser: read(SafetyFactor::M6Ser)?,
            gamma_m7: read(SafetyFactor::M7)?,
            gamma_c_permanent_transient: read(SafetyFactor::CPermanentTransient)?,
            gamma_c_accidental: read(SafetyFactor::CAccidental)?,
        })
    }

    /// Value of a named factor
    pub fn get(&self, factor: SafetyFactor) -> f64 {
        match factor {
            SafetyFactor::M2 => self.gamma_m2,
            SafetyFactor::M3 => self.gamma_m3,
            SafetyFactor::M3Ser => self.gamma_m3_ser,
            SafetyFactor::M4 => self.gamma_m4,
            SafetyFactor::M5 => self.gamma_m5,
            SafetyFactor::M6Ser => self.gamma_m6_ser,
            SafetyFactor::M7 => self.gamma_m7,
            SafetyFactor::CPermanentTransient => self.gamma_c_permanent_transient,
            SafetyFactor::CAccidental => self.gamma_c_accidental,
        }
    }

    /// Value by JSON key; unknown keys fail with MissingKey
    pub fn get_key(&self, key: &str) -> CalcResult<f64> {
        Ok(self.get(SafetyFactor::from_key(key)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_json() -> serde_json::Value {
        serde_json::from_str(BUILTIN_JSON).unwrap()
    }

    #[test]
    fn test_builtin_recommended_values() {
        let g = PartialSafetyFactors::builtin().unwrap();
        assert_eq!(g.gamma_m2, 1.25);
        assert_eq!(g.gamma_m3, 1.25);
        assert_eq!(g.gamma_m3_ser, 1.1);
        assert_eq!(g.gamma_m4, 1.0);
        assert_eq!(g.gamma_m5, 1.0);
        assert_eq!(g.gamma_m6_ser, 1.0);
        assert_eq!(g.gamma_m7, 1.1);
        assert_eq!(g.gamma_c_permanent_transient, 1.5);
        assert_eq!(g.gamma_c_accidental, 1.2);
    }

    #[test]
    fn test_missing_key_is_named() {
        let mut json = full_json();
        json.as_object_mut().unwrap().remove("gamma_M7");
        let err = PartialSafetyFactors::from_json_str(&json.to_string()).unwrap_err();
        match err {
            CalcError::MissingKey { key, .. } => assert_eq!(key, "gamma_M7"),
            other => panic!("expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive() {
        let mut json = full_json();
        json["gamma_M2"] = serde_json::json!(0.0);
        let err = PartialSafetyFactors::from_json_str(&json.to_string()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        json["gamma_M2"] = serde_json::json!("1.25");
        assert!(PartialSafetyFactors::from_json_str(&json.to_string()).is_err());
    }

    #[test]
    fn test_national_annex_override() {
        let mut json = full_json();
        json["gamma_M2"] = serde_json::json!(1.1);
        let g = PartialSafetyFactors::from_json_str(&json.to_string()).unwrap();
        assert_eq!(g.get(SafetyFactor::M2), 1.1);
        assert_eq!(g.get_key("gamma_M2").unwrap(), 1.1);
    }

    #[test]
    fn test_get_key_unknown() {
        let g = PartialSafetyFactors::builtin().unwrap();
        assert_eq!(g.get_key("gamma_M9").unwrap_err().error_code(), "MISSING_KEY");
    }

    #[test]
    fn test_serialization_uses_file_keys() {
        let g = PartialSafetyFactors::builtin().unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"gamma_M3ser\":1.1"));
        assert_eq!(PartialSafetyFactors::from_json_str(&json).unwrap(), g);
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join("ec3_gammas_test.json");
        std::fs::write(&path, BUILTIN_JSON).unwrap();
        let g = PartialSafetyFactors::from_path(&path).unwrap();
        assert_eq!(g.gamma_m2, 1.25);
        let _ = std::fs::remove_file(&path);

        let missing = std::env::temp_dir().join("ec3_gammas_missing.json");
        let err = PartialSafetyFactors::from_path(&missing).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
