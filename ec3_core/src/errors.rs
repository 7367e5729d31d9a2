//! # Error Types
//!
//! Structured error types for ec3_core. Every design check validates its
//! inputs up front and reports the offending field, value, and reason so a
//! caller (CLI, report generator, LLM tool) can fix the input programmatically.
//!
//! ## Example
//!
//! ```rust
//! use ec3_core::errors::{CalcError, CalcResult};
//!
//! fn validate_hole(d_0_mm: f64) -> CalcResult<()> {
//!     if d_0_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "d_0_mm",
//!             d_0_mm.to_string(),
//!             "Hole diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_hole(-2.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ec3_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design checks and reference lookups.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A numeric input is physically meaningless (non-positive geometry, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Bolt or steel grade outside the recognized set
    #[error("Invalid grade '{grade}': expected one of {expected}")]
    InvalidGrade { grade: String, expected: String },

    /// Bolt position tag outside the options valid for a coefficient
    #[error("Invalid position '{position}': expected one of {expected}")]
    InvalidPosition { position: String, expected: String },

    /// Reference table lookup miss
    #[error("Not found in {table}: {key}")]
    NotFound { table: String, key: String },

    /// A named configuration key is absent
    #[error("Missing key '{key}' in {source_name}")]
    MissingKey { key: String, source_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON / TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGrade error
    pub fn invalid_grade(grade: impl Into<String>, expected: impl Into<String>) -> Self {
        CalcError::InvalidGrade {
            grade: grade.into(),
            expected: expected.into(),
        }
    }

    /// Create an InvalidPosition error
    pub fn invalid_position(position: impl Into<String>, expected: impl Into<String>) -> Self {
        CalcError::InvalidPosition {
            position: position.into(),
            expected: expected.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::NotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a MissingKey error
    pub fn missing_key(key: impl Into<String>, source_name: impl Into<String>) -> Self {
        CalcError::MissingKey {
            key: key.into(),
            source_name: source_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGrade { .. } => "INVALID_GRADE",
            CalcError::InvalidPosition { .. } => "INVALID_POSITION",
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::MissingKey { .. } => "MISSING_KEY",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Reject non-positive (or non-finite) values for a named field.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("d_0_mm", "-5.0", "Hole diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_grade("9.9", "4.6").error_code(), "INVALID_GRADE");
        assert_eq!(CalcError::invalid_position("side", "edge, inner").error_code(), "INVALID_POSITION");
        assert_eq!(CalcError::not_found("bolt metrics", "M99").error_code(), "NOT_FOUND");
        assert_eq!(CalcError::missing_key("gamma_M2", "defaults").error_code(), "MISSING_KEY");
    }

    #[test]
    fn test_error_messages() {
        let err = CalcError::missing_key("gamma_M7", "partial_safety_factors.json");
        assert_eq!(
            err.to_string(),
            "Missing key 'gamma_M7' in partial_safety_factors.json"
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("t_mm", 10.0).is_ok());
        assert!(require_positive("t_mm", 0.0).is_err());
        assert!(require_positive("t_mm", -1.0).is_err());
        assert!(require_positive("t_mm", f64::NAN).is_err());
    }
}
