//! # Error Types
//!
//! Structured error types for trafo_core. Every failure in the design
//! pipeline is fatal to the run: later stages depend on every earlier one,
//! so there is no partial result to salvage. The variants carry enough
//! context for the driver to report what went wrong and where.
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::errors::{CalcError, CalcResult};
//!
//! fn current_density(rated_power_va: f64) -> CalcResult<f64> {
//!     if rated_power_va == 45_000.0 {
//!         return Ok(2.7);
//!     }
//!     Err(CalcError::unknown_rated_power("current density", rated_power_va))
//! }
//!
//! assert_eq!(current_density(45_000.0), Ok(2.7));
//! assert!(current_density(50_000.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for trafo_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (wrong shape, unparseable, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field or column is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Rated power is not one of the tabulated values
    #[error("Rated power {rated_power_va} VA not found in the {table} table")]
    UnknownRatedPower { table: String, rated_power_va: f64 },

    /// Core step count has no tabulated fill factor
    #[error("No fill factor tabulated for a core with {steps} steps")]
    UnsupportedCoreStep { steps: u8 },

    /// Winding connection is neither star nor delta
    #[error("Invalid winding connection '{value}' (expected star or delta)")]
    InvalidConnection { value: String },

    /// No tabulated conductor is thick enough
    #[error("No wire gauge with diameter >= {diameter_mm:.4} mm (largest tabulated: {largest_mm:.4} mm)")]
    WireGaugeNotFound { diameter_mm: f64, largest_mm: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is held by another run
    #[error("File locked: '{path}' is in use by another run")]
    FileLocked { path: String },

    /// JSON/CSV serialization or deserialization error
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownRatedPower error for the named table
    pub fn unknown_rated_power(table: impl Into<String>, rated_power_va: f64) -> Self {
        CalcError::UnknownRatedPower {
            table: table.into(),
            rated_power_va,
        }
    }

    /// Create an InvalidConnection error
    pub fn invalid_connection(value: impl Into<String>) -> Self {
        CalcError::InvalidConnection {
            value: value.into(),
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
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownRatedPower { .. } => "UNKNOWN_RATED_POWER",
            CalcError::UnsupportedCoreStep { .. } => "UNSUPPORTED_CORE_STEP",
            CalcError::InvalidConnection { .. } => "INVALID_CONNECTION",
            CalcError::WireGaugeNotFound { .. } => "WIRE_GAUGE_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::unknown_rated_power("core loss", 5000.0);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnknownRatedPower\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("awg").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::UnsupportedCoreStep { steps: 9 }.error_code(), "UNSUPPORTED_CORE_STEP");
        assert_eq!(CalcError::invalid_connection("zigzag").error_code(), "INVALID_CONNECTION");
    }

    #[test]
    fn test_error_messages() {
        let error = CalcError::invalid_connection("zigzag");
        assert_eq!(error.to_string(), "Invalid winding connection 'zigzag' (expected star or delta)");

        let error = CalcError::WireGaugeNotFound { diameter_mm: 12.5, largest_mm: 11.684 };
        assert!(error.to_string().contains("12.5000"));
    }
}
