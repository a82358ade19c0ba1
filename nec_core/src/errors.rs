//! # Error Types
//!
//! Structured error types for nec_core. Every calculator either returns a
//! complete result or one of these errors; there are no partial results.
//! Messages are written to be shown to an electrician as-is.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::errors::{CalcError, CalcResult};
//!
//! fn validate_box_volume(volume_in3: f64) -> CalcResult<()> {
//!     if volume_in3 <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "box_volume_in3".to_string(),
//!             value: volume_in3.to_string(),
//!             reason: "Box volume must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for nec_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// None of these are retryable: every variant describes bad input or a
/// lookup outside the code tables, which retrying cannot fix.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive capacity, zero quantity, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Wire size not present in the NEC table being consulted
    #[error("Unknown wire size '{size}' for {table}")]
    UnknownWireSize { size: String, table: String },

    /// Category or designation not present in the reference tables
    #[error("Unknown {category}: '{value}'")]
    UnknownCategory { category: String, value: String },

    /// JSON serialization/deserialization error
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

    /// Create an UnknownWireSize error
    pub fn unknown_wire_size(size: impl Into<String>, table: impl Into<String>) -> Self {
        CalcError::UnknownWireSize {
            size: size.into(),
            table: table.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(category: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::UnknownCategory {
            category: category.into(),
            value: value.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownWireSize { .. } => "UNKNOWN_WIRE_SIZE",
            CalcError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
