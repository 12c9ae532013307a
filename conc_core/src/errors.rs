//! # Error Types
//!
//! Structured error types for conc_core. Every exceptional condition in the
//! engine is a distinguishable variant, so callers (and tests) can match on
//! the error kind rather than on a message or a NaN.
//!
//! ## Kinds
//!
//! - [`CalcError::InvalidGeometry`] - the section polygon cannot be built (fatal)
//! - [`CalcError::InvalidMaterial`] - a strength, factor or strain limit is unusable (fatal)
//! - [`CalcError::DegenerateGeometry`] - a single geometric operation has no
//!   meaningful answer (zero-area centroid, zero curvature). Recoverable: the
//!   capacity sweep records a gap and carries on.
//!
//! ## Example
//!
//! ```rust
//! use conc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_resolution(points: usize) -> CalcResult<()> {
//!     if points < 2 {
//!         return Err(CalcError::invalid_input(
//!             "points_per_side",
//!             points.to_string(),
//!             "At least two samples per side are required",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_resolution(1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for conc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Section polygon rejected at construction (too few vertices,
    /// self-intersection, zero area)
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// A geometric operation degenerated (singular centroid, zero-area clip,
    /// zero curvature)
    #[error("Degenerate geometry in {operation}: {reason}")]
    DegenerateGeometry { operation: String, reason: String },

    /// Material strength, partial factor or strain limit rejected
    #[error("Invalid material parameter '{parameter}': {value} - {reason}")]
    InvalidMaterial {
        parameter: String,
        value: String,
        reason: String,
    },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Calculation could not produce a result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateGeometry {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidMaterial error
    pub fn invalid_material(
        parameter: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidMaterial {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// A degenerate sample inside a sweep only costs one point of the curve.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::DegenerateGeometry { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            CalcError::InvalidMaterial { .. } => "INVALID_MATERIAL",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
