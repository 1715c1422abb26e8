//! Error types for tinct operations.
//!
//! This module provides the unified error handling system shared by every
//! crate in the workspace.
//!
//! # Categories
//!
//! - **Validation errors**: wrong argument shape or type at a public boundary
//!   ([`Validation`](Error::Validation), [`InvalidArity`](Error::InvalidArity))
//! - **Domain/range errors**: values outside a channel boundary or
//!   mathematically undefined operations
//!   ([`InvalidColorValue`](Error::InvalidColorValue),
//!   [`DivisionByZero`](Error::DivisionByZero),
//!   [`SingularMatrix`](Error::SingularMatrix),
//!   [`DimensionMismatch`](Error::DimensionMismatch))
//! - **Configuration errors**: invalid named selections or channel setups
//!   ([`UnknownName`](Error::UnknownName),
//!   [`CircularUnbounded`](Error::CircularUnbounded),
//!   [`Configuration`](Error::Configuration))
//! - **Data errors**: preset file loading failures
//!   ([`InvalidDataFile`](Error::InvalidDataFile))
//! - **Identity errors**: cache-key serialization failures
//!   ([`Identity`](Error::Identity))
//!
//! # Propagation
//!
//! Validation and domain errors are never caught and suppressed inside the
//! engine; they propagate to the caller with `?`. Recoverable situations
//! (a linear channel operating unbound, the compress-to-clip gamut fallback)
//! are handled by branching, not by error recovery.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during colorimetric computation.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument had the wrong type or shape for a public entry point.
    #[error("invalid {parameter}: expected {expected}, got {got}")]
    Validation {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Expected shape or type.
        expected: &'static str,
        /// What was actually received.
        got: String,
    },

    /// A component set was built with the wrong number of values.
    ///
    /// A set is valid when the provided count lies between the number of
    /// required channels and the total channel count.
    #[error("invalid component count for {model}: expected {minimum}..={maximum}, got {got}")]
    InvalidArity {
        /// Color model name.
        model: &'static str,
        /// Required channel count.
        minimum: usize,
        /// Total channel count.
        maximum: usize,
        /// Provided value count.
        got: usize,
    },

    /// A channel value lies outside its declared boundary.
    #[error("invalid color value for channel {channel}: {value} is outside {minimum}..={maximum}")]
    InvalidColorValue {
        /// Channel identifier.
        channel: &'static str,
        /// Offending raw value.
        value: f64,
        /// Boundary minimum.
        minimum: f64,
        /// Boundary maximum.
        maximum: f64,
    },

    /// Division by a zero scalar or amount.
    ///
    /// Channel laws and formulas raise this instead of producing NaN or
    /// infinity.
    #[error("division by zero in {operation}")]
    DivisionByZero {
        /// Operation that attempted the division.
        operation: &'static str,
    },

    /// Matrix shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {operation}: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    DimensionMismatch {
        /// Operation that was attempted.
        operation: &'static str,
        /// Left operand rows.
        left_rows: usize,
        /// Left operand columns.
        left_cols: usize,
        /// Right operand rows.
        right_rows: usize,
        /// Right operand columns.
        right_cols: usize,
    },

    /// A square-matrix operation was requested on a non-square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Matrix rows have differing lengths.
    #[error("ragged matrix rows: row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Expected column count (from the first row).
        expected: usize,
        /// Actual column count.
        got: usize,
    },

    /// A matrix inverse was requested but the determinant is (near) zero.
    #[error("singular matrix: determinant {determinant} is below the invertibility threshold")]
    SingularMatrix {
        /// Computed determinant.
        determinant: f64,
    },

    /// A circular (hue-like) channel was declared with an unbound boundary.
    ///
    /// Wraparound arithmetic requires a defined period.
    #[error("circular channel {channel} must have a finite boundary")]
    CircularUnbounded {
        /// Channel identifier.
        channel: &'static str,
    },

    /// A symbolic name did not resolve to a known object.
    #[error("unknown {kind}: {name}")]
    UnknownName {
        /// What was being looked up ("gamut mapping strategy", "chromatic
        /// adaptation transform", ...).
        kind: &'static str,
        /// The unresolved name.
        name: String,
    },

    /// A configuration is internally inconsistent.
    #[error("invalid configuration: {reason}")]
    Configuration {
        /// Description of what is wrong.
        reason: String,
    },

    /// A preset data file could not be read or parsed.
    #[error("invalid data file {}: {reason}", .path.display())]
    InvalidDataFile {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O or parse failure.
        reason: String,
    },

    /// An object could not be serialized for cache-key generation.
    ///
    /// This signals a programming error (a non-serializable object entered
    /// a cached code path) and is always surfaced, never swallowed.
    #[error("identity generation failed: {reason}")]
    Identity {
        /// Underlying serialization failure.
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::Validation`] error.
    #[inline]
    pub fn validation(parameter: &'static str, expected: &'static str, got: impl Into<String>) -> Self {
        Self::Validation {
            parameter,
            expected,
            got: got.into(),
        }
    }

    /// Creates an [`Error::InvalidColorValue`] error.
    #[inline]
    pub fn invalid_color_value(channel: &'static str, value: f64, minimum: f64, maximum: f64) -> Self {
        Self::InvalidColorValue {
            channel,
            value,
            minimum,
            maximum,
        }
    }

    /// Creates an [`Error::DivisionByZero`] error.
    #[inline]
    pub fn division_by_zero(operation: &'static str) -> Self {
        Self::DivisionByZero { operation }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            operation,
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }

    /// Creates an [`Error::SingularMatrix`] error.
    #[inline]
    pub fn singular(determinant: f64) -> Self {
        Self::SingularMatrix { determinant }
    }

    /// Creates an [`Error::UnknownName`] error.
    #[inline]
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /// Creates an [`Error::Configuration`] error.
    #[inline]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDataFile`] error.
    #[inline]
    pub fn invalid_data_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDataFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Identity`] error.
    #[inline]
    pub fn identity(reason: impl Into<String>) -> Self {
        Self::Identity {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a domain/range error.
    #[inline]
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidColorValue { .. }
                | Self::DivisionByZero { .. }
                | Self::SingularMatrix { .. }
                | Self::DimensionMismatch { .. }
                | Self::NotSquare { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownName { .. } | Self::CircularUnbounded { .. } | Self::Configuration { .. }
        )
    }

    /// Returns `true` if this is a data-file error.
    #[inline]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::InvalidDataFile { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_value() {
        let err = Error::invalid_color_value("red", 300.0, 0.0, 255.0);
        let msg = err.to_string();
        assert!(msg.contains("red"));
        assert!(msg.contains("300"));
        assert!(msg.contains("255"));
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch("multiply", (3, 3), (4, 1));
        let msg = err.to_string();
        assert!(msg.contains("3x3"));
        assert!(msg.contains("4x1"));
    }

    #[test]
    fn test_unknown_name() {
        let err = Error::unknown("gamut mapping strategy", "squash");
        assert!(err.to_string().contains("squash"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_data_error() {
        let err = Error::invalid_data_file("/tmp/illuminants.yaml", "missing field `x`");
        assert!(err.to_string().contains("illuminants.yaml"));
        assert!(err.is_data_error());
    }
}
