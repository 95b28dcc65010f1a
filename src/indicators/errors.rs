//! indicators::errors — configuration and data errors for indicator families.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the timeline, raw-series,
//! builder, and mixer modules. Every variant describes a condition detected
//! *before* any heavy array computation starts, so callers can fail fast on
//! malformed inputs.
//!
//! Key behaviors
//! -------------
//! - Define [`IndicatorError`] and [`IndicatorResult`] as the canonical error
//!   and result types of the `indicators` subtree.
//! - Attach human-readable `Display` messages that embed the offending value,
//!   index, or shape.
//! - Convert into `PyErr` (as `ValueError`) when the `python-bindings` feature
//!   is enabled.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Shape payloads are reported as `(rows, cols)` with rows = months.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for indicator construction and validation.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// IndicatorError — invalid inputs for timeline, raw-series and family operations.
///
/// Variants
/// --------
/// - `EmptySeries`
///   A raw series or timeline has no observations.
/// - `NonFiniteData { index, value }`
///   A raw value is NaN or ±∞.
/// - `NonPositiveData { index, value }`
///   A raw value is ≤ 0; the log / power curvature transform requires
///   strictly positive inputs.
/// - `LengthMismatch { expected, actual }`
///   A raw series does not match the length of its timeline.
/// - `InvalidTimeline { index, reason }`
///   Timeline values are not finite, not strictly increasing, or not one
///   month apart.
/// - `InvalidCyclicality { name }`
///   The cyclicality flag is neither countercyclical nor procyclical.
/// - `ShapeMismatch { left, right }`
///   Two families to be mixed have different `(rows, cols)` shapes.
/// - `TimelineMismatch`
///   Two families to be mixed are aligned to different timelines.
/// - `TagMismatch { column }`
///   Two families to be mixed carry different transformation parameters at
///   the same column.
/// - `NotMixable { column }`
///   A family passed to the mixer already holds mixed columns.
/// - `ColumnOutOfRange { column, ncols }`
///   A column index does not address a column of the family.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorError {
    // ---- Raw data ----
    EmptySeries,
    NonFiniteData { index: usize, value: f64 },
    NonPositiveData { index: usize, value: f64 },
    LengthMismatch { expected: usize, actual: usize },

    // ---- Timeline ----
    InvalidTimeline { index: usize, reason: &'static str },

    // ---- Configuration ----
    InvalidCyclicality { name: String },

    // ---- Mixing ----
    ShapeMismatch { left: (usize, usize), right: (usize, usize) },
    TimelineMismatch,
    TagMismatch { column: usize },
    NotMixable { column: usize },

    // ---- Access ----
    ColumnOutOfRange { column: usize, ncols: usize },
}

impl std::error::Error for IndicatorError {}

impl std::fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorError::EmptySeries => write!(f, "Series must contain at least one value."),
            IndicatorError::NonFiniteData { index, value } => {
                write!(f, "Non-finite value {value} at index {index}.")
            }
            IndicatorError::NonPositiveData { index, value } => {
                write!(f, "Value {value} at index {index} must be strictly positive.")
            }
            IndicatorError::LengthMismatch { expected, actual } => {
                write!(f, "Series length {actual} does not match timeline length {expected}.")
            }
            IndicatorError::InvalidTimeline { index, reason } => {
                write!(f, "Invalid timeline at index {index}: {reason}")
            }
            IndicatorError::InvalidCyclicality { name } => write!(
                f,
                "Invalid cyclicality '{name}'. Valid options are 'countercyclical' or 'procyclical'."
            ),
            IndicatorError::ShapeMismatch { left, right } => write!(
                f,
                "Cannot mix families of shape ({}, {}) and ({}, {}).",
                left.0, left.1, right.0, right.1
            ),
            IndicatorError::TimelineMismatch => {
                write!(f, "Cannot mix families aligned to different timelines.")
            }
            IndicatorError::TagMismatch { column } => {
                write!(f, "Transformation parameters differ at column {column}.")
            }
            IndicatorError::NotMixable { column } => {
                write!(f, "Column {column} is already mixed and cannot be mixed again.")
            }
            IndicatorError::ColumnOutOfRange { column, ncols } => {
                write!(f, "Column {column} is out of range for a family with {ncols} columns.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<IndicatorError> for PyErr {
    fn from(err: IndicatorError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages for the variants callers are
    //   most likely to surface to users.
    //
    // They intentionally DO NOT cover:
    // - The `From<IndicatorError> for PyErr` conversion, which requires the
    //   Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the shape mismatch message reports both shapes.
    //
    // Given
    // -----
    // - Shapes (10, 4356) and (9, 4356).
    //
    // Expect
    // ------
    // - The message contains "10" and "9".
    fn shape_mismatch_display_includes_both_shapes() {
        // Arrange
        let err = IndicatorError::ShapeMismatch { left: (10, 4356), right: (9, 4356) };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("(10, 4356)") && msg.contains("(9, 4356)"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the invalid cyclicality message echoes the rejected name.
    //
    // Given
    // -----
    // - name = "acyclical".
    //
    // Expect
    // ------
    // - The message contains "acyclical".
    fn invalid_cyclicality_display_includes_name() {
        // Arrange
        let err = IndicatorError::InvalidCyclicality { name: "acyclical".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("acyclical"), "Got: {msg}");
    }
}
