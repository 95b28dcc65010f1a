//! Errors for threshold classifiers (search, frontier, scoring, snapshots).
//!
//! This module defines [`ClassifierError`], the error type of the
//! `classifiers` and `models` subtrees, and the [`ClassifierResult`] alias.
//!
//! ## Conventions
//! - Configuration errors (grid, window, ceiling, event dates) are raised
//!   before the threshold sweep starts.
//! - Empty searches are **not** errors; callers inspect the result sets (or
//!   `FitDiagnostics`) instead.
//! - Snapshot I/O and (de)serialization failures are normalized to
//!   [`ClassifierError::Snapshot`] with a human-readable reason.
use crate::indicators::errors::IndicatorError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for classifier operations that may produce [`ClassifierError`].
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Unified error type for the classifier stack.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    // ---- Configuration ----
    /// Threshold grid bounds / step are not finite, positive and ordered.
    InvalidThresholdGrid { start: f64, stop: f64, step: f64, reason: &'static str },

    /// Ensemble precision ceiling must be finite and > 0.
    InvalidPrecisionCeiling { value: f64 },

    /// Training window bounds must be finite with start ≤ end.
    InvalidWindow { start: f64, end: f64, reason: &'static str },

    /// Training window does not overlap the timeline.
    EmptyWindow { start: f64, end: f64 },

    /// Event dates must be finite and strictly increasing.
    InvalidEventDates { index: usize, value: f64, reason: &'static str },

    /// The search needs at least one true event to match.
    ZeroTargetCount,

    // ---- Pairing / profiles ----
    /// Detected and true event sequences differ in length.
    EventCountMismatch { expected: usize, actual: usize },

    /// Error profile cannot parameterize a normal distribution.
    InvalidProfile { mean: f64, std: f64 },

    // ---- Data access ----
    /// Classifier column is outside the indicator family.
    ColumnOutOfRange { column: usize, ncols: usize },

    /// Snapshot columns / thresholds / detected dates are inconsistent.
    MalformedSnapshot { reason: &'static str },

    /// Snapshot file could not be written, read or parsed.
    Snapshot { reason: String },

    // ---- Model state ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,

    // ---- Indicator layer ----
    Indicator(IndicatorError),
}

impl std::error::Error for ClassifierError {}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            ClassifierError::InvalidThresholdGrid { start, stop, step, reason } => write!(
                f,
                "Invalid threshold grid (start = {start}, stop = {stop}, step = {step}): {reason}"
            ),
            ClassifierError::InvalidPrecisionCeiling { value } => {
                write!(f, "Invalid precision ceiling: {value}. Must be finite and positive.")
            }
            ClassifierError::InvalidWindow { start, end, reason } => {
                write!(f, "Invalid window [{start}, {end}]: {reason}")
            }
            ClassifierError::EmptyWindow { start, end } => {
                write!(f, "Window [{start}, {end}] contains no month of the timeline.")
            }
            ClassifierError::InvalidEventDates { index, value, reason } => {
                write!(f, "Invalid event date {value} at index {index}: {reason}")
            }
            ClassifierError::ZeroTargetCount => {
                write!(f, "At least one true event is required in the training window.")
            }

            // ---- Pairing / profiles ----
            ClassifierError::EventCountMismatch { expected, actual } => write!(
                f,
                "Cannot pair {actual} detected events with {expected} true events by rank."
            ),
            ClassifierError::InvalidProfile { mean, std } => {
                write!(f, "Invalid error profile (mean = {mean}, std = {std}).")
            }

            // ---- Data access ----
            ClassifierError::ColumnOutOfRange { column, ncols } => {
                write!(f, "Column {column} is out of range for a family with {ncols} columns.")
            }
            ClassifierError::MalformedSnapshot { reason } => {
                write!(f, "Malformed search snapshot: {reason}")
            }
            ClassifierError::Snapshot { reason } => write!(f, "Snapshot I/O failed: {reason}"),

            // ---- Model state ----
            ClassifierError::ModelNotFitted => write!(f, "Model has not been fitted yet."),

            // ---- Indicator layer ----
            ClassifierError::Indicator(err) => write!(f, "{err}"),
        }
    }
}

impl From<IndicatorError> for ClassifierError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::ColumnOutOfRange { column, ncols } => {
                ClassifierError::ColumnOutOfRange { column, ncols }
            }
            other => ClassifierError::Indicator(other),
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::Snapshot { reason: err.to_string() }
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::Snapshot { reason: err.to_string() }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ClassifierError> for PyErr {
    fn from(err: ClassifierError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Column errors from the indicator layer surface as the classifier
    // variant; every other indicator error is wrapped unchanged.
    //
    // Expect
    // ------
    // - `ColumnOutOfRange` is mapped field by field.
    // - `TimelineMismatch` ends up inside `ClassifierError::Indicator`.
    fn from_indicator_error_maps_column_and_wraps_rest() {
        let column =
            ClassifierError::from(IndicatorError::ColumnOutOfRange { column: 7, ncols: 3 });
        let wrapped = ClassifierError::from(IndicatorError::TimelineMismatch);

        assert_eq!(column, ClassifierError::ColumnOutOfRange { column: 7, ncols: 3 });
        assert_eq!(wrapped, ClassifierError::Indicator(IndicatorError::TimelineMismatch));
    }

    #[test]
    // Purpose
    // -------
    // The pairing error reports both counts.
    fn event_count_mismatch_display_includes_counts() {
        let msg = ClassifierError::EventCountMismatch { expected: 4, actual: 3 }.to_string();

        assert!(msg.contains('4') && msg.contains('3'), "Got: {msg}");
    }
}
