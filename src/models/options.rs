//! Run-time options for [`RecessionModel`](crate::models::RecessionModel).
//!
//! Purpose
//! -------
//! Bundle the knobs of a fit (threshold grid, ensemble precision ceiling and
//! logging verbosity) into a single validated value.
//!
//! Invariants & assumptions
//! ------------------------
//! - `precision_ceiling` is finite and strictly positive (months).
//! - `grid` is a validated [`ThresholdGrid`]; it cannot hold a zero or
//!   negative threshold.
//!
//! Conventions
//! -----------
//! - [`ModelOptions::default`] reproduces the reference configuration: 5,000
//!   thresholds from 0.0001 to 0.5, a 3-month precision ceiling, and no log
//!   output.
use crate::{
    classifiers::{
        errors::{ClassifierError, ClassifierResult},
        frontier::{DEFAULT_PRECISION_CEILING, validate_precision_ceiling},
        thresholds::ThresholdGrid,
    },
    observability,
};
use serde::{Deserialize, Serialize};
use slog::Logger;

/// ModelOptions — configuration of a recession-model fit.
///
/// Fields
/// ------
/// - `grid`: thresholds swept by the perfect-classifier search.
/// - `precision_ceiling`: frontier members need an error std strictly below
///   this value (months) to enter the ensemble.
/// - `verbose`: log progress to the terminal through `slog`.
///
/// Deserialization runs the same checks as [`ModelOptions::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionsFields")]
pub struct ModelOptions {
    pub grid: ThresholdGrid,
    pub precision_ceiling: f64,
    pub verbose: bool,
}

impl ModelOptions {
    /// Construct validated options.
    ///
    /// Parameters
    /// ----------
    /// - `grid`: [`ThresholdGrid`]
    /// - `precision_ceiling`: `f64`
    ///   Ensemble cut-off in months; must be finite and > 0.
    /// - `verbose`: `bool`
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::InvalidPrecisionCeiling` for a non-finite or
    ///   non-positive ceiling.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_recession::classifiers::ThresholdGrid;
    /// # use rust_recession::models::ModelOptions;
    /// let grid = ThresholdGrid::new(0.001, 0.5, 0.001).unwrap();
    /// let opts = ModelOptions::new(grid, 2.5, false).unwrap();
    /// assert_eq!(opts.grid.len(), 500);
    /// assert!(ModelOptions::new(grid, 0.0, false).is_err());
    /// ```
    pub fn new(
        grid: ThresholdGrid, precision_ceiling: f64, verbose: bool,
    ) -> ClassifierResult<Self> {
        validate_precision_ceiling(precision_ceiling)?;
        Ok(ModelOptions { grid, precision_ceiling, verbose })
    }

    /// Logger selected by `verbose`.
    pub fn logger(&self) -> Logger {
        observability::logger(self.verbose)
    }
}

#[derive(Deserialize)]
struct OptionsFields {
    grid: ThresholdGrid,
    precision_ceiling: f64,
    verbose: bool,
}

impl TryFrom<OptionsFields> for ModelOptions {
    type Error = ClassifierError;

    fn try_from(raw: OptionsFields) -> ClassifierResult<Self> {
        ModelOptions::new(raw.grid, raw.precision_ceiling, raw.verbose)
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            grid: ThresholdGrid::default(),
            precision_ceiling: DEFAULT_PRECISION_CEILING,
            verbose: false,
        }
    }
}
