//! Threshold grids for the perfect-classifier sweep.
//!
//! The default grid is 0.0001, 0.0002, …, 0.5 (5,000 values). Grid values are
//! generated as `start + i · step` and rounded to [`THRESHOLD_DECIMALS`]
//! decimals, so repeated construction yields bit-identical thresholds in the
//! search and in the scoring phase.
use crate::classifiers::errors::{ClassifierError, ClassifierResult};
use serde::{Deserialize, Serialize};

/// Decimals kept in every threshold value.
pub const THRESHOLD_DECIMALS: i32 = 10;

/// Largest number of thresholds a grid may hold.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// ThresholdGrid — evenly spaced, strictly positive thresholds.
///
/// Invariants
/// ----------
/// - `0 < start ≤ stop`, `step > 0`, all finite.
/// - `values()` is strictly increasing and its last element is ≤ `stop`
///   (up to rounding).
/// - At most [`MAX_GRID_POINTS`] values.
/// - Deserialized grids go through [`ThresholdGrid::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridBounds")]
pub struct ThresholdGrid {
    start: f64,
    stop: f64,
    step: f64,
}

impl ThresholdGrid {
    /// Construct a validated grid.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::InvalidThresholdGrid` when a bound is not finite,
    ///   `start ≤ 0`, `stop < start`, `step ≤ 0`, or the grid would hold
    ///   more than [`MAX_GRID_POINTS`] values.
    ///
    /// Notes
    /// -----
    /// - `start` must be strictly positive: a zero threshold would let a
    ///   recession start at an indicator value of exactly zero, which is the
    ///   exit condition of the event state machine.
    pub fn new(start: f64, stop: f64, step: f64) -> ClassifierResult<Self> {
        let invalid =
            |reason| Err(ClassifierError::InvalidThresholdGrid { start, stop, step, reason });
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return invalid("bounds and step must be finite");
        }
        if start <= 0.0 {
            return invalid("start must be strictly positive");
        }
        if stop < start {
            return invalid("stop must be greater than or equal to start");
        }
        if step <= 0.0 {
            return invalid("step must be strictly positive");
        }
        let intervals = grid_intervals(start, stop, step);
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return invalid("grid has too many points");
        }
        Ok(ThresholdGrid { start, stop, step })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        grid_intervals(self.start, self.stop, self.step) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Grid values in increasing order.
    pub fn values(&self) -> Vec<f64> {
        let scale = 10f64.powi(THRESHOLD_DECIMALS);
        (0..self.len())
            .map(|i| ((self.start + i as f64 * self.step) * scale).round() / scale)
            .collect()
    }
}

fn grid_intervals(start: f64, stop: f64, step: f64) -> f64 {
    ((stop - start) / step + 1e-9).floor()
}

/// Unvalidated wire form of [`ThresholdGrid`].
#[derive(Deserialize)]
struct GridBounds {
    start: f64,
    stop: f64,
    step: f64,
}

impl TryFrom<GridBounds> for ThresholdGrid {
    type Error = ClassifierError;

    fn try_from(raw: GridBounds) -> ClassifierResult<Self> {
        ThresholdGrid::new(raw.start, raw.stop, raw.step)
    }
}

impl Default for ThresholdGrid {
    /// 0.0001 to 0.5 in steps of 0.0001.
    fn default() -> Self {
        ThresholdGrid { start: 0.0001, stop: 0.5, step: 0.0001 }
    }
}
