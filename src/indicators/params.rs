//! Parameter grids and column tags for indicator families.
//!
//! Purpose
//! -------
//! Describe *how* each indicator column was derived. A tag travels with its
//! column through every Cartesian expansion (smoothing × curvature ×
//! turning window, then × mixing method × mixing weight), so the tag at
//! column `j` always describes the data at column `j`.
//!
//! Key behaviors
//! -------------
//! - Enumerate the paper grids: [`smoothing_grid`] (22 specs),
//!   [`CURVATURE_GRID`] (11 values), [`TURNING_WINDOWS`] (18 values) and
//!   [`MIXING_WEIGHTS`] (11 values).
//! - Parse [`Cyclicality`] from user strings, rejecting unknown names.
//! - Represent column metadata as [`IndicatorTag`], either a single-series
//!   [`IndicatorParams`] or a mixed pair.
//!
//! Conventions
//! -----------
//! - Grids are spelled out as literals so tags hold exactly `0.3`, never
//!   `0.30000000000000004`.
use crate::indicators::errors::IndicatorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest simple-moving-average window (months before the current one).
pub const MAX_SMA_WINDOW: usize = 11;

/// Exponential decay weights 0.1, 0.2, …, 1.0.
pub const EMA_WEIGHTS: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Curvature parameters k = 0.0, 0.1, …, 1.0.
pub const CURVATURE_GRID: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Turning-point windows w = 1, …, 18 (trailing w + 1 months).
pub const TURNING_WINDOWS: [usize; 18] =
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18];

/// Mixing weights ζ = 0.0, 0.1, …, 1.0.
pub const MIXING_WEIGHTS: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Mixing methods in column-block order.
pub const MIXING_METHODS: [MixingMethod; 2] = [MixingMethod::Linear, MixingMethod::MinMax];

/// Smoothing filter applied to a raw series before curvature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Smoothing {
    /// Backward moving average of the current and previous `window` months.
    Simple { window: usize },
    /// Exponential moving average with decay weight `alpha`.
    Exponential { alpha: f64 },
}

/// The 22 smoothing specs in column-block order: 12 simple, then 10 exponential.
pub fn smoothing_grid() -> Vec<Smoothing> {
    (0..=MAX_SMA_WINDOW)
        .map(|window| Smoothing::Simple { window })
        .chain(EMA_WEIGHTS.iter().map(|&alpha| Smoothing::Exponential { alpha }))
        .collect()
}

/// Direction of a raw series over the business cycle.
///
/// - `Countercyclical`: rises in recessions (unemployment).
/// - `Procyclical`: falls in recessions (vacancies).
///
/// Parsing is case-insensitive and accepts `"countercyclical"` /
/// `"procyclical"`; anything else is `IndicatorError::InvalidCyclicality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cyclicality {
    Countercyclical,
    Procyclical,
}

impl FromStr for Cyclicality {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "countercyclical" => Ok(Cyclicality::Countercyclical),
            "procyclical" => Ok(Cyclicality::Procyclical),
            _ => Err(IndicatorError::InvalidCyclicality { name: s.to_string() }),
        }
    }
}

/// How two indicator columns are combined.
///
/// - `Linear`: `ζ·x + (1 − ζ)·y`.
/// - `MinMax`: `ζ·min(x, y) + (1 − ζ)·max(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixingMethod {
    Linear,
    MinMax,
}

impl MixingMethod {
    #[inline]
    pub fn combine(&self, x: f64, y: f64, weight: f64) -> f64 {
        match self {
            MixingMethod::Linear => weight * x + (1.0 - weight) * y,
            MixingMethod::MinMax => weight * x.min(y) + (1.0 - weight) * x.max(y),
        }
    }
}

/// IndicatorParams — derivation of one single-series indicator column.
///
/// Fields
/// ------
/// - `cyclicality`: direction of the raw series.
/// - `smoothing`: smoothing filter.
/// - `curvature`: Box–Cox parameter k.
/// - `turning_window`: turning-point window w.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub cyclicality: Cyclicality,
    pub smoothing: Smoothing,
    pub curvature: f64,
    pub turning_window: usize,
}

impl IndicatorParams {
    /// True when both columns went through the same smoothing, curvature and
    /// turning window, regardless of the raw series they came from.
    pub fn same_transformation(&self, other: &IndicatorParams) -> bool {
        self.smoothing == other.smoothing
            && self.curvature == other.curvature
            && self.turning_window == other.turning_window
    }
}

/// IndicatorTag — metadata carried alongside every indicator column.
///
/// - `Single(params)`: built directly from one raw series.
/// - `Mixed { .. }`: combination of two single columns; the input tags are
///   kept unchanged next to the mixing method and weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IndicatorTag {
    Single(IndicatorParams),
    Mixed { method: MixingMethod, weight: f64, x: IndicatorParams, y: IndicatorParams },
}

impl IndicatorTag {
    pub fn is_mixed(&self) -> bool {
        matches!(self, IndicatorTag::Mixed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check grid sizes against the documented 22 × 11 × 18 and 2 × 11 layout.
    //
    // Expect
    // ------
    // - 22 smoothing specs (12 simple first), 11 curvatures, 18 windows,
    //   11 weights, 2 methods.
    fn grids_have_documented_sizes_and_order() {
        let smoothing = smoothing_grid();

        assert_eq!(smoothing.len(), 22);
        assert_eq!(smoothing[0], Smoothing::Simple { window: 0 });
        assert_eq!(smoothing[11], Smoothing::Simple { window: 11 });
        assert_eq!(smoothing[12], Smoothing::Exponential { alpha: 0.1 });
        assert_eq!(CURVATURE_GRID.len(), 11);
        assert_eq!(TURNING_WINDOWS.len(), 18);
        assert_eq!(MIXING_WEIGHTS.len() * MIXING_METHODS.len(), 22);
    }

    #[test]
    // Purpose
    // -------
    // Verify case-insensitive parsing of cyclicality and rejection of unknown
    // names.
    //
    // Given
    // -----
    // - "Countercyclical", "PROCYCLICAL", "acyclical".
    //
    // Expect
    // ------
    // - The first two parse; the last returns `InvalidCyclicality`.
    fn cyclicality_from_str_accepts_known_names_only() {
        assert_eq!("Countercyclical".parse::<Cyclicality>(), Ok(Cyclicality::Countercyclical));
        assert_eq!("PROCYCLICAL".parse::<Cyclicality>(), Ok(Cyclicality::Procyclical));
        assert_eq!(
            "acyclical".parse::<Cyclicality>(),
            Err(IndicatorError::InvalidCyclicality { name: "acyclical".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // Check both mixing formulas on a hand-computed pair.
    //
    // Given
    // -----
    // - x = 1.0, y = 3.0, ζ = 0.25.
    //
    // Expect
    // ------
    // - Linear: 0.25·1 + 0.75·3 = 2.5.
    // - MinMax: 0.25·1 + 0.75·3 = 2.5, and with (x, y) swapped the result is
    //   unchanged while Linear gives 0.25·3 + 0.75·1 = 1.5.
    fn mixing_methods_match_hand_computation() {
        assert_eq!(MixingMethod::Linear.combine(1.0, 3.0, 0.25), 2.5);
        assert_eq!(MixingMethod::MinMax.combine(1.0, 3.0, 0.25), 2.5);
        assert_eq!(MixingMethod::MinMax.combine(3.0, 1.0, 0.25), 2.5);
        assert_eq!(MixingMethod::Linear.combine(3.0, 1.0, 0.25), 1.5);
    }
}
