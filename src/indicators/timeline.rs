//! Monthly timelines and validated raw labor-market series.
//!
//! Purpose
//! -------
//! Provide the two input containers every indicator family is built from:
//! a [`Timeline`] of decimal-year month stamps and a [`RawSeries`] of
//! strictly positive monthly rates aligned to it.
//!
//! Key behaviors
//! -------------
//! - Round every date to [`DATE_DECIMALS`] decimals so that dates produced by
//!   different sources compare equal with `==`.
//! - Enforce one-month spacing and strict monotonicity of timelines.
//! - Resolve a `[start, end]` decimal-year window into a row range.
//!
//! Invariants & assumptions
//! ------------------------
//! - A timeline is non-empty, finite, strictly increasing, and consecutive
//!   values differ by 1/12 up to [`SPACING_TOL`].
//! - Raw values are finite and strictly positive (the curvature stage takes
//!   logarithms and fractional powers).
//!
//! Conventions
//! -----------
//! - Dates are decimal years: January 2001 is `2001.0`, February 2001 is
//!   `2001.0833`.
//! - Row 0 is the oldest month.
use crate::indicators::errors::{IndicatorError, IndicatorResult};
use ndarray::Array1;
use std::ops::Range;

/// Number of decimals kept in every timeline date.
pub const DATE_DECIMALS: i32 = 4;

/// Length of one month in decimal years.
pub const MONTH: f64 = 1.0 / 12.0;

/// Tolerance on the spacing between consecutive dates.
pub const SPACING_TOL: f64 = 1e-3;

/// Round a decimal-year date to [`DATE_DECIMALS`] decimals.
#[inline]
pub fn round_date(date: f64) -> f64 {
    let scale = 10f64.powi(DATE_DECIMALS);
    (date * scale).round() / scale
}

/// Timeline — strictly increasing monthly decimal-year stamps.
///
/// Purpose
/// -------
/// Shared time axis of raw series, indicator families, detected events and
/// probability traces. Every month-indexed array in the crate has exactly
/// one row per timeline entry.
///
/// Fields
/// ------
/// - `dates`: `Array1<f64>`
///   Rounded decimal-year dates, oldest first.
///
/// Invariants
/// ----------
/// - `dates.len() > 0`.
/// - `dates[i + 1] - dates[i]` is within [`SPACING_TOL`] of 1/12.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    dates: Array1<f64>,
}

impl Timeline {
    /// Build a validated timeline from decimal-year dates.
    ///
    /// Parameters
    /// ----------
    /// - `dates`: `Array1<f64>`
    ///   Decimal-year dates, oldest first. Values are rounded to
    ///   [`DATE_DECIMALS`] decimals before validation.
    ///
    /// Returns
    /// -------
    /// `IndicatorResult<Timeline>`
    ///
    /// Errors
    /// ------
    /// - `IndicatorError::EmptySeries` when `dates` is empty.
    /// - `IndicatorError::InvalidTimeline { index, reason }` when a date is
    ///   non-finite, or when the step into `index` is not one month.
    pub fn new(dates: Array1<f64>) -> IndicatorResult<Self> {
        if dates.is_empty() {
            return Err(IndicatorError::EmptySeries);
        }
        let dates = dates.mapv(round_date);
        for (index, &date) in dates.iter().enumerate() {
            if !date.is_finite() {
                return Err(IndicatorError::InvalidTimeline { index, reason: "date is not finite" });
            }
            if index > 0 {
                let step = date - dates[index - 1];
                if step <= 0.0 {
                    return Err(IndicatorError::InvalidTimeline {
                        index,
                        reason: "dates must be strictly increasing",
                    });
                }
                if (step - MONTH).abs() > SPACING_TOL {
                    return Err(IndicatorError::InvalidTimeline {
                        index,
                        reason: "consecutive dates must be one month apart",
                    });
                }
            }
        }
        Ok(Timeline { dates })
    }

    /// Build a timeline of `len` consecutive months starting at `start`.
    ///
    /// Errors
    /// ------
    /// - `IndicatorError::EmptySeries` when `len == 0`.
    /// - `IndicatorError::InvalidTimeline` when `start` is not finite.
    pub fn monthly(start: f64, len: usize) -> IndicatorResult<Self> {
        let dates = Array1::from_shape_fn(len, |i| start + i as f64 * MONTH);
        Timeline::new(dates)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &Array1<f64> {
        &self.dates
    }

    /// Date of row `index`. Panics if `index >= len()`.
    pub fn date(&self, index: usize) -> f64 {
        self.dates[index]
    }

    pub fn first(&self) -> f64 {
        self.dates[0]
    }

    pub fn last(&self) -> f64 {
        self.dates[self.dates.len() - 1]
    }

    /// Row index of `date` after rounding, if present.
    pub fn index_of(&self, date: f64) -> Option<usize> {
        let date = round_date(date);
        self.dates.iter().position(|&d| d == date)
    }

    /// Rows whose date lies in the closed interval `[start, end]`.
    ///
    /// Returns `None` when no row falls inside the interval.
    pub fn window(&self, start: f64, end: f64) -> Option<Range<usize>> {
        let (start, end) = (round_date(start), round_date(end));
        let first = self.dates.iter().position(|&d| d >= start)?;
        let stop = self.dates.iter().rposition(|&d| d <= end)? + 1;
        if first < stop { Some(first..stop) } else { None }
    }
}

/// RawSeries — one validated monthly labor-market rate.
///
/// Purpose
/// -------
/// Immutable input of the indicator builder: an unemployment or vacancy
/// rate, already spliced upstream into one continuous monthly series.
///
/// Fields
/// ------
/// - `timeline`: [`Timeline`]
///   Month stamps; one per value.
/// - `values`: `Array1<f64>`
///   Observed rates; finite and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    timeline: Timeline,
    values: Array1<f64>,
}

impl RawSeries {
    /// Construct a validated raw series.
    ///
    /// Errors
    /// ------
    /// - `IndicatorError::LengthMismatch` when `values.len() != timeline.len()`.
    /// - `IndicatorError::NonFiniteData { index, value }` at the first NaN/±∞.
    /// - `IndicatorError::NonPositiveData { index, value }` at the first value
    ///   ≤ 0.
    pub fn new(timeline: Timeline, values: Array1<f64>) -> IndicatorResult<Self> {
        if values.len() != timeline.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: timeline.len(),
                actual: values.len(),
            });
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(IndicatorError::NonFiniteData { index, value });
            }
            if value <= 0.0 {
                return Err(IndicatorError::NonPositiveData { index, value });
            }
        }
        Ok(RawSeries { timeline, values })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Timeline rounding, spacing validation and window resolution.
    // - RawSeries validation of length, finiteness and positivity.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check that `Timeline::monthly` produces rounded, one-month-apart dates
    // that `index_of` can find again by value.
    //
    // Given
    // -----
    // - start = 2000.0, len = 24.
    //
    // Expect
    // ------
    // - Date 13 equals round(2000 + 13/12) and is found at index 13.
    fn timeline_monthly_dates_are_rounded_and_searchable() {
        let timeline = Timeline::monthly(2000.0, 24).expect("valid timeline");

        assert_eq!(timeline.len(), 24);
        assert_eq!(timeline.date(13), 2001.0833);
        assert_eq!(timeline.index_of(2000.0 + 13.0 / 12.0), Some(13));
    }

    #[test]
    // Purpose
    // -------
    // Ensure timelines with gaps or reversals are rejected.
    //
    // Given
    // -----
    // - A two-month gap between the 2nd and 3rd date.
    // - A decreasing pair of dates.
    //
    // Expect
    // ------
    // - `InvalidTimeline` at index 2 and index 1 respectively.
    fn timeline_new_rejects_gaps_and_reversals() {
        let gap = array![2000.0, 2000.0833, 2000.25];
        let reversed = array![2000.0833, 2000.0];

        match Timeline::new(gap) {
            Err(IndicatorError::InvalidTimeline { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected InvalidTimeline, got {other:?}"),
        }
        match Timeline::new(reversed) {
            Err(IndicatorError::InvalidTimeline { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidTimeline, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `window` returns the closed row range and `None` when the
    // interval misses the timeline.
    //
    // Given
    // -----
    // - 12 months of 2000.
    //
    // Expect
    // ------
    // - [2000.25, 2000.5] maps to rows 3..7.
    // - [2005.0, 2006.0] maps to `None`.
    fn timeline_window_resolves_closed_interval() {
        let timeline = Timeline::monthly(2000.0, 12).expect("valid timeline");

        assert_eq!(timeline.window(2000.25, 2000.5), Some(3..7));
        assert_eq!(timeline.window(1990.0, 2100.0), Some(0..12));
        assert_eq!(timeline.window(2005.0, 2006.0), None);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `RawSeries::new` reports the first invalid value.
    //
    // Given
    // -----
    // - A length mismatch, a NaN at index 1, a zero at index 2.
    //
    // Expect
    // ------
    // - `LengthMismatch`, `NonFiniteData { index: 1 }`, `NonPositiveData { index: 2 }`.
    fn raw_series_new_rejects_invalid_values() {
        let timeline = Timeline::monthly(2000.0, 3).expect("valid timeline");

        assert_eq!(
            RawSeries::new(timeline.clone(), array![0.05, 0.05]).unwrap_err(),
            IndicatorError::LengthMismatch { expected: 3, actual: 2 }
        );
        assert!(matches!(
            RawSeries::new(timeline.clone(), array![0.05, f64::NAN, 0.05]),
            Err(IndicatorError::NonFiniteData { index: 1, .. })
        ));
        assert_eq!(
            RawSeries::new(timeline, array![0.05, 0.04, 0.0]).unwrap_err(),
            IndicatorError::NonPositiveData { index: 2, value: 0.0 }
        );
    }
}
