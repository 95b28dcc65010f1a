//! Known historical events (e.g. official recession start dates).
//!
//! [`TrueEvents`] holds validated, strictly increasing decimal-year start
//! dates. Restricting them to a training window gives the exact event count a
//! perfect classifier must reproduce.
use crate::{
    classifiers::errors::{ClassifierError, ClassifierResult},
    indicators::timeline::round_date,
};

/// TrueEvents — ordered start dates of known events.
///
/// Invariants
/// ----------
/// - Dates are finite, rounded like timeline dates, and strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct TrueEvents {
    starts: Vec<f64>,
}

impl TrueEvents {
    /// Build from start dates.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::InvalidEventDates { index, value, reason }` for the
    ///   first non-finite or non-increasing date.
    pub fn new(starts: Vec<f64>) -> ClassifierResult<Self> {
        let starts: Vec<f64> = starts.into_iter().map(round_date).collect();
        for (index, &value) in starts.iter().enumerate() {
            if !value.is_finite() {
                return Err(ClassifierError::InvalidEventDates {
                    index,
                    value,
                    reason: "date is not finite",
                });
            }
            if index > 0 && value <= starts[index - 1] {
                return Err(ClassifierError::InvalidEventDates {
                    index,
                    value,
                    reason: "dates must be strictly increasing",
                });
            }
        }
        Ok(TrueEvents { starts })
    }

    /// Build from `(start, end)` periods; only start dates are kept.
    ///
    /// Errors
    /// ------
    /// - `InvalidEventDates` when a period ends before it starts, or when the
    ///   start dates are invalid for [`TrueEvents::new`].
    pub fn from_periods(periods: &[(f64, f64)]) -> ClassifierResult<Self> {
        if let Some((index, &(start, _))) =
            periods.iter().enumerate().find(|(_, (start, end))| end < start)
        {
            return Err(ClassifierError::InvalidEventDates {
                index,
                value: start,
                reason: "period ends before it starts",
            });
        }
        TrueEvents::new(periods.iter().map(|&(start, _)| start).collect())
    }

    /// Events starting inside the closed interval `[start, end]`.
    pub fn restrict(&self, start: f64, end: f64) -> TrueEvents {
        let (start, end) = (round_date(start), round_date(end));
        let starts = self.starts.iter().copied().filter(|&d| d >= start && d <= end).collect();
        TrueEvents { starts }
    }

    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Periods keep their start dates and can be restricted to a window.
    //
    // Given
    // -----
    // - Three recessions starting 1990.5833, 2001.1667, 2007.9167.
    //
    // Expect
    // ------
    // - Restricting to [1995, 2010] keeps the last two.
    fn from_periods_and_restrict_keep_starts_in_window() {
        let events = TrueEvents::from_periods(&[
            (1990.5833, 1991.1667),
            (2001.1667, 2001.8333),
            (2007.9167, 2009.4167),
        ])
        .expect("valid periods");

        let window = events.restrict(1995.0, 2010.0);

        assert_eq!(events.len(), 3);
        assert_eq!(window.starts(), &[2001.1667, 2007.9167]);
    }

    #[test]
    // Purpose
    // -------
    // Unordered dates and inverted periods are configuration errors.
    fn new_rejects_unordered_dates_and_inverted_periods() {
        assert!(matches!(
            TrueEvents::new(vec![2001.0, 1990.0]),
            Err(ClassifierError::InvalidEventDates { index: 1, .. })
        ));
        assert!(matches!(
            TrueEvents::from_periods(&[(2001.0, 2000.0)]),
            Err(ClassifierError::InvalidEventDates { index: 0, .. })
        ));
    }
}
