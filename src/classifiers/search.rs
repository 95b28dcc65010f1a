//! Exhaustive search for perfect threshold classifiers.
//!
//! Purpose
//! -------
//! Sweep a [`ThresholdGrid`] against every column of an [`IndicatorFamily`]
//! over a training window and keep each (column, threshold) pair whose
//! detected-event count equals the number of true events exactly.
//!
//! Key behaviors
//! -------------
//! - Each threshold runs one columnar [`scan_events`] over the window; the
//!   scan keeps the first `target_count` event rows per column, which is all
//!   a perfect classifier can have.
//! - Thresholds are independent. With the `rayon` feature they are swept in
//!   parallel and concatenated; the merged list is then sorted by
//!   (threshold, column), so output order never depends on scheduling.
//! - A column may appear once per threshold at which it is perfect; results
//!   are not deduplicated by column.
//!
//! Invariants & assumptions
//! ------------------------
//! - `target_count ≥ 1`.
//! - Every [`PerfectClassifier::detected`] has exactly `target_count`
//!   increasing dates taken from the family timeline.
//! - An empty result is valid and is returned as an empty vector.
//!
//! Performance
//! -----------
//! - Cost is `O(thresholds × window months × columns)` with one `u8`-sized
//!   state, one count and `target_count` slots per column of scratch per
//!   threshold.
use crate::{
    classifiers::{
        errors::{ClassifierError, ClassifierResult},
        state_machine::scan_events,
        thresholds::ThresholdGrid,
    },
    indicators::{family::IndicatorFamily, timeline::Timeline},
};
use ndarray::ArrayView2;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use slog::{Logger, debug, info};
use std::ops::Range;

/// Classifier — an indicator column paired with an entry threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    pub column: usize,
    pub threshold: f64,
}

/// PerfectClassifier — classifier reproducing the true event count.
///
/// Fields
/// ------
/// - `classifier`: column and threshold.
/// - `detected`: decimal-year dates of the detected events in the training
///   window, oldest first; length equals the target count.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfectClassifier {
    pub classifier: Classifier,
    pub detected: Vec<f64>,
}

/// TrainingWindow — closed decimal-year interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingWindow {
    start: f64,
    end: f64,
}

impl TrainingWindow {
    /// Errors
    /// ------
    /// - `ClassifierError::InvalidWindow` when a bound is not finite or
    ///   `end < start`.
    pub fn new(start: f64, end: f64) -> ClassifierResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(ClassifierError::InvalidWindow {
                start,
                end,
                reason: "bounds must be finite",
            });
        }
        if end < start {
            return Err(ClassifierError::InvalidWindow {
                start,
                end,
                reason: "end must not precede start",
            });
        }
        Ok(TrainingWindow { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Timeline rows inside the window.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::EmptyWindow` when no month falls inside.
    pub fn rows(&self, timeline: &Timeline) -> ClassifierResult<Range<usize>> {
        timeline
            .window(self.start, self.end)
            .ok_or(ClassifierError::EmptyWindow { start: self.start, end: self.end })
    }
}

/// Find every perfect classifier of `family` on `window`.
///
/// Parameters
/// ----------
/// - `family`: [`IndicatorFamily`]
///   Full indicator family; only the window rows are read.
/// - `window`: [`TrainingWindow`]
///   Training interval; must overlap the family timeline.
/// - `target_count`: `usize`
///   Number of true events in the window; must be ≥ 1.
/// - `grid`: [`ThresholdGrid`]
///   Thresholds to sweep.
/// - `log`: `slog::Logger`
///   Receives the sweep size and the number of classifiers found.
///
/// Returns
/// -------
/// `ClassifierResult<Vec<PerfectClassifier>>`
///   Sorted by ascending threshold, then ascending column index.
///
/// Errors
/// ------
/// - `ClassifierError::ZeroTargetCount` when `target_count == 0`.
/// - `ClassifierError::EmptyWindow` when the window misses the timeline.
pub fn search_perfect_classifiers(
    family: &IndicatorFamily, window: TrainingWindow, target_count: usize, grid: &ThresholdGrid,
    log: &Logger,
) -> ClassifierResult<Vec<PerfectClassifier>> {
    if target_count == 0 {
        return Err(ClassifierError::ZeroTargetCount);
    }
    let rows = window.rows(family.timeline())?;
    let offset = rows.start;
    let view = family.rows(rows);
    let dates = family.timeline().dates();
    let thresholds = grid.values();

    info!(log, "sweeping thresholds";
        "columns" => view.ncols(), "months" => view.nrows(),
        "thresholds" => thresholds.len(), "target_count" => target_count);

    let sweep = |&threshold: &f64| -> Vec<PerfectClassifier> {
        perfect_at_threshold(view, threshold, target_count)
            .into_iter()
            .map(|(column, event_rows)| PerfectClassifier {
                classifier: Classifier { column, threshold },
                detected: event_rows.iter().map(|&r| dates[offset + r]).collect(),
            })
            .collect()
    };

    #[cfg(feature = "rayon")]
    let per_threshold: Vec<Vec<PerfectClassifier>> = thresholds.par_iter().map(sweep).collect();
    #[cfg(not(feature = "rayon"))]
    let per_threshold: Vec<Vec<PerfectClassifier>> = thresholds.iter().map(sweep).collect();

    let mut found: Vec<PerfectClassifier> = per_threshold.into_iter().flatten().collect();
    found.sort_by(|a, b| {
        a.classifier
            .threshold
            .total_cmp(&b.classifier.threshold)
            .then(a.classifier.column.cmp(&b.classifier.column))
    });

    if found.is_empty() {
        debug!(log, "no perfect classifier in training window";
            "start" => window.start(), "end" => window.end());
    }
    info!(log, "threshold sweep finished"; "perfect_classifiers" => found.len());
    Ok(found)
}

/// Columns with exactly `target_count` events at `threshold`, with their
/// event rows relative to the start of `view`.
fn perfect_at_threshold(
    view: ArrayView2<f64>, threshold: f64, target_count: usize,
) -> Vec<(usize, Vec<usize>)> {
    let scan = scan_events(view, threshold, target_count);
    scan.counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == target_count)
        .map(|(column, _)| (column, scan.events.row(column).to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::params::{Cyclicality, IndicatorParams, IndicatorTag, Smoothing};
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact-count filtering and dating of detected events on a toy family.
    // - Training-window restriction and deterministic ordering.
    // - Configuration errors (zero target, empty window) and the empty-result
    //   path.
    // -------------------------------------------------------------------------

    fn toy_family(values: Array2<f64>) -> IndicatorFamily {
        let timeline = Timeline::monthly(2000.0, values.nrows()).expect("valid timeline");
        let tags = (0..values.ncols())
            .map(|window| {
                IndicatorTag::Single(IndicatorParams {
                    cyclicality: Cyclicality::Countercyclical,
                    smoothing: Smoothing::Simple { window },
                    curvature: 0.0,
                    turning_window: 1,
                })
            })
            .collect();
        IndicatorFamily::new(timeline, values, tags).expect("valid family")
    }

    fn quiet() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    // Purpose
    // -------
    // Hand-computed crossings on a two-column toy family.
    //
    // Given
    // -----
    // - Column 0 crosses 0.2 at rows 2 and 6; column 1 only at row 3.
    // - Grid {0.2}, target_count = 2.
    //
    // Expect
    // ------
    // - One perfect classifier: column 0 with dates of rows 2 and 6.
    fn search_returns_exact_count_matches_with_dates() {
        let family = toy_family(array![
            [0.0, 0.0],
            [0.1, 0.0],
            [0.3, 0.1],
            [0.0, 0.5],
            [0.0, 0.4],
            [0.1, 0.3],
            [0.25, 0.2],
            [0.0, 0.1],
        ]);
        let grid = ThresholdGrid::new(0.2, 0.2, 0.1).expect("valid grid");
        let window = TrainingWindow::new(2000.0, 2001.0).expect("valid window");

        let found =
            search_perfect_classifiers(&family, window, 2, &grid, &quiet()).expect("search runs");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].classifier, Classifier { column: 0, threshold: 0.2 });
        assert_eq!(found[0].detected, vec![family.timeline().date(2), family.timeline().date(6)]);
    }

    #[test]
    // Purpose
    // -------
    // Results are sorted by threshold, then column, and restricted to the
    // window rows.
    //
    // Given
    // -----
    // - Two identical columns crossing once; grid {0.1, 0.2, 0.3}.
    // - Window starting at row 1.
    //
    // Expect
    // ------
    // - (0.1, 0), (0.1, 1), (0.2, 0), (0.2, 1), (0.3, 0), (0.3, 1).
    fn search_orders_by_threshold_then_column() {
        let family = toy_family(array![[0.0, 0.0], [0.0, 0.0], [0.35, 0.35], [0.0, 0.0]]);
        let grid = ThresholdGrid::new(0.1, 0.3, 0.1).expect("valid grid");
        let window = TrainingWindow::new(2000.0833, 2000.25).expect("valid window");

        let found =
            search_perfect_classifiers(&family, window, 1, &grid, &quiet()).expect("search runs");
        let keys: Vec<(f64, usize)> =
            found.iter().map(|p| (p.classifier.threshold, p.classifier.column)).collect();

        assert_eq!(keys, vec![(0.1, 0), (0.1, 1), (0.2, 0), (0.2, 1), (0.3, 0), (0.3, 1)]);
        assert!(found.iter().all(|p| p.detected == vec![family.timeline().date(2)]));
    }

    #[test]
    // Purpose
    // -------
    // Configuration errors fail fast; no match is an empty, valid result.
    fn search_rejects_bad_config_and_allows_empty_results() {
        let family = toy_family(array![[0.0], [0.05], [0.0]]);
        let grid = ThresholdGrid::new(0.1, 0.2, 0.1).expect("valid grid");
        let window = TrainingWindow::new(2000.0, 2000.5).expect("valid window");
        let outside = TrainingWindow::new(2010.0, 2011.0).expect("valid window");

        assert_eq!(
            search_perfect_classifiers(&family, window, 0, &grid, &quiet()).unwrap_err(),
            ClassifierError::ZeroTargetCount
        );
        assert!(matches!(
            search_perfect_classifiers(&family, outside, 1, &grid, &quiet()),
            Err(ClassifierError::EmptyWindow { .. })
        ));
        assert!(
            search_perfect_classifiers(&family, window, 1, &grid, &quiet())
                .expect("search runs")
                .is_empty()
        );
    }
}
