//! Error profiles, anticipation–precision frontier and ensemble selection.
//!
//! Purpose
//! -------
//! Turn perfect classifiers into ranked error profiles and keep the ones that
//! are not dominated in the (precision, timing) plane.
//!
//! Key behaviors
//! -------------
//! - Detected and true events are paired by chronological rank. The error of
//!   pair `i` is `(detected[i] − true[i]) × 12` months: negative values mean
//!   the classifier fired before the true start, positive values mean it was
//!   late. Anticipation is reported as `−mean`.
//! - [`ErrorProfile`] summarizes the errors by mean, population standard
//!   deviation, min and max.
//! - [`select_frontier`] sorts by std ascending (ties: mean, threshold,
//!   column) and walks the list once, keeping the first classifier and every
//!   later one whose mean is strictly below the best mean retained so far.
//! - [`select_ensemble`] keeps frontier members with std strictly below the
//!   precision ceiling.
//!
//! Invariants & assumptions
//! ------------------------
//! - Frontier stds are non-decreasing and frontier means strictly decreasing
//!   in output order.
//! - The ensemble is a prefix of the frontier.
use crate::classifiers::{
    errors::{ClassifierError, ClassifierResult},
    search::{Classifier, PerfectClassifier},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Months per year; event-date differences are reported in months.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Default ensemble precision ceiling, in months.
pub const DEFAULT_PRECISION_CEILING: f64 = 3.0;

/// ErrorProfile — timing errors of one classifier against the true events.
///
/// Fields
/// ------
/// - `errors`: per-event error in months, oldest event first.
/// - `mean`: average error (negative = early on average).
/// - `std`: population standard deviation of `errors`.
/// - `min`, `max`: extreme errors.
///
/// Notes
/// -----
/// - Errors are rounded to hundredths of a month before `mean` and `std` are
///   computed. Detections that differ only by the 4-decimal rounding of
///   timeline dates therefore give equal profiles and tie in the frontier
///   sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorProfile {
    pub errors: Vec<f64>,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ErrorProfile {
    /// Pair `detected` with `truth` by rank and summarize the errors.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::EventCountMismatch` when the lengths differ or
    ///   both are empty (`expected` is `truth.len()`).
    pub fn new(detected: &[f64], truth: &[f64]) -> ClassifierResult<Self> {
        if detected.len() != truth.len() || truth.is_empty() {
            return Err(ClassifierError::EventCountMismatch {
                expected: truth.len(),
                actual: detected.len(),
            });
        }
        let errors: Vec<f64> = detected
            .iter()
            .zip(truth)
            .map(|(&d, &t)| round_months((d - t) * MONTHS_PER_YEAR))
            .collect();
        Ok(ErrorProfile::from_errors(errors))
    }

    fn from_errors(errors: Vec<f64>) -> Self {
        let n = errors.len() as f64;
        let mean = errors.iter().sum::<f64>() / n;
        let var = errors.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;
        let min = errors.iter().copied().fold(f64::INFINITY, f64::min);
        let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        ErrorProfile { errors, mean, std: var.sqrt(), min, max }
    }

    /// Months of anticipation; positive when the classifier is early.
    pub fn anticipation(&self) -> f64 {
        -self.mean
    }
}

// Timeline dates carry 4 decimals, so a month difference is off by up to
// ~0.0012; errors are kept to hundredths of a month.
fn round_months(months: f64) -> f64 {
    (months * 100.0).round() / 100.0
}

/// RankedClassifier — classifier with its error profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedClassifier {
    pub classifier: Classifier,
    pub profile: ErrorProfile,
}

/// Compute the error profile of every perfect classifier.
///
/// Errors
/// ------
/// - `ClassifierError::EventCountMismatch` when a classifier's detected
///   dates do not match `truth` in length.
pub fn profile_classifiers(
    perfect: &[PerfectClassifier], truth: &[f64],
) -> ClassifierResult<Vec<RankedClassifier>> {
    perfect
        .iter()
        .map(|p| {
            Ok(RankedClassifier {
                classifier: p.classifier,
                profile: ErrorProfile::new(&p.detected, truth)?,
            })
        })
        .collect()
}

fn rank_order(a: &RankedClassifier, b: &RankedClassifier) -> Ordering {
    a.profile
        .std
        .total_cmp(&b.profile.std)
        .then(a.profile.mean.total_cmp(&b.profile.mean))
        .then(a.classifier.threshold.total_cmp(&b.classifier.threshold))
        .then(a.classifier.column.cmp(&b.classifier.column))
}

/// Anticipation–precision frontier.
///
/// Parameters
/// ----------
/// - `ranked`: profiled classifiers in any order.
///
/// Returns
/// -------
/// `Vec<RankedClassifier>`
///   Frontier members by ascending std; empty when `ranked` is empty.
///
/// Notes
/// -----
/// - Ties on std are broken by mean, so among equally precise classifiers
///   the earliest one is the one retained.
pub fn select_frontier(mut ranked: Vec<RankedClassifier>) -> Vec<RankedClassifier> {
    ranked.sort_by(rank_order);

    let mut frontier: Vec<RankedClassifier> = Vec::new();
    let mut best_mean = f64::INFINITY;
    for candidate in ranked {
        if frontier.is_empty() || candidate.profile.mean < best_mean {
            best_mean = candidate.profile.mean;
            frontier.push(candidate);
        }
    }
    frontier
}

/// Frontier members with `std < precision_ceiling`.
///
/// Errors
/// ------
/// - `ClassifierError::InvalidPrecisionCeiling` when the ceiling is not
///   finite or not positive.
pub fn select_ensemble(
    frontier: &[RankedClassifier], precision_ceiling: f64,
) -> ClassifierResult<Vec<RankedClassifier>> {
    validate_precision_ceiling(precision_ceiling)?;
    Ok(frontier.iter().filter(|r| r.profile.std < precision_ceiling).cloned().collect())
}

pub(crate) fn validate_precision_ceiling(value: f64) -> ClassifierResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ClassifierError::InvalidPrecisionCeiling { value });
    }
    Ok(())
}
