//! Recession probabilities from an ensemble of classifiers.
//!
//! Purpose
//! -------
//! Replay each ensemble classifier over the full timeline and convert the
//! number of months it has spent in a recession into a probability that the
//! true recession has already started.
//!
//! Key behaviors
//! -------------
//! - Expansion months score exactly 0.
//! - A recession month with duration `d` scores `Φ(d − 1; μ = −mean, σ = std)`
//!   where `mean` and `std` come from the classifier's [`ErrorProfile`].
//! - A classifier with `std == 0` scores a step: 1 once `d − 1 ≥ −mean`,
//!   0 before.
//! - The aggregate is the column mean over ensemble members; an empty
//!   ensemble gives an all-zero aggregate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Scores are in `[0, 1]` and non-decreasing in `d` within an episode.
//! - Scoring reads only rows `0..=t` to produce row `t`.
use crate::{
    classifiers::{
        errors::{ClassifierError, ClassifierResult},
        frontier::{ErrorProfile, RankedClassifier},
        search::Classifier,
        state_machine::replay_column,
    },
    indicators::{family::IndicatorFamily, timeline::Timeline},
};
use ndarray::{Array1, Array2, Axis};
use slog::{Logger, info};
use statrs::distribution::{ContinuousCDF, Normal};

/// Probability that the true recession has started, given `duration` months
/// in a detected recession.
///
/// Errors
/// ------
/// - `ClassifierError::InvalidProfile` when `mean` or `std` is not finite or
///   `std < 0`.
pub fn recession_probability(duration: usize, profile: &ErrorProfile) -> ClassifierResult<f64> {
    let (mean, std) = (profile.mean, profile.std);
    if !(mean.is_finite() && std.is_finite()) || std < 0.0 {
        return Err(ClassifierError::InvalidProfile { mean, std });
    }
    if duration == 0 {
        return Ok(0.0);
    }
    let x = (duration - 1) as f64;
    if std == 0.0 {
        return Ok(if x >= -mean { 1.0 } else { 0.0 });
    }
    let normal =
        Normal::new(-mean, std).map_err(|_| ClassifierError::InvalidProfile { mean, std })?;
    Ok(normal.cdf(x))
}

/// ProbabilityTrace — per-member and aggregate probabilities over time.
///
/// Fields
/// ------
/// - `timeline`: dates of the rows.
/// - `classifiers`: ensemble members, in column order of `members`.
/// - `members`: `months × members` probabilities.
/// - `aggregate`: row means of `members` (zeros when there are no members).
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTrace {
    pub timeline: Timeline,
    pub classifiers: Vec<Classifier>,
    pub members: Array2<f64>,
    pub aggregate: Array1<f64>,
}

/// Score every ensemble member over the whole family timeline.
///
/// Parameters
/// ----------
/// - `family`: [`IndicatorFamily`]
///   Family the ensemble was selected from (same column indexing).
/// - `ensemble`: `&[RankedClassifier]`
///   Members with their error profiles.
/// - `log`: `slog::Logger`
///
/// Returns
/// -------
/// `ClassifierResult<ProbabilityTrace>`
///
/// Errors
/// ------
/// - `ClassifierError::ColumnOutOfRange` when a member column is not in
///   `family`.
/// - `ClassifierError::InvalidProfile` for a non-finite profile.
pub fn score_ensemble(
    family: &IndicatorFamily, ensemble: &[RankedClassifier], log: &Logger,
) -> ClassifierResult<ProbabilityTrace> {
    let n = family.nrows();
    let mut members = Array2::<f64>::zeros((n, ensemble.len()));

    for (k, member) in ensemble.iter().enumerate() {
        let (_, values) = family.column(member.classifier.column)?;
        let replay = replay_column(values, member.classifier.threshold);
        for (slot, &duration) in members.column_mut(k).iter_mut().zip(replay.durations.iter()) {
            *slot = recession_probability(duration, &member.profile)?;
        }
    }

    let aggregate = members.mean_axis(Axis(1)).unwrap_or_else(|| Array1::zeros(n));
    info!(log, "scored ensemble"; "members" => ensemble.len(), "months" => n);

    Ok(ProbabilityTrace {
        timeline: family.timeline().clone(),
        classifiers: ensemble.iter().map(|r| r.classifier).collect(),
        members,
        aggregate,
    })
}
