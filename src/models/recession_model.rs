//! Recession model: search → frontier → ensemble → probabilities.
//!
//! Purpose
//! -------
//! Own the full classifier pipeline for one indicator family. A model is
//! built from [`ModelOptions`], fitted on a family, a set of true events and
//! a training window, then queried for its frontier, its ensemble and
//! full-sample recession probabilities.
//!
//! Key behaviors
//! -------------
//! - [`RecessionModel::fit`] restricts the true events to the window to get
//!   the target count, runs the threshold sweep, profiles every perfect
//!   classifier, and selects the frontier and ensemble.
//! - [`RecessionModel::fit_from_snapshot`] resumes from a stored
//!   [`SearchSnapshot`] and skips the sweep.
//! - Accessors return `ClassifierError::ModelNotFitted` before a fit.
//! - Empty stages do not fail the fit; they are listed in
//!   [`FitDiagnostics::warnings`] and logged at warning level.
//!
//! Invariants & assumptions
//! ------------------------
//! - Column indices stored in the model refer to the family passed to `fit`;
//!   [`RecessionModel::probabilities`] must be called with that family (or
//!   one with the same column layout, e.g. extended in time).
//! - A refit replaces all fitted state.
use crate::{
    classifiers::{
        errors::{ClassifierError, ClassifierResult},
        events::TrueEvents,
        frontier::{RankedClassifier, profile_classifiers, select_ensemble, select_frontier},
        scoring::{ProbabilityTrace, score_ensemble},
        search::{PerfectClassifier, TrainingWindow, search_perfect_classifiers},
        snapshot::SearchSnapshot,
    },
    indicators::family::IndicatorFamily,
    models::{
        diagnostics::{FitDiagnostics, QualityWarning},
        options::ModelOptions,
    },
};
use slog::{Logger, info, warn};

/// Fitted state of a [`RecessionModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedClassifiers {
    pub window: TrainingWindow,
    pub truth: TrueEvents,
    pub perfect: Vec<PerfectClassifier>,
    pub frontier: Vec<RankedClassifier>,
    pub ensemble: Vec<RankedClassifier>,
    pub diagnostics: FitDiagnostics,
}

/// RecessionModel — configured pipeline plus fitted state.
#[derive(Debug, Clone)]
pub struct RecessionModel {
    /// Fit configuration.
    pub options: ModelOptions,
    /// Populated by `fit` / `fit_from_snapshot`.
    pub fitted: Option<FittedClassifiers>,
    log: Logger,
}

impl RecessionModel {
    pub fn new(options: ModelOptions) -> RecessionModel {
        let log = options.logger();
        RecessionModel { options, fitted: None, log }
    }

    /// Same as [`RecessionModel::new`] with a caller-supplied logger.
    pub fn with_logger(options: ModelOptions, log: Logger) -> RecessionModel {
        RecessionModel { options, fitted: None, log }
    }

    /// Fit on `family` over `window`.
    ///
    /// Parameters
    /// ----------
    /// - `family`: [`IndicatorFamily`]
    /// - `events`: [`TrueEvents`]
    ///   Full event record; events outside `window` are ignored.
    /// - `window`: [`TrainingWindow`]
    ///
    /// Returns
    /// -------
    /// `ClassifierResult<FitDiagnostics>`
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::ZeroTargetCount` when no event starts in `window`.
    /// - `ClassifierError::EmptyWindow` when `window` misses the timeline.
    pub fn fit(
        &mut self, family: &IndicatorFamily, events: &TrueEvents, window: TrainingWindow,
    ) -> ClassifierResult<FitDiagnostics> {
        let truth = events.restrict(window.start(), window.end());
        let perfect = search_perfect_classifiers(
            family,
            window,
            truth.len(),
            &self.options.grid,
            &self.log,
        )?;
        self.select(window, truth, perfect)
    }

    /// Fit from a stored search, skipping the threshold sweep.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::MalformedSnapshot` for an inconsistent snapshot.
    /// - `ClassifierError::EventCountMismatch` when `events` restricted to the
    ///   snapshot window do not match the snapshot target count.
    pub fn fit_from_snapshot(
        &mut self, snapshot: &SearchSnapshot, events: &TrueEvents,
    ) -> ClassifierResult<FitDiagnostics> {
        let perfect = snapshot.to_classifiers()?;
        let window = snapshot.window;
        let truth = events.restrict(window.start(), window.end());
        if truth.len() != snapshot.target_count {
            return Err(ClassifierError::EventCountMismatch {
                expected: snapshot.target_count,
                actual: truth.len(),
            });
        }
        self.select(window, truth, perfect)
    }

    fn select(
        &mut self, window: TrainingWindow, truth: TrueEvents, perfect: Vec<PerfectClassifier>,
    ) -> ClassifierResult<FitDiagnostics> {
        let ranked = profile_classifiers(&perfect, truth.starts())?;
        let frontier = select_frontier(ranked);
        let ensemble = select_ensemble(&frontier, self.options.precision_ceiling)?;

        let diagnostics =
            FitDiagnostics::new(truth.len(), perfect.len(), frontier.len(), ensemble.len());
        info!(self.log, "fit complete";
            "target_count" => diagnostics.target_count,
            "perfect" => diagnostics.n_perfect,
            "frontier" => diagnostics.n_frontier,
            "ensemble" => diagnostics.n_ensemble);
        for warning in &diagnostics.warnings {
            warn!(self.log, "{}", warning);
        }

        self.fitted = Some(FittedClassifiers {
            window,
            truth,
            perfect,
            frontier,
            ensemble,
            diagnostics: diagnostics.clone(),
        });
        Ok(diagnostics)
    }

    fn state(&self) -> ClassifierResult<&FittedClassifiers> {
        self.fitted.as_ref().ok_or(ClassifierError::ModelNotFitted)
    }

    /// Search results of the last fit as a persistable snapshot.
    pub fn snapshot(&self) -> ClassifierResult<SearchSnapshot> {
        let state = self.state()?;
        Ok(SearchSnapshot::from_classifiers(&state.perfect, state.truth.len(), state.window))
    }

    pub fn perfect_classifiers(&self) -> ClassifierResult<&[PerfectClassifier]> {
        Ok(&self.state()?.perfect)
    }

    pub fn frontier(&self) -> ClassifierResult<&[RankedClassifier]> {
        Ok(&self.state()?.frontier)
    }

    pub fn ensemble(&self) -> ClassifierResult<&[RankedClassifier]> {
        Ok(&self.state()?.ensemble)
    }

    pub fn diagnostics(&self) -> ClassifierResult<&FitDiagnostics> {
        Ok(&self.state()?.diagnostics)
    }

    /// Ensemble recession probabilities over the full timeline of `family`.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::ModelNotFitted` before a fit.
    /// - `ClassifierError::ColumnOutOfRange` when `family` is narrower than
    ///   the one the model was fitted on.
    pub fn probabilities(&self, family: &IndicatorFamily) -> ClassifierResult<ProbabilityTrace> {
        let state = self.state()?;
        if state.diagnostics.warnings.contains(&QualityWarning::EmptyEnsemble) {
            warn!(self.log, "scoring an empty ensemble; probabilities are all zero");
        }
        score_ensemble(family, &state.ensemble, &self.log)
    }
}
