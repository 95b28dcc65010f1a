//! Fit summaries and data-quality warnings.
//!
//! Empty stages are legitimate outcomes (a short window or a coarse grid may
//! admit no perfect classifier). They are reported here instead of as
//! errors so callers can decide what to do.
use serde::{Deserialize, Serialize};

/// Stage of the pipeline that produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityWarning {
    /// No (column, threshold) pair matched the true event count.
    NoPerfectClassifiers,
    /// The frontier is empty (implies no perfect classifiers).
    EmptyFrontier,
    /// No frontier member is under the precision ceiling; probabilities will
    /// be identically zero.
    EmptyEnsemble,
}

impl std::fmt::Display for QualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityWarning::NoPerfectClassifiers => {
                write!(f, "no perfect classifier found in the training window")
            }
            QualityWarning::EmptyFrontier => write!(f, "anticipation-precision frontier is empty"),
            QualityWarning::EmptyEnsemble => {
                write!(f, "no frontier member is under the precision ceiling")
            }
        }
    }
}

/// FitDiagnostics — sizes of each stage of a fit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub target_count: usize,
    pub n_perfect: usize,
    pub n_frontier: usize,
    pub n_ensemble: usize,
    pub warnings: Vec<QualityWarning>,
}

impl FitDiagnostics {
    /// Build from stage sizes, deriving the warnings.
    pub fn new(
        target_count: usize, n_perfect: usize, n_frontier: usize, n_ensemble: usize,
    ) -> Self {
        let mut warnings = Vec::new();
        if n_perfect == 0 {
            warnings.push(QualityWarning::NoPerfectClassifiers);
        }
        if n_frontier == 0 {
            warnings.push(QualityWarning::EmptyFrontier);
        }
        if n_ensemble == 0 {
            warnings.push(QualityWarning::EmptyEnsemble);
        }
        FitDiagnostics { target_count, n_perfect, n_frontier, n_ensemble, warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
