//! Persisted perfect-classifier search results.
//!
//! The threshold sweep is by far the most expensive stage. A
//! [`SearchSnapshot`] stores its output (column indices, thresholds and the
//! detected-date matrix, plus the target count and training window) so the
//! frontier and ensemble can be rebuilt later without sweeping again.
//!
//! Snapshots are JSON documents written with `serde_json`.
use crate::classifiers::{
    errors::{ClassifierError, ClassifierResult},
    search::{Classifier, PerfectClassifier, TrainingWindow},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// SearchSnapshot — column-oriented dump of a perfect-classifier search.
///
/// Invariants
/// ----------
/// - `columns`, `thresholds` and `detected` have the same length.
/// - Every row of `detected` has `target_count` dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub target_count: usize,
    pub window: TrainingWindow,
    pub columns: Vec<usize>,
    pub thresholds: Vec<f64>,
    pub detected: Vec<Vec<f64>>,
}

impl SearchSnapshot {
    pub fn from_classifiers(
        perfect: &[PerfectClassifier], target_count: usize, window: TrainingWindow,
    ) -> Self {
        SearchSnapshot {
            target_count,
            window,
            columns: perfect.iter().map(|p| p.classifier.column).collect(),
            thresholds: perfect.iter().map(|p| p.classifier.threshold).collect(),
            detected: perfect.iter().map(|p| p.detected.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Rebuild the perfect classifiers.
    ///
    /// Errors
    /// ------
    /// - `ClassifierError::MalformedSnapshot` when the invariants above do
    ///   not hold or a threshold is not strictly positive.
    pub fn to_classifiers(&self) -> ClassifierResult<Vec<PerfectClassifier>> {
        self.validate()?;
        Ok(self
            .columns
            .iter()
            .zip(&self.thresholds)
            .zip(&self.detected)
            .map(|((&column, &threshold), detected)| PerfectClassifier {
                classifier: Classifier { column, threshold },
                detected: detected.clone(),
            })
            .collect())
    }

    fn validate(&self) -> ClassifierResult<()> {
        let malformed = |reason| Err(ClassifierError::MalformedSnapshot { reason });
        if self.target_count == 0 {
            return malformed("target count must be at least 1");
        }
        if TrainingWindow::new(self.window.start(), self.window.end()).is_err() {
            return malformed("training window bounds are invalid");
        }
        if self.thresholds.len() != self.columns.len() || self.detected.len() != self.columns.len()
        {
            return malformed("columns, thresholds and detected differ in length");
        }
        if self.thresholds.iter().any(|&t| !t.is_finite() || t <= 0.0) {
            return malformed("thresholds must be finite and positive");
        }
        if self.detected.iter().any(|row| row.len() != self.target_count) {
            return malformed("detected rows must hold target_count dates");
        }
        if self.detected.iter().flatten().any(|d| !d.is_finite()) {
            return malformed("detected dates must be finite");
        }
        Ok(())
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> ClassifierResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read and validate a snapshot written by [`SearchSnapshot::save`].
    pub fn load(path: impl AsRef<Path>) -> ClassifierResult<Self> {
        let json = fs::read_to_string(path)?;
        let snapshot: SearchSnapshot = serde_json::from_str(&json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SearchSnapshot {
        let window = TrainingWindow::new(1960.0, 2000.0).expect("valid window");
        let perfect = vec![
            PerfectClassifier {
                classifier: Classifier { column: 3, threshold: 0.25 },
                detected: vec![1970.0, 1980.5],
            },
            PerfectClassifier {
                classifier: Classifier { column: 9, threshold: 0.3 },
                detected: vec![1969.75, 1980.25],
            },
        ];
        SearchSnapshot::from_classifiers(&perfect, 2, window)
    }

    #[test]
    // Purpose
    // -------
    // A saved snapshot loads back unchanged and rebuilds the classifiers.
    fn save_then_load_restores_classifiers() {
        let path = std::env::temp_dir()
            .join(format!("rust_recession_snapshot_{}.json", std::process::id()));
        let snapshot = sample();

        snapshot.save(&path).expect("written");
        let loaded = SearchSnapshot::load(&path).expect("read");
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, snapshot);
        let rebuilt = loaded.to_classifiers().expect("valid");
        assert_eq!(rebuilt[1].classifier, Classifier { column: 9, threshold: 0.3 });
        assert_eq!(rebuilt[1].detected, vec![1969.75, 1980.25]);
    }

    #[test]
    // Purpose
    // -------
    // Inconsistent snapshots and unreadable files are reported, not patched.
    fn malformed_snapshots_are_rejected() {
        let mut short_row = sample();
        short_row.detected[0].pop();
        let mut ragged = sample();
        ragged.thresholds.pop();

        assert!(matches!(
            short_row.to_classifiers(),
            Err(ClassifierError::MalformedSnapshot { .. })
        ));
        assert!(matches!(ragged.to_classifiers(), Err(ClassifierError::MalformedSnapshot { .. })));
        assert!(matches!(
            SearchSnapshot::load("/nonexistent/rust_recession/snapshot.json"),
            Err(ClassifierError::Snapshot { .. })
        ));
    }
}
