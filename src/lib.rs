//! rust_recession — real-time recession classifiers on labor-market
//! indicators, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the recession pipeline to Python via the `_rust_recession`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - [`indicators`]: build 4,356 tagged indicator columns per raw series
//!   (unemployment, vacancy) and mix two families into 22× as many columns.
//! - [`classifiers`]: detect recessions with threshold rules, search for
//!   perfect classifiers on a training window, select the
//!   anticipation–precision frontier and ensemble, and score probabilities.
//! - [`models`]: the [`RecessionModel`](models::RecessionModel) facade that
//!   runs the classifier stages end to end.
//! - [`observability`]: `slog` loggers used by every stage.
//! - With `python-bindings`, a `RecessionDetector` class under
//!   `_rust_recession.recession`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion and error mapping.
//! - Every stage is deterministic, including under the `rayon` feature.
//!
//! Conventions
//! -----------
//! - Dates are decimal years on a monthly grid; matrices are
//!   `months × columns`; timing errors are months, negative when early.
//! - Errors are [`indicators::IndicatorError`] and
//!   [`classifiers::ClassifierError`] internally and become `ValueError`s at
//!   the Python boundary.
//!
//! Downstream usage
//! ----------------
//! ```rust,no_run
//! use rust_recession::{
//!     classifiers::{ThresholdGrid, TrainingWindow, TrueEvents},
//!     indicators::{RawSeries, Timeline, build_labor_family},
//!     models::{ModelOptions, RecessionModel},
//!     observability::term_logger,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let (u, v) = (vec![0.05; 240], vec![0.03; 240]);
//! let log = term_logger();
//! let timeline = Timeline::monthly(1960.0, u.len())?;
//! let u = RawSeries::new(timeline.clone(), u.into())?;
//! let v = RawSeries::new(timeline, v.into())?;
//! let family = build_labor_family(&u, &v, &log)?;
//!
//! let events = TrueEvents::new(vec![1969.9167, 1973.9167, 1980.0])?;
//! let options = ModelOptions::new(ThresholdGrid::default(), 3.0, true)?;
//! let mut model = RecessionModel::new(options);
//! model.fit(&family, &events, TrainingWindow::new(1960.0, 1979.9167)?)?;
//! let trace = model.probabilities(&family)?;
//! # let _ = trace;
//! # Ok(())
//! # }
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` runs the full pipeline on
//!   synthetic series and checks invariants with `proptest`.

pub mod classifiers;
pub mod indicators;
pub mod models;
pub mod observability;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    classifiers::{frontier::RankedClassifier, search::TrainingWindow, snapshot::SearchSnapshot},
    indicators::{builder::build_labor_family, family::IndicatorFamily},
    models::{diagnostics::FitDiagnostics, recession_model::RecessionModel},
    utils::{build_model_options, extract_monthly_series, extract_true_events},
};

/// RecessionDetector — Python-facing wrapper for [`RecessionModel`].
///
/// Purpose
/// -------
/// Build the mixed unemployment / vacancy indicator family from two monthly
/// series and run the recession model on it from Python.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `RecessionDetector(unemployment, vacancy, start, grid=None,
/// precision_ceiling=None, verbose=None)`:
/// - `unemployment`, `vacancy`: 1-D array-likes of strictly positive rates
///   of equal length.
/// - `start`: decimal year of the first month.
/// - `grid`: optional `(start, stop, step)` threshold grid.
/// - `precision_ceiling`: optional ensemble cut-off in months (default 3).
/// - `verbose`: log progress to the terminal.
///
/// Fields
/// ------
/// - `family`: mixed [`IndicatorFamily`] built once at construction.
/// - `model`: [`RecessionModel`] holding options and fitted state.
///
/// Notes
/// -----
/// - The mixed family has 95,832 columns; construction is the most
///   memory-hungry step.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_recession.recession")]
pub struct RecessionDetector {
    family: IndicatorFamily,
    model: RecessionModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl RecessionDetector {
    #[new]
    #[pyo3(
        signature = (
            unemployment,
            vacancy,
            start,
            grid = None,
            precision_ceiling = None,
            verbose = None,
        ),
        text_signature = "(unemployment, vacancy, start, /, grid=None, \
                          precision_ceiling=None, verbose=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, unemployment: &Bound<'py, PyAny>, vacancy: &Bound<'py, PyAny>,
        start: f64, grid: Option<(f64, f64, f64)>, precision_ceiling: Option<f64>,
        verbose: Option<bool>,
    ) -> PyResult<Self> {
        let options = build_model_options(grid, precision_ceiling, verbose)?;
        let u = extract_monthly_series(unemployment, start, "unemployment")?;
        let v = extract_monthly_series(vacancy, start, "vacancy")?;
        let model = RecessionModel::new(options);
        let log = options.logger();
        let family = py.allow_threads(|| build_labor_family(&u, &v, &log))?;
        Ok(RecessionDetector { family, model })
    }

    /// Fit on event start dates over the window `[window_start, window_end]`.
    #[pyo3(signature = (event_starts, window_start, window_end))]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, event_starts: &Bound<'py, PyAny>, window_start: f64,
        window_end: f64,
    ) -> PyResult<FitReport> {
        let events = extract_true_events(event_starts)?;
        let window = TrainingWindow::new(window_start, window_end)?;
        let (family, model) = (&self.family, &mut self.model);
        let diagnostics = py.allow_threads(|| model.fit(family, &events, window))?;
        Ok(FitReport { inner: diagnostics })
    }

    /// Refit from a JSON snapshot written by `save_snapshot`.
    pub fn fit_from_snapshot(
        &mut self, path: &str, event_starts: &Bound<'_, PyAny>,
    ) -> PyResult<FitReport> {
        let events = extract_true_events(event_starts)?;
        let snapshot = SearchSnapshot::load(path)?;
        let diagnostics = self.model.fit_from_snapshot(&snapshot, &events)?;
        Ok(FitReport { inner: diagnostics })
    }

    pub fn save_snapshot(&self, path: &str) -> PyResult<()> {
        self.model.snapshot()?.save(path)?;
        Ok(())
    }

    /// Frontier as `(column, threshold, mean_error, std_error)` tuples.
    pub fn frontier(&self) -> PyResult<Vec<(usize, f64, f64, f64)>> {
        Ok(summarize(self.model.frontier()?))
    }

    /// Ensemble as `(column, threshold, mean_error, std_error)` tuples.
    pub fn ensemble(&self) -> PyResult<Vec<(usize, f64, f64, f64)>> {
        Ok(summarize(self.model.ensemble()?))
    }

    /// Human-readable description of a column's transformation.
    pub fn describe_column(&self, column: usize) -> PyResult<String> {
        let (tag, _) = self.family.column(column)?;
        Ok(format!("{tag:?}"))
    }

    #[getter]
    pub fn dates<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.family.timeline().dates().clone().into_pyarray(py)
    }

    /// Ensemble-average recession probability per month.
    pub fn probabilities<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let trace = self.model.probabilities(&self.family)?;
        Ok(trace.aggregate.into_pyarray(py))
    }

    /// `months × members` probability matrix of the ensemble.
    pub fn member_probabilities<'py>(
        &self, py: Python<'py>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let trace = self.model.probabilities(&self.family)?;
        Ok(trace.members.into_pyarray(py))
    }
}

#[cfg(feature = "python-bindings")]
fn summarize(ranked: &[RankedClassifier]) -> Vec<(usize, f64, f64, f64)> {
    ranked
        .iter()
        .map(|r| (r.classifier.column, r.classifier.threshold, r.profile.mean, r.profile.std))
        .collect()
}

/// FitReport — Python view of [`FitDiagnostics`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_recession.recession")]
pub struct FitReport {
    inner: FitDiagnostics,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl FitReport {
    #[getter]
    pub fn target_count(&self) -> usize {
        self.inner.target_count
    }

    #[getter]
    pub fn n_perfect(&self) -> usize {
        self.inner.n_perfect
    }

    #[getter]
    pub fn n_frontier(&self) -> usize {
        self.inner.n_frontier
    }

    #[getter]
    pub fn n_ensemble(&self) -> usize {
        self.inner.n_ensemble
    }

    #[getter]
    pub fn warnings(&self) -> Vec<String> {
        self.inner.warnings.iter().map(|w| w.to_string()).collect()
    }
}

/// _rust_recession — PyO3 module initializer.
///
/// Creates the `recession` submodule, registers it on the parent module and
/// in `sys.modules` so `rust_recession.recession` imports with dot notation.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_recession<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let recession_mod = PyModule::new(py, "recession")?;
    recession_mod.add_class::<RecessionDetector>()?;
    recession_mod.add_class::<FitReport>()?;
    m.add_submodule(&recession_mod)?;

    py.import("sys")?.getattr("modules")?.set_item("rust_recession.recession", recession_mod)?;
    Ok(())
}
