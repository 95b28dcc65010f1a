//! Python-boundary helpers: array extraction and option building.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! is used by the `#[pyclass]` wrappers in the crate root. Helpers convert
//! Python inputs into validated Rust values and let the core error types
//! turn into `PyErr` through their `From` impls.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    classifiers::{events::TrueEvents, thresholds::ThresholdGrid},
    indicators::timeline::{RawSeries, Timeline},
    models::options::ModelOptions,
};

/// Copy a 1-D float input (`name` is used in error messages).
///
/// A float64 `numpy.ndarray` of any stride is copied directly; anything else
/// (lists, tuples, `pandas.Series`) is read through the sequence protocol.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec(raw: &Bound<'_, PyAny>, name: &str) -> PyResult<Vec<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_vec());
    }
    raw.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err(format!("{name} must be a 1-D array-like of monthly float values"))
    })
}

/// Monthly [`RawSeries`] starting at decimal year `start`.
#[cfg(feature = "python-bindings")]
pub fn extract_monthly_series(
    raw: &Bound<'_, PyAny>, start: f64, name: &str,
) -> PyResult<RawSeries> {
    let values = Array1::from(extract_f64_vec(raw, name)?);
    let timeline = Timeline::monthly(start, values.len())?;
    Ok(RawSeries::new(timeline, values)?)
}

/// [`TrueEvents`] from a sequence of decimal-year start dates.
#[cfg(feature = "python-bindings")]
pub fn extract_true_events(raw: &Bound<'_, PyAny>) -> PyResult<TrueEvents> {
    Ok(TrueEvents::new(extract_f64_vec(raw, "event_starts")?)?)
}

/// [`ModelOptions`] from optional Python keyword arguments.
///
/// `grid` is `(start, stop, step)`; missing values fall back to the defaults
/// of [`ModelOptions::default`].
#[cfg(feature = "python-bindings")]
pub fn build_model_options(
    grid: Option<(f64, f64, f64)>, precision_ceiling: Option<f64>, verbose: Option<bool>,
) -> PyResult<ModelOptions> {
    let defaults = ModelOptions::default();
    let grid = match grid {
        Some((start, stop, step)) => ThresholdGrid::new(start, stop, step)?,
        None => defaults.grid,
    };
    let options = ModelOptions::new(
        grid,
        precision_ceiling.unwrap_or(defaults.precision_ceiling),
        verbose.unwrap_or(defaults.verbose),
    )?;
    Ok(options)
}
