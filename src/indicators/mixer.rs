//! Mixing of two single-series indicator families.
//!
//! Purpose
//! -------
//! Combine an unemployment family `x` and a vacancy family `y` column by
//! column into 2 methods × 11 weights blocks, each as wide as the inputs.
//!
//! Key behaviors
//! -------------
//! - All shape, timeline and tag checks run before any output is allocated.
//! - Column `((method · 11) + weight) · m + j` mixes input column `j`, so a
//!   column index of the inputs keeps its meaning inside every block.
//! - Mixed tags keep both input tags unchanged.
use crate::indicators::{
    errors::{IndicatorError, IndicatorResult},
    family::IndicatorFamily,
    params::{IndicatorParams, IndicatorTag, MIXING_METHODS, MIXING_WEIGHTS},
};
use ndarray::{Array2, Zip, s};

/// Mix two equally shaped single-series families.
///
/// Parameters
/// ----------
/// - `x`: first family (conventionally unemployment).
/// - `y`: second family (conventionally vacancies).
///
/// Returns
/// -------
/// `IndicatorResult<IndicatorFamily>` with `22 · m` columns where `m` is the
/// input column count.
///
/// Errors
/// ------
/// - `IndicatorError::ShapeMismatch` when `x.shape() != y.shape()`.
/// - `IndicatorError::TimelineMismatch` when the timelines differ.
/// - `IndicatorError::NotMixable { column }` when an input column is already
///   mixed.
/// - `IndicatorError::TagMismatch { column }` when the two columns at the same
///   index went through different transformations.
pub fn mix_indicator(x: &IndicatorFamily, y: &IndicatorFamily) -> IndicatorResult<IndicatorFamily> {
    if x.shape() != y.shape() {
        return Err(IndicatorError::ShapeMismatch { left: x.shape(), right: y.shape() });
    }
    if x.timeline() != y.timeline() {
        return Err(IndicatorError::TimelineMismatch);
    }
    let pairs = paired_params(x, y)?;

    let (n, m) = x.shape();
    let blocks = MIXING_METHODS.len() * MIXING_WEIGHTS.len();
    let mut values = Array2::<f64>::zeros((n, blocks * m));
    let mut tags = Vec::with_capacity(blocks * m);

    for (mi, &method) in MIXING_METHODS.iter().enumerate() {
        for (wi, &weight) in MIXING_WEIGHTS.iter().enumerate() {
            let offset = (mi * MIXING_WEIGHTS.len() + wi) * m;
            Zip::from(values.slice_mut(s![.., offset..offset + m]))
                .and(x.values())
                .and(y.values())
                .for_each(|z, &xv, &yv| *z = method.combine(xv, yv, weight));
            tags.extend(
                pairs.iter().map(|&(xp, yp)| IndicatorTag::Mixed { method, weight, x: xp, y: yp }),
            );
        }
    }

    IndicatorFamily::new(x.timeline().clone(), values, tags)
}

fn paired_params(
    x: &IndicatorFamily, y: &IndicatorFamily,
) -> IndicatorResult<Vec<(IndicatorParams, IndicatorParams)>> {
    x.tags()
        .iter()
        .zip(y.tags())
        .enumerate()
        .map(|(column, pair)| match pair {
            (IndicatorTag::Single(xp), IndicatorTag::Single(yp)) => {
                if xp.same_transformation(yp) {
                    Ok((*xp, *yp))
                } else {
                    Err(IndicatorError::TagMismatch { column })
                }
            }
            _ => Err(IndicatorError::NotMixable { column }),
        })
        .collect()
}
