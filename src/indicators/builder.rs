//! Indicator family construction from one raw series.
//!
//! Purpose
//! -------
//! Expand a [`RawSeries`] into the full Cartesian family
//! smoothing (22) × curvature (11) × turning window (18) = 4,356 indicator
//! columns, each tagged with the parameters that produced it.
//!
//! Key behaviors
//! -------------
//! - Smoothing blocks are independent and are built in parallel when the
//!   `rayon` feature is enabled; blocks are written back at fixed offsets,
//!   so the output is identical with or without parallelism.
//! - Column `((s · 11) + k) · 18 + w` holds smoothing `s`, curvature `k`,
//!   turning window `w` (indices into the grids of [`params`](super::params)).
//! - [`build_labor_family`] builds an unemployment (countercyclical) and a
//!   vacancy (procyclical) family concurrently and mixes them.
//!
//! Invariants & assumptions
//! ------------------------
//! - Raw values are strictly positive (enforced by [`RawSeries::new`]), so
//!   every curvature transform is finite.
//! - Every output value is `≥ 0`.
use crate::indicators::{
    errors::IndicatorResult,
    family::IndicatorFamily,
    mixer::mix_indicator,
    params::{
        CURVATURE_GRID, Cyclicality, IndicatorParams, IndicatorTag, Smoothing, TURNING_WINDOWS,
        smoothing_grid,
    },
    timeline::RawSeries,
    transforms::{curve, smooth, turning_distance},
};
use ndarray::{Array2, s};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use slog::{Logger, debug, info};

/// Columns produced per smoothing spec (curvature × turning window).
pub const BLOCK_WIDTH: usize = CURVATURE_GRID.len() * TURNING_WINDOWS.len();

/// Columns produced per raw series: 22 × 11 × 18 = 4,356.
pub const FAMILY_WIDTH: usize = 22 * BLOCK_WIDTH;

/// Build the 4,356-column indicator family of one raw series.
///
/// Parameters
/// ----------
/// - `series`: [`RawSeries`]
///   Validated raw monthly rates.
/// - `cyclicality`: [`Cyclicality`]
///   Countercyclical series measure the rise above their trailing minimum,
///   procyclical series the fall below their trailing maximum.
///
/// Returns
/// -------
/// `IndicatorResult<IndicatorFamily>`
///   Family aligned to `series.timeline()` with [`FAMILY_WIDTH`] columns.
///
/// Errors
/// ------
/// - Only `IndicatorError::LengthMismatch` from [`IndicatorFamily::new`],
///   which cannot occur for a validated series.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::Array1;
/// # use rust_recession::indicators::{Cyclicality, RawSeries, Timeline, build_indicator};
/// let timeline = Timeline::monthly(2000.0, 6).unwrap();
/// let raw = RawSeries::new(timeline, Array1::from_elem(6, 0.05)).unwrap();
/// let family = build_indicator(&raw, Cyclicality::Countercyclical).unwrap();
/// assert_eq!(family.shape(), (6, 4356));
/// ```
pub fn build_indicator(
    series: &RawSeries, cyclicality: Cyclicality,
) -> IndicatorResult<IndicatorFamily> {
    let n = series.len();
    let grid = smoothing_grid();

    #[cfg(feature = "rayon")]
    let blocks: Vec<Array2<f64>> =
        grid.par_iter().map(|&smoothing| build_block(series, smoothing, cyclicality)).collect();
    #[cfg(not(feature = "rayon"))]
    let blocks: Vec<Array2<f64>> =
        grid.iter().map(|&smoothing| build_block(series, smoothing, cyclicality)).collect();

    let mut values = Array2::<f64>::zeros((n, grid.len() * BLOCK_WIDTH));
    for (b, block) in blocks.iter().enumerate() {
        values.slice_mut(s![.., b * BLOCK_WIDTH..(b + 1) * BLOCK_WIDTH]).assign(block);
    }

    let mut tags = Vec::with_capacity(grid.len() * BLOCK_WIDTH);
    for &smoothing in &grid {
        for &curvature in &CURVATURE_GRID {
            for &turning_window in &TURNING_WINDOWS {
                tags.push(IndicatorTag::Single(IndicatorParams {
                    cyclicality,
                    smoothing,
                    curvature,
                    turning_window,
                }));
            }
        }
    }

    IndicatorFamily::new(series.timeline().clone(), values, tags)
}

/// Curvature × turning-window block for one smoothing spec.
fn build_block(series: &RawSeries, smoothing: Smoothing, cyclicality: Cyclicality) -> Array2<f64> {
    let mut block = Array2::<f64>::zeros((series.len(), BLOCK_WIDTH));
    let smoothed = smooth(series.values().view(), smoothing);
    for (k, &curvature) in CURVATURE_GRID.iter().enumerate() {
        let curved = curve(smoothed.view(), curvature);
        for (w, &window) in TURNING_WINDOWS.iter().enumerate() {
            let column = turning_distance(curved.view(), window, cyclicality);
            block.column_mut(k * TURNING_WINDOWS.len() + w).assign(&column);
        }
    }
    block
}

/// Build and mix the unemployment and vacancy families.
///
/// Parameters
/// ----------
/// - `unemployment`: countercyclical raw series.
/// - `vacancy`: procyclical raw series on the same timeline.
/// - `log`: logger receiving one record per stage.
///
/// Returns
/// -------
/// The mixed family with `22 · 4,356 = 95,832` columns, where every mixed tag
/// has `x` = unemployment parameters and `y` = vacancy parameters.
///
/// Errors
/// ------
/// - Any error of [`mix_indicator`], e.g. `TimelineMismatch` when the two
///   series are aligned to different months.
pub fn build_labor_family(
    unemployment: &RawSeries, vacancy: &RawSeries, log: &Logger,
) -> IndicatorResult<IndicatorFamily> {
    #[cfg(feature = "rayon")]
    let (u_family, v_family) = rayon::join(
        || build_indicator(unemployment, Cyclicality::Countercyclical),
        || build_indicator(vacancy, Cyclicality::Procyclical),
    );
    #[cfg(not(feature = "rayon"))]
    let (u_family, v_family) = (
        build_indicator(unemployment, Cyclicality::Countercyclical),
        build_indicator(vacancy, Cyclicality::Procyclical),
    );
    let (u_family, v_family) = (u_family?, v_family?);
    debug!(log, "built single-series families";
        "months" => u_family.nrows(), "columns" => u_family.ncols());

    let mixed = mix_indicator(&u_family, &v_family)?;
    info!(log, "built mixed indicator family";
        "months" => mixed.nrows(), "columns" => mixed.ncols());
    Ok(mixed)
}
