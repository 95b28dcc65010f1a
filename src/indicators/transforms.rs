//! Column transforms behind the three indicator construction stages.
//!
//! - [`smooth`]: simple / exponential moving averages.
//! - [`curve`]: Box–Cox style concave transform.
//! - [`turning_distance`]: distance from the trailing extremum.
//!
//! All transforms are causal (row `t` only reads rows `≤ t`) and operate on
//! one column at a time; the builder fans them out across the grids.
use crate::indicators::params::{Cyclicality, Smoothing};
use ndarray::{Array1, ArrayView1, s};

/// Apply a smoothing filter to a monthly series.
///
/// - `Simple { window }`: mean of rows `t − window ..= t`; the first
///   `window` rows average over the history available so far, so
///   `window = 0` is the identity.
/// - `Exponential { alpha }`: `s₀ = α·x₀`, `sₜ = α·xₜ + (1 − α)·sₜ₋₁`.
pub fn smooth(series: ArrayView1<f64>, smoothing: Smoothing) -> Array1<f64> {
    let n = series.len();
    let mut out = Array1::<f64>::zeros(n);
    match smoothing {
        Smoothing::Simple { window } => {
            for t in 0..n {
                let trailing = series.slice(s![t.saturating_sub(window)..=t]);
                out[t] = trailing.sum() / trailing.len() as f64;
            }
        }
        Smoothing::Exponential { alpha } => {
            let mut prev = 0.0;
            for t in 0..n {
                prev = alpha * series[t] + (1.0 - alpha) * prev;
                out[t] = prev;
            }
        }
    }
    out
}

/// Box–Cox style transform: `ln x` for `k = 0`, `(xᵏ − 1)/k` otherwise.
///
/// Inputs must be strictly positive; raw-series validation guarantees this
/// for every smoothed column.
pub fn curve(series: ArrayView1<f64>, k: f64) -> Array1<f64> {
    if k == 0.0 { series.mapv(f64::ln) } else { series.mapv(|x| (x.powf(k) - 1.0) / k) }
}

/// Distance from the trailing extremum over the last `window + 1` rows.
///
/// Countercyclical: `xₜ − min(xₜ₋w ..= xₜ)`. Procyclical:
/// `max(xₜ₋w ..= xₜ) − xₜ`. Early rows use the rows available. The result is
/// `≥ 0` and exactly `0.0` whenever `xₜ` is itself the extremum, since the
/// subtraction is then `xₜ − xₜ`.
pub fn turning_distance(
    series: ArrayView1<f64>, window: usize, cyclicality: Cyclicality,
) -> Array1<f64> {
    let n = series.len();
    Array1::from_shape_fn(n, |t| {
        let start = t.saturating_sub(window);
        let trailing = series.slice(s![start..=t]);
        match cyclicality {
            Cyclicality::Countercyclical => {
                let min = trailing.iter().copied().fold(f64::INFINITY, f64::min);
                series[t] - min
            }
            Cyclicality::Procyclical => {
                let max = trailing.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                max - series[t]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - SMA partial windows and the identity window.
    // - EMA seeding s₀ = α·x₀.
    // - Curvature at k = 0 (log) and k = 1 (shifted identity).
    // - Turning-point distances for both cyclicalities, including exact zeros
    //   on a constant series.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify SMA values, including the partial leading window.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4], window = 2 (three-month average).
    //
    // Expect
    // ------
    // - [1, 1.5, 2, 3]; window = 0 returns x unchanged.
    fn smooth_simple_uses_partial_leading_windows() {
        let x = array![1.0, 2.0, 3.0, 4.0];

        let sma = smooth(x.view(), Smoothing::Simple { window: 2 });
        let identity = smooth(x.view(), Smoothing::Simple { window: 0 });

        for (got, want) in sma.iter().zip([1.0, 1.5, 2.0, 3.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(identity, x);
    }

    #[test]
    // Purpose
    // -------
    // Verify the EMA seed and recursion.
    //
    // Given
    // -----
    // - x = [10, 20], α = 0.5.
    //
    // Expect
    // ------
    // - s₀ = 5, s₁ = 0.5·20 + 0.5·5 = 12.5.
    fn smooth_exponential_seeds_with_scaled_first_value() {
        let x = array![10.0, 20.0];

        let ema = smooth(x.view(), Smoothing::Exponential { alpha: 0.5 });

        assert_eq!(ema, array![5.0, 12.5]);
    }

    #[test]
    // Purpose
    // -------
    // Check the curvature transform at both branches.
    //
    // Expect
    // ------
    // - k = 0 gives ln x; k = 1 gives x − 1.
    fn curve_matches_log_and_power_branches() {
        let x = array![1.0, std::f64::consts::E, 4.0];

        let log = curve(x.view(), 0.0);
        let linear = curve(x.view(), 1.0);

        assert_abs_diff_eq!(log[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(linear[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify countercyclical and procyclical turning distances on a bump.
    //
    // Given
    // -----
    // - x = [3, 1, 2, 5, 4], window = 1 (two trailing months).
    //
    // Expect
    // ------
    // - Countercyclical: [0, 0, 1, 3, 0].
    // - Procyclical:     [0, 2, 0, 0, 1].
    fn turning_distance_measures_from_trailing_extremum() {
        let x = array![3.0, 1.0, 2.0, 5.0, 4.0];

        let counter = turning_distance(x.view(), 1, Cyclicality::Countercyclical);
        let pro = turning_distance(x.view(), 1, Cyclicality::Procyclical);

        assert_eq!(counter, array![0.0, 0.0, 1.0, 3.0, 0.0]);
        assert_eq!(pro, array![0.0, 2.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // A constant series is its own trailing extremum at every month.
    //
    // Expect
    // ------
    // - All zeros for both directions and any window.
    fn turning_distance_is_zero_on_constant_series() {
        let x = Array1::from_elem(30, 0.05);

        for window in [1, 7, 18] {
            let counter = turning_distance(x.view(), window, Cyclicality::Countercyclical);
            let pro = turning_distance(x.view(), window, Cyclicality::Procyclical);
            assert!(counter.iter().all(|&v| v == 0.0));
            assert!(pro.iter().all(|&v| v == 0.0));
        }
    }
}
