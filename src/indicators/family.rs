//! Tagged indicator families.
//!
//! Purpose
//! -------
//! Hold a month × column matrix of indicator values together with one
//! [`IndicatorTag`] per column. The matrix and its tags are stored and
//! validated together so that no stage can grow one without the other.
//!
//! Key behaviors
//! -------------
//! - [`IndicatorFamily::new`] checks that the matrix has one row per timeline
//!   month and one tag per column.
//! - [`IndicatorFamily::rows`] exposes a row range (e.g. a training window)
//!   as a zero-copy view.
//! - [`IndicatorFamily::select`] extracts a subset of columns with their tags
//!   (used to hand ensemble columns to downstream reporting).
//!
//! Conventions
//! -----------
//! - `values` is `n × m` in standard (row-major) layout: row `t` is one
//!   month across all indicators, which is the access pattern of the
//!   columnar event scan.
use crate::indicators::{
    errors::{IndicatorError, IndicatorResult},
    params::IndicatorTag,
    timeline::Timeline,
};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, s};
use std::ops::Range;

/// IndicatorFamily — indicator matrix plus per-column tags.
///
/// Fields
/// ------
/// - `timeline`: [`Timeline`] with one entry per row.
/// - `values`: `Array2<f64>`, shape `(timeline.len(), tags.len())`.
/// - `tags`: `Vec<IndicatorTag>`; `tags[j]` describes `values.column(j)`.
///
/// Invariants
/// ----------
/// - `values.nrows() == timeline.len()`.
/// - `values.ncols() == tags.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFamily {
    timeline: Timeline,
    values: Array2<f64>,
    tags: Vec<IndicatorTag>,
}

impl IndicatorFamily {
    /// Pair an indicator matrix with its timeline and tags.
    ///
    /// Errors
    /// ------
    /// - `IndicatorError::LengthMismatch` when the row count differs from the
    ///   timeline length, or the column count differs from the tag count.
    pub fn new(
        timeline: Timeline, values: Array2<f64>, tags: Vec<IndicatorTag>,
    ) -> IndicatorResult<Self> {
        if values.nrows() != timeline.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: timeline.len(),
                actual: values.nrows(),
            });
        }
        if values.ncols() != tags.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: tags.len(),
                actual: values.ncols(),
            });
        }
        Ok(IndicatorFamily { timeline, values, tags })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn tags(&self) -> &[IndicatorTag] {
        &self.tags
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// `(rows, cols)` of the indicator matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.values.nrows(), self.values.ncols())
    }

    /// Tag and values of column `column`.
    pub fn column(&self, column: usize) -> IndicatorResult<(IndicatorTag, ArrayView1<'_, f64>)> {
        match self.tags.get(column) {
            Some(tag) => Ok((*tag, self.values.column(column))),
            None => Err(IndicatorError::ColumnOutOfRange { column, ncols: self.ncols() }),
        }
    }

    /// View of rows `range` across all columns. Panics if out of bounds.
    pub fn rows(&self, range: Range<usize>) -> ArrayView2<'_, f64> {
        self.values.slice(s![range, ..])
    }

    /// New family holding only `columns`, in the given order.
    ///
    /// Errors
    /// ------
    /// - `IndicatorError::ColumnOutOfRange` for the first invalid index.
    pub fn select(&self, columns: &[usize]) -> IndicatorResult<IndicatorFamily> {
        let ncols = self.ncols();
        if let Some(&column) = columns.iter().find(|&&c| c >= ncols) {
            return Err(IndicatorError::ColumnOutOfRange { column, ncols });
        }
        let values = self.values.select(Axis(1), columns);
        let tags = columns.iter().map(|&c| self.tags[c]).collect();
        Ok(IndicatorFamily { timeline: self.timeline.clone(), values, tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::params::{Cyclicality, IndicatorParams, Smoothing};
    use ndarray::array;

    fn tag(window: usize) -> IndicatorTag {
        IndicatorTag::Single(IndicatorParams {
            cyclicality: Cyclicality::Countercyclical,
            smoothing: Smoothing::Simple { window },
            curvature: 0.0,
            turning_window: 1,
        })
    }

    #[test]
    // Purpose
    // -------
    // Ensure matrix/tag/timeline sizes are checked together.
    //
    // Given
    // -----
    // - A 3-month timeline and a 3 × 2 matrix with one or two tags.
    //
    // Expect
    // ------
    // - One tag fails with `LengthMismatch`; two tags succeed.
    fn family_new_requires_one_tag_per_column() {
        let timeline = Timeline::monthly(2000.0, 3).expect("valid timeline");
        let values = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];

        let short = IndicatorFamily::new(timeline.clone(), values.clone(), vec![tag(0)]);
        let ok = IndicatorFamily::new(timeline, values, vec![tag(0), tag(1)]);

        assert_eq!(short.unwrap_err(), IndicatorError::LengthMismatch { expected: 1, actual: 2 });
        assert_eq!(ok.expect("valid family").shape(), (3, 2));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `select` keeps tags aligned with the extracted columns.
    //
    // Given
    // -----
    // - Columns tagged with windows 0, 1, 2; select [2, 0].
    //
    // Expect
    // ------
    // - Column 0 of the result holds the old column 2 and its tag.
    // - Selecting column 3 fails with `ColumnOutOfRange`.
    fn family_select_keeps_tags_aligned() {
        let timeline = Timeline::monthly(2000.0, 2).expect("valid timeline");
        let values = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let family = IndicatorFamily::new(timeline, values, vec![tag(0), tag(1), tag(2)])
            .expect("valid family");

        let subset = family.select(&[2, 0]).expect("valid selection");
        let (first_tag, first_col) = subset.column(0).expect("column exists");

        assert_eq!(first_tag, tag(2));
        assert_eq!(first_col.to_vec(), vec![3.0, 6.0]);
        assert_eq!(
            family.select(&[3]).unwrap_err(),
            IndicatorError::ColumnOutOfRange { column: 3, ncols: 3 }
        );
    }
}
