//! Expansion / recession state machine for threshold classifiers.
//!
//! Purpose
//! -------
//! Convert an indicator series and a threshold into recession episodes,
//! month by month and strictly causally. The same transition rule drives the
//! columnar scan used by the perfect-classifier search and the single-column
//! replay used by the probability scorer, so training-window statistics
//! describe full-sample behavior.
//!
//! Key behaviors
//! -------------
//! - Every series starts in [`RegimeState::Expansion`].
//! - Expansion → Recession at row `t + 1` when `v[t] < θ ≤ v[t + 1]`; this is
//!   one detected event dated at row `t + 1`.
//! - Recession → Expansion at row `t + 1` when `v[t + 1] == 0.0`.
//! - Duration is 0 in expansion, 1 in the month a recession is detected, and
//!   grows by one per month spent in recession.
//!
//! Invariants & assumptions
//! ------------------------
//! - Thresholds are strictly positive (see `ThresholdGrid`), so entry and
//!   exit can never fire on the same month.
//! - Only rows `t` and `t + 1` are read when deciding the state at `t + 1`.
//!
//! Performance
//! -----------
//! - [`scan_events`] walks time once and updates all columns of a row
//!   together with `ndarray::Zip`; the row-major family layout makes each
//!   row contiguous. Only event counts and the first `capacity` event rows
//!   are kept per column.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};

/// Business-cycle regime occupied by a classifier in a given month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegimeState {
    Expansion,
    Recession,
}

/// Outcome of one month-to-month step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Expansion → Recession: a detected event.
    Enter,
    /// Recession → Expansion.
    Exit,
    /// No change.
    Stay,
}

/// Transition rule deciding the state at `t + 1` from rows `t` and `t + 1`.
#[inline]
pub fn transition(in_recession: bool, now: f64, next: f64, threshold: f64) -> Transition {
    if !in_recession {
        if now < threshold && threshold <= next { Transition::Enter } else { Transition::Stay }
    } else if next == 0.0 {
        Transition::Exit
    } else {
        Transition::Stay
    }
}

/// ColumnReplay — full state trajectory of one indicator column.
///
/// Fields
/// ------
/// - `states`: regime per month.
/// - `durations`: months spent in the current recession (0 in expansion).
/// - `events`: rows at which recessions were detected, increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReplay {
    pub states: Vec<RegimeState>,
    pub durations: Array1<usize>,
    pub events: Vec<usize>,
}

/// Replay the state machine over one column.
///
/// Parameters
/// ----------
/// - `values`: indicator values, oldest first.
/// - `threshold`: strictly positive entry threshold.
///
/// Returns
/// -------
/// A [`ColumnReplay`] with one state and duration per row. Replaying the
/// same inputs always yields the same output.
pub fn replay_column(values: ArrayView1<f64>, threshold: f64) -> ColumnReplay {
    let n = values.len();
    let mut states = vec![RegimeState::Expansion; n];
    let mut durations = Array1::<usize>::zeros(n);
    let mut events = Vec::new();

    let mut in_recession = false;
    let mut duration = 0usize;
    for t in 0..n.saturating_sub(1) {
        match transition(in_recession, values[t], values[t + 1], threshold) {
            Transition::Enter => {
                in_recession = true;
                duration = 1;
                events.push(t + 1);
            }
            Transition::Exit => {
                in_recession = false;
                duration = 0;
            }
            Transition::Stay => {
                if in_recession {
                    duration += 1;
                }
            }
        }
        if in_recession {
            states[t + 1] = RegimeState::Recession;
        }
        durations[t + 1] = duration;
    }

    ColumnReplay { states, durations, events }
}

/// EventScan — event counts of every column for one threshold.
///
/// Fields
/// ------
/// - `counts`: number of detected events per column.
/// - `events`: `m × capacity`; row `j` holds the first
///   `min(counts[j], capacity)` event rows of column `j`, the remaining
///   entries are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct EventScan {
    pub counts: Array1<usize>,
    pub events: Array2<usize>,
}

/// Run the state machine over all columns of `values` at once.
///
/// Parameters
/// ----------
/// - `values`: `n × m` indicator rows (e.g. a training-window view).
/// - `threshold`: strictly positive entry threshold.
/// - `capacity`: number of event rows to keep per column; the search passes
///   the target count since only exact matches are retained.
pub fn scan_events(values: ArrayView2<f64>, threshold: f64, capacity: usize) -> EventScan {
    let (n, m) = values.dim();
    let mut in_recession = Array1::from_elem(m, false);
    let mut counts = Array1::<usize>::zeros(m);
    let mut events = Array2::<usize>::zeros((m, capacity));

    for t in 0..n.saturating_sub(1) {
        Zip::from(&mut in_recession)
            .and(&mut counts)
            .and(events.rows_mut())
            .and(values.row(t))
            .and(values.row(t + 1))
            .for_each(|rec, count, mut slots, &now, &next| {
                match transition(*rec, now, next, threshold) {
                    Transition::Enter => {
                        *rec = true;
                        if *count < capacity {
                            slots[*count] = t + 1;
                        }
                        *count += 1;
                    }
                    Transition::Exit => *rec = false,
                    Transition::Stay => {}
                }
            });
    }

    EventScan { counts, events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Entry on a strict upward crossing and exit on an exact zero.
    // - Duration bookkeeping across two episodes.
    // - Agreement between the columnar scan and single-column replays.
    // - Determinism of repeated replays.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Walk a hand-built series through two recession episodes.
    //
    // Given
    // -----
    // - v = [0, 0.2, 0.3, 0, 0.1, 0.5, 0.4, 0], θ = 0.15.
    //
    // Expect
    // ------
    // - Events at rows 1 and 5.
    // - Durations [0, 1, 2, 0, 0, 1, 2, 0].
    // - Row 4 stays in expansion (0.1 < θ).
    fn replay_column_tracks_entries_exits_and_durations() {
        let v = array![0.0, 0.2, 0.3, 0.0, 0.1, 0.5, 0.4, 0.0];

        let replay = replay_column(v.view(), 0.15);

        assert_eq!(replay.events, vec![1, 5]);
        assert_eq!(replay.durations, array![0, 1, 2, 0, 0, 1, 2, 0]);
        assert_eq!(replay.states[4], RegimeState::Expansion);
        assert_eq!(replay.states[6], RegimeState::Recession);
    }

    #[test]
    // Purpose
    // -------
    // A second crossing while already in recession is not a new event, and
    // the value at the threshold counts as a crossing (θ ≤ v[t + 1]).
    //
    // Given
    // -----
    // - v = [0.1, 0.2, 0.05, 0.3], θ = 0.2.
    //
    // Expect
    // ------
    // - One event at row 1; the drop to 0.05 is not an exit (non-zero).
    fn replay_column_ignores_recrossing_inside_recession() {
        let v = array![0.1, 0.2, 0.05, 0.3];

        let replay = replay_column(v.view(), 0.2);

        assert_eq!(replay.events, vec![1]);
        assert_eq!(replay.durations, array![0, 1, 2, 3]);
    }

    #[test]
    // Purpose
    // -------
    // The columnar scan must agree with per-column replays.
    //
    // Given
    // -----
    // - Three columns with 0, 1 and 2 events at θ = 0.15, capacity = 2.
    //
    // Expect
    // ------
    // - counts = [0, 1, 2] and event rows equal the replay events.
    fn scan_events_matches_column_replays() {
        let values: Array2<f64> = array![
            [0.0, 0.0, 0.0],
            [0.1, 0.2, 0.2],
            [0.1, 0.3, 0.0],
            [0.0, 0.0, 0.3],
            [0.0, 0.1, 0.0],
        ];

        let scan = scan_events(values.view(), 0.15, 2);

        assert_eq!(scan.counts, array![0, 1, 2]);
        for j in 0..3 {
            let replay = replay_column(values.column(j), 0.15);
            assert_eq!(replay.events.len(), scan.counts[j]);
            for (k, &row) in replay.events.iter().enumerate() {
                assert_eq!(scan.events[[j, k]], row);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Replaying the same series twice yields identical trajectories.
    fn replay_column_is_deterministic() {
        let v = array![0.0, 0.3, 0.2, 0.0, 0.4, 0.4, 0.0, 0.2];

        assert_eq!(replay_column(v.view(), 0.25), replay_column(v.view(), 0.25));
    }
}
