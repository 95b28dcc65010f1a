//! classifiers — threshold classifiers over indicator families.
//!
//! Purpose
//! -------
//! Detect recessions with single-threshold rules on indicator columns, find
//! the rules that reproduce the historical record exactly, rank them by how
//! early and how consistently they fire, and turn the best of them into
//! real-time recession probabilities.
//!
//! Key behaviors
//! -------------
//! - [`state_machine`]: the Expansion / Recession transition rule, as a
//!   columnar scan ([`scan_events`]) and a single-column replay
//!   ([`replay_column`]).
//! - [`search`]: [`search_perfect_classifiers`] sweeps a [`ThresholdGrid`]
//!   over a [`TrainingWindow`] and keeps exact event-count matches.
//! - [`frontier`]: [`ErrorProfile`]s, the anticipation–precision frontier and
//!   the precision-capped ensemble.
//! - [`scoring`]: normal-CDF recession probabilities per ensemble member and
//!   their average.
//! - [`snapshot`]: JSON persistence of search results.
//!
//! Invariants & assumptions
//! ------------------------
//! - Thresholds are strictly positive; entry is a strict upward crossing and
//!   exit is an exact zero.
//! - Every stage is deterministic: parallel sweeps are followed by total
//!   orderings on (threshold, column) or (std, mean, threshold, column).
//! - Empty result sets are valid values, not errors.
//!
//! Conventions
//! -----------
//! - Dates are decimal years; timing errors are months, negative when the
//!   classifier fires before the true event.
//! - Column indices refer to the [`IndicatorFamily`](crate::indicators::IndicatorFamily)
//!   the search ran on.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule use hand-built toy families; the
//!   end-to-end pipeline is covered under `tests/`.

pub mod errors;
pub mod events;
pub mod frontier;
pub mod scoring;
pub mod search;
pub mod snapshot;
pub mod state_machine;
pub mod thresholds;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ClassifierError, ClassifierResult};
pub use self::events::TrueEvents;
pub use self::frontier::{
    DEFAULT_PRECISION_CEILING, ErrorProfile, RankedClassifier, profile_classifiers,
    select_ensemble, select_frontier,
};
pub use self::scoring::{ProbabilityTrace, recession_probability, score_ensemble};
pub use self::search::{Classifier, PerfectClassifier, TrainingWindow, search_perfect_classifiers};
pub use self::snapshot::SearchSnapshot;
pub use self::state_machine::{
    ColumnReplay, EventScan, RegimeState, Transition, replay_column, scan_events,
};
pub use self::thresholds::ThresholdGrid;

// ---- Convenience prelude --------------------------------------------------
//
//     use rust_recession::classifiers::prelude::*;

pub mod prelude {
    pub use super::{
        Classifier, ClassifierError, ClassifierResult, ErrorProfile, PerfectClassifier,
        ProbabilityTrace, RankedClassifier, SearchSnapshot, ThresholdGrid, TrainingWindow,
        TrueEvents, score_ensemble, search_perfect_classifiers, select_ensemble,
        select_frontier,
    };
}
