//! indicators — monthly timelines, raw series, and tagged indicator families.
//!
//! Purpose
//! -------
//! Turn raw labor-market rates into the large family of candidate indicator
//! series searched by the classifier stack. This subtree owns the data
//! containers ([`Timeline`], [`RawSeries`], [`IndicatorFamily`]), the
//! parameter grids and tags, the per-column transforms, and the builder /
//! mixer stages.
//!
//! Key behaviors
//! -------------
//! - [`build_indicator`]: 22 smoothings × 11 curvatures × 18 turning windows
//!   = 4,356 columns per raw series.
//! - [`mix_indicator`]: 2 methods × 11 weights blocks over two families of
//!   identical shape.
//! - [`build_labor_family`]: both steps for an unemployment / vacancy pair.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every family column has exactly one [`IndicatorTag`]; tags are produced
//!   in the same loop order as the columns and stored with the matrix.
//! - Column order is deterministic; indices into a family are stable
//!   references for the classifier search, frontier and scoring stages.
//! - Configuration problems (shape, timeline, tag, cyclicality) are returned
//!   as [`IndicatorError`] before any array is allocated.
//!
//! Conventions
//! -----------
//! - Matrices are `months × columns`.
//! - No I/O; callers load data and log through the `slog::Logger` they pass
//!   in.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own invariants; integration
//!   tests under `tests/` run the builder and mixer inside the full pipeline.

pub mod builder;
pub mod errors;
pub mod family;
pub mod mixer;
pub mod params;
pub mod timeline;
pub mod transforms;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::builder::{BLOCK_WIDTH, FAMILY_WIDTH, build_indicator, build_labor_family};
pub use self::errors::{IndicatorError, IndicatorResult};
pub use self::family::IndicatorFamily;
pub use self::mixer::mix_indicator;
pub use self::params::{Cyclicality, IndicatorParams, IndicatorTag, MixingMethod, Smoothing};
pub use self::timeline::{RawSeries, Timeline};
