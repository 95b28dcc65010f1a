//! models — high-level recession model facade.
//!
//! [`RecessionModel`] wires the classifier stages together behind a
//! construct / `fit` / query interface, configured by [`ModelOptions`] and
//! reporting stage sizes through [`FitDiagnostics`].

pub mod diagnostics;
pub mod options;
pub mod recession_model;

pub use self::diagnostics::{FitDiagnostics, QualityWarning};
pub use self::options::ModelOptions;
pub use self::recession_model::{FittedClassifiers, RecessionModel};
