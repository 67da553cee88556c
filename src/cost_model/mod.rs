//! cost_model — Allreduce α-β-γ cost-model estimation.
//!
//! Purpose
//! -------
//! Estimate the latency (α), inverse bandwidth (β) and per-element
//! computation (γ) costs of an Allreduce collective from timing rows, under
//! the known near-collinearity of the bandwidth and computation regressors.
//! This is the main entry point of the crate.
//!
//! Key behaviors
//! -------------
//! - [`core`]: validated [`Dataset`] rows, the three [`ModelSpec`]s, the
//!   seeded [`split`], physical parameter types and [`RunConfig`].
//! - [`fit`]: OLS and bound-constrained least squares producing an immutable
//!   [`FitResult`] with diagnostics instead of hard failures.
//! - [`evaluation`]: held-out metrics and a strict relative-tolerance
//!   verdict.
//! - [`analysis`]: split → fit → validate composition for one or all
//!   specifications.
//! - [`report`]: serializable, printable summary of a run.
//! - [`simulate`]: seeded synthetic timing rows for tests and demos.
//!
//! Invariants & assumptions
//! ------------------------
//! - Datasets are validated once at construction and never mutated: `t > 0`,
//!   `m > 0`, `P ≥ 1`, finite regressors.
//! - There is no global state. Every call receives its configuration
//!   explicitly and the permutation RNG is created inside each `split`.
//! - The β/γ separation of the reduced model is a distinct step driven by
//!   an explicit [`SeparationAssumption`]; it never runs inside a fit.
//!
//! Conventions
//! -----------
//! - Times are in seconds; coefficients are seconds per regressor unit.
//! - No intercept: `X1` carries the per-call latency term.
//! - Residuals are `predicted − actual`.
//! - Ill-conditioning and solver non-convergence are reported as
//!   [`Diagnostic`] values and logged through `log::warn!`.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build a [`Dataset`] (`Dataset::new` or `Dataset::from_columns`).
//!   2. Call [`run_all_models`] with a [`RunConfig`] (or
//!      [`run_analysis`] for a single specification).
//!   3. Inspect the [`AnalysisReport`] or serialize it with
//!      `to_json_pretty`.
//! - Lower-level callers can use [`split`], [`fit_ols`], [`fit_constrained`]
//!   and [`validate`] directly.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule. The end-to-end scenario,
//!   collinearity detection, constraint enforcement and the validator
//!   boundary are covered in `tests/integration_cost_model_pipeline.rs`;
//!   split properties in `tests/property_split.rs`.

pub mod analysis;
pub mod core;
pub mod errors;
pub mod evaluation;
pub mod fit;
pub mod report;
pub mod simulate;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::analysis::{AnalysisRun, run_all_models, run_analysis};
pub use self::core::{
    AllreduceAlgorithm, CombinedEstimate, CostEstimate, CostParameters, Dataset, FitOptions,
    ModelSpec, ModelTolerances, Observation, Regressor, RunConfig, SeparationAssumption, Split,
    split,
};
pub use self::errors::{CostModelError, CostModelResult};
pub use self::evaluation::{PointPrediction, ValidationOutcome, ValidationResult, validate};
pub use self::fit::{
    CoefficientStats, Convergence, Diagnostic, FitResult, fit_constrained, fit_model, fit_ols,
};
pub use self::report::{AnalysisReport, ModelReport};
pub use self::simulate::SyntheticDesign;

pub mod prelude {
    pub use super::{
        AnalysisReport, AnalysisRun, CostEstimate, CostModelError, CostModelResult,
        CostParameters, Dataset, Diagnostic, FitResult, ModelSpec, Observation, RunConfig,
        SeparationAssumption, ValidationOutcome, fit_model, run_all_models, run_analysis, split,
        validate,
    };
}
