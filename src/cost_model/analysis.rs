//! cost_model::analysis — compose split, fit and validation into one run.
//!
//! Purpose
//! -------
//! Provide the entry points a caller actually uses: take an immutable
//! [`Dataset`] and a [`RunConfig`], split once, fit one or all model
//! specifications on the training side and validate each fit on the
//! held-out side.
//!
//! Key behaviors
//! -------------
//! - [`run_analysis`] handles a single [`ModelSpec`].
//! - [`run_all_models`] fits every specification over the *same* split and
//!   collects the runs into an [`AnalysisReport`].
//! - An empty held-out subset (e.g. `test_fraction = 0`) does not fail the
//!   run: the validation is recorded as [`ValidationOutcome::Skipped`].
//! - Physical parameters are derived from the fit through the run's
//!   [`SeparationAssumption`](crate::cost_model::core::params::SeparationAssumption)
//!   as a separate step after fitting.
//!
//! Invariants & assumptions
//! ------------------------
//! - The configuration is validated before any work is done.
//! - Runs share no mutable state; the permutation RNG lives inside `split`.
use crate::cost_model::{
    core::{
        data::Dataset,
        model::ModelSpec,
        options::RunConfig,
        params::{CostEstimate, CostParameters},
        split::{Split, split},
    },
    errors::{CostModelError, CostModelResult},
    evaluation::{ValidationOutcome, validate},
    fit::{fit_model, results::FitResult},
    report::AnalysisReport,
};
use log::debug;

/// Everything produced for one model specification in one run.
///
/// Fields
/// ------
/// - `spec`: the fitted specification.
/// - `n_train`, `n_test`: split sizes.
/// - `fit`: the immutable fit result.
/// - `estimate`: physical reading of the coefficients (`(α, K)` or
///   `(α, β, γ)`).
/// - `derived`: `(α, β, γ)` after applying the run's separation assumption;
///   identical to the estimate for the full models.
/// - `tolerance`: relative tolerance used for validation.
/// - `validation`: held-out metrics and verdict, or the reason they were
///   skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRun {
    pub spec: ModelSpec,
    pub n_train: usize,
    pub n_test: usize,
    pub fit: FitResult,
    pub estimate: CostEstimate,
    pub derived: CostParameters,
    pub tolerance: f64,
    pub validation: ValidationOutcome,
}

impl AnalysisRun {
    /// `Some(verdict)` when validation ran.
    pub fn passed(&self) -> Option<bool> {
        self.validation.passed()
    }
}

/// Split `dataset`, fit `spec` and validate it.
///
/// Errors
/// ------
/// - Configuration errors from [`RunConfig::validate`].
/// - `EmptyDataset` from the split and `EmptyTrainingSet` from the fit.
pub fn run_analysis(
    dataset: &Dataset, spec: ModelSpec, config: &RunConfig,
) -> CostModelResult<AnalysisRun> {
    config.validate()?;
    let split = split(dataset, config.test_fraction, config.seed)?;
    run_on_split(dataset, &split, spec, config)
}

/// Split `dataset` once and run every model specification on that split.
///
/// Errors
/// ------
/// - As [`run_analysis`]; the first failing specification aborts the run.
pub fn run_all_models(dataset: &Dataset, config: &RunConfig) -> CostModelResult<AnalysisReport> {
    config.validate()?;
    let split = split(dataset, config.test_fraction, config.seed)?;
    let runs = ModelSpec::ALL
        .iter()
        .map(|&spec| run_on_split(dataset, &split, spec, config))
        .collect::<CostModelResult<Vec<_>>>()?;
    Ok(AnalysisReport::new(config, dataset.len(), runs))
}

/// Fit and validate `spec` on an existing split.
///
/// The split must come from `dataset`; indices are not re-checked.
pub fn run_on_split(
    dataset: &Dataset, split: &Split, spec: ModelSpec, config: &RunConfig,
) -> CostModelResult<AnalysisRun> {
    let train = dataset.subset(&split.train);
    let test = dataset.subset(&split.test);
    debug!("{spec}: {} training rows, {} held-out rows", train.len(), test.len());

    let fit = fit_model(&train, spec, &config.lower_bounds, &config.fit)?;
    let estimate = fit.estimate();
    let derived = estimate.resolve(config.separation);
    let tolerance = config.tolerance_for(spec);

    let validation = match validate(&fit, &test, tolerance) {
        Ok(result) => {
            debug!(
                "{spec}: max |error| {:.4e} vs threshold {:.4e} -> {}",
                result.max_abs_error,
                result.threshold(),
                if result.passed { "pass" } else { "fail" }
            );
            ValidationOutcome::Completed(result)
        }
        Err(err @ CostModelError::EmptyEvaluationSet) => {
            debug!("{spec}: validation skipped: {err}");
            ValidationOutcome::Skipped { reason: err.to_string() }
        }
        Err(err) => return Err(err),
    };

    Ok(AnalysisRun {
        spec,
        n_train: train.len(),
        n_test: test.len(),
        fit,
        estimate,
        derived,
        tolerance,
        validation,
    })
}
