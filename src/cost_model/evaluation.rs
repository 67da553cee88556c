//! cost_model::evaluation — held-out validation of a fitted cost model.
//!
//! Purpose
//! -------
//! Measure how well a [`FitResult`] predicts rows it was not trained on and
//! turn that into a pass/fail verdict against a relative tolerance.
//!
//! Key behaviors
//! -------------
//! - Predictions use the fit's active regressors only.
//! - Residuals are `predicted − actual`.
//! - The verdict is `max_abs_error < tolerance · mean_actual`; equality
//!   fails.
//!
//! Invariants & assumptions
//! ------------------------
//! - The evaluation subset must be non-empty; otherwise metrics are not
//!   computable and [`validate`] returns `EmptyEvaluationSet`.
//! - The tolerance must be finite and strictly positive.
//!
//! Downstream usage
//! ----------------
//! - `analysis` maps an empty evaluation subset to
//!   [`ValidationOutcome::Skipped`] so the fit is still reported.
use crate::cost_model::{
    core::data::Dataset,
    errors::{CostModelError, CostModelResult},
    fit::results::FitResult,
};
use serde::Serialize;

/// One held-out row: prediction, measurement and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointPrediction {
    pub predicted: f64,
    pub actual: f64,
    pub residual: f64,
}

/// Metrics and verdict for one fit on one evaluation subset.
///
/// Fields
/// ------
/// - `points`: per-row `(predicted, actual, residual)` in evaluation order.
/// - `max_abs_error`: `max_i |residual_i|`.
/// - `mean_actual`: mean measured time.
/// - `rmse`: root mean squared residual.
/// - `tolerance`: relative tolerance the verdict was computed with.
/// - `passed`: `max_abs_error < tolerance · mean_actual`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub points: Vec<PointPrediction>,
    pub max_abs_error: f64,
    pub mean_actual: f64,
    pub rmse: f64,
    pub tolerance: f64,
    pub passed: bool,
}

impl ValidationResult {
    /// Absolute threshold `tolerance · mean_actual` the verdict compares to.
    pub fn threshold(&self) -> f64 {
        self.tolerance * self.mean_actual
    }
}

/// Validation as seen by a composed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum ValidationOutcome {
    Completed(ValidationResult),
    /// Metrics were not computable; the fit is still reported.
    Skipped { reason: String },
}

impl ValidationOutcome {
    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            ValidationOutcome::Completed(r) => Some(r),
            ValidationOutcome::Skipped { .. } => None,
        }
    }

    pub fn passed(&self) -> Option<bool> {
        self.result().map(|r| r.passed)
    }
}

/// Check a relative tolerance.
///
/// Errors
/// ------
/// - `InvalidTolerance` unless finite and `> 0`.
pub fn validate_relative_tolerance(tolerance: f64) -> CostModelResult<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(CostModelError::InvalidTolerance { value: tolerance });
    }
    Ok(())
}

/// Evaluate `fit` on `eval` against `relative_tolerance`.
///
/// Parameters
/// ----------
/// - `fit`: `&FitResult`
///   Any fit; only its active regressors are read from each row.
/// - `eval`: `&Dataset`
///   Held-out rows.
/// - `relative_tolerance`: `f64`
///   Multiplier on the mean measured time giving the error budget.
///
/// Returns
/// -------
/// `CostModelResult<ValidationResult>`.
///
/// Errors
/// ------
/// - `InvalidTolerance` for a non-finite or non-positive tolerance.
/// - `EmptyEvaluationSet` when `eval` has no rows.
pub fn validate(
    fit: &FitResult, eval: &Dataset, relative_tolerance: f64,
) -> CostModelResult<ValidationResult> {
    validate_relative_tolerance(relative_tolerance)?;
    if eval.is_empty() {
        return Err(CostModelError::EmptyEvaluationSet);
    }
    let points: Vec<PointPrediction> = eval
        .rows()
        .iter()
        .map(|obs| {
            let predicted = fit.predict(obs);
            PointPrediction { predicted, actual: obs.t, residual: predicted - obs.t }
        })
        .collect();
    let n = points.len() as f64;
    let max_abs_error = points.iter().map(|p| p.residual.abs()).fold(0.0, f64::max);
    let mean_actual = points.iter().map(|p| p.actual).sum::<f64>() / n;
    let rmse = (points.iter().map(|p| p.residual * p.residual).sum::<f64>() / n).sqrt();
    let passed = max_abs_error < relative_tolerance * mean_actual;

    Ok(ValidationResult { points, max_abs_error, mean_actual, rmse, tolerance: relative_tolerance, passed })
}
