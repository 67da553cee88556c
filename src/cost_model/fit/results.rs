//! Fit outputs: coefficients, goodness of fit, convergence and diagnostics.
//!
//! A [`FitResult`] is created once per fit and never mutated. Non-fatal
//! conditions travel as [`Diagnostic`] values next to the estimates instead
//! of aborting the run.
use crate::cost_model::core::{
    data::Observation,
    model::{ModelSpec, Regressor},
    params::{CombinedEstimate, CostEstimate, CostParameters},
};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::Serialize;
use std::fmt;

/// Whether the fitting algorithm reached its own convergence criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum Convergence {
    Converged,
    DidNotConverge { message: String },
}

impl Convergence {
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged)
    }
}

/// Non-fatal condition recorded on a fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    /// Column-normalized design is near-singular.
    NumericalInstability { condition_number: f64, threshold: f64 },
    /// Iterative solver stopped without meeting its criterion.
    SolverNonConvergence { message: String, objective: f64, iterations: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NumericalInstability { condition_number, threshold } => write!(
                f,
                "Numerical instability: condition number {condition_number:.3e} exceeds {threshold:.3e}"
            ),
            Diagnostic::SolverNonConvergence { message, objective, iterations } => write!(
                f,
                "Solver did not converge after {iterations} iterations (objective {objective:.4e}): {message}"
            ),
        }
    }
}

/// Per-coefficient inference statistics for OLS fits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoefficientStats {
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
}

/// Immutable output of one fit.
///
/// Fields
/// ------
/// - `spec`: the model specification that produced the fit.
/// - `regressors`: active regressors; `coefficients[j]` multiplies
///   `regressors[j]`.
/// - `coefficients`: fitted values in seconds per regressor unit.
/// - `r_squared`: `1 − SS_res/SS_tot` on the training rows; `None` when
///   `SS_tot = 0`.
/// - `ssr`: training residual sum of squares.
/// - `n_obs`: number of training rows.
/// - `stats`: standard errors, t- and p-values (OLS with `n > k` only).
/// - `condition_number`: `κ` of the column-normalized training design.
/// - `convergence`: solver status; OLS is always `Converged`.
/// - `diagnostics`: warnings attached during the fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub spec: ModelSpec,
    pub regressors: Vec<Regressor>,
    pub coefficients: Array1<f64>,
    pub r_squared: Option<f64>,
    pub ssr: f64,
    pub n_obs: usize,
    pub stats: Option<Vec<CoefficientStats>>,
    pub condition_number: f64,
    pub convergence: Convergence,
    pub diagnostics: Vec<Diagnostic>,
}

impl FitResult {
    pub fn regressor_names(&self) -> Vec<&'static str> {
        self.regressors.iter().map(|r| r.name()).collect()
    }

    /// `T̂ = Σ_j c_j·X_j` over the active regressors only.
    pub fn predict(&self, obs: &Observation) -> f64 {
        self.regressors.iter().zip(self.coefficients.iter()).map(|(&r, &c)| c * obs.regressor(r)).sum()
    }

    /// Physical reading of the coefficients.
    ///
    /// The reduced model yields `(α, K)`; the full models yield `(α, β, γ)`.
    pub fn estimate(&self) -> CostEstimate {
        let c = &self.coefficients;
        match self.spec {
            ModelSpec::Reduced => CostEstimate::Combined(CombinedEstimate { alpha: c[0], k: c[1] }),
            ModelSpec::FullUnconstrained | ModelSpec::FullConstrained => {
                CostEstimate::Full(CostParameters { alpha: c[0], beta: c[1], gamma: c[2] })
            }
        }
    }

    pub fn is_converged(&self) -> bool {
        self.convergence.is_converged()
    }

    pub fn has_instability_warning(&self) -> bool {
        self.diagnostics.iter().any(|d| matches!(d, Diagnostic::NumericalInstability { .. }))
    }
}

/// `(SSR, R²)` of coefficients `c` on `(x, y)`.
///
/// R² uses the centered total sum of squares and is `None` when that sum is
/// zero.
pub(crate) fn goodness_of_fit(
    x: ArrayView2<f64>, y: ArrayView1<f64>, c: ArrayView1<f64>,
) -> (f64, Option<f64>) {
    let resid = &y - &x.dot(&c);
    let ssr = resid.dot(&resid);
    let n = y.len();
    if n == 0 {
        return (ssr, None);
    }
    let mean = y.sum() / n as f64;
    let sst: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let r2 = if sst > 0.0 { Some(1.0 - ssr / sst) } else { None };
    (ssr, r2)
}
