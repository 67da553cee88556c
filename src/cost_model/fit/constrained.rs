//! fit::constrained — bounded least squares for the constrained full model.
//!
//! Purpose
//! -------
//! Fit `min ‖y − X·c‖²` subject to `c_j ≥ lb_j` for every active regressor,
//! so that no fitted cost parameter is negative (or below a caller bound).
//!
//! Key behaviors
//! -------------
//! - Work on a scaled problem: design columns at unit norm, target at unit
//!   norm, bounds mapped into the same units.
//! - Reparameterize `b = lb + softplus(θ)` and minimize over `θ ∈ ℝᵏ` with the
//!   L-BFGS layer in [`crate::optimization::minimizer`], starting from the
//!   (floored) OLS solution.
//! - Polish the iterate with an active-set step: coordinates at their bound
//!   are pinned, the remaining ones are solved exactly by SVD least squares,
//!   and any new violators are pinned until the point is feasible. The
//!   polished point replaces the iterate only if its objective is no worse.
//! - Solver non-convergence never aborts the fit: the result carries
//!   `Convergence::DidNotConverge` and a `SolverNonConvergence` diagnostic.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned coefficient satisfies `c_j ≥ lb_j`; coefficients pinned
//!   by the active-set step equal `lb_j` exactly.
//! - `lower_bounds.len()` equals the number of active regressors and every
//!   bound is finite (see [`validate_lower_bounds`]).
//!
//! Testing notes
//! -------------
//! - Unit tests use an orthogonal design where the bounded optimum is known
//!   in closed form: interior recovery, a zero-bound clamp and a non-zero
//!   bound clamp.
use crate::{
    cost_model::{
        core::{data::Dataset, model::ModelSpec, options::FitOptions},
        errors::{CostModelError, CostModelResult},
        fit::{
            linalg::{residual_sum_of_squares, select_columns, svd_lstsq},
            ols::instability,
            results::{Convergence, Diagnostic, FitResult, goodness_of_fit},
        },
    },
    optimization::{
        errors::OptResult,
        minimizer::{Cost, Grad, Objective, Theta, minimize, validation::validate_theta},
        numerical_stability::{safe_logistic, safe_softplus, safe_softplus_inv},
    },
};
use log::{debug, warn};
use ndarray::{Array1, Array2};

/// Smallest scaled offset above the bound used for the warm start; keeps
/// `softplus⁻¹` finite when the OLS coefficient is at or below its bound.
const WARM_START_FLOOR: f64 = 1e-6;

/// Scaled distance to the bound at or below which a coordinate is treated as
/// active.
const ACTIVE_TOL: f64 = 1e-6;

/// Slack on the scaled objective (`‖w‖ = 1`) when comparing the polished
/// point with the solver iterate.
const POLISH_SLACK: f64 = 1e-12;

/// Check one finite lower bound per active regressor.
///
/// Errors
/// ------
/// - `LowerBoundsLengthMismatch` when `bounds.len() != k`.
/// - `InvalidLowerBound` for the first non-finite entry.
pub fn validate_lower_bounds(bounds: &[f64], k: usize) -> CostModelResult<()> {
    if bounds.len() != k {
        return Err(CostModelError::LowerBoundsLengthMismatch { expected: k, found: bounds.len() });
    }
    if let Some((index, &value)) = bounds.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(CostModelError::InvalidLowerBound { index, value });
    }
    Ok(())
}

/// Fit `spec`'s active regressors on `train` with per-coefficient lower
/// bounds.
///
/// Parameters
/// ----------
/// - `train`: `&Dataset`
///   Training rows. Must be non-empty.
/// - `spec`: [`ModelSpec`]
///   Selects the active regressors (normally `FullConstrained`).
/// - `lower_bounds`: `&[f64]`
///   One finite bound per active regressor, in regressor order.
/// - `opts`: `&FitOptions`
///   Conditioning threshold, SVD cutoff and L-BFGS settings.
///
/// Returns
/// -------
/// `CostModelResult<FitResult>` with feasible coefficients, `stats = None`
/// and the condition number of the training design.
///
/// Errors
/// ------
/// - `EmptyTrainingSet`, `LowerBoundsLengthMismatch`, `InvalidLowerBound`.
/// - Option validation errors from [`FitOptions::validate`].
///
/// Notes
/// -----
/// - Optimizer failures are downgraded to diagnostics; the warm start (after
///   the active-set step) is returned in that case.
pub fn fit_constrained(
    train: &Dataset, spec: ModelSpec, lower_bounds: &[f64], opts: &FitOptions,
) -> CostModelResult<FitResult> {
    opts.validate()?;
    if train.is_empty() {
        return Err(CostModelError::EmptyTrainingSet);
    }
    let regressors = spec.regressors();
    validate_lower_bounds(lower_bounds, regressors.len())?;
    let x = train.design_matrix(regressors);
    let y = train.targets();
    let (n, k) = x.dim();

    let warm = svd_lstsq(x.view(), y.view(), opts.rcond);
    let scales = &warm.column_scales;
    let y_scale = {
        let norm = y.dot(&y).sqrt();
        if norm > 0.0 && norm.is_finite() { norm } else { 1.0 }
    };
    let problem = BoundedProblem {
        design: Array2::from_shape_fn((n, k), |(i, j)| x[[i, j]] / scales[j]),
        target: y.mapv(|v| v / y_scale),
        lower: lower_bounds.iter().zip(scales.iter()).map(|(&lb, &s)| lb * s / y_scale).collect(),
    };
    let theta0: Theta = warm
        .coefficients
        .iter()
        .zip(scales.iter())
        .zip(problem.lower.iter())
        .map(|((&c, &s), &lb)| safe_softplus_inv((c * s / y_scale - lb).max(WARM_START_FLOOR)))
        .collect();

    let mut diagnostics = Vec::new();
    let (b_iter, convergence) =
        match minimize(&BoundedLeastSquares, theta0.clone(), &problem, &opts.minimizer) {
            Ok(out) => {
                let b = problem.coefficients(&out.theta_hat);
                if out.converged {
                    (b, Convergence::Converged)
                } else {
                    warn!("{spec} bounded fit stopped early: {}", out.status);
                    diagnostics.push(Diagnostic::SolverNonConvergence {
                        message: out.status.clone(),
                        objective: out.value * y_scale * y_scale,
                        iterations: out.iterations,
                    });
                    (b, Convergence::DidNotConverge { message: out.status })
                }
            }
            Err(err) => {
                warn!("{spec} bounded fit failed, keeping the warm start: {err}");
                let b = problem.coefficients(&theta0);
                let message = err.to_string();
                diagnostics.push(Diagnostic::SolverNonConvergence {
                    message: message.clone(),
                    objective: problem.ssr(&b) * y_scale * y_scale,
                    iterations: 0,
                });
                (b, Convergence::DidNotConverge { message })
            }
        };

    let (polished, pinned) = polish_active_set(&problem, &b_iter, opts.rcond);
    let (b, pinned) = if problem.ssr(&polished) <= problem.ssr(&b_iter) + POLISH_SLACK {
        (polished, pinned)
    } else {
        (b_iter, vec![false; k])
    };
    let coefficients: Array1<f64> = (0..k)
        .map(|j| {
            if pinned[j] {
                lower_bounds[j]
            } else {
                (b[j] * y_scale / scales[j]).max(lower_bounds[j])
            }
        })
        .collect();

    if let Some(d) = instability(warm.condition_number, opts.condition_threshold) {
        warn!("{spec} bounded fit: {d}");
        diagnostics.push(d);
    }
    let (ssr, r_squared) = goodness_of_fit(x.view(), y.view(), coefficients.view());
    debug!(
        "{spec} bounded fit on {n} rows: {} coefficient(s) at their bound, SSR = {ssr:.4e}",
        pinned.iter().filter(|&&p| p).count()
    );

    Ok(FitResult {
        spec,
        regressors: regressors.to_vec(),
        coefficients,
        r_squared,
        ssr,
        n_obs: n,
        stats: None,
        condition_number: warm.condition_number,
        convergence,
        diagnostics,
    })
}

/// Scaled bounded least-squares data: unit-norm design columns, unit-norm
/// target and bounds in the same units.
#[derive(Debug, Clone)]
struct BoundedProblem {
    design: Array2<f64>,
    target: Array1<f64>,
    lower: Array1<f64>,
}

impl BoundedProblem {
    /// `b = lb + softplus(θ)`.
    fn coefficients(&self, theta: &Theta) -> Array1<f64> {
        &self.lower + &theta.mapv(safe_softplus)
    }

    fn residual(&self, b: &Array1<f64>) -> Array1<f64> {
        &self.target - &self.design.dot(b)
    }

    fn ssr(&self, b: &Array1<f64>) -> f64 {
        residual_sum_of_squares(self.design.view(), self.target.view(), b.view())
    }
}

/// `c(θ) = ‖w − Z·(lb + softplus(θ))‖²` with its analytic gradient.
struct BoundedLeastSquares;

impl Objective for BoundedLeastSquares {
    type Data = BoundedProblem;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let r = data.residual(&data.coefficients(theta));
        Ok(r.dot(&r))
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta, data.design.ncols())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let r = data.residual(&data.coefficients(theta));
        let grad_b = data.design.t().dot(&r) * -2.0;
        Ok(grad_b * &theta.mapv(safe_logistic))
    }
}

/// Active-set polish of a feasible iterate.
///
/// Pins coordinates within [`ACTIVE_TOL`] of their bound, solves the free
/// ones against `w − Z_A·lb_A` and pins any free coordinate that lands
/// below its bound, repeating until the point is feasible. Each round pins
/// at least one new coordinate, so the loop ends after at most `k + 1`
/// solves.
fn polish_active_set(
    problem: &BoundedProblem, b: &Array1<f64>, rcond: Option<f64>,
) -> (Array1<f64>, Vec<bool>) {
    let k = b.len();
    let lower = &problem.lower;
    let mut pinned: Vec<bool> =
        b.iter().zip(lower.iter()).map(|(&bj, &lj)| bj - lj <= ACTIVE_TOL).collect();
    loop {
        let free: Vec<usize> = (0..k).filter(|&j| !pinned[j]).collect();
        let mut candidate = lower.clone();
        if !free.is_empty() {
            let at_bound: Array1<f64> =
                (0..k).map(|j| if pinned[j] { lower[j] } else { 0.0 }).collect();
            let rhs = &problem.target - &problem.design.dot(&at_bound);
            let sub = select_columns(problem.design.view(), &free);
            let sol = svd_lstsq(sub.view(), rhs.view(), rcond);
            for (&j, &c) in free.iter().zip(sol.coefficients.iter()) {
                candidate[j] = c;
            }
        }
        let violators: Vec<usize> =
            free.iter().copied().filter(|&j| candidate[j] < lower[j]).collect();
        if violators.is_empty() {
            return (candidate, pinned);
        }
        for j in violators {
            pinned[j] = true;
        }
    }
}
