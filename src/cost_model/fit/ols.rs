//! fit::ols — ordinary least squares with conditioning diagnostics.
//!
//! Purpose
//! -------
//! Fit the active regressors of a [`ModelSpec`] by unconstrained least
//! squares and surface ill-conditioning instead of hiding it.
//!
//! Key behaviors
//! -------------
//! - Solve through [`svd_lstsq`] on the column-normalized design (no
//!   intercept column).
//! - Attach `NumericalInstability` when `κ` exceeds
//!   `FitOptions::condition_threshold`; the fit still succeeds.
//! - Report R², SSR and, when `n > k`, per-coefficient standard errors,
//!   t-values and two-sided Student-t p-values with `n − k` degrees of
//!   freedom.
//!
//! Invariants & assumptions
//! ------------------------
//! - Standard errors use the untruncated spectrum, so exactly collinear
//!   regressors report infinite (or enormous) standard errors even though
//!   the minimum-norm coefficients themselves stay finite.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact recovery, the empty-training error and the
//!   instability warning on `X2 = 2·X3`. End-to-end behavior is covered in
//!   `tests/integration_cost_model_pipeline.rs`.
use crate::cost_model::{
    core::{data::Dataset, model::ModelSpec, options::FitOptions},
    errors::{CostModelError, CostModelResult},
    fit::{
        linalg::{SvdSolve, svd_lstsq},
        results::{CoefficientStats, Convergence, Diagnostic, FitResult, goodness_of_fit},
    },
};
use log::{debug, warn};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Fit `spec`'s active regressors on `train` by ordinary least squares.
///
/// Parameters
/// ----------
/// - `train`: `&Dataset`
///   Training rows. Must be non-empty.
/// - `spec`: [`ModelSpec`]
///   Selects the active regressors. The algorithm is OLS regardless of
///   `spec.is_constrained()`; use
///   [`fit_constrained`](super::constrained::fit_constrained) for bounds.
/// - `opts`: `&FitOptions`
///   Conditioning threshold and singular-value cutoff.
///
/// Returns
/// -------
/// `CostModelResult<FitResult>` with `convergence = Converged`.
///
/// Errors
/// ------
/// - `EmptyTrainingSet` when `train` has no rows.
/// - Option validation errors from [`FitOptions::validate`].
pub fn fit_ols(train: &Dataset, spec: ModelSpec, opts: &FitOptions) -> CostModelResult<FitResult> {
    opts.validate()?;
    if train.is_empty() {
        return Err(CostModelError::EmptyTrainingSet);
    }
    let regressors = spec.regressors();
    let x = train.design_matrix(regressors);
    let y = train.targets();
    let (n, k) = x.dim();

    let sol = svd_lstsq(x.view(), y.view(), opts.rcond);
    let (ssr, r_squared) = goodness_of_fit(x.view(), y.view(), sol.coefficients.view());
    let stats = coefficient_stats(&sol, ssr, n);

    let mut diagnostics = Vec::new();
    if let Some(d) = instability(sol.condition_number, opts.condition_threshold) {
        warn!("{spec} OLS fit: {d}");
        diagnostics.push(d);
    }
    debug!(
        "{spec} OLS fit on {n} rows, {k} regressors: kappa = {:.3e}, SSR = {ssr:.4e}",
        sol.condition_number
    );

    Ok(FitResult {
        spec,
        regressors: regressors.to_vec(),
        coefficients: sol.coefficients,
        r_squared,
        ssr,
        n_obs: n,
        stats,
        condition_number: sol.condition_number,
        convergence: Convergence::Converged,
        diagnostics,
    })
}

/// `NumericalInstability` diagnostic if `kappa > threshold` (or `kappa` is
/// not finite).
pub(crate) fn instability(kappa: f64, threshold: f64) -> Option<Diagnostic> {
    if kappa > threshold || kappa.is_nan() {
        Some(Diagnostic::NumericalInstability { condition_number: kappa, threshold })
    } else {
        None
    }
}

/// Standard errors, t-values and two-sided p-values.
///
/// Returns `None` when `n ≤ k` (no residual degrees of freedom) or when the
/// spectrum is incomplete.
fn coefficient_stats(sol: &SvdSolve, ssr: f64, n: usize) -> Option<Vec<CoefficientStats>> {
    let k = sol.coefficients.len();
    if n <= k {
        return None;
    }
    let dof = (n - k) as f64;
    let s2 = ssr / dof;
    let var_diag = sol.unscaled_covariance_diag()?;
    let dist = StudentsT::new(0.0, 1.0, dof).ok()?;
    let stats = sol
        .coefficients
        .iter()
        .zip(var_diag.iter())
        .map(|(&c, &v)| {
            let std_error = (s2 * v).sqrt();
            let t_value = c / std_error;
            let p_value = if t_value.is_nan() { f64::NAN } else { 2.0 * dist.cdf(-t_value.abs()) };
            CoefficientStats { std_error, t_value, p_value }
        })
        .collect();
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_model::core::data::Observation;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact coefficient recovery on noiseless, non-collinear data.
    // - The instability warning on X2 = 2·X3 and its absence for the reduced
    //   model.
    // - Empty training input.
    // -------------------------------------------------------------------------

    fn independent_rows() -> Dataset {
        let mut rows = Vec::new();
        for (i, p) in [2_u32, 4, 8, 16].into_iter().enumerate() {
            for m in [1.0, 10.0, 100.0, 1000.0] {
                let x1 = 2.0 * f64::from(p - 1);
                let x2 = 2.0 * m * f64::from(p - 1);
                let x3 = m * m + i as f64;
                let t = 1e-6 * x1 + 3e-9 * x2 + 1e-9 * x3;
                rows.push(Observation { p, m, x1, x2, x3, t });
            }
        }
        Dataset::new(rows).expect("valid rows")
    }

    fn collinear_rows() -> Dataset {
        let mut rows = Vec::new();
        for p in [4_u32, 8, 16] {
            for m in [1.0, 7.0, 50.0, 333.0, 2000.0] {
                let x1 = 2.0 * f64::from(p - 1);
                let x3 = m * f64::from(p - 1);
                let x2 = 2.0 * x3;
                let t = 1e-6 * x1 + 7e-9 * x3 + 1e-9 * (m % 3.0);
                rows.push(Observation { p, m, x1, x2, x3, t });
            }
        }
        Dataset::new(rows).expect("valid rows")
    }

    #[test]
    // Purpose
    // -------
    // OLS recovers generating coefficients on noiseless, well-posed data.
    //
    // Given
    // -----
    // - 16 rows with T = 1e-6·X1 + 3e-9·X2 + 1e-9·X3 and X3 independent of X2.
    //
    // Expect
    // ------
    // - Each coefficient within 1e-9 relative; no diagnostics; R² ≈ 1.
    fn fit_ols_recovers_noiseless_coefficients() {
        // Arrange
        let ds = independent_rows();

        // Act
        let fit = fit_ols(&ds, ModelSpec::FullUnconstrained, &FitOptions::default())
            .expect("fit should succeed");

        // Assert
        for (got, want) in fit.coefficients.iter().zip([1e-6, 3e-9, 1e-9]) {
            assert!(((got - want) / want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert!(fit.diagnostics.is_empty());
        assert!(fit.r_squared.expect("non-constant target") > 1.0 - 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Exact collinearity is flagged for the full model but not the reduced one.
    //
    // Given
    // -----
    // - 15 rows with X2 = 2·X3 exactly.
    //
    // Expect
    // ------
    // - FullUnconstrained carries `NumericalInstability`; Reduced does not.
    // - The full model's β standard error is not smaller than |β|.
    fn fit_ols_flags_collinearity_only_for_full_model() {
        // Arrange
        let ds = collinear_rows();
        let opts = FitOptions::default();

        // Act
        let full = fit_ols(&ds, ModelSpec::FullUnconstrained, &opts).expect("full fit");
        let reduced = fit_ols(&ds, ModelSpec::Reduced, &opts).expect("reduced fit");

        // Assert
        assert!(full.has_instability_warning());
        assert!(!reduced.has_instability_warning(), "kappa = {}", reduced.condition_number);
        let beta_se = full.stats.as_ref().expect("n > k")[1].std_error;
        assert!(!(beta_se <= full.coefficients[1].abs()), "se = {beta_se}");
    }

    #[test]
    // Purpose
    // -------
    // An empty training subset is a degenerate-dataset error.
    //
    // Given
    // -----
    // - `Dataset::default()`.
    //
    // Expect
    // ------
    // - `Err(EmptyTrainingSet)`.
    fn fit_ols_rejects_empty_training_set() {
        // Act & Assert
        assert_eq!(
            fit_ols(&Dataset::default(), ModelSpec::Reduced, &FitOptions::default()),
            Err(CostModelError::EmptyTrainingSet)
        );
    }
}
