//! High-level entry point for minimizing a user-provided [`Objective`].
//!
//! Selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the objective in an `ArgMinAdapter` and delegates the run to
//! `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, MinimizerOptions, Objective},
    },
};

/// Minimize `c(θ)` using L-BFGS with the configured line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds the solver matching `opts.line_searcher`.
/// - Runs it through `run_lbfgs` and returns the normalized outcome.
///
/// # Errors
/// - Propagates any error from `f.check`, the builders or the run itself.
///
/// # Example
/// ```
/// use collective_cost_model::optimization::errors::OptResult;
/// use collective_cost_model::optimization::minimizer::{
///     MinimizerOptions, Objective, Theta, minimize,
/// };
/// use ndarray::array;
///
/// struct Bowl;
/// impl Objective for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok((theta[0] - 3.0).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
///     fn grad(&self, theta: &Theta, _: &()) -> OptResult<Theta> {
///         Ok(array![2.0 * (theta[0] - 3.0)])
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.0], &(), &MinimizerOptions::default())?;
/// assert!((out.theta_hat[0] - 3.0).abs() < 1e-6);
/// # Ok::<(), collective_cost_model::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MinimizerOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::{OptError, OptResult},
        minimizer::{Cost, Grad},
    };
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end minimization of a smooth convex objective with both line
    //   searches.
    // - Rejection of the initial guess by `check`.
    // -------------------------------------------------------------------------

    struct ShiftedBowl;

    impl Objective for ShiftedBowl {
        type Data = Array1<f64>;

        fn value(&self, theta: &Theta, center: &Self::Data) -> OptResult<Cost> {
            let d = theta - center;
            Ok(d.dot(&d))
        }

        fn check(&self, theta: &Theta, center: &Self::Data) -> OptResult<()> {
            if theta.len() != center.len() {
                return Err(OptError::ThetaLengthMismatch {
                    expected: center.len(),
                    actual: theta.len(),
                });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, center: &Self::Data) -> OptResult<Grad> {
            Ok(2.0 * (theta - center))
        }
    }

    #[test]
    // Purpose
    // -------
    // Both line searches reach the minimizer of a shifted quadratic.
    //
    // Given
    // -----
    // - c(θ) = ||θ - (1, -2, 0.5)||² starting from the origin.
    //
    // Expect
    // ------
    // - θ̂ within 1e-6 of the center and a converged outcome for each line search.
    fn minimize_finds_center_with_both_line_searches() {
        // Arrange
        let center = array![1.0, -2.0, 0.5];
        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let opts = MinimizerOptions { line_searcher: ls, ..MinimizerOptions::default() };

            // Act
            let out = minimize(&ShiftedBowl, Array1::zeros(3), &center, &opts)
                .expect("minimization should succeed");

            // Assert
            assert!(out.converged, "{ls:?} should converge: {}", out.status);
            for (got, want) in out.theta_hat.iter().zip(center.iter()) {
                assert!((got - want).abs() < 1e-6, "{ls:?}: got {got}, want {want}");
            }
            assert!(out.value < 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // An initial guess rejected by `check` never reaches the solver.
    //
    // Given
    // -----
    // - θ₀ of length 2 against a length-3 center.
    //
    // Expect
    // ------
    // - `Err(ThetaLengthMismatch { expected: 3, actual: 2 })`.
    fn minimize_propagates_check_failure() {
        // Arrange
        let center = array![1.0, 2.0, 3.0];

        // Act
        let result =
            minimize(&ShiftedBowl, Array1::zeros(2), &center, &MinimizerOptions::default());

        // Assert
        assert_eq!(result, Err(OptError::ThetaLengthMismatch { expected: 3, actual: 2 }));
    }
}
