//! Execution helper: drive an `argmin` solver over an adapted [`Objective`]
//! and normalize the final state into an [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    minimizer::{Grad, MinimizerOptions, Objective, OptimOutcome, Theta, adapter::ArgMinAdapter},
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

type LbfgsState = IterState<Theta, Grad, (), (), (), f64>;

/// Run `solver` from `theta0` and return the best point it visited.
///
/// The iteration cap comes from `opts.tols.max_iter`. With the `obs_slog`
/// feature and `opts.verbose`, the starting cost is logged at debug level
/// and a terminal slog observer follows every iteration.
///
/// # Errors
/// - Any `argmin` runtime error (objective failures, line-search failures)
///   via `From<argmin::core::Error>`.
/// - Validation errors while building the [`OptimOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MinimizerOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: argmin::core::Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let max_iters = opts.tols.max_iter.map(|n| n as u64);
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iters {
            Some(n) => state.max_iters(n),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        )
    } else {
        executor
    };

    let result = executor.run()?;
    into_outcome(result.state().clone())
}

/// Best parameter, best cost and bookkeeping from a finished solver state.
fn into_outcome(mut state: LbfgsState) -> OptResult<OptimOutcome> {
    let grad = state.take_gradient();
    let best = state.take_best_param();
    let termination = state.get_termination_status().clone();
    let evals = state.get_func_counts().clone();
    OptimOutcome::new(best, state.get_best_cost(), termination, state.get_iter(), evals, grad)
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    match problem.gradient(theta0) {
        Ok(g) => log::debug!("start: c(theta0) = {c0:.6e}, |grad| = {:.6e}", g.l2_norm()),
        Err(_) => log::debug!("start: c(theta0) = {c0:.6e}"),
    }
    Ok(())
}
