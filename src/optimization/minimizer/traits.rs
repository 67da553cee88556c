//! Caller-facing types of the minimizer: the [`Objective`] a problem
//! implements, the options that steer L-BFGS and the [`OptimOutcome`] it
//! returns.
//!
//! θ is always unconstrained here. Problems with bounds (the constrained
//! cost fit) reparameterize inside their own `value`/`grad`.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// A scalar function of θ to be minimized, with its fixed inputs in `Data`.
///
/// `check` runs once before the solver starts. `grad` is optional; the
/// default reports [`OptError::GradientNotImplemented`] and the adapter then
/// differentiates `value` numerically.
pub trait Objective {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used by L-BFGS. Parses from `"morethuente"` or
/// `"hagerzhang"` in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("morethuente") {
            Ok(LineSearcher::MoreThuente)
        } else if s.eq_ignore_ascii_case("hagerzhang") {
            Ok(LineSearcher::HagerZhang)
        } else {
            Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "expected MoreThuente or HagerZhang",
            })
        }
    }
}

/// Settings for one L-BFGS run.
///
/// `verbose` only has an effect with the `obs_slog` feature. A `None`
/// memory uses [`DEFAULT_LBFGS_MEM`](super::types::DEFAULT_LBFGS_MEM).
/// The default stops at `|∇| < 1e-10`, a cost change below `1e-16` or
/// 500 iterations, using More–Thuente.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MinimizerOptions {
    /// Rejects a zero L-BFGS memory. `tols` is assumed to come from
    /// [`Tolerances::new`].
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem { mem: 0, reason: "history must hold at least one pair" });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-10), tol_cost: Some(1e-16), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. Any of them may be absent, but not all three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Errors
    /// ------
    /// - `NoTolerancesProvided` when every rule is `None`.
    /// - `InvalidTolGrad` / `InvalidTolCost` for a tolerance that is not
    ///   finite and positive.
    /// - `InvalidMaxIter` for a zero iteration cap.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if (tol_grad, tol_cost, max_iter) == (None, None, None) {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter { max_iter: 0, reason: "cap must allow one iteration" });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// What `minimize` hands back.
///
/// `converged` is false when the run stopped on the iteration cap or never
/// terminated; `status` carries argmin's termination reason as text.
/// `fn_evals` holds argmin's counters (`cost_count`, `gradient_count`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build an outcome from a finished solver state, rejecting a missing or
    /// non-finite best point and a non-finite best cost.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        let converged = !matches!(
            termination,
            TerminationStatus::NotTerminated
                | TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        );
        Ok(Self {
            theta_hat,
            value,
            converged,
            status: format!("{termination:?}"),
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}
