//! cost_model::fit — coefficient estimation for the Allreduce cost model.
//!
//! Purpose
//! -------
//! Turn a training [`Dataset`] and a [`ModelSpec`] into an immutable
//! [`FitResult`]. Two algorithms are provided: ordinary least squares and
//! bound-constrained least squares.
//!
//! Key behaviors
//! -------------
//! - `linalg`: column-normalized SVD least squares and condition numbers.
//! - `ols`: [`fit_ols`] with R², coefficient statistics and the
//!   `NumericalInstability` diagnostic.
//! - `constrained`: [`fit_constrained`], a softplus-reparameterized L-BFGS
//!   solve followed by an active-set polish.
//! - `results`: [`FitResult`], [`Convergence`], [`Diagnostic`].
//! - [`fit_model`] dispatches on [`ModelSpec::is_constrained`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Fitters never mutate their input and never fail on ill-conditioning or
//!   solver non-convergence; those travel as diagnostics.
//!
//! Downstream usage
//! ----------------
//! - `evaluation::validate` consumes a [`FitResult`]; `analysis` composes
//!   split, fit and validation.

pub mod constrained;
pub mod linalg;
pub mod ols;
pub mod results;

pub use self::constrained::{fit_constrained, validate_lower_bounds};
pub use self::ols::fit_ols;
pub use self::results::{CoefficientStats, Convergence, Diagnostic, FitResult};

use crate::cost_model::{
    core::{data::Dataset, model::ModelSpec, options::FitOptions},
    errors::CostModelResult,
};

/// Fit `spec` on `train` with the algorithm it calls for.
///
/// `lower_bounds` is only read for constrained specifications.
pub fn fit_model(
    train: &Dataset, spec: ModelSpec, lower_bounds: &[f64], opts: &FitOptions,
) -> CostModelResult<FitResult> {
    if spec.is_constrained() {
        fit_constrained(train, spec, lower_bounds, opts)
    } else {
        fit_ols(train, spec, opts)
    }
}

pub mod prelude {
    pub use super::fit_model;
    pub use super::results::{Convergence, Diagnostic, FitResult};
}
