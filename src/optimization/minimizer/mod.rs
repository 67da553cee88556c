//! minimizer — argmin-powered L-BFGS minimizer for smooth objectives.
//!
//! Purpose
//! -------
//! Provide a small, Argmin-backed layer for **minimizing** a smooth scalar
//! objective `c(θ)` over an unconstrained vector. Callers implement
//! [`Objective`] and call [`minimize`].
//!
//! Key behaviors
//! -------------
//! - Bridge an [`Objective`] into Argmin via [`adapter::ArgMinAdapter`],
//!   falling back to finite differences when no analytic gradient exists.
//! - Select the L-BFGS line search from [`MinimizerOptions`] in [`builders`].
//! - Execute through [`run::run_lbfgs`] and normalize into [`OptimOutcome`],
//!   which distinguishes solver convergence from hitting the iteration cap.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives report invalid inputs as [`OptError`](crate::optimization::errors::OptError)
//!   values, never panics.
//! - [`Tolerances`] and [`MinimizerOptions`] are validated on construction.
//!
//! Conventions
//! -----------
//! - Bounded problems reparameterize inside their [`Objective`]
//!   implementation; this layer only ever sees `θ ∈ ℝᵏ`.
//! - No sign flips: `OptimOutcome::value` is the best cost.
//!
//! Downstream usage
//! ----------------
//! - `cost_model::fit::constrained` implements [`Objective`] for the bounded
//!   least-squares problem behind the constrained full model.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover adapter forwarding and finite-difference fallback,
//!   solver construction, option validation and end-to-end minimization of a
//!   quadratic with both line searches.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{LineSearcher, MinimizerOptions, Objective, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{LineSearcher, MinimizerOptions, Objective, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
