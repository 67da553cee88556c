//! collective_cost_model — communication-cost estimation for Allreduce.
//!
//! Purpose
//! -------
//! Fit the linear cost model `T ≈ α·X1 + β·X2 + γ·X3` of an Allreduce
//! collective to measured timings, validate it on held-out rows and report
//! the physical parameters. The crate performs no I/O: callers hand in
//! already-parsed rows and receive typed results.
//!
//! Key behaviors
//! -------------
//! - [`cost_model`]: datasets, model specifications, seeded splitting,
//!   OLS and bound-constrained fitting, validation and reporting.
//! - [`optimization`]: the argmin-backed L-BFGS layer used by the
//!   constrained fit, plus numerically stable softplus transforms.
//!
//! Invariants & assumptions
//! ------------------------
//! - Library code never panics on bad input; it returns
//!   [`CostModelError`](cost_model::CostModelError) or
//!   [`OptError`](optimization::errors::OptError).
//! - Logging goes through the `log` facade; installing a logger is left to
//!   the binary that links this crate.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside the code; pipeline and property tests live under
//!   `tests/`.

pub mod cost_model;
pub mod optimization;

pub mod prelude {
    pub use crate::cost_model::prelude::*;
    pub use crate::optimization::prelude::*;
}
