//! numerical_stability — numerically robust scalar transforms.
//!
//! Purpose
//! -------
//! Collect the overflow-safe transforms used to map an unconstrained
//! optimizer vector into a bounded parameter space and back.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` maps ℝ → (0, ∞); adding a lower bound gives (lb, ∞).
//! - `safe_softplus_inv` maps a feasible offset back into ℝ for warm starts.
//! - `safe_logistic` is the derivative of softplus and is used for chain-rule
//!   gradient propagation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`. `safe_softplus_inv` additionally requires a
//!   strictly positive argument; callers floor their offsets before mapping.
//!
//! Conventions
//! -----------
//! - Pure functions only. No logging, I/O or global state.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    SOFTPLUS_CUTOFF, safe_logistic, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{safe_logistic, safe_softplus, safe_softplus_inv};
}
