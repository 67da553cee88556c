//! optimization — bounded-fit minimizer, numerical helpers and error surface.
//!
//! Purpose
//! -------
//! Provide the iterative machinery behind the constrained cost-model fit: an
//! Argmin-backed L-BFGS minimizer, overflow-safe reparameterization
//! transforms and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `minimizer`: implement [`minimizer::Objective`] and call
//!   [`minimizer::minimize`] to obtain an [`minimizer::OptimOutcome`].
//! - `numerical_stability`: softplus/logistic helpers for mapping ℝ into a
//!   half-line above a lower bound.
//! - `errors`: every configuration, numerical and backend failure becomes an
//!   [`errors::OptError`].
//!
//! Conventions
//! -----------
//! - Callers never see raw Argmin errors.
//! - Silent by default. With the `obs_slog` feature and `verbose` set, the
//!   runner logs the starting cost and attaches a slog observer.

pub mod errors;
pub mod minimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
