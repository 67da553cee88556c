//! cost_model::core — data, model specifications, splitting and configuration.
//!
//! Purpose
//! -------
//! Hold the value types every analysis step reads: validated timing rows,
//! the three model specifications, the seeded split, physical parameters
//! and run configuration.
//!
//! Key behaviors
//! -------------
//! - `data`: [`Observation`] and [`Dataset`] with one-time validation.
//! - `model`: [`ModelSpec`], [`Regressor`] and [`AllreduceAlgorithm`] layouts.
//! - `split`: reproducible Fisher–Yates partitioning.
//! - `params`: [`CostParameters`], [`CombinedEstimate`] and the explicit
//!   [`SeparationAssumption`].
//! - `options`: [`FitOptions`] and [`RunConfig`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything here is immutable once constructed and free of hidden state.
//!
//! Downstream usage
//! ----------------
//! - `fit`, `evaluation` and `analysis` consume these types; none of them
//!   mutates a [`Dataset`].

pub mod data;
pub mod model;
pub mod options;
pub mod params;
pub mod split;

pub use self::data::{Dataset, Observation};
pub use self::model::{AllreduceAlgorithm, ModelSpec, Regressor};
pub use self::options::{FitOptions, ModelTolerances, RunConfig};
pub use self::params::{CombinedEstimate, CostEstimate, CostParameters, SeparationAssumption};
pub use self::split::{Split, split};
