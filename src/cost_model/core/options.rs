//! Fit and run configuration for cost-model estimation.
//!
//! Purpose
//! -------
//! Collect every recognized option of an analysis run in validated value
//! types that are passed explicitly into each call. Nothing here is global.
//!
//! Key behaviors
//! -------------
//! - [`FitOptions`]: conditioning threshold, SVD cutoff and minimizer
//!   settings shared by both fitters.
//! - [`ModelTolerances`]: relative validation tolerance per model.
//! - [`RunConfig`]: held-out fraction, seed, tolerances, lower bounds for the
//!   constrained fit, separation assumption and fit options.
//!
//! Invariants & assumptions
//! ------------------------
//! - Constructors validate; `Default` values are valid by construction.
//! - Fields are public so callers can use struct-update syntax; entry points
//!   re-run [`RunConfig::validate`] before using a config.
//!
//! Conventions
//! -----------
//! - Defaults: `test_fraction = 0.20`, `seed = 42`, tolerances
//!   `0.01 / 0.05 / 0.05`, `lower_bounds = [0, 0, 0]`,
//!   `separation = KnownGamma(0)`, `condition_threshold = 1e6`,
//!   `rcond = None` (i.e. `max(n, k)·ε`).
use crate::{
    cost_model::{
        core::{model::ModelSpec, params::SeparationAssumption, split::validate_test_fraction},
        errors::{CostModelError, CostModelResult},
        evaluation::validate_relative_tolerance,
        fit::constrained::validate_lower_bounds,
    },
    optimization::minimizer::{MinimizerOptions, Tolerances},
};

/// Condition numbers above this value attach a `NumericalInstability`
/// diagnostic to OLS fits.
pub const DEFAULT_CONDITION_THRESHOLD: f64 = 1e6;

/// Held-out share used when none is given.
pub const DEFAULT_TEST_FRACTION: f64 = 0.20;

/// Permutation seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Options shared by the OLS and bounded least-squares fitters.
///
/// Fields
/// ------
/// - `condition_threshold`: `f64`
///   Threshold on `κ = σ_max/σ_min` of the column-normalized design.
/// - `rcond`: `Option<f64>`
///   Relative cutoff below which singular values are truncated in the
///   pseudo-inverse. `None` uses `max(n, k)·ε`.
/// - `minimizer`: [`MinimizerOptions`]
///   L-BFGS settings for the bounded fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub condition_threshold: f64,
    pub rcond: Option<f64>,
    pub minimizer: MinimizerOptions,
}

impl FitOptions {
    /// Construct validated fit options.
    ///
    /// Errors
    /// ------
    /// - `InvalidConditionThreshold` unless finite and `> 1`.
    /// - `InvalidRcond` unless finite and in `[0, 1)`.
    /// - `Optimization(..)` when the minimizer tolerances or L-BFGS memory
    ///   are invalid.
    pub fn new(
        condition_threshold: f64, rcond: Option<f64>, minimizer: MinimizerOptions,
    ) -> CostModelResult<Self> {
        let opts = Self { condition_threshold, rcond, minimizer };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> CostModelResult<()> {
        let t = self.condition_threshold;
        if !t.is_finite() || t <= 1.0 {
            return Err(CostModelError::InvalidConditionThreshold { value: t });
        }
        if let Some(r) = self.rcond {
            if !r.is_finite() || !(0.0..1.0).contains(&r) {
                return Err(CostModelError::InvalidRcond { value: r });
            }
        }
        let m = &self.minimizer;
        let tols = Tolerances::new(m.tols.tol_grad, m.tols.tol_cost, m.tols.max_iter)?;
        MinimizerOptions::new(tols, m.line_searcher, m.verbose, m.lbfgs_mem)?;
        Ok(())
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
            rcond: None,
            minimizer: MinimizerOptions::default(),
        }
    }
}

/// Relative validation tolerance per model specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTolerances {
    pub reduced: f64,
    pub full_unconstrained: f64,
    pub full_constrained: f64,
}

impl ModelTolerances {
    pub fn get(&self, spec: ModelSpec) -> f64 {
        match spec {
            ModelSpec::Reduced => self.reduced,
            ModelSpec::FullUnconstrained => self.full_unconstrained,
            ModelSpec::FullConstrained => self.full_constrained,
        }
    }

    pub fn validate(&self) -> CostModelResult<()> {
        for spec in ModelSpec::ALL {
            validate_relative_tolerance(self.get(spec))?;
        }
        Ok(())
    }
}

impl Default for ModelTolerances {
    fn default() -> Self {
        Self {
            reduced: ModelSpec::Reduced.default_tolerance(),
            full_unconstrained: ModelSpec::FullUnconstrained.default_tolerance(),
            full_constrained: ModelSpec::FullConstrained.default_tolerance(),
        }
    }
}

/// Configuration of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub test_fraction: f64,
    pub seed: u64,
    pub tolerances: ModelTolerances,
    pub lower_bounds: Vec<f64>,
    pub separation: SeparationAssumption,
    pub fit: FitOptions,
}

impl RunConfig {
    /// Construct a validated run configuration.
    ///
    /// Errors
    /// ------
    /// - `InvalidTestFraction`, `InvalidTolerance`, `LowerBoundsLengthMismatch`,
    ///   `InvalidLowerBound`, `InvalidConditionThreshold` or `InvalidRcond`.
    pub fn new(
        test_fraction: f64, seed: u64, tolerances: ModelTolerances, lower_bounds: Vec<f64>,
        separation: SeparationAssumption, fit: FitOptions,
    ) -> CostModelResult<Self> {
        let config = Self { test_fraction, seed, tolerances, lower_bounds, separation, fit };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CostModelResult<()> {
        validate_test_fraction(self.test_fraction)?;
        self.tolerances.validate()?;
        validate_lower_bounds(&self.lower_bounds, ModelSpec::FullConstrained.n_coefficients())?;
        self.fit.validate()
    }

    /// Relative tolerance applied to `spec`'s validation.
    pub fn tolerance_for(&self, spec: ModelSpec) -> f64 {
        self.tolerances.get(spec)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
            tolerances: ModelTolerances::default(),
            lower_bounds: vec![0.0; ModelSpec::FullConstrained.n_coefficients()],
            separation: SeparationAssumption::default(),
            fit: FitOptions::default(),
        }
    }
}
