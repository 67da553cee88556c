//! Model specifications, regressors and Allreduce regressor layouts.
//!
//! Purpose
//! -------
//! Name the three linear re-specifications of the cost model
//! `T ≈ α·X1 + β·X2 + γ·X3`, the regressors each one activates and how raw
//! coefficients map back to physical parameters.
//!
//! Key behaviors
//! -------------
//! - [`Regressor`] identifies one of `X1`, `X2`, `X3`.
//! - [`ModelSpec`] selects the active regressors, the fitting algorithm
//!   (OLS or bounded least squares) and the default validation tolerance.
//! - [`AllreduceAlgorithm`] derives `(X1, X2, X3)` from `(P, m)` for the
//!   linear, Rabenseifner and ring Allreduce cost layouts.
//!
//! Invariants & assumptions
//! ------------------------
//! - For every layout `X2 = 2·X3` exactly. The reduced model exists because
//!   this makes `β` and `γ` unidentifiable; only `K = 2β + γ` is.
//!
//! Conventions
//! -----------
//! - Coefficient order always follows [`ModelSpec::regressors`].
use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::cost_model::errors::CostModelError;

/// One of the three cost-model regressors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Regressor {
    /// Latency regressor (multiplies α).
    X1,
    /// Bandwidth regressor (multiplies β).
    X2,
    /// Computation regressor (multiplies γ).
    X3,
}

impl Regressor {
    pub fn name(self) -> &'static str {
        match self {
            Regressor::X1 => "X1",
            Regressor::X2 => "X2",
            Regressor::X3 => "X3",
        }
    }
}

/// Linear re-specification of the Allreduce cost model.
///
/// - `Reduced`: `{X1, X3}` → `(α, K)` with `K = 2β + γ`; fitted by OLS.
/// - `FullUnconstrained`: `{X1, X2, X3}` → `(α, β, γ)`; fitted by OLS and
///   expected to be flagged as ill-conditioned.
/// - `FullConstrained`: `{X1, X2, X3}` → `(α, β, γ)`; fitted by bounded least
///   squares with `c ≥ lower_bounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModelSpec {
    Reduced,
    FullUnconstrained,
    FullConstrained,
}

const REDUCED_REGRESSORS: [Regressor; 2] = [Regressor::X1, Regressor::X3];
const FULL_REGRESSORS: [Regressor; 3] = [Regressor::X1, Regressor::X2, Regressor::X3];

impl ModelSpec {
    /// All specifications in reporting order.
    pub const ALL: [ModelSpec; 3] =
        [ModelSpec::Reduced, ModelSpec::FullUnconstrained, ModelSpec::FullConstrained];

    /// Active regressors, in coefficient order.
    pub fn regressors(self) -> &'static [Regressor] {
        match self {
            ModelSpec::Reduced => &REDUCED_REGRESSORS,
            ModelSpec::FullUnconstrained | ModelSpec::FullConstrained => &FULL_REGRESSORS,
        }
    }

    pub fn n_coefficients(self) -> usize {
        self.regressors().len()
    }

    /// Physical names of the coefficients, in coefficient order.
    pub fn coefficient_names(self) -> &'static [&'static str] {
        match self {
            ModelSpec::Reduced => &["alpha", "K"],
            ModelSpec::FullUnconstrained | ModelSpec::FullConstrained => {
                &["alpha", "beta", "gamma"]
            }
        }
    }

    /// Whether the fit enforces lower bounds on the coefficients.
    pub fn is_constrained(self) -> bool {
        matches!(self, ModelSpec::FullConstrained)
    }

    /// Default relative tolerance used by the validator.
    ///
    /// The two-parameter model is well conditioned and held to 1%; the
    /// three-parameter models are held to 5%.
    pub fn default_tolerance(self) -> f64 {
        match self {
            ModelSpec::Reduced => 0.01,
            ModelSpec::FullUnconstrained | ModelSpec::FullConstrained => 0.05,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelSpec::Reduced => "Reduced",
            ModelSpec::FullUnconstrained => "FullUnconstrained",
            ModelSpec::FullConstrained => "FullConstrained",
        }
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelSpec {
    type Err = CostModelError;

    /// Case-insensitive parse of `"reduced"`, `"fullunconstrained"` or
    /// `"fullconstrained"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reduced" => Ok(ModelSpec::Reduced),
            "fullunconstrained" => Ok(ModelSpec::FullUnconstrained),
            "fullconstrained" => Ok(ModelSpec::FullConstrained),
            _ => Err(CostModelError::UnknownModelSpec { name: s.to_string() }),
        }
    }
}

/// Allreduce algorithm whose cost layout generates the regressors.
///
/// | algorithm     | X1          | X2             | X3           |
/// |---------------|-------------|----------------|--------------|
/// | `Linear`      | `2(P−1)`    | `2m(P−1)`      | `m(P−1)`     |
/// | `Rabenseifner`| `2⌊log2 P⌋` | `2m(P−1)/P`    | `m(P−1)/P`   |
/// | `Ring`        | `2(P−1)`    | `2m(P−1)/P`    | `m(P−1)/P`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AllreduceAlgorithm {
    Linear,
    Rabenseifner,
    Ring,
}

impl AllreduceAlgorithm {
    /// `(X1, X2, X3)` for process count `p` and message size `m`.
    pub fn regressors(self, p: u32, m: f64) -> [f64; 3] {
        let pf = f64::from(p);
        let steps = pf - 1.0;
        match self {
            AllreduceAlgorithm::Linear => [2.0 * steps, 2.0 * m * steps, m * steps],
            AllreduceAlgorithm::Rabenseifner => {
                let share = m * steps / pf;
                [2.0 * f64::from(floor_log2(p)), 2.0 * share, share]
            }
            AllreduceAlgorithm::Ring => {
                let share = m * steps / pf;
                [2.0 * steps, 2.0 * share, share]
            }
        }
    }
}

/// Number of halvings until `p` reaches 1; `0` for `p ≤ 1`.
fn floor_log2(p: u32) -> u32 {
    if p <= 1 { 0 } else { u32::BITS - 1 - p.leading_zeros() }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Active regressors and coefficient names per specification.
    // - Regressor layouts for all three algorithms, including non-power-of-two
    //   process counts for Rabenseifner.
    // - `ModelSpec` parsing.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The reduced model drops X2; the full models keep all three regressors.
    //
    // Given
    // -----
    // - Each `ModelSpec` variant.
    //
    // Expect
    // ------
    // - Regressor lists and coefficient names line up one-to-one.
    fn regressors_and_names_line_up() {
        // Assert
        assert_eq!(ModelSpec::Reduced.regressors(), &[Regressor::X1, Regressor::X3]);
        assert_eq!(ModelSpec::Reduced.coefficient_names(), &["alpha", "K"]);
        for spec in ModelSpec::ALL {
            assert_eq!(spec.regressors().len(), spec.coefficient_names().len());
        }
        assert!(ModelSpec::FullConstrained.is_constrained());
        assert!(!ModelSpec::FullUnconstrained.is_constrained());
    }

    #[test]
    // Purpose
    // -------
    // Rabenseifner uses the integer floor of log2 P for the latency term.
    //
    // Given
    // -----
    // - P = 8 and P = 12 with m = 96.
    //
    // Expect
    // ------
    // - X1 = 6 for both; X3 = m(P−1)/P and X2 = 2·X3.
    fn rabenseifner_layout_uses_floor_log2() {
        // Act
        let a = AllreduceAlgorithm::Rabenseifner.regressors(8, 96.0);
        let b = AllreduceAlgorithm::Rabenseifner.regressors(12, 96.0);

        // Assert
        assert_eq!(a, [6.0, 168.0, 84.0]);
        assert_eq!(b[0], 6.0);
        assert_eq!(b[1], 2.0 * b[2]);
        assert_eq!(b[2], 88.0);
    }

    #[test]
    // Purpose
    // -------
    // Ring keeps the linear latency term with the bandwidth-optimal share.
    //
    // Given
    // -----
    // - P = 4, m = 100.
    //
    // Expect
    // ------
    // - (6, 150, 75).
    fn ring_layout_matches_closed_form() {
        // Act & Assert
        assert_eq!(AllreduceAlgorithm::Ring.regressors(4, 100.0), [6.0, 150.0, 75.0]);
    }

    #[test]
    // Purpose
    // -------
    // Specification names parse case-insensitively.
    //
    // Given
    // -----
    // - "REDUCED", "fullConstrained" and "ridge".
    //
    // Expect
    // ------
    // - Two successful parses and `UnknownModelSpec`.
    fn model_spec_parses_case_insensitively() {
        // Act & Assert
        assert_eq!("REDUCED".parse::<ModelSpec>(), Ok(ModelSpec::Reduced));
        assert_eq!("fullConstrained".parse::<ModelSpec>(), Ok(ModelSpec::FullConstrained));
        assert!(matches!(
            "ridge".parse::<ModelSpec>(),
            Err(CostModelError::UnknownModelSpec { .. })
        ));
    }
}
