//! Numerical stability utilities.
//!
//! Safe implementations of the scalar transforms used to keep bounded
//! parameters strictly inside their feasible region while the optimizer works
//! over all of ℝ. Explicit cutoffs (`|x| > 20.0`) keep `f64` arithmetic in a
//! well-conditioned regime.
//!
//! # Provided items
//! - [`SOFTPLUS_CUTOFF`]: threshold beyond which softplus is the identity.
//! - [`safe_softplus(x)`]: stable `ln(1 + exp(x))`, mapping ℝ → (0, ∞).
//! - [`safe_softplus_inv(x)`]: inverse of softplus on (0, ∞).
//! - [`safe_logistic(x)`]: stable `1 / (1 + exp(-x))`, the derivative of
//!   softplus.

/// Above this input softplus and its inverse are the identity to `f64`
/// precision.
pub const SOFTPLUS_CUTOFF: f64 = 20.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > SOFTPLUS_CUTOFF`, returns `x`.
/// - Otherwise evaluates `ln1p(exp(x))`, which stays accurate for very
///   negative `x` where the result is approximately `exp(x)`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: returns `t = ln(exp(x) - 1)`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
///
/// # Returns
/// - `t` such that `safe_softplus(t) = x`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluated branch-wise so `exp` is only ever called on a non-positive
/// argument.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with naive formulas on a safe grid.
    // - Inverse consistency of softplus.
    // - Tail behavior of softplus and logistic.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Guarded transforms match the naive formulas where those are safe.
    //
    // Given
    // -----
    // - x in {-5, -1, 0, 1, 5}.
    //
    // Expect
    // ------
    // - Agreement to 1e-12.
    fn transforms_match_naive_formulas_on_safe_grid() {
        for x in [-5.0_f64, -1.0, 0.0, 1.0, 5.0] {
            // Act
            let sp = safe_softplus(x);
            let lg = safe_logistic(x);

            // Assert
            assert!((sp - (1.0 + x.exp()).ln()).abs() < 1e-12, "softplus at {x}");
            assert!((lg - 1.0 / (1.0 + (-x).exp())).abs() < 1e-12, "logistic at {x}");
        }
    }

    #[test]
    // Purpose
    // -------
    // `safe_softplus_inv` inverts `safe_softplus` across both branches.
    //
    // Given
    // -----
    // - y in {1e-8, 0.3, 2.0, 25.0}.
    //
    // Expect
    // ------
    // - softplus(softplus_inv(y)) == y to a relative 1e-10.
    fn softplus_inverse_round_trips() {
        for y in [1e-8_f64, 0.3, 2.0, 25.0] {
            // Act
            let back = safe_softplus(safe_softplus_inv(y));

            // Assert
            assert!(((back - y) / y).abs() < 1e-10, "y = {y}, back = {back}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Tails stay finite and positive where naive forms would overflow.
    //
    // Given
    // -----
    // - x = ±800.
    //
    // Expect
    // ------
    // - softplus(800) == 800, softplus(-800) >= 0 and finite.
    // - logistic(800) == 1, logistic(-800) == 0 without NaN.
    fn tails_are_finite() {
        // Assert
        assert_eq!(safe_softplus(800.0), 800.0);
        assert!(safe_softplus(-800.0) >= 0.0 && safe_softplus(-800.0).is_finite());
        assert_eq!(safe_logistic(800.0), 1.0);
        assert_eq!(safe_logistic(-800.0), 0.0);
    }
}
