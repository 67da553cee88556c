//! Checks applied at the minimizer boundary: option values on the way in,
//! gradients and parameter vectors during the run, and the solver's answer
//! on the way out. Each returns the first violation it finds.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{Grad, Theta},
};

/// Reason a supplied tolerance is unusable, if any.
fn tolerance_defect(tol: f64) -> Option<&'static str> {
    if !tol.is_finite() {
        Some("tolerance must be finite")
    } else if tol <= 0.0 {
        Some("tolerance must be strictly positive")
    } else {
        None
    }
}

/// First non-finite entry of `values` as `(index, value)`.
fn first_non_finite<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(usize, f64)> {
    values.into_iter().copied().enumerate().find(|(_, v)| !v.is_finite())
}

/// `None` is allowed; a gradient tolerance that is given must be finite and > 0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_defect(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// Same rule as [`verify_tol_grad`] for the cost-change tolerance.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_defect(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

/// Gradient length must equal `dim` and every entry must be finite.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match first_non_finite(grad) {
        Some((index, value)) => {
            Err(OptError::InvalidGradient { index, value, reason: "non-finite gradient entry" })
        }
        None => Ok(()),
    }
}

/// Parameter vector handed to an objective: length `dim`, all finite.
pub fn validate_theta(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    match first_non_finite(theta) {
        Some((index, value)) => Err(OptError::InvalidThetaInput { index, value }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter, rejecting a missing or non-finite one.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    match first_non_finite(&theta) {
        Some((index, value)) => {
            Err(OptError::InvalidThetaHat { index, value, reason: "solver returned a non-finite point" })
        }
        None => Ok(theta),
    }
}

/// Objective values must be finite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_finite() { Ok(()) } else { Err(OptError::NonFiniteCost { value }) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accept/reject branches of the tolerance checks.
    // - Dimension and finiteness checks for gradients and parameter vectors.
    // - `validate_theta_hat` on missing and non-finite estimates.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerances that are absent or strictly positive are accepted.
    //
    // Given
    // -----
    // - `None` and `Some(1e-8)` for both tolerance kinds.
    //
    // Expect
    // ------
    // - All four checks return `Ok(())`.
    fn tolerances_absent_or_positive_are_accepted() {
        // Act & Assert
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-8)).is_ok());
        assert!(verify_tol_cost(None).is_ok());
        assert!(verify_tol_cost(Some(1e-8)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Zero and non-finite tolerances are rejected with the matching variant.
    //
    // Given
    // -----
    // - `tol_grad = 0.0` and `tol_cost = NaN`.
    //
    // Expect
    // ------
    // - `InvalidTolGrad` and `InvalidTolCost` respectively.
    fn tolerances_zero_or_nan_are_rejected() {
        // Act
        let grad_err = verify_tol_grad(Some(0.0));
        let cost_err = verify_tol_cost(Some(f64::NAN));

        // Assert
        assert!(matches!(grad_err, Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(cost_err, Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Gradients with the wrong length or a NaN entry are rejected.
    //
    // Given
    // -----
    // - A length-2 gradient checked against dim = 3.
    // - A length-3 gradient with NaN at index 1.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` then `InvalidGradient { index: 1, .. }`.
    fn validate_grad_reports_dimension_and_nan() {
        // Arrange
        let short = array![1.0, 2.0];
        let with_nan = array![1.0, f64::NAN, 3.0];

        // Act
        let dim_err = validate_grad(&short, 3);
        let nan_err = validate_grad(&with_nan, 3);

        // Assert
        assert_eq!(dim_err, Err(OptError::GradientDimMismatch { expected: 3, found: 2 }));
        assert!(matches!(nan_err, Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta` guards both length and finiteness.
    //
    // Given
    // -----
    // - θ of length 3 checked against 2, and θ with +∞ at index 0.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` then `InvalidThetaInput { index: 0, .. }`.
    fn validate_theta_reports_length_and_infinite_entries() {
        // Arrange
        let theta = array![0.0, 1.0, 2.0];
        let bad = array![f64::INFINITY, 1.0];

        // Act & Assert
        assert_eq!(
            validate_theta(&theta, 2),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 3 })
        );
        assert!(matches!(validate_theta(&bad, 2), Err(OptError::InvalidThetaInput { index: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Missing or non-finite estimates never leave the optimizer layer.
    //
    // Given
    // -----
    // - `None` and `Some([NaN])`.
    //
    // Expect
    // ------
    // - `MissingThetaHat` and `InvalidThetaHat` respectively.
    fn validate_theta_hat_rejects_missing_and_nan() {
        // Act & Assert
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(matches!(
            validate_theta_hat(Some(array![f64::NAN])),
            Err(OptError::InvalidThetaHat { index: 0, .. })
        ));
    }
}
