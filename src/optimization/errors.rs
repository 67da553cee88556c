//! optimization::errors — error type for the bounded-fit minimizer.
//!
//! Configuration checks, objective evaluation and the argmin run all report
//! through [`OptError`]. Errors coming back from argmin are folded in by
//! `From<argmin::core::Error>`; an `OptError` raised inside an objective is
//! recovered unchanged, anything else becomes [`OptError::Backend`].
use argmin::core::{ArgminError, Error};

pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // gradient
    /// The objective has no analytic gradient; the adapter falls back to
    /// finite differences.
    GradientNotImplemented,
    GradientDimMismatch { expected: usize, found: usize },
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // options
    InvalidTolGrad { tol: f64, reason: &'static str },
    InvalidTolCost { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// Neither a gradient nor a cost tolerance was set.
    NoTolerancesProvided,
    InvalidLineSearch { name: String, reason: &'static str },
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // objective
    NonFiniteCost { value: f64 },
    ThetaLengthMismatch { expected: usize, actual: usize },
    InvalidThetaInput { index: usize, value: f64 },

    // outcome
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },
    MissingThetaHat,

    /// Failure reported by argmin itself. `kind` names the argmin error
    /// category, or `"other"` when the error is not an `ArgminError`.
    Backend { kind: &'static str, text: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use OptError::*;
        match self {
            GradientNotImplemented => f.write_str("objective provides no analytic gradient"),
            GradientDimMismatch { expected, found } => {
                write!(f, "gradient has {found} entries, parameter vector has {expected}")
            }
            InvalidGradient { index, value, reason } => {
                write!(f, "gradient entry {index} = {value} rejected: {reason}")
            }
            InvalidTolGrad { tol, reason } => write!(f, "tol_grad = {tol} rejected: {reason}"),
            InvalidTolCost { tol, reason } => write!(f, "tol_cost = {tol} rejected: {reason}"),
            InvalidMaxIter { max_iter, reason } => {
                write!(f, "max_iter = {max_iter} rejected: {reason}")
            }
            NoTolerancesProvided => f.write_str("no stopping tolerance configured"),
            InvalidLineSearch { name, reason } => write!(f, "line search '{name}': {reason}"),
            InvalidLBFGSMem { mem, reason } => write!(f, "L-BFGS memory {mem} rejected: {reason}"),
            NonFiniteCost { value } => write!(f, "objective returned {value}"),
            ThetaLengthMismatch { expected, actual } => {
                write!(f, "parameter vector has {actual} entries, expected {expected}")
            }
            InvalidThetaInput { index, value } => {
                write!(f, "parameter entry {index} = {value} is not finite")
            }
            InvalidThetaHat { index, value, reason } => {
                write!(f, "solution entry {index} = {value} rejected: {reason}")
            }
            MissingThetaHat => f.write_str("solver finished without a best parameter"),
            Backend { kind, text } => write!(f, "argmin {kind} error: {text}"),
        }
    }
}

fn argmin_kind(err: &ArgminError) -> &'static str {
    match err {
        ArgminError::InvalidParameter { .. } => "invalid-parameter",
        ArgminError::NotImplemented { .. } => "not-implemented",
        ArgminError::NotInitialized { .. } => "not-initialized",
        ArgminError::ConditionViolated { .. } => "condition-violated",
        ArgminError::CheckpointNotFound { .. } => "checkpoint-not-found",
        ArgminError::PotentialBug { .. } => "potential-bug",
        ArgminError::ImpossibleError { .. } => "impossible",
        _ => "unclassified",
    }
}

impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<OptError>() {
            Ok(inner) => return inner,
            Err(err) => err,
        };
        let kind = err.downcast_ref::<ArgminError>().map_or("other", argmin_kind);
        OptError::Backend { kind, text: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payloads appearing in `Display` output.
    // - Conversion from `argmin::core::Error`, both for objective errors and
    //   for argmin's own error kinds.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerance errors name the rejected value.
    //
    // Given
    // -----
    // - `InvalidTolGrad` with tol = -1.5.
    //
    // Expect
    // ------
    // - The message contains "-1.5".
    fn invalid_tol_grad_names_value() {
        // Arrange
        let err = OptError::InvalidTolGrad { tol: -1.5, reason: "must be positive" };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("-1.5"), "got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` raised inside an objective comes back out of argmin's
    // boxed error unchanged.
    //
    // Given
    // -----
    // - `NonFiniteCost` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - The same `OptError` after conversion.
    fn objective_error_survives_argmin_box() {
        // Arrange
        let original = OptError::NonFiniteCost { value: f64::INFINITY };
        let boxed: Error = original.clone().into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // argmin's own errors keep their category.
    //
    // Given
    // -----
    // - `ArgminError::ConditionViolated` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `Backend` with kind "condition-violated".
    fn argmin_error_keeps_kind() {
        // Arrange
        let boxed: Error =
            ArgminError::ConditionViolated { text: "curvature".to_string() }.into();

        // Act
        let err = OptError::from(boxed);

        // Assert
        assert!(matches!(err, OptError::Backend { kind: "condition-violated", .. }), "{err:?}");
    }
}
