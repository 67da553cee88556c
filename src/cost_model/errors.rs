//! Errors for cost-model estimation (input validation, degenerate splits,
//! configuration checks, validation failures and optimizer failures).
//!
//! ## Conventions
//! - **Indices are 0-based** and always point to the first offending row or
//!   entry.
//! - Measured times and message sizes must be **strictly positive and
//!   finite**; regressors only need to be finite.
//! - Non-fatal numerical conditions (ill-conditioning, solver
//!   non-convergence) are *not* errors; they are recorded as
//!   [`Diagnostic`](crate::cost_model::fit::Diagnostic) values on the fit.
//! - Optimizer/backend errors are wrapped in [`CostModelError::Optimization`].
use crate::optimization::errors::OptError;

/// Crate-wide result alias for cost-model operations.
pub type CostModelResult<T> = Result<T, CostModelError>;

/// Unified error type for cost-model estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum CostModelError {
    // ---- Input/data validation ----
    /// A numeric field is NaN/±inf.
    NonFiniteValue { index: usize, field: &'static str, value: f64 },

    /// A field that must be strictly positive is ≤ 0.
    NonPositiveValue { index: usize, field: &'static str, value: f64 },

    /// Process count must be at least 1.
    InvalidProcessCount { index: usize, value: u32 },

    /// Parallel columns handed to `Dataset::from_columns` differ in length.
    ColumnLengthMismatch { field: &'static str, expected: usize, found: usize },

    // ---- Degenerate datasets ----
    /// The dataset contains no observations.
    EmptyDataset,

    /// A fit was requested on a training subset with no rows.
    EmptyTrainingSet,

    // ---- Validation ----
    /// The evaluation subset is empty; metrics are not computable.
    EmptyEvaluationSet,

    /// Relative tolerance must be finite and > 0.
    InvalidTolerance { value: f64 },

    // ---- Configuration ----
    /// Held-out fraction must be finite and lie in [0, 1).
    InvalidTestFraction { value: f64 },

    /// One lower bound is required per active regressor.
    LowerBoundsLengthMismatch { expected: usize, found: usize },

    /// Lower bounds must be finite.
    InvalidLowerBound { index: usize, value: f64 },

    /// Condition-number threshold must be finite and > 1.
    InvalidConditionThreshold { value: f64 },

    /// Singular-value cutoff must be finite and in [0, 1).
    InvalidRcond { value: f64 },

    /// Unrecognized model specification name.
    UnknownModelSpec { name: String },

    /// Synthetic design parameters are unusable.
    InvalidDesign { reason: &'static str },

    // ---- Backend ----
    /// Failure raised by the iterative optimizer.
    Optimization(OptError),

    /// Report serialization failed.
    Serialization(String),
}

impl std::error::Error for CostModelError {}

impl std::fmt::Display for CostModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            CostModelError::NonFiniteValue { index, field, value } => {
                write!(f, "Non-finite {field} at row {index}: {value}")
            }
            CostModelError::NonPositiveValue { index, field, value } => {
                write!(f, "Non-positive {field} at row {index}: {value} (must be > 0)")
            }
            CostModelError::InvalidProcessCount { index, value } => {
                write!(f, "Invalid process count at row {index}: {value} (must be >= 1)")
            }
            CostModelError::ColumnLengthMismatch { field, expected, found } => {
                write!(f, "Column '{field}' has {found} entries, expected {expected}")
            }

            // ---- Degenerate datasets ----
            CostModelError::EmptyDataset => write!(f, "Dataset is empty"),
            CostModelError::EmptyTrainingSet => write!(f, "Training set is empty; nothing to fit"),

            // ---- Validation ----
            CostModelError::EmptyEvaluationSet => {
                write!(f, "Evaluation set is empty; validation metrics are not computable")
            }
            CostModelError::InvalidTolerance { value } => {
                write!(f, "Invalid relative tolerance: {value} (must be finite and > 0)")
            }

            // ---- Configuration ----
            CostModelError::InvalidTestFraction { value } => {
                write!(f, "Invalid test fraction: {value} (must be finite and in [0, 1))")
            }
            CostModelError::LowerBoundsLengthMismatch { expected, found } => {
                write!(f, "Lower bounds length mismatch: expected {expected}, found {found}")
            }
            CostModelError::InvalidLowerBound { index, value } => {
                write!(f, "Invalid lower bound at index {index}: {value} (must be finite)")
            }
            CostModelError::InvalidConditionThreshold { value } => {
                write!(f, "Invalid condition-number threshold: {value} (must be finite and > 1)")
            }
            CostModelError::InvalidRcond { value } => {
                write!(f, "Invalid singular-value cutoff: {value} (must be finite and in [0, 1))")
            }
            CostModelError::InvalidDesign { reason } => {
                write!(f, "Invalid synthetic design: {reason}")
            }
            CostModelError::UnknownModelSpec { name } => write!(
                f,
                "Unknown model specification '{name}': valid options are case insensitive \
                 'Reduced', 'FullUnconstrained' or 'FullConstrained'"
            ),

            // ---- Backend ----
            CostModelError::Optimization(err) => write!(f, "Optimization failed: {err}"),
            CostModelError::Serialization(msg) => write!(f, "Report serialization failed: {msg}"),
        }
    }
}

impl From<OptError> for CostModelError {
    fn from(err: OptError) -> Self {
        CostModelError::Optimization(err)
    }
}

impl From<serde_json::Error> for CostModelError {
    fn from(err: serde_json::Error) -> Self {
        CostModelError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` for row-indexed input errors.
    // - Wrapping of optimizer errors via `From<OptError>`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Input errors name the field, row and value.
    //
    // Given
    // -----
    // - `NonPositiveValue { index: 7, field: "T", value: -0.5 }`.
    //
    // Expect
    // ------
    // - The message mentions "T", "7" and "-0.5".
    fn non_positive_value_display_names_field_row_and_value() {
        // Arrange
        let err = CostModelError::NonPositiveValue { index: 7, field: "T", value: -0.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("T") && msg.contains('7') && msg.contains("-0.5"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Optimizer failures keep their original payload.
    //
    // Given
    // -----
    // - `OptError::MissingThetaHat` converted via `From`.
    //
    // Expect
    // ------
    // - `CostModelError::Optimization` wrapping the same variant.
    fn opt_error_is_wrapped() {
        // Act
        let err: CostModelError = OptError::MissingThetaHat.into();

        // Assert
        assert_eq!(err, CostModelError::Optimization(OptError::MissingThetaHat));
    }
}
