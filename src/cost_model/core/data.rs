//! Timing observations and the validated dataset that holds them.
//!
//! Purpose
//! -------
//! Provide the immutable record type for one Allreduce timing row and an
//! ordered, validated collection of rows that the splitter, fitters and
//! validator read from.
//!
//! Key behaviors
//! -------------
//! - [`Observation`] stores `(P, m, X1, X2, X3, T)`; [`Observation::from_layout`]
//!   derives the regressors from `(P, m)` for a given algorithm.
//! - [`Dataset::new`] and [`Dataset::from_columns`] validate every row once.
//! - [`Dataset::design_matrix`] and [`Dataset::targets`] expose the active
//!   columns as `ndarray` containers for the fitters.
//!
//! Invariants & assumptions
//! ------------------------
//! - `P ≥ 1`; `m` and `T` are finite and strictly positive; `X1`, `X2`, `X3`
//!   are finite.
//! - Row order is preserved; index-based splitting depends on it.
//! - Duplicate `(P, m)` pairs are expected (replicated trials).
//! - An empty dataset is representable; the splitter rejects it.
//!
//! Conventions
//! -----------
//! - Indices are 0-based. Validation errors point to the first offending row
//!   and name the field as it appears in the timing table (`P`, `m`, `X1`,
//!   `X2`, `X3`, `T`).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, each rejection branch, column-length
//!   checks and design-matrix column selection.
use crate::cost_model::{
    core::model::{AllreduceAlgorithm, Regressor},
    errors::{CostModelError, CostModelResult},
};
use ndarray::{Array1, Array2};
use serde::Serialize;

/// One timing row: process count, message size, regressors and measured time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Process count.
    pub p: u32,
    /// Message size in elements.
    pub m: f64,
    /// Latency regressor.
    pub x1: f64,
    /// Bandwidth regressor.
    pub x2: f64,
    /// Computation regressor.
    pub x3: f64,
    /// Measured wall-clock time in seconds.
    pub t: f64,
}

impl Observation {
    /// Construct a single validated observation.
    ///
    /// Errors
    /// ------
    /// - Same as [`Dataset::new`], reported with `index = 0`.
    pub fn new(p: u32, m: f64, x1: f64, x2: f64, x3: f64, t: f64) -> CostModelResult<Self> {
        let obs = Self { p, m, x1, x2, x3, t };
        obs.validate(0)?;
        Ok(obs)
    }

    /// Build an observation whose regressors follow `algorithm`'s cost layout.
    ///
    /// Parameters
    /// ----------
    /// - `algorithm`: [`AllreduceAlgorithm`]
    ///   Layout used to derive `(X1, X2, X3)` from `(P, m)`.
    /// - `p`, `m`, `t`: process count, message size and measured time.
    ///
    /// Errors
    /// ------
    /// - Same as [`Observation::new`].
    pub fn from_layout(algorithm: AllreduceAlgorithm, p: u32, m: f64, t: f64) -> CostModelResult<Self> {
        let [x1, x2, x3] = algorithm.regressors(p, m);
        Self::new(p, m, x1, x2, x3, t)
    }

    /// Value of a single regressor on this row.
    pub fn regressor(&self, regressor: Regressor) -> f64 {
        match regressor {
            Regressor::X1 => self.x1,
            Regressor::X2 => self.x2,
            Regressor::X3 => self.x3,
        }
    }

    fn validate(&self, index: usize) -> CostModelResult<()> {
        if self.p == 0 {
            return Err(CostModelError::InvalidProcessCount { index, value: self.p });
        }
        check_positive(index, "m", self.m)?;
        for (field, value) in [("X1", self.x1), ("X2", self.x2), ("X3", self.x3)] {
            if !value.is_finite() {
                return Err(CostModelError::NonFiniteValue { index, field, value });
            }
        }
        check_positive(index, "T", self.t)
    }
}

fn check_positive(index: usize, field: &'static str, value: f64) -> CostModelResult<()> {
    if !value.is_finite() {
        return Err(CostModelError::NonFiniteValue { index, field, value });
    }
    if value <= 0.0 {
        return Err(CostModelError::NonPositiveValue { index, field, value });
    }
    Ok(())
}

/// Ordered, validated collection of [`Observation`]s.
///
/// Fields are private; after construction the dataset is read-only. Fitters
/// and the validator receive subsets produced by [`Dataset::subset`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    rows: Vec<Observation>,
}

impl Dataset {
    /// Construct a dataset, validating every row once.
    ///
    /// Parameters
    /// ----------
    /// - `rows`: `Vec<Observation>`
    ///   Timing rows in their original order. May be empty.
    ///
    /// Returns
    /// -------
    /// `CostModelResult<Dataset>`
    ///
    /// Errors
    /// ------
    /// - `InvalidProcessCount { index, value }` when `P == 0`.
    /// - `NonFiniteValue { index, field, value }` for NaN/±∞ in any field.
    /// - `NonPositiveValue { index, field, value }` when `m ≤ 0` or `T ≤ 0`.
    ///
    /// Notes
    /// -----
    /// - Validation stops at the first offending row.
    pub fn new(rows: Vec<Observation>) -> CostModelResult<Self> {
        for (index, obs) in rows.iter().enumerate() {
            obs.validate(index)?;
        }
        Ok(Self { rows })
    }

    /// Construct a dataset from parallel columns as they appear in the timing
    /// table (`P, m, X1, X2, X3, T`).
    ///
    /// Errors
    /// ------
    /// - `ColumnLengthMismatch` if any column's length differs from `p`'s.
    /// - Any row-level error from [`Dataset::new`].
    pub fn from_columns(
        p: &[u32], m: &[f64], x1: &[f64], x2: &[f64], x3: &[f64], t: &[f64],
    ) -> CostModelResult<Self> {
        let expected = p.len();
        for (field, len) in
            [("m", m.len()), ("X1", x1.len()), ("X2", x2.len()), ("X3", x3.len()), ("T", t.len())]
        {
            if len != expected {
                return Err(CostModelError::ColumnLengthMismatch { field, expected, found: len });
            }
        }
        let rows = (0..expected)
            .map(|i| Observation { p: p[i], m: m[i], x1: x1[i], x2: x2[i], x3: x3[i], t: t[i] })
            .collect();
        Self::new(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Copy the rows at `indices`, in the given order, into a new dataset.
    ///
    /// Panics
    /// ------
    /// - If any index is out of bounds. Indices produced by
    ///   [`split`](crate::cost_model::core::split::split) on this dataset are
    ///   always in bounds.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset { rows: indices.iter().map(|&i| self.rows[i]).collect() }
    }

    /// Design matrix with one column per entry of `regressors`, in order.
    ///
    /// No intercept column is added; `X1` carries the latency term.
    pub fn design_matrix(&self, regressors: &[Regressor]) -> Array2<f64> {
        Array2::from_shape_fn((self.rows.len(), regressors.len()), |(i, j)| {
            self.rows[i].regressor(regressors[j])
        })
    }

    /// Measured times `T` as a vector.
    pub fn targets(&self) -> Array1<f64> {
        self.rows.iter().map(|obs| obs.t).collect()
    }
}
