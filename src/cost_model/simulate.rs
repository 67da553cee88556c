//! cost_model::simulate — seeded synthetic timing rows.
//!
//! Purpose
//! -------
//! Produce a [`Dataset`] from known cost parameters so the estimators can be
//! exercised without running the collective itself.
//!
//! Key behaviors
//! -------------
//! - Each row draws `P` uniformly from `process_counts` and an integer `m`
//!   uniformly from `[m_min, m_max]`.
//! - Regressors follow the chosen [`AllreduceAlgorithm`] layout; the time is
//!   `α·X1 + β·X2 + γ·X3 + ε` with `ε ~ N(0, noise_sigma²)`.
//! - The same design and seed always produce the same rows.
//!
//! Invariants & assumptions
//! ------------------------
//! - Generated rows go through [`Dataset::new`]; a draw whose noisy time is
//!   not positive is reported as `NonPositiveValue` rather than clipped.
use crate::cost_model::{
    core::{data::Dataset, data::Observation, model::AllreduceAlgorithm, params::CostParameters},
    errors::{CostModelError, CostModelResult},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Recipe for a synthetic dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDesign {
    pub n_rows: usize,
    pub process_counts: Vec<u32>,
    pub m_min: u64,
    pub m_max: u64,
    pub algorithm: AllreduceAlgorithm,
    pub params: CostParameters,
    pub noise_sigma: f64,
    pub seed: u64,
}

impl SyntheticDesign {
    /// 100 Linear-layout rows, `P ∈ {4, 8, 16}`, `m ∈ [1, 10000]`,
    /// `(α, β, γ) = (1e-6, 3e-9, 1e-9)` and `σ = 1e-8`.
    pub fn linear_reference(seed: u64) -> Self {
        Self {
            n_rows: 100,
            process_counts: vec![4, 8, 16],
            m_min: 1,
            m_max: 10_000,
            algorithm: AllreduceAlgorithm::Linear,
            params: CostParameters::new(1e-6, 3e-9, 1e-9),
            noise_sigma: 1e-8,
            seed,
        }
    }

    fn validate(&self) -> CostModelResult<()> {
        let reason = if self.n_rows == 0 {
            Some("at least one row is required")
        } else if self.process_counts.is_empty() {
            Some("process_counts must not be empty")
        } else if self.process_counts.contains(&0) {
            Some("process counts must be >= 1")
        } else if self.m_min == 0 || self.m_min > self.m_max {
            Some("message sizes need 1 <= m_min <= m_max")
        } else if !self.noise_sigma.is_finite() || self.noise_sigma < 0.0 {
            Some("noise_sigma must be finite and >= 0")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(CostModelError::InvalidDesign { reason }),
            None => Ok(()),
        }
    }

    /// Draw the rows.
    ///
    /// Errors
    /// ------
    /// - `InvalidDesign` for an unusable recipe.
    /// - `NonPositiveValue` / `NonFiniteValue` when a noisy time or a
    ///   regressor is invalid (the offending row index is reported).
    pub fn generate(&self) -> CostModelResult<Dataset> {
        self.validate()?;
        let noise = Normal::new(0.0, self.noise_sigma)
            .map_err(|_| CostModelError::InvalidDesign { reason: "noise_sigma rejected" })?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = Vec::with_capacity(self.n_rows);
        for _ in 0..self.n_rows {
            let p = self.process_counts[rng.random_range(0..self.process_counts.len())];
            let m = rng.random_range(self.m_min..=self.m_max) as f64;
            let [x1, x2, x3] = self.algorithm.regressors(p, m);
            let t = self.params.predict_time(self.algorithm, p, m) + noise.sample(&mut rng);
            rows.push(Observation { p, m, x1, x2, x3, t });
        }
        Dataset::new(rows)
    }
}
