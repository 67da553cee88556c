//! cost_model::report — serializable summary of one analysis invocation.
//!
//! [`AnalysisReport`] flattens every [`AnalysisRun`] into plain data
//! ([`ModelReport`]) so it can be written as JSON or printed as text. It
//! does no computation beyond copying fields and naming coefficients.
use crate::cost_model::{
    analysis::AnalysisRun,
    core::{
        model::ModelSpec,
        options::RunConfig,
        params::{CostEstimate, CostParameters, SeparationAssumption},
    },
    errors::CostModelResult,
    evaluation::ValidationOutcome,
    fit::results::{CoefficientStats, Convergence, Diagnostic},
};
use serde::Serialize;
use std::fmt;

/// Per-model section of an [`AnalysisReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub model: &'static str,
    pub regressors: Vec<&'static str>,
    pub coefficient_names: Vec<&'static str>,
    pub coefficients: Vec<f64>,
    pub estimate: CostEstimate,
    pub derived: CostParameters,
    pub combined_factor: f64,
    pub r_squared: Option<f64>,
    pub ssr: f64,
    pub condition_number: f64,
    pub stats: Option<Vec<CoefficientStats>>,
    pub convergence: Convergence,
    pub diagnostics: Vec<Diagnostic>,
    pub n_train: usize,
    pub n_test: usize,
    pub tolerance: f64,
    pub validation: ValidationOutcome,
}

impl From<&AnalysisRun> for ModelReport {
    fn from(run: &AnalysisRun) -> Self {
        let fit = &run.fit;
        Self {
            model: run.spec.name(),
            regressors: fit.regressor_names(),
            coefficient_names: run.spec.coefficient_names().to_vec(),
            coefficients: fit.coefficients.to_vec(),
            estimate: run.estimate,
            derived: run.derived,
            combined_factor: run.estimate.combined_factor(),
            r_squared: fit.r_squared,
            ssr: fit.ssr,
            condition_number: fit.condition_number,
            stats: fit.stats.clone(),
            convergence: fit.convergence.clone(),
            diagnostics: fit.diagnostics.clone(),
            n_train: run.n_train,
            n_test: run.n_test,
            tolerance: run.tolerance,
            validation: run.validation.clone(),
        }
    }
}

/// All model runs of one invocation plus the settings they shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub seed: u64,
    pub test_fraction: f64,
    pub n_observations: usize,
    pub separation: SeparationAssumption,
    pub models: Vec<ModelReport>,
}

impl AnalysisReport {
    pub fn new(config: &RunConfig, n_observations: usize, runs: Vec<AnalysisRun>) -> Self {
        Self {
            seed: config.seed,
            test_fraction: config.test_fraction,
            n_observations,
            separation: config.separation,
            models: runs.iter().map(ModelReport::from).collect(),
        }
    }

    pub fn model(&self, spec: ModelSpec) -> Option<&ModelReport> {
        self.models.iter().find(|m| m.model == spec.name())
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// - `Serialization` if `serde_json` rejects the report.
    pub fn to_json_pretty(&self) -> CostModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn separation_label(assumption: SeparationAssumption) -> String {
    match assumption {
        SeparationAssumption::KnownGamma(g) => format!("assuming gamma = {g:.4e}"),
        SeparationAssumption::KnownBeta(b) => format!("assuming beta = {b:.4e}"),
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(50);
        writeln!(
            f,
            "Allreduce cost model: {} observations, {:.0}% held out, seed {}",
            self.n_observations,
            100.0 * self.test_fraction,
            self.seed
        )?;
        for m in &self.models {
            writeln!(f, "\n{}", "=".repeat(50))?;
            writeln!(f, "{} (trained on {} rows)", m.model, m.n_train)?;
            writeln!(f, "{}", "=".repeat(50))?;
            match m.r_squared {
                Some(r2) => writeln!(f, "R-squared (training): {r2:.4}")?,
                None => writeln!(f, "R-squared (training): undefined")?,
            }
            writeln!(f, "Condition number: {:.3e}", m.condition_number)?;
            writeln!(f, "{rule}")?;
            for (i, (name, c)) in m.coefficient_names.iter().zip(&m.coefficients).enumerate() {
                match m.stats.as_ref().and_then(|s| s.get(i)) {
                    Some(s) => writeln!(
                        f,
                        "{name:<6} {c:>12.4e}  (se {:.3e}, t {:.2}, p {:.3})",
                        s.std_error, s.t_value, s.p_value
                    )?,
                    None => writeln!(f, "{name:<6} {c:>12.4e}")?,
                }
            }
            writeln!(f, "{rule}")?;
            match m.estimate {
                CostEstimate::Combined(_) => writeln!(
                    f,
                    "Derived ({}): beta {:.4e}, gamma {:.4e}",
                    separation_label(self.separation),
                    m.derived.beta,
                    m.derived.gamma
                )?,
                CostEstimate::Full(_) => {
                    writeln!(f, "Combined factor K = 2*beta + gamma: {:.4e}", m.combined_factor)?
                }
            }
            if let Convergence::DidNotConverge { message } = &m.convergence {
                writeln!(f, "Solver did not converge: {message}")?;
            }
            for d in &m.diagnostics {
                writeln!(f, "Warning: {d}")?;
            }
            match &m.validation {
                ValidationOutcome::Completed(v) => {
                    writeln!(f, "Mean actual time: {:.4e} s", v.mean_actual)?;
                    writeln!(f, "Max absolute error: {:.4e} s", v.max_abs_error)?;
                    writeln!(
                        f,
                        "Validation {} (tolerance {:.2}% of mean actual time)",
                        if v.passed { "passed" } else { "failed" },
                        100.0 * v.tolerance
                    )?;
                }
                ValidationOutcome::Skipped { reason } => {
                    writeln!(f, "Validation skipped: {reason}")?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_model::{
        analysis::run_all_models,
        core::{data::Dataset, data::Observation, model::AllreduceAlgorithm},
    };

    fn small_dataset() -> Dataset {
        let rows = (0..20)
            .map(|i| {
                let p = [4_u32, 8][i % 2];
                let m = 10.0 + 50.0 * i as f64;
                let params = CostParameters::new(1e-6, 3e-9, 1e-9);
                let t = params.predict_time(AllreduceAlgorithm::Linear, p, m);
                Observation::from_layout(AllreduceAlgorithm::Linear, p, m, t).expect("valid row")
            })
            .collect();
        Dataset::new(rows).expect("valid rows")
    }

    #[test]
    // Purpose
    // -------
    // The report carries one section per model and serializes to JSON with
    // the expected keys.
    //
    // Given
    // -----
    // - 20 noiseless rows and the default configuration.
    //
    // Expect
    // ------
    // - Three model sections; JSON mentions every model name and the
    //   validation status tag; the text summary names each model.
    fn report_serializes_every_model() {
        // Arrange
        let report = run_all_models(&small_dataset(), &RunConfig::default()).expect("run");

        // Act
        let json = report.to_json_pretty().expect("serializable");
        let text = report.to_string();

        // Assert
        assert_eq!(report.models.len(), 3);
        for spec in ModelSpec::ALL {
            assert!(json.contains(spec.name()), "missing {spec} in JSON");
            assert!(text.contains(spec.name()), "missing {spec} in text");
            assert!(report.model(spec).is_some());
        }
        assert!(json.contains("\"status\""));
        assert_eq!(report.n_observations, 20);
    }
}
