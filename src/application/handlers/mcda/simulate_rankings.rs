//! SimulateRankingsHandler - Monte Carlo robustness of a TOPSIS ranking.
//!
//! Trials are CPU-bound, so the async entry point moves the run onto the
//! blocking pool and keeps the runtime responsive to cancellation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::inputs::prepare;
use crate::config::AnalysisConfig;
use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, Timestamp};
use crate::domain::mcda::{
    Alternative, CancellationToken, CriteriaTypes, CriteriaWeights, McdaError, MonteCarloParams,
    MonteCarloResult, MonteCarloSimulator, WeightingEngine,
};

/// Command to run a Monte Carlo simulation. Unset parameters fall back to
/// the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRankingsCommand {
    pub alternatives: Vec<Alternative>,
    pub criteria_weights: CriteriaWeights,
    #[serde(default)]
    pub criteria_types: CriteriaTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<String>>,
    #[serde(default)]
    pub n_simulations: Option<i64>,
    #[serde(default)]
    pub weight_uncertainty: Option<f64>,
    #[serde(default)]
    pub data_uncertainty: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Result of a Monte Carlo simulation.
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    pub alternatives: Vec<String>,
    pub weight_uncertainty: f64,
    pub data_uncertainty: f64,
    pub seed: u64,
    #[serde(flatten)]
    pub result: MonteCarloResult,
}

/// Handler for Monte Carlo simulations.
#[derive(Debug, Clone)]
pub struct SimulateRankingsHandler {
    config: AnalysisConfig,
}

impl SimulateRankingsHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Runs the simulation on the calling thread.
    pub fn handle(
        &self,
        cmd: SimulateRankingsCommand,
        cancel: &CancellationToken,
    ) -> Result<MonteCarloReport, DomainError> {
        let analysis_id = AnalysisId::new();
        let params = self.params_for(&cmd)?;
        debug!(
            analysis_id = %analysis_id,
            alternatives = cmd.alternatives.len(),
            trials = params.n_simulations,
            "Running Monte Carlo simulation"
        );

        let inputs = prepare(
            &cmd.alternatives,
            cmd.criteria.as_deref(),
            cmd.criteria_weights.names(),
            &cmd.criteria_types,
        )?;
        let matrix = &inputs.matrix;
        let weights = WeightingEngine::weight_vector(matrix.criteria(), &cmd.criteria_weights)?;

        let result = MonteCarloSimulator::run(matrix, &weights, &inputs.directions, &params, cancel)
            .map_err(|e| {
                if e == McdaError::Cancelled {
                    warn!(analysis_id = %analysis_id, "Monte Carlo simulation cancelled");
                }
                DomainError::from(e)
            })?;

        info!(
            analysis_id = %analysis_id,
            trials = result.n_simulations,
            robust_top = %matrix.alternative_ids()[result.robust_ranking[0]],
            "Monte Carlo simulation completed"
        );

        Ok(MonteCarloReport {
            analysis_id,
            computed_at: Timestamp::now(),
            alternatives: matrix.alternative_names().to_vec(),
            weight_uncertainty: params.weight_uncertainty,
            data_uncertainty: params.data_uncertainty,
            seed: params.seed,
            result,
        })
    }

    /// Runs the simulation on tokio's blocking pool.
    pub async fn handle_blocking(
        &self,
        cmd: SimulateRankingsCommand,
        cancel: CancellationToken,
    ) -> Result<MonteCarloReport, DomainError> {
        let handler = self.clone();
        tokio::task::spawn_blocking(move || handler.handle(cmd, &cancel))
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Simulation task failed: {}", e))
            })?
    }

    fn params_for(&self, cmd: &SimulateRankingsCommand) -> Result<MonteCarloParams, McdaError> {
        let n_simulations = cmd
            .n_simulations
            .unwrap_or(self.config.n_simulations as i64);
        let params = MonteCarloParams::new(
            n_simulations,
            cmd.weight_uncertainty.unwrap_or(self.config.weight_uncertainty),
            cmd.data_uncertainty.unwrap_or(self.config.data_uncertainty),
        )?
        .with_seed(cmd.seed.unwrap_or(self.config.seed))
        .with_top_k(self.config.rank_stability_top_k)?
        .with_parallel(self.config.parallel);
        Ok(params)
    }
}
