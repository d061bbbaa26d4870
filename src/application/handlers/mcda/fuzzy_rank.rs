//! FuzzyRankHandler - TOPSIS ranking with triangular fuzzy weights.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::inputs::prepare;
use crate::domain::foundation::{AnalysisId, DomainError, Timestamp};
use crate::domain::mcda::{Alternative, CriteriaTypes, FuzzyTopsis, FuzzyTopsisResult, FuzzyWeights};

/// Command to rank alternatives with fuzzy weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyRankCommand {
    pub alternatives: Vec<Alternative>,
    pub fuzzy_weights: FuzzyWeights,
    #[serde(default)]
    pub criteria_types: CriteriaTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<String>>,
}

/// Result of a fuzzy TOPSIS ranking.
#[derive(Debug, Clone, Serialize)]
pub struct FuzzyTopsisReport {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    pub alternatives: Vec<String>,
    #[serde(flatten)]
    pub result: FuzzyTopsisResult,
}

/// Handler for fuzzy TOPSIS rankings.
#[derive(Debug, Clone, Default)]
pub struct FuzzyRankHandler;

impl FuzzyRankHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: FuzzyRankCommand) -> Result<FuzzyTopsisReport, DomainError> {
        let analysis_id = AnalysisId::new();
        debug!(
            analysis_id = %analysis_id,
            alternatives = cmd.alternatives.len(),
            criteria = cmd.fuzzy_weights.len(),
            "Running fuzzy TOPSIS ranking"
        );

        let inputs = prepare(
            &cmd.alternatives,
            cmd.criteria.as_deref(),
            cmd.fuzzy_weights.names(),
            &cmd.criteria_types,
        )?;
        let result = FuzzyTopsis::analyze(&inputs.matrix, &cmd.fuzzy_weights, &inputs.directions)?;

        info!(
            analysis_id = %analysis_id,
            top = %inputs.matrix.alternative_ids()[result.crisp_ranking[0]],
            "Fuzzy TOPSIS ranking completed"
        );

        Ok(FuzzyTopsisReport {
            analysis_id,
            computed_at: Timestamp::now(),
            alternatives: inputs.matrix.alternative_names().to_vec(),
            result,
        })
    }
}
