//! RankAlternativesHandler - Base TOPSIS ranking with diagnostics.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::inputs::prepare;
use crate::config::AnalysisConfig;
use crate::domain::foundation::{AnalysisId, DomainError, Timestamp};
use crate::domain::mcda::{
    Alternative, CriteriaTypes, CriteriaWeights, Matrix, SensitivityAnalysis, SensitivityAnalyzer,
    StatisticalValidation, StatisticalValidator, TopsisScorer, UncertaintyAnalysis,
    UncertaintyAnalyzer, WeightingEngine,
};

/// Command to rank alternatives with crisp weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankAlternativesCommand {
    pub alternatives: Vec<Alternative>,
    pub criteria_weights: CriteriaWeights,
    #[serde(default)]
    pub criteria_types: CriteriaTypes,
    /// Explicit column order; defaults to the weights' key order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub uncertainty_analysis: bool,
    #[serde(default = "default_true")]
    pub sensitivity_analysis: bool,
}

fn default_true() -> bool {
    true
}

/// One row of the ranked view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAlternative {
    /// 1-based rank.
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// Result of a base TOPSIS ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopsisReport {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    /// Alternative names in input order.
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub topsis_scores: Vec<f64>,
    pub ranking: Vec<usize>,
    pub ranked_alternatives: Vec<RankedAlternative>,
    pub normalized_matrix: Matrix,
    pub weighted_matrix: Matrix,
    pub ideal_solution: Vec<f64>,
    pub anti_ideal_solution: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty_analysis: Option<UncertaintyAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity_analysis: Option<SensitivityAnalysis>,
    pub statistical_validation: StatisticalValidation,
}

/// Handler for base TOPSIS rankings.
#[derive(Debug, Clone)]
pub struct RankAlternativesHandler {
    config: AnalysisConfig,
}

impl RankAlternativesHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, cmd: RankAlternativesCommand) -> Result<TopsisReport, DomainError> {
        let analysis_id = AnalysisId::new();
        debug!(
            analysis_id = %analysis_id,
            alternatives = cmd.alternatives.len(),
            criteria = cmd.criteria_weights.len(),
            "Running TOPSIS ranking"
        );

        // 1. Validate inputs at the boundary
        let inputs = prepare(
            &cmd.alternatives,
            cmd.criteria.as_deref(),
            cmd.criteria_weights.names(),
            &cmd.criteria_types,
        )?;
        let matrix = &inputs.matrix;
        let weights = WeightingEngine::weight_vector(matrix.criteria(), &cmd.criteria_weights)?;

        // 2. Core ranking
        let outcome = TopsisScorer::evaluate(matrix.values(), &weights, &inputs.directions);

        // 3. Optional diagnostics
        let uncertainty_analysis = cmd
            .uncertainty_analysis
            .then(|| UncertaintyAnalyzer::analyze(matrix));
        let sensitivity_analysis = if cmd.sensitivity_analysis {
            Some(SensitivityAnalyzer::analyze(
                matrix,
                &weights,
                &inputs.directions,
                &self.config.sensitivity_multipliers,
            )?)
        } else {
            None
        };
        let statistical_validation = StatisticalValidator::validate(&outcome.scores, matrix);

        let ranked_alternatives = outcome
            .ranking
            .iter()
            .enumerate()
            .map(|(position, &i)| RankedAlternative {
                rank: position + 1,
                id: matrix.alternative_ids()[i].clone(),
                name: matrix.alternative_names()[i].clone(),
                score: outcome.scores[i],
            })
            .collect();

        info!(
            analysis_id = %analysis_id,
            top = %matrix.alternative_ids()[outcome.ranking[0]],
            discrimination_power = statistical_validation.discrimination_power,
            "TOPSIS ranking completed"
        );

        Ok(TopsisReport {
            analysis_id,
            computed_at: Timestamp::now(),
            alternatives: matrix.alternative_names().to_vec(),
            criteria: matrix.criteria().to_vec(),
            topsis_scores: outcome.scores,
            ranking: outcome.ranking,
            ranked_alternatives,
            normalized_matrix: outcome.normalized,
            weighted_matrix: outcome.weighted,
            ideal_solution: outcome.references.ideal,
            anti_ideal_solution: outcome.references.anti_ideal,
            uncertainty_analysis,
            sensitivity_analysis,
            statistical_validation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::mcda::CriterionType;

    fn command() -> RankAlternativesCommand {
        RankAlternativesCommand {
            alternatives: vec![
                Alternative::new("f1", "Depot").with_value("yield", 10.0).with_value("capex", 5.0),
                Alternative::new("f2", "School").with_value("yield", 5.0).with_value("capex", 2.0),
                Alternative::new("f3", "Clinic").with_value("yield", 1.0).with_value("capex", 9.0),
            ],
            criteria_weights: CriteriaWeights::new().with("yield", 0.6).with("capex", 0.4),
            criteria_types: [("capex".to_string(), CriterionType::Cost)].into_iter().collect(),
            criteria: None,
            uncertainty_analysis: true,
            sensitivity_analysis: true,
        }
    }

    fn handler() -> RankAlternativesHandler {
        RankAlternativesHandler::new(AnalysisConfig::default())
    }

    #[test]
    fn produces_full_report() {
        let report = handler().handle(command()).unwrap();

        assert_eq!(report.alternatives, vec!["Depot", "School", "Clinic"]);
        assert_eq!(report.topsis_scores.len(), 3);
        assert_eq!(report.ranking[2], 2);
        assert_eq!(report.ranked_alternatives[0].rank, 1);
        assert_eq!(report.ranked_alternatives[0].name, report.alternatives[report.ranking[0]]);
        assert_eq!(report.ranked_alternatives[0].score, report.topsis_scores[report.ranking[0]]);
        assert_eq!(report.ideal_solution.len(), 2);
        assert!(report.uncertainty_analysis.is_some());
        assert!(report.sensitivity_analysis.is_some());
    }

    #[test]
    fn diagnostics_can_be_disabled() {
        let mut cmd = command();
        cmd.uncertainty_analysis = false;
        cmd.sensitivity_analysis = false;

        let report = handler().handle(cmd).unwrap();
        assert!(report.uncertainty_analysis.is_none());
        assert!(report.sensitivity_analysis.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("uncertainty_analysis").is_none());
        assert!(json.get("statistical_validation").is_some());
    }

    #[test]
    fn missing_value_maps_to_shape_mismatch() {
        let mut cmd = command();
        cmd.alternatives.push(Alternative::new("f4", "Pool").with_value("yield", 3.0));

        let err = handler().handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::ShapeMismatch);
        assert_eq!(err.details.get("alternative"), Some(&"f4".to_string()));
    }

    #[test]
    fn explicit_criterion_without_weight_is_missing_weight() {
        let mut cmd = command();
        for alt in &mut cmd.alternatives {
            alt.criteria.insert("area", 1.0);
        }
        cmd.criteria = Some(vec!["yield".into(), "capex".into(), "area".into()]);

        let err = handler().handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingWeight);
    }

    #[test]
    fn empty_alternatives_rejected() {
        let mut cmd = command();
        cmd.alternatives.clear();

        let err = handler().handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyInput);
    }
}
