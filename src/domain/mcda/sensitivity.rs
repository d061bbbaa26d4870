//! Sensitivity Analyzer - One-at-a-time weight perturbation.

use serde::Serialize;

use super::{stats, CriterionMap, CriterionType, DecisionMatrix, McdaError, TopsisScorer, WeightingEngine};

/// Multipliers applied to each criterion weight in turn.
pub const DEFAULT_WEIGHT_MULTIPLIERS: [f64; 4] = [0.8, 0.9, 1.1, 1.2];

/// Response of the ranking to perturbing a single criterion's weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionSensitivity {
    pub weight_multipliers: Vec<f64>,
    /// Mean absolute score difference from baseline, per multiplier.
    pub score_changes: Vec<f64>,
    /// Spearman correlation of rank positions against baseline, per
    /// multiplier. 1 means the ranking did not move.
    pub ranking_similarity: Vec<f64>,
    pub max_score_change: f64,
}

/// Sensitivity of the ranking to every criterion weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityAnalysis {
    pub criteria: CriterionMap<CriterionSensitivity>,
    pub most_sensitive_criterion: String,
    pub least_sensitive_criterion: String,
}

/// Weight sensitivity analysis.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// For each criterion and multiplier: scale that weight, renormalize all
    /// weights to sum 1, rescore, and compare against the baseline computed
    /// with `weights` as supplied.
    ///
    /// # Errors
    /// `InvalidParameter` for empty or non-positive multipliers, or weights
    /// that cannot be renormalized.
    pub fn analyze(
        matrix: &DecisionMatrix,
        weights: &[f64],
        directions: &[CriterionType],
        multipliers: &[f64],
    ) -> Result<SensitivityAnalysis, McdaError> {
        if multipliers.is_empty() || multipliers.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(McdaError::invalid_parameter(
                "sensitivity_multipliers",
                "multipliers must be a non-empty list of positive numbers",
            ));
        }

        let raw = matrix.values();
        let baseline = TopsisScorer::evaluate(raw, weights, directions);

        let mut results = CriterionMap::new();
        for (j, criterion) in matrix.criteria().iter().enumerate() {
            let mut score_changes = Vec::with_capacity(multipliers.len());
            let mut ranking_similarity = Vec::with_capacity(multipliers.len());

            for &multiplier in multipliers {
                let mut perturbed = weights.to_vec();
                perturbed[j] *= multiplier;
                let perturbed = WeightingEngine::renormalize(&perturbed)?;

                let outcome = TopsisScorer::evaluate(raw, &perturbed, directions);
                let diffs: Vec<f64> = outcome
                    .scores
                    .iter()
                    .zip(&baseline.scores)
                    .map(|(a, b)| (a - b).abs())
                    .collect();

                score_changes.push(stats::mean(&diffs));
                ranking_similarity.push(stats::ranking_similarity(&baseline.ranking, &outcome.ranking));
            }

            let max_score_change = score_changes.iter().copied().fold(0.0, f64::max);
            results.insert(
                criterion.clone(),
                CriterionSensitivity {
                    weight_multipliers: multipliers.to_vec(),
                    score_changes,
                    ranking_similarity,
                    max_score_change,
                },
            );
        }

        let (most, least) = extremes(&results);
        Ok(SensitivityAnalysis {
            criteria: results,
            most_sensitive_criterion: most,
            least_sensitive_criterion: least,
        })
    }
}

/// Criteria with the largest and smallest max score change; ties go to the
/// earliest column.
fn extremes(results: &CriterionMap<CriterionSensitivity>) -> (String, String) {
    let mut most: Option<(&str, f64)> = None;
    let mut least: Option<(&str, f64)> = None;
    for (name, s) in results.iter() {
        if most.map_or(true, |(_, v)| s.max_score_change > v) {
            most = Some((name, s.max_score_change));
        }
        if least.map_or(true, |(_, v)| s.max_score_change < v) {
            least = Some((name, s.max_score_change));
        }
    }
    (
        most.map(|(n, _)| n.to_string()).unwrap_or_default(),
        least.map(|(n, _)| n.to_string()).unwrap_or_default(),
    )
}
