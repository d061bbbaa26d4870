//! Statistical Validator - Post-hoc diagnostics on final scores.

use serde::Serialize;

use super::{stats, CriterionMap, DecisionMatrix};

/// Summary statistics of a score vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl ScoreStatistics {
    /// Computes statistics; all zero for an empty slice.
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
                range: 0.0,
            };
        }
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean: stats::mean(scores),
            std: stats::std_dev(scores),
            min,
            max,
            range: max - min,
        }
    }
}

/// Correlation and discrimination diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalValidation {
    /// Pearson correlation of scores with each raw criterion column
    /// (0 when undefined).
    pub criteria_correlations: CriterionMap<f64>,
    pub score_statistics: ScoreStatistics,
    /// Score range; larger means the weights separate alternatives better.
    pub discrimination_power: f64,
}

/// Statistical validation of a ranking.
pub struct StatisticalValidator;

impl StatisticalValidator {
    pub fn validate(scores: &[f64], matrix: &DecisionMatrix) -> StatisticalValidation {
        let raw = matrix.values();
        let criteria_correlations = matrix
            .criteria()
            .iter()
            .enumerate()
            .map(|(j, name)| (name.clone(), stats::pearson(scores, &raw.column(j))))
            .collect();

        let score_statistics = ScoreStatistics::from_scores(scores);

        StatisticalValidation {
            criteria_correlations,
            discrimination_power: score_statistics.range,
            score_statistics,
        }
    }
}
