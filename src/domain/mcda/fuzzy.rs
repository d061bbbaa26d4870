//! Fuzzy TOPSIS Extension - Triangular fuzzy weights.

use serde::Serialize;

use super::{
    CriteriaWeights, CriterionType, DecisionMatrix, FuzzyWeight, FuzzyWeights, McdaError,
    TopsisScorer, WeightingEngine,
};

/// Lowest and highest score an alternative reaches across the low, medium
/// and high weight scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub min_score: f64,
    pub max_score: f64,
}

/// Result of a fuzzy-weighted TOPSIS run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyTopsisResult {
    /// Scores under the renormalized centroid weights.
    pub fuzzy_scores: Vec<f64>,
    pub crisp_ranking: Vec<usize>,
    pub score_ranges: Vec<ScoreRange>,
    pub fuzzy_weights: FuzzyWeights,
    /// Renormalized centroid weight per criterion.
    pub crisp_weights: CriteriaWeights,
}

/// TOPSIS with triangular fuzzy weights.
pub struct FuzzyTopsis;

impl FuzzyTopsis {
    /// Ranks by centroid weights and brackets each score with the all-low,
    /// all-medium and all-high scenarios.
    ///
    /// # Errors
    /// - `MissingWeight` if a criterion has no fuzzy weight
    /// - `InvalidParameter` for malformed triangles or all-zero centroids
    pub fn analyze(
        matrix: &DecisionMatrix,
        fuzzy_weights: &FuzzyWeights,
        directions: &[CriterionType],
    ) -> Result<FuzzyTopsisResult, McdaError> {
        let triangles: Vec<FuzzyWeight> = matrix
            .criteria()
            .iter()
            .map(|name| {
                let w = *fuzzy_weights
                    .get(name)
                    .ok_or_else(|| McdaError::missing_weight(name))?;
                w.validate(name)?;
                Ok(w)
            })
            .collect::<Result<_, McdaError>>()?;

        let raw = matrix.values();
        let centroids: Vec<f64> = triangles.iter().map(FuzzyWeight::centroid).collect();
        let crisp = WeightingEngine::renormalize(&centroids)?;
        let baseline = TopsisScorer::evaluate(raw, &crisp, directions);

        let scenarios = [
            triangles.iter().map(|t| t.low).collect::<Vec<_>>(),
            triangles.iter().map(|t| t.medium).collect::<Vec<_>>(),
            triangles.iter().map(|t| t.high).collect::<Vec<_>>(),
        ];

        let mut score_ranges = vec![
            ScoreRange {
                min_score: f64::INFINITY,
                max_score: f64::NEG_INFINITY,
            };
            raw.n_rows()
        ];
        for scenario in &scenarios {
            let weights = renormalize_or_zero(scenario);
            let outcome = TopsisScorer::evaluate(raw, &weights, directions);
            for (range, &score) in score_ranges.iter_mut().zip(&outcome.scores) {
                range.min_score = range.min_score.min(score);
                range.max_score = range.max_score.max(score);
            }
        }

        Ok(FuzzyTopsisResult {
            fuzzy_scores: baseline.scores,
            crisp_ranking: baseline.ranking,
            score_ranges,
            fuzzy_weights: matrix
                .criteria()
                .iter()
                .cloned()
                .zip(triangles.iter().copied())
                .collect(),
            crisp_weights: matrix.criteria().iter().cloned().zip(crisp).collect(),
        })
    }
}

/// A scenario whose bounds are all zero keeps zero weights, which scores
/// every alternative 0.
fn renormalize_or_zero(weights: &[f64]) -> Vec<f64> {
    WeightingEngine::renormalize(weights).unwrap_or_else(|_| vec![0.0; weights.len()])
}
