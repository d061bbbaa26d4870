//! TOPSIS Scorer - Closeness to the ideal solution and ranking.
//!
//! `TopsisScorer::evaluate` is the single pipeline every other analysis
//! calls: normalize, weight, derive references, score, rank. It is pure and
//! deterministic for identical inputs.

use serde::Serialize;

use super::{CriterionType, IdealCalculator, Matrix, ReferenceSolutions, VectorNormalizer, WeightingEngine};

/// Every intermediate and final product of one TOPSIS pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopsisOutcome {
    pub normalized: Matrix,
    pub weighted: Matrix,
    pub references: ReferenceSolutions,
    pub distances_to_ideal: Vec<f64>,
    pub distances_to_anti_ideal: Vec<f64>,
    /// Closeness coefficient per alternative, in input order.
    pub scores: Vec<f64>,
    /// Alternative indices by descending score; ties keep input order.
    pub ranking: Vec<usize>,
}

/// TOPSIS scoring functions.
pub struct TopsisScorer;

impl TopsisScorer {
    /// Runs normalize -> weight -> ideal/anti-ideal -> score -> rank.
    ///
    /// `weights` and `directions` are indexed by column. Weights are used
    /// as given; callers renormalize when their analysis requires it.
    pub fn evaluate(raw: &Matrix, weights: &[f64], directions: &[CriterionType]) -> TopsisOutcome {
        let normalized = VectorNormalizer::normalize(raw);
        let weighted = WeightingEngine::apply(&normalized, weights);
        let references = IdealCalculator::compute(&weighted, directions);

        let distances_to_ideal: Vec<f64> = weighted
            .rows()
            .map(|row| euclidean(row, &references.ideal))
            .collect();
        let distances_to_anti_ideal: Vec<f64> = weighted
            .rows()
            .map(|row| euclidean(row, &references.anti_ideal))
            .collect();

        let scores = Self::closeness(&distances_to_ideal, &distances_to_anti_ideal);
        let ranking = Self::rank(&scores);

        TopsisOutcome {
            normalized,
            weighted,
            references,
            distances_to_ideal,
            distances_to_anti_ideal,
            scores,
            ranking,
        }
    }

    /// `d- / (d+ + d-)`, defined as 0 when both distances are 0.
    pub fn closeness(to_ideal: &[f64], to_anti_ideal: &[f64]) -> Vec<f64> {
        to_ideal
            .iter()
            .zip(to_anti_ideal)
            .map(|(&plus, &minus)| {
                let total = plus + minus;
                if total > 0.0 {
                    minus / total
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Orders indices by descending score. The sort is stable, so equal
    /// scores keep their original relative order.
    pub fn rank(scores: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn dominant_alternative_ranks_first() {
        let raw = matrix(vec![vec![10.0, 10.0], vec![5.0, 5.0], vec![1.0, 1.0]]);
        let out = TopsisScorer::evaluate(&raw, &[0.5, 0.5], &[CriterionType::Benefit; 2]);

        assert_eq!(out.ranking, vec![0, 1, 2]);
        assert!((out.scores[0] - 1.0).abs() < 1e-12);
        assert!(out.scores[2].abs() < 1e-12);
    }

    #[test]
    fn cost_criterion_prefers_lower_values() {
        let raw = matrix(vec![vec![100.0], vec![50.0], vec![75.0]]);
        let out = TopsisScorer::evaluate(&raw, &[1.0], &[CriterionType::Cost]);

        assert_eq!(out.ranking, vec![1, 2, 0]);
        assert!((out.scores[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn identical_alternatives_score_zero_and_keep_order() {
        let raw = matrix(vec![vec![3.0, 3.0], vec![3.0, 3.0], vec![3.0, 3.0]]);
        let out = TopsisScorer::evaluate(&raw, &[0.5, 0.5], &[CriterionType::Benefit; 2]);

        assert_eq!(out.scores, vec![0.0, 0.0, 0.0]);
        assert_eq!(out.ranking, vec![0, 1, 2]);
    }

    #[test]
    fn rank_is_stable_for_ties() {
        assert_eq!(TopsisScorer::rank(&[0.2, 0.7, 0.2, 0.7]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn closeness_handles_zero_total_distance() {
        assert_eq!(TopsisScorer::closeness(&[0.0, 1.0], &[0.0, 1.0]), vec![0.0, 0.5]);
    }

    #[test]
    fn outcome_exposes_intermediates() {
        let raw = matrix(vec![vec![3.0, 1.0], vec![4.0, 3.0]]);
        let out = TopsisScorer::evaluate(&raw, &[2.0, 1.0], &[CriterionType::Benefit, CriterionType::Cost]);

        assert!((out.normalized.get(0, 0) - 0.6).abs() < 1e-12);
        assert!((out.weighted.get(1, 0) - 1.6).abs() < 1e-12);
        assert!((out.references.ideal[0] - 1.6).abs() < 1e-12);
        // Cost column: ideal is the smaller weighted value.
        assert!(out.references.ideal[1] < out.references.anti_ideal[1]);
        assert_eq!(out.distances_to_ideal.len(), 2);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let raw = matrix(vec![vec![1.3, 7.1, 0.2], vec![2.9, 3.3, 0.9], vec![0.4, 5.5, 0.5]]);
        let weights = [0.3, 0.5, 0.2];
        let dirs = [CriterionType::Benefit, CriterionType::Cost, CriterionType::Benefit];

        let a = TopsisScorer::evaluate(&raw, &weights, &dirs);
        let b = TopsisScorer::evaluate(&raw, &weights, &dirs);
        assert_eq!(a, b);
    }
}
