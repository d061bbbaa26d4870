//! Uncertainty Analyzer - Coefficient of variation per raw criterion.

use serde::Serialize;

use super::{stats, CriterionMap, DecisionMatrix};

/// Dispersion of the raw criterion values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UncertaintyAnalysis {
    /// `std / mean` per criterion (0 when the mean is 0).
    pub coefficients_of_variation: CriterionMap<f64>,
    pub most_uncertain_criterion: String,
    pub least_uncertain_criterion: String,
    /// Mean CV across criteria.
    pub overall_uncertainty: f64,
}

/// Uncertainty analysis over the raw (unnormalized) decision matrix.
pub struct UncertaintyAnalyzer;

impl UncertaintyAnalyzer {
    /// Computes CV per column and summarizes.
    ///
    /// Ties between criteria resolve to the earliest column.
    pub fn analyze(matrix: &DecisionMatrix) -> UncertaintyAnalysis {
        let raw = matrix.values();
        let cvs: Vec<f64> = (0..raw.n_cols())
            .map(|j| Self::coefficient_of_variation(&raw.column(j)))
            .collect();

        let mut most = 0;
        let mut least = 0;
        for (j, &cv) in cvs.iter().enumerate() {
            if cv > cvs[most] {
                most = j;
            }
            if cv < cvs[least] {
                least = j;
            }
        }

        let criteria = matrix.criteria();
        UncertaintyAnalysis {
            coefficients_of_variation: criteria.iter().cloned().zip(cvs.iter().copied()).collect(),
            most_uncertain_criterion: criteria.get(most).cloned().unwrap_or_default(),
            least_uncertain_criterion: criteria.get(least).cloned().unwrap_or_default(),
            overall_uncertainty: stats::mean(&cvs),
        }
    }

    /// `std / mean`, or 0 when the mean is 0.
    pub fn coefficient_of_variation(values: &[f64]) -> f64 {
        let mean = stats::mean(values);
        if mean == 0.0 {
            return 0.0;
        }
        stats::std_dev(values) / mean
    }
}
