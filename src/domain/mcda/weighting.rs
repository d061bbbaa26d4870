//! Weighting Engine - Weight vectors and their application to a matrix.

use super::{CriteriaWeights, Matrix, McdaError};

/// Weight vector resolution, renormalization and application.
pub struct WeightingEngine;

impl WeightingEngine {
    /// Resolves `weights[criteria[j]]` for every column.
    ///
    /// # Errors
    /// - `MissingWeight` if a criterion has no weight entry
    /// - `InvalidParameter` for zero, negative or non-finite weights
    pub fn weight_vector(
        criteria: &[String],
        weights: &CriteriaWeights,
    ) -> Result<Vec<f64>, McdaError> {
        criteria
            .iter()
            .map(|name| {
                let w = *weights
                    .get(name)
                    .ok_or_else(|| McdaError::missing_weight(name))?;
                if !w.is_finite() || w <= 0.0 {
                    return Err(McdaError::invalid_parameter(
                        format!("criteria_weights.{}", name),
                        format!("weights must be finite and positive, got {}", w),
                    ));
                }
                Ok(w)
            })
            .collect()
    }

    /// Scales a weight vector so it sums to 1.
    ///
    /// # Errors
    /// `InvalidParameter` if the weights sum to zero.
    pub fn renormalize(weights: &[f64]) -> Result<Vec<f64>, McdaError> {
        let total: f64 = weights.iter().sum();
        if !(total > 0.0) || !total.is_finite() {
            return Err(McdaError::invalid_parameter(
                "criteria_weights",
                "weights must have a positive finite sum",
            ));
        }
        Ok(weights.iter().map(|w| w / total).collect())
    }

    /// Multiplies each column by its weight.
    pub fn apply(normalized: &Matrix, weights: &[f64]) -> Matrix {
        normalized.map_indexed(|_, j, v| v * weights[j])
    }
}
