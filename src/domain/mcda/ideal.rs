//! Ideal / Anti-Ideal Calculator.

use serde::Serialize;

use super::{CriterionType, Matrix};

/// Best-case and worst-case reference vectors, one value per criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSolutions {
    pub ideal: Vec<f64>,
    pub anti_ideal: Vec<f64>,
}

/// Derives reference vectors from a weighted matrix.
pub struct IdealCalculator;

impl IdealCalculator {
    /// Benefit columns take ideal = max, anti-ideal = min; cost columns swap.
    pub fn compute(weighted: &Matrix, directions: &[CriterionType]) -> ReferenceSolutions {
        let mut ideal = Vec::with_capacity(weighted.n_cols());
        let mut anti_ideal = Vec::with_capacity(weighted.n_cols());

        for j in 0..weighted.n_cols() {
            let column = weighted.column(j);
            let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = column.iter().copied().fold(f64::INFINITY, f64::min);

            match directions.get(j).copied().unwrap_or_default() {
                CriterionType::Benefit => {
                    ideal.push(max);
                    anti_ideal.push(min);
                }
                CriterionType::Cost => {
                    ideal.push(min);
                    anti_ideal.push(max);
                }
            }
        }

        ReferenceSolutions { ideal, anti_ideal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benefit_and_cost_directions() {
        let m = Matrix::from_rows(vec![vec![0.1, 0.4], vec![0.3, 0.2]]).unwrap();
        let refs = IdealCalculator::compute(&m, &[CriterionType::Benefit, CriterionType::Cost]);

        assert_eq!(refs.ideal, vec![0.3, 0.2]);
        assert_eq!(refs.anti_ideal, vec![0.1, 0.4]);
    }

    #[test]
    fn missing_direction_defaults_to_benefit() {
        let m = Matrix::from_rows(vec![vec![0.1], vec![0.3]]).unwrap();
        let refs = IdealCalculator::compute(&m, &[]);
        assert_eq!(refs.ideal, vec![0.3]);
        assert_eq!(refs.anti_ideal, vec![0.1]);
    }
}
