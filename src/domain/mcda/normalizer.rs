//! Vector Normalizer - Column-wise Euclidean normalization.

use super::Matrix;

/// Column-wise vector normalization.
pub struct VectorNormalizer;

impl VectorNormalizer {
    /// Divides every column by its Euclidean norm.
    ///
    /// A column whose sum of squares is 0 stays all-zero instead of
    /// becoming NaN.
    pub fn normalize(matrix: &Matrix) -> Matrix {
        let norms: Vec<f64> = (0..matrix.n_cols())
            .map(|j| matrix.column(j).iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect();

        matrix.map_indexed(|_, j, v| if norms[j] > 0.0 { v / norms[j] } else { 0.0 })
    }
}
