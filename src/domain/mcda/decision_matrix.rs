//! Decision Matrix Builder - Alternative records to a numeric matrix.

use std::collections::HashSet;

use super::{Alternative, Matrix, McdaError};

/// Raw n x m decision matrix with its row and column labels.
///
/// Column order is the criterion order supplied at build time and is fixed
/// for the lifetime of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    alternative_ids: Vec<String>,
    alternative_names: Vec<String>,
    criteria: Vec<String>,
    values: Matrix,
}

impl DecisionMatrix {
    /// Builds the matrix, validating every alternative once at the boundary.
    ///
    /// # Errors
    /// - `EmptyInput` if there are no alternatives or no criteria
    /// - `ShapeMismatch` if any alternative lacks a listed criterion
    /// - `InvalidParameter` for duplicate criteria or non-finite values
    pub fn build(alternatives: &[Alternative], criteria: &[String]) -> Result<Self, McdaError> {
        if alternatives.is_empty() || criteria.is_empty() {
            return Err(McdaError::EmptyInput);
        }

        let mut seen = HashSet::new();
        for name in criteria {
            if !seen.insert(name.as_str()) {
                return Err(McdaError::invalid_parameter(
                    "criteria",
                    format!("criterion '{}' listed more than once", name),
                ));
            }
        }

        let mut rows = Vec::with_capacity(alternatives.len());
        for alt in alternatives {
            let mut row = Vec::with_capacity(criteria.len());
            for criterion in criteria {
                let value = alt
                    .value(criterion)
                    .ok_or_else(|| McdaError::shape_mismatch(&alt.id, criterion))?;
                if !value.is_finite() {
                    return Err(McdaError::invalid_parameter(
                        format!("alternatives.{}.{}", alt.id, criterion),
                        "criterion values must be finite",
                    ));
                }
                row.push(value);
            }
            rows.push(row);
        }

        // Every row was built with criteria.len() entries.
        let values = Matrix::from_rows(rows).unwrap_or_default();

        Ok(Self {
            alternative_ids: alternatives.iter().map(|a| a.id.clone()).collect(),
            alternative_names: alternatives.iter().map(|a| a.name.clone()).collect(),
            criteria: criteria.to_vec(),
            values,
        })
    }

    /// Raw values.
    pub fn values(&self) -> &Matrix {
        &self.values
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn alternative_ids(&self) -> &[String] {
        &self.alternative_ids
    }

    pub fn alternative_names(&self) -> &[String] {
        &self.alternative_names
    }

    pub fn alternative_count(&self) -> usize {
        self.values.n_rows()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }
}
