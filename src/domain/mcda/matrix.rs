//! Dense row-major matrix used throughout the TOPSIS pipeline.

use serde::Serialize;

/// An n x m matrix stored as rows (alternatives) of columns (criteria).
///
/// Every row has the same length; constructors enforce this.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Creates a matrix from rows, returning None if rows are ragged.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self { rows })
    }

    /// Creates an all-zero matrix.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            rows: vec![vec![0.0; n_cols]; n_rows],
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Copies out a column.
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[col]).collect()
    }

    /// Applies `f(row, col, value)` to every cell, producing a new matrix.
    pub fn map_indexed(&self, mut f: impl FnMut(usize, usize, f64) -> f64) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| r.iter().enumerate().map(|(j, &v)| f(i, j, v)).collect())
            .collect();
        Self { rows }
    }

    /// Returns the rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows.clone()
    }
}
