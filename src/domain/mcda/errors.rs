//! Error type for the decision analysis engine.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Input contract violations raised by the MCDA engine.
///
/// Degenerate numeric cases (zero-norm columns, zero means, zero distances,
/// constant columns) are not errors; they resolve to 0.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McdaError {
    #[error("Analysis requires at least one alternative and one criterion")]
    EmptyInput,

    #[error("Alternative '{alternative}' has no value for criterion '{criterion}'")]
    ShapeMismatch {
        alternative: String,
        criterion: String,
    },

    #[error("Criterion '{criterion}' has no weight")]
    MissingWeight { criterion: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Analysis was cancelled before all trials completed")]
    Cancelled,
}

impl McdaError {
    /// Creates a shape mismatch error.
    pub fn shape_mismatch(alternative: impl Into<String>, criterion: impl Into<String>) -> Self {
        McdaError::ShapeMismatch {
            alternative: alternative.into(),
            criterion: criterion.into(),
        }
    }

    /// Creates a missing weight error.
    pub fn missing_weight(criterion: impl Into<String>) -> Self {
        McdaError::MissingWeight {
            criterion: criterion.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        McdaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code this error maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            McdaError::EmptyInput => ErrorCode::EmptyInput,
            McdaError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            McdaError::MissingWeight { .. } => ErrorCode::MissingWeight,
            McdaError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            McdaError::Cancelled => ErrorCode::AnalysisCancelled,
        }
    }
}

impl From<McdaError> for DomainError {
    fn from(err: McdaError) -> Self {
        let base = DomainError::new(err.code(), err.to_string());
        match err {
            McdaError::ShapeMismatch {
                alternative,
                criterion,
            } => base
                .with_detail("alternative", alternative)
                .with_detail("criterion", criterion),
            McdaError::MissingWeight { criterion } => base.with_detail("criterion", criterion),
            McdaError::InvalidParameter { name, .. } => base.with_detail("parameter", name),
            McdaError::EmptyInput | McdaError::Cancelled => base,
        }
    }
}
