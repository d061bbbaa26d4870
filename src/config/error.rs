//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Simulation count must be greater than 0")]
    InvalidSimulationCount,

    #[error("Uncertainty '{0}' must be a finite value >= 0")]
    InvalidUncertainty(&'static str),

    #[error("Rank stability top-k must be greater than 0")]
    InvalidTopK,

    #[error("Sensitivity multipliers must be a non-empty list of positive numbers")]
    InvalidMultipliers,

    #[error("Log level filter cannot be empty")]
    EmptyLogLevel,
}
