//! Analysis engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::mcda::{
    DEFAULT_DATA_UNCERTAINTY, DEFAULT_SEED, DEFAULT_SIMULATIONS, DEFAULT_TOP_K,
    DEFAULT_WEIGHT_MULTIPLIERS, DEFAULT_WEIGHT_UNCERTAINTY,
};

/// Defaults applied when a request leaves a parameter unset
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Monte Carlo trial count
    #[serde(default = "default_simulations")]
    pub n_simulations: usize,

    /// Relative std of multiplicative weight noise
    #[serde(default = "default_weight_uncertainty")]
    pub weight_uncertainty: f64,

    /// Relative std of multiplicative data noise
    #[serde(default = "default_data_uncertainty")]
    pub data_uncertainty: f64,

    /// Global seed for Monte Carlo runs
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Spread Monte Carlo trials across the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Rank positions counted as "top" for rank stability
    #[serde(default = "default_top_k")]
    pub rank_stability_top_k: usize,

    /// Weight multipliers tested by sensitivity analysis
    #[serde(default = "default_multipliers")]
    pub sensitivity_multipliers: Vec<f64>,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.n_simulations == 0 {
            return Err(ValidationError::InvalidSimulationCount);
        }
        if !self.weight_uncertainty.is_finite() || self.weight_uncertainty < 0.0 {
            return Err(ValidationError::InvalidUncertainty("weight_uncertainty"));
        }
        if !self.data_uncertainty.is_finite() || self.data_uncertainty < 0.0 {
            return Err(ValidationError::InvalidUncertainty("data_uncertainty"));
        }
        if self.rank_stability_top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        if self.sensitivity_multipliers.is_empty()
            || self
                .sensitivity_multipliers
                .iter()
                .any(|m| !m.is_finite() || *m <= 0.0)
        {
            return Err(ValidationError::InvalidMultipliers);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            n_simulations: default_simulations(),
            weight_uncertainty: default_weight_uncertainty(),
            data_uncertainty: default_data_uncertainty(),
            seed: default_seed(),
            parallel: default_parallel(),
            rank_stability_top_k: default_top_k(),
            sensitivity_multipliers: default_multipliers(),
        }
    }
}

fn default_simulations() -> usize {
    DEFAULT_SIMULATIONS
}

fn default_weight_uncertainty() -> f64 {
    DEFAULT_WEIGHT_UNCERTAINTY
}

fn default_data_uncertainty() -> f64 {
    DEFAULT_DATA_UNCERTAINTY
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_parallel() -> bool {
    true
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_multipliers() -> Vec<f64> {
    DEFAULT_WEIGHT_MULTIPLIERS.to_vec()
}
