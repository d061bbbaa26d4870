//! MCDA Module - Multi-criteria decision analysis engine.
//!
//! A TOPSIS ranking core with diagnostic layers on top. Every component is
//! a stateless function over immutable inputs; the diagnostic layers call
//! `TopsisScorer::evaluate` as a black box with different weights or data.
//!
//! # Components
//!
//! - `DecisionMatrix` - Alternatives to a numeric matrix (fixed column order)
//! - `VectorNormalizer` - Column-wise Euclidean normalization
//! - `WeightingEngine` - Weight vectors, renormalization, application
//! - `IdealCalculator` - Ideal / anti-ideal reference vectors
//! - `TopsisScorer` - Closeness scores and ranking
//! - `UncertaintyAnalyzer` - Coefficient of variation per criterion
//! - `SensitivityAnalyzer` - One-at-a-time weight perturbation
//! - `MonteCarloSimulator` - Score distributions under noisy inputs
//! - `FuzzyTopsis` - Triangular fuzzy weights
//! - `StatisticalValidator` - Correlation and discrimination diagnostics

mod cancellation;
mod criteria;
mod decision_matrix;
mod errors;
mod fuzzy;
mod ideal;
mod matrix;
mod monte_carlo;
mod normalizer;
mod sensitivity;
pub mod stats;
mod topsis;
mod uncertainty;
mod validation;
mod weighting;

pub use cancellation::CancellationToken;
pub use criteria::{
    resolve_directions, Alternative, CriteriaTypes, CriteriaWeights, CriterionMap, CriterionType,
    FuzzyWeight, FuzzyWeights,
};
pub use decision_matrix::DecisionMatrix;
pub use errors::McdaError;
pub use fuzzy::{FuzzyTopsis, FuzzyTopsisResult, ScoreRange};
pub use ideal::{IdealCalculator, ReferenceSolutions};
pub use matrix::Matrix;
pub use monte_carlo::{
    ConfidenceIntervals, MonteCarloParams, MonteCarloResult, MonteCarloSimulator,
    DEFAULT_DATA_UNCERTAINTY, DEFAULT_SEED, DEFAULT_SIMULATIONS, DEFAULT_TOP_K,
    DEFAULT_WEIGHT_UNCERTAINTY,
};
pub use normalizer::VectorNormalizer;
pub use sensitivity::{
    CriterionSensitivity, SensitivityAnalysis, SensitivityAnalyzer, DEFAULT_WEIGHT_MULTIPLIERS,
};
pub use topsis::{TopsisOutcome, TopsisScorer};
pub use uncertainty::{UncertaintyAnalysis, UncertaintyAnalyzer};
pub use validation::{ScoreStatistics, StatisticalValidation, StatisticalValidator};
pub use weighting::WeightingEngine;
