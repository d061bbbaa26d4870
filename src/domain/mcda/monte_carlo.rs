//! Monte Carlo Simulator - Score distributions under perturbed inputs.
//!
//! Each trial multiplies every weight and every raw cell by Gaussian noise
//! centred on 1, renormalizes the weights, and reruns the full TOPSIS
//! pipeline. Trial `t` draws from a ChaCha8 stream seeded with
//! `(seed, stream = t)`, so results do not depend on how trials are spread
//! across threads.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    stats, CancellationToken, CriterionType, DecisionMatrix, Matrix, McdaError, TopsisScorer,
    WeightingEngine,
};

/// Default number of trials.
pub const DEFAULT_SIMULATIONS: usize = 1000;
/// Default relative standard deviation of weight noise.
pub const DEFAULT_WEIGHT_UNCERTAINTY: f64 = 0.1;
/// Default relative standard deviation of data noise.
pub const DEFAULT_DATA_UNCERTAINTY: f64 = 0.05;
/// Default seed for reproducible runs.
pub const DEFAULT_SEED: u64 = 42;
/// Rank positions counted as "top" for rank stability.
pub const DEFAULT_TOP_K: usize = 3;

/// Validated simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloParams {
    pub n_simulations: usize,
    pub weight_uncertainty: f64,
    pub data_uncertainty: f64,
    pub seed: u64,
    pub top_k: usize,
    pub parallel: bool,
}

impl MonteCarloParams {
    /// Validates caller-supplied values.
    ///
    /// # Errors
    /// `InvalidParameter` for non-positive `n_simulations` or negative /
    /// non-finite uncertainties.
    pub fn new(
        n_simulations: i64,
        weight_uncertainty: f64,
        data_uncertainty: f64,
    ) -> Result<Self, McdaError> {
        if n_simulations <= 0 {
            return Err(McdaError::invalid_parameter(
                "n_simulations",
                format!("must be greater than 0, got {}", n_simulations),
            ));
        }
        check_uncertainty("weight_uncertainty", weight_uncertainty)?;
        check_uncertainty("data_uncertainty", data_uncertainty)?;

        Ok(Self {
            n_simulations: n_simulations as usize,
            weight_uncertainty,
            data_uncertainty,
            ..Self::default()
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// # Errors
    /// `InvalidParameter` if `top_k` is 0.
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self, McdaError> {
        if top_k == 0 {
            return Err(McdaError::invalid_parameter("top_k", "must be greater than 0"));
        }
        self.top_k = top_k;
        Ok(self)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for MonteCarloParams {
    fn default() -> Self {
        Self {
            n_simulations: DEFAULT_SIMULATIONS,
            weight_uncertainty: DEFAULT_WEIGHT_UNCERTAINTY,
            data_uncertainty: DEFAULT_DATA_UNCERTAINTY,
            seed: DEFAULT_SEED,
            top_k: DEFAULT_TOP_K,
            parallel: true,
        }
    }
}

fn check_uncertainty(name: &str, value: f64) -> Result<(), McdaError> {
    if !value.is_finite() || value < 0.0 {
        return Err(McdaError::invalid_parameter(
            name,
            format!("must be a finite value >= 0, got {}", value),
        ));
    }
    Ok(())
}

/// Empirical 95% interval per alternative (2.5th / 97.5th percentiles).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceIntervals {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Aggregated simulation output. Vectors are indexed by alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloResult {
    pub n_simulations: usize,
    pub mean_scores: Vec<f64>,
    pub std_scores: Vec<f64>,
    pub confidence_intervals: ConfidenceIntervals,
    /// `rank_probabilities[i][k]`: share of trials with alternative `i` at
    /// rank position `k`.
    pub rank_probabilities: Vec<Vec<f64>>,
    /// Share of trials with the alternative in the top-k positions.
    pub ranking_stability: Vec<f64>,
    /// Alternatives by descending mean score.
    pub robust_ranking: Vec<usize>,
}

struct TrialOutcome {
    scores: Vec<f64>,
    ranking: Vec<usize>,
}

/// Perturbation-based robustness analysis.
pub struct MonteCarloSimulator;

impl MonteCarloSimulator {
    /// Runs every trial, then aggregates.
    ///
    /// `cancel` is checked before each trial. If any trial was skipped the
    /// whole run fails with `Cancelled`; partial statistics are never
    /// returned.
    pub fn run(
        matrix: &DecisionMatrix,
        weights: &[f64],
        directions: &[CriterionType],
        params: &MonteCarloParams,
        cancel: &CancellationToken,
    ) -> Result<MonteCarloResult, McdaError> {
        let base_weights = WeightingEngine::renormalize(weights)?;
        let weight_noise = noise("weight_uncertainty", params.weight_uncertainty)?;
        let data_noise = noise("data_uncertainty", params.data_uncertainty)?;
        let raw = matrix.values();

        debug!(
            trials = params.n_simulations,
            seed = params.seed,
            parallel = params.parallel,
            "Starting Monte Carlo simulation"
        );

        let trial = |t: usize| -> Option<TrialOutcome> {
            if cancel.is_cancelled() {
                return None;
            }
            Some(run_trial(raw, &base_weights, directions, params.seed, t, &weight_noise, &data_noise))
        };

        let trials: Vec<Option<TrialOutcome>> = if params.parallel {
            (0..params.n_simulations).into_par_iter().map(trial).collect()
        } else {
            (0..params.n_simulations).map(trial).collect()
        };

        let Some(trials) = trials.into_iter().collect::<Option<Vec<_>>>() else {
            debug!("Monte Carlo simulation cancelled, discarding partial trials");
            return Err(McdaError::Cancelled);
        };

        Ok(aggregate(&trials, raw.n_rows(), params.top_k))
    }
}

fn noise(name: &str, relative_std: f64) -> Result<Normal<f64>, McdaError> {
    Normal::new(1.0, relative_std)
        .map_err(|e| McdaError::invalid_parameter(name, e.to_string()))
}

fn run_trial(
    raw: &Matrix,
    base_weights: &[f64],
    directions: &[CriterionType],
    seed: u64,
    trial: usize,
    weight_noise: &Normal<f64>,
    data_noise: &Normal<f64>,
) -> TrialOutcome {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);

    // Negative factors are clamped so no weight flips sign.
    let perturbed: Vec<f64> = base_weights
        .iter()
        .map(|w| w * weight_noise.sample(&mut rng).max(0.0))
        .collect();
    let weights = WeightingEngine::renormalize(&perturbed).unwrap_or_else(|_| base_weights.to_vec());

    let data = raw.map_indexed(|_, _, v| v * data_noise.sample(&mut rng));

    let outcome = TopsisScorer::evaluate(&data, &weights, directions);
    TrialOutcome {
        scores: outcome.scores,
        ranking: outcome.ranking,
    }
}

fn aggregate(trials: &[TrialOutcome], n_alternatives: usize, top_k: usize) -> MonteCarloResult {
    let n_trials = trials.len();
    let mut mean_scores = Vec::with_capacity(n_alternatives);
    let mut std_scores = Vec::with_capacity(n_alternatives);
    let mut lower = Vec::with_capacity(n_alternatives);
    let mut upper = Vec::with_capacity(n_alternatives);

    for i in 0..n_alternatives {
        let samples: Vec<f64> = trials.iter().map(|t| t.scores[i]).collect();
        let mean = stats::mean(&samples);
        mean_scores.push(mean);
        std_scores.push(stats::std_dev(&samples));
        // Skewed samples can put both percentiles on one side of the mean.
        lower.push(stats::percentile(&samples, 2.5).min(mean));
        upper.push(stats::percentile(&samples, 97.5).max(mean));
    }

    let mut rank_counts = vec![vec![0usize; n_alternatives]; n_alternatives];
    for t in trials {
        for (position, &alt) in t.ranking.iter().enumerate() {
            rank_counts[alt][position] += 1;
        }
    }
    let rank_probabilities: Vec<Vec<f64>> = rank_counts
        .iter()
        .map(|row| row.iter().map(|&c| c as f64 / n_trials as f64).collect())
        .collect();

    let top = top_k.min(n_alternatives);
    let ranking_stability = rank_counts
        .iter()
        .map(|row| row[..top].iter().sum::<usize>() as f64 / n_trials as f64)
        .collect();

    let robust_ranking = TopsisScorer::rank(&mean_scores);

    debug!(trials = n_trials, "Monte Carlo simulation aggregated");

    MonteCarloResult {
        n_simulations: n_trials,
        mean_scores,
        std_scores,
        confidence_intervals: ConfidenceIntervals { lower, upper },
        rank_probabilities,
        ranking_stability,
        robust_ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mcda::Alternative;

    fn three_sites() -> DecisionMatrix {
        let alts = vec![
            Alternative::new("a", "A").with_value("yield", 10.0).with_value("capex", 4.0),
            Alternative::new("b", "B").with_value("yield", 8.0).with_value("capex", 2.0),
            Alternative::new("c", "C").with_value("yield", 3.0).with_value("capex", 3.0),
            Alternative::new("d", "D").with_value("yield", 6.0).with_value("capex", 5.0),
        ];
        DecisionMatrix::build(&alts, &["yield".to_string(), "capex".to_string()]).unwrap()
    }

    const DIRS: [CriterionType; 2] = [CriterionType::Benefit, CriterionType::Cost];

    #[test]
    fn params_validate_inputs() {
        assert!(MonteCarloParams::new(0, 0.1, 0.05).is_err());
        assert!(MonteCarloParams::new(-5, 0.1, 0.05).is_err());
        assert!(MonteCarloParams::new(10, -0.1, 0.05).is_err());
        assert!(MonteCarloParams::new(10, 0.1, f64::NAN).is_err());
        assert!(MonteCarloParams::new(10, 0.0, 0.0).is_ok());
        assert!(MonteCarloParams::default().with_top_k(0).is_err());
    }

    #[test]
    fn zero_uncertainty_reproduces_base_scores() {
        let m = three_sites();
        let params = MonteCarloParams::new(20, 0.0, 0.0).unwrap();
        let result =
            MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &params, &CancellationToken::new()).unwrap();
        let base = TopsisScorer::evaluate(m.values(), &[0.6, 0.4], &DIRS);

        for i in 0..4 {
            assert!((result.mean_scores[i] - base.scores[i]).abs() < 1e-12);
            assert!(result.std_scores[i] < 1e-12);
        }
        assert_eq!(result.robust_ranking, base.ranking);
        assert_eq!(result.rank_probabilities[base.ranking[0]][0], 1.0);
    }

    #[test]
    fn parallel_and_sequential_runs_match() {
        let m = three_sites();
        let params = MonteCarloParams::new(200, 0.2, 0.1).unwrap().with_seed(7);
        let cancel = CancellationToken::new();

        let par = MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &params, &cancel).unwrap();
        let seq = MonteCarloSimulator::run(
            &m,
            &[0.6, 0.4],
            &DIRS,
            &params.clone().with_parallel(false),
            &cancel,
        )
        .unwrap();

        assert_eq!(par, seq);
    }

    #[test]
    fn different_seeds_differ() {
        let m = three_sites();
        let cancel = CancellationToken::new();
        let a = MonteCarloParams::new(50, 0.2, 0.1).unwrap().with_seed(1);
        let b = a.clone().with_seed(2);

        let ra = MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &a, &cancel).unwrap();
        let rb = MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &b, &cancel).unwrap();
        assert_ne!(ra.mean_scores, rb.mean_scores);
    }

    #[test]
    fn rank_probabilities_are_distributions() {
        let m = three_sites();
        let params = MonteCarloParams::new(300, 0.3, 0.1).unwrap();
        let result =
            MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &params, &CancellationToken::new()).unwrap();

        for row in &result.rank_probabilities {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        for k in 0..4 {
            let column: f64 = result.rank_probabilities.iter().map(|r| r[k]).sum();
            assert!((column - 1.0).abs() < 1e-9);
        }
        // Top-3 of 4: stabilities sum to 3.
        assert!((result.ranking_stability.iter().sum::<f64>() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn intervals_bracket_the_mean() {
        let m = three_sites();
        let params = MonteCarloParams::new(500, 0.1, 0.05).unwrap();
        let result =
            MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &params, &CancellationToken::new()).unwrap();

        for i in 0..4 {
            let lo = result.confidence_intervals.lower[i];
            let hi = result.confidence_intervals.upper[i];
            assert!(lo >= 0.0 && hi <= 1.0);
            assert!(lo <= result.mean_scores[i] + 1e-12);
            assert!(result.mean_scores[i] <= hi + 1e-12);
        }
    }

    #[test]
    fn cancelled_run_returns_no_results() {
        let m = three_sites();
        let params = MonteCarloParams::new(100, 0.1, 0.05).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = MonteCarloSimulator::run(&m, &[0.6, 0.4], &DIRS, &params, &cancel).unwrap_err();
        assert_eq!(err, McdaError::Cancelled);
    }

    #[test]
    fn skewed_scores_keep_mean_inside_interval() {
        let alts = vec![
            Alternative::new("a", "A").with_value("yield", 10.0),
            Alternative::new("b", "B").with_value("yield", 8.5),
        ];
        let m = DecisionMatrix::build(&alts, &["yield".to_string()]).unwrap();
        let params = MonteCarloParams::new(1000, 0.1, 0.05).unwrap();

        let result = MonteCarloSimulator::run(
            &m,
            &[1.0],
            &[CriterionType::Benefit],
            &params,
            &CancellationToken::new(),
        )
        .unwrap();

        for i in 0..2 {
            let mean = result.mean_scores[i];
            assert!(result.confidence_intervals.lower[i] <= mean, "lower above mean for {}", i);
            assert!(mean <= result.confidence_intervals.upper[i], "upper below mean for {}", i);
        }
    }
}
