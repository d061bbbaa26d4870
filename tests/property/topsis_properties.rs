use facility_mcda::domain::mcda::{
    Alternative, CancellationToken, CriterionType, DecisionMatrix, FuzzyTopsis, FuzzyWeight,
    FuzzyWeights, Matrix, MonteCarloParams, MonteCarloSimulator, TopsisScorer, VectorNormalizer,
};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn arb_rows(max_alternatives: usize, max_criteria: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=max_alternatives, 1..=max_criteria).prop_flat_map(|(n, m)| {
        prop::collection::vec(prop::collection::vec(0.0f64..1000.0, m), n)
    })
}

fn arb_directions(m: usize) -> impl Strategy<Value = Vec<CriterionType>> {
    prop::collection::vec(
        prop_oneof![Just(CriterionType::Benefit), Just(CriterionType::Cost)],
        m,
    )
}

/// Matrix, positive weights, and directions of matching width.
fn arb_problem() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>, Vec<CriterionType>)> {
    arb_rows(6, 5).prop_flat_map(|rows| {
        let m = rows[0].len();
        (
            Just(rows),
            prop::collection::vec(0.01f64..10.0, m),
            arb_directions(m),
        )
    })
}

fn decision_matrix(rows: &[Vec<f64>]) -> DecisionMatrix {
    let criteria: Vec<String> = (0..rows[0].len()).map(|j| format!("c{}", j)).collect();
    let alternatives: Vec<Alternative> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter().enumerate().fold(
                Alternative::new(format!("a{}", i), format!("Site {}", i)),
                |alt, (j, &v)| alt.with_value(format!("c{}", j), v),
            )
        })
        .collect();
    DecisionMatrix::build(&alternatives, &criteria).unwrap()
}

fn is_permutation(ranking: &[usize], n: usize) -> bool {
    let mut sorted = ranking.to_vec();
    sorted.sort_unstable();
    sorted == (0..n).collect::<Vec<_>>()
}

// ── Normalization: unit-norm columns, zero columns stay zero ────────────────

proptest! {
    #[test]
    fn normalized_columns_have_unit_or_zero_norm(rows in arb_rows(8, 6), zero_col in any::<prop::sample::Index>()) {
        let mut rows = rows;
        let col = zero_col.index(rows[0].len());
        for row in rows.iter_mut() {
            row[col] = 0.0;
        }
        let normalized = VectorNormalizer::normalize(&Matrix::from_rows(rows.clone()).unwrap());

        for j in 0..normalized.n_cols() {
            let norm = normalized.column(j).iter().map(|v| v * v).sum::<f64>().sqrt();
            let raw_zero = rows.iter().all(|r| r[j] == 0.0);
            if raw_zero {
                prop_assert_eq!(norm, 0.0);
            } else {
                prop_assert!((norm - 1.0).abs() < EPS, "column {} norm {}", j, norm);
            }
        }
    }
}

// ── Scoring: bounds, permutation, best first, determinism ──────────────────

proptest! {
    #[test]
    fn scores_are_bounded_and_ranking_is_a_permutation((rows, weights, directions) in arb_problem()) {
        let raw = Matrix::from_rows(rows).unwrap();
        let outcome = TopsisScorer::evaluate(&raw, &weights, &directions);
        let n = raw.n_rows();

        for &s in &outcome.scores {
            prop_assert!(s.is_finite());
            prop_assert!((0.0..=1.0).contains(&s), "score {} out of range", s);
        }
        prop_assert!(is_permutation(&outcome.ranking, n));

        let best = outcome.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(outcome.scores[outcome.ranking[0]], best);
        for pair in outcome.ranking.windows(2) {
            prop_assert!(outcome.scores[pair[0]] >= outcome.scores[pair[1]]);
        }
    }

    #[test]
    fn scoring_is_deterministic((rows, weights, directions) in arb_problem()) {
        let raw = Matrix::from_rows(rows).unwrap();
        let first = TopsisScorer::evaluate(&raw, &weights, &directions);
        let second = TopsisScorer::evaluate(&raw, &weights, &directions);

        let bits = |v: &[f64]| v.iter().map(|s| s.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first.scores), bits(&second.scores));
        prop_assert_eq!(first.ranking, second.ranking);
    }
}

// ── Fuzzy: min_score <= max_score ──────────────────────────────────────────

proptest! {
    #[test]
    fn fuzzy_ranges_are_ordered(
        (rows, directions, triangles) in arb_rows(6, 4).prop_flat_map(|rows| {
            let m = rows[0].len();
            (
                Just(rows),
                arb_directions(m),
                prop::collection::vec((0.01f64..1.0, 0.0f64..1.0, 0.0f64..1.0), m),
            )
        })
    ) {
        let matrix = decision_matrix(&rows);
        let weights: FuzzyWeights = triangles
            .iter()
            .enumerate()
            .map(|(j, &(low, d1, d2))| (format!("c{}", j), FuzzyWeight::new(low, low + d1, low + d1 + d2)))
            .collect();

        let result = FuzzyTopsis::analyze(&matrix, &weights, &directions).unwrap();
        for range in &result.score_ranges {
            prop_assert!(range.min_score <= range.max_score);
        }
        prop_assert!(is_permutation(&result.crisp_ranking, rows.len()));
    }
}

// ── Monte Carlo: interval bounds and reproducibility ───────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn simulation_intervals_stay_in_unit_range(
        (rows, weights, directions) in arb_problem(),
        seed in any::<u64>(),
    ) {
        let matrix = decision_matrix(&rows);
        let params = MonteCarloParams::new(100, 0.2, 0.1).unwrap().with_seed(seed);

        let result = MonteCarloSimulator::run(&matrix, &weights, &directions, &params, &CancellationToken::new()).unwrap();
        for i in 0..rows.len() {
            let (lower, upper) = (result.confidence_intervals.lower[i], result.confidence_intervals.upper[i]);
            let mean = result.mean_scores[i];
            prop_assert!(0.0 <= lower && lower <= mean && mean <= upper && upper <= 1.0);
            prop_assert!((0.0..=1.0).contains(&result.mean_scores[i]));
        }
        prop_assert!(is_permutation(&result.robust_ranking, rows.len()));
    }

    #[test]
    fn simulation_is_reproducible_across_execution_modes(
        (rows, weights, directions) in arb_problem(),
        seed in any::<u64>(),
    ) {
        let matrix = decision_matrix(&rows);
        let params = MonteCarloParams::new(100, 0.1, 0.05).unwrap().with_seed(seed);
        let cancel = CancellationToken::new();

        let parallel = MonteCarloSimulator::run(&matrix, &weights, &directions, &params.clone().with_parallel(true), &cancel).unwrap();
        let sequential = MonteCarloSimulator::run(&matrix, &weights, &directions, &params.with_parallel(false), &cancel).unwrap();
        prop_assert_eq!(parallel, sequential);
    }
}
