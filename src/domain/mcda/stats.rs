//! Descriptive statistics and correlation helpers.
//!
//! Undefined results (empty input, zero variance) resolve to 0 so no NaN
//! leaves the engine.

/// Arithmetic mean, 0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Percentile `p` in [0, 100] with linear interpolation between order
/// statistics.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Pearson correlation coefficient, 0 when undefined.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mx) * (b - my);
        vx += (a - mx) * (a - mx);
        vy += (b - my) * (b - my);
    }

    let denom = (vx * vy).sqrt();
    if denom > 0.0 && denom.is_finite() {
        (cov / denom).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Ranks values ascending from 1, averaging ranks of tied values.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let shared = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = shared;
        }
        i = j + 1;
    }
    ranks
}

/// Spearman rank correlation, 0 when undefined.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Converts an ordering (`ordering[k]` = item at position k) to the
/// position of each item.
pub fn positions(ordering: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; ordering.len()];
    for (k, &item) in ordering.iter().enumerate() {
        pos[item] = k;
    }
    pos
}

/// Similarity of two rankings as the Spearman correlation of each
/// alternative's rank position. Identical rankings are always 1.
pub fn ranking_similarity(baseline: &[usize], other: &[usize]) -> f64 {
    if baseline == other {
        return 1.0;
    }
    let a: Vec<f64> = positions(baseline).into_iter().map(|p| p as f64).collect();
    let b: Vec<f64> = positions(other).into_iter().map(|p| p as f64).collect();
    spearman(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        assert!((std_dev(&v) - 2.0).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 50.0), 3.0);
        assert_eq!(percentile(&v, 100.0), 5.0);
        assert!((percentile(&v, 2.5) - 1.1).abs() < 1e-12);
        assert!((percentile(&[5.0, 1.0], 25.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_perfect_and_undefined() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), 0.0);
        assert_eq!(pearson(&[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn average_ranks_share_ties() {
        assert_eq!(average_ranks(&[10.0, 20.0, 10.0, 30.0]), vec![1.5, 3.0, 1.5, 4.0]);
    }

    #[test]
    fn spearman_is_monotonic_invariant() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 8.0, 27.0, 64.0];
        assert!((spearman(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn positions_inverts_ordering() {
        assert_eq!(positions(&[2, 0, 1]), vec![1, 2, 0]);
    }

    #[test]
    fn ranking_similarity_bounds() {
        assert_eq!(ranking_similarity(&[0, 1, 2], &[0, 1, 2]), 1.0);
        assert!((ranking_similarity(&[0, 1, 2], &[2, 1, 0]) + 1.0).abs() < 1e-12);
        assert_eq!(ranking_similarity(&[0], &[0]), 1.0);

        let partial = ranking_similarity(&[0, 1, 2, 3], &[1, 0, 2, 3]);
        assert!(partial > 0.0 && partial < 1.0);
    }
}
