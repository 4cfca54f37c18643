//! Pairwise evenness sums.

/// Mean absolute pairwise difference over all i < j pairs
///
/// Uses the sorted prefix-sum identity
/// `Σ_{i<j} |x_i − x_j| = Σ_i (2i − n + 1) · x_sorted[i]` (0-indexed,
/// ascending), which is O(n log n) instead of the quadratic double loop.
/// Returns 0.0 for fewer than two values.
pub fn mean_abs_pairwise_diff(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut pair_sum = 0.0;
    for (i, x) in sorted.iter().enumerate() {
        pair_sum += (2.0 * i as f64 - (n as f64 - 1.0)) * x;
    }

    let pair_count = (n * (n - 1) / 2) as f64;
    pair_sum / pair_count
}

/// Direct O(n²) reference implementation
///
/// Kept as the cross-check for the prefix-sum variant; both must agree to
/// within floating-point tolerance.
pub fn mean_abs_pairwise_diff_direct(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mut pair_sum = 0.0;
    let mut pair_count = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            pair_sum += (values[i] - values[j]).abs();
            pair_count += 1;
        }
    }

    pair_sum / pair_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert_eq!(mean_abs_pairwise_diff(&[]), 0.0);
        assert_eq!(mean_abs_pairwise_diff(&[0.7]), 0.0);
    }

    #[test]
    fn test_known_triple() {
        // Pairs of [0.5, 0.0, 0.5]: 0.5, 0.0, 0.5 -> mean 1/3
        let diff = mean_abs_pairwise_diff(&[0.5, 0.0, 0.5]);
        assert!((diff - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_direct_pass() {
        let cases: [&[f64]; 4] = [
            &[0.1, 0.4, 0.4, 0.05, 0.05],
            &[1.0, 2.0, 3.0, 4.0],
            &[0.0, 0.0, 0.0],
            &[0.25, 0.5, 0.125, 0.125, 0.9, 0.3, 0.01],
        ];

        for values in cases {
            let fast = mean_abs_pairwise_diff(values);
            let direct = mean_abs_pairwise_diff_direct(values);
            assert!(
                (fast - direct).abs() < 1e-12,
                "prefix-sum {fast} vs direct {direct} for {values:?}"
            );
        }
    }

    #[test]
    fn test_identical_values_have_zero_diff() {
        assert_eq!(mean_abs_pairwise_diff(&[0.2, 0.2, 0.2, 0.2]), 0.0);
    }
}
