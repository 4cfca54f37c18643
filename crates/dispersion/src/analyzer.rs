//! Main metric engine implementation.

use contracts::{ContractError, DispersionMetrics};
use tracing::warn;

use crate::evenness::mean_abs_pairwise_diff;

/// Frequency-scale epsilon: totals at or below this count as zero.
const FREQ_EPS: f64 = 1e-9;

/// Proportion-scale epsilon for ratio and log guards.
const PROP_EPS: f64 = 1e-12;

/// Relative tolerance between Σ sizes and the declared corpus total.
/// A larger discrepancy is logged but never fails the unit.
const SUM_TOLERANCE_REL: f64 = 1e-9;

/// Dispersion analyzer for a single vocabulary unit
///
/// Pure and stateless after construction: `calculate_all_metrics` is
/// deterministic and has no side effects. All logarithms are base 2 with
/// the convention `0 · log2(0) = 0`.
#[derive(Debug, Clone)]
pub struct DispersionAnalyzer {
    /// Per-part frequencies of the unit
    v: Vec<f64>,
    /// Part count
    n: usize,
    /// Total frequency of the unit (Σ v_i)
    f: f64,
    /// Expected mass share per part (sizes_i / total)
    s: Vec<f64>,
    /// Local density per part (v_i / sizes_i, 0 for empty parts)
    p: Vec<f64>,
}

impl DispersionAnalyzer {
    /// Create an analyzer for one unit
    ///
    /// # Arguments
    /// * `v` - non-negative per-part frequency vector, length n >= 1
    /// * `sizes` - non-negative per-part size vector, same length
    /// * `total` - total corpus size in tokens, must be positive
    ///
    /// # Errors
    /// Returns `UnitValidation` on mismatched lengths, empty vectors,
    /// negative entries, or a non-positive total.
    pub fn new(v: Vec<f64>, sizes: Vec<f64>, total: f64) -> Result<Self, ContractError> {
        if v.len() != sizes.len() {
            return Err(ContractError::unit_validation(format!(
                "frequency vector length {} does not match part sizes length {}",
                v.len(),
                sizes.len()
            )));
        }
        if v.is_empty() {
            return Err(ContractError::unit_validation(
                "input vectors cannot be empty",
            ));
        }
        if total <= FREQ_EPS {
            return Err(ContractError::unit_validation(
                "total corpus size must be positive",
            ));
        }
        if v.iter().any(|&x| x < 0.0) {
            return Err(ContractError::unit_validation(
                "frequencies cannot be negative",
            ));
        }
        if sizes.iter().any(|&x| x < 0.0) {
            return Err(ContractError::unit_validation(
                "part sizes cannot be negative",
            ));
        }

        let size_sum: f64 = sizes.iter().sum();
        if (size_sum - total).abs() > SUM_TOLERANCE_REL * total {
            warn!(
                size_sum,
                total, "part size sum deviates from declared corpus total"
            );
        }

        let n = v.len();
        let f = v.iter().sum();
        let s: Vec<f64> = sizes.iter().map(|&size| size / total).collect();
        let p: Vec<f64> = v
            .iter()
            .zip(&sizes)
            .map(|(&vi, &size)| if size > FREQ_EPS { vi / size } else { 0.0 })
            .collect();

        Ok(Self { v, n, f, s, p })
    }

    /// Safe base-2 log: 0 for arguments at or below the proportion epsilon
    fn log2_safe(x: f64) -> f64 {
        if x <= PROP_EPS {
            0.0
        } else {
            x.log2()
        }
    }

    /// Single KL divergence term `p · log2(p/q)`
    ///
    /// Returns +inf for p > 0 with q ≈ 0 (infinite divergence).
    fn kl_term(p: f64, q: f64) -> f64 {
        if p <= PROP_EPS {
            return 0.0;
        }
        if q <= PROP_EPS {
            return f64::INFINITY;
        }
        let ratio = p / q;
        if ratio <= PROP_EPS {
            return 0.0;
        }
        p * Self::log2_safe(ratio)
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn population_sd(values: &[f64], mean: f64) -> f64 {
        let variance =
            values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    /// Range: number of parts containing the unit (v_i > 0)
    pub fn range(&self) -> usize {
        self.v.iter().filter(|&&vi| vi > FREQ_EPS).count()
    }

    /// Population standard deviation of the frequencies v_i
    pub fn sd_population(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }
        let mean_v = self.f / self.n as f64;
        Some(Self::population_sd(&self.v, mean_v))
    }

    /// Population variation coefficient of the frequencies v_i
    ///
    /// Undefined when the mean is ~0 while the total frequency is not.
    pub fn vc_population(&self) -> Option<f64> {
        let mean_v = self.f / self.n as f64;
        if mean_v.abs() < PROP_EPS {
            return if self.f < FREQ_EPS { Some(0.0) } else { None };
        }
        self.sd_population().map(|sd| sd / mean_v)
    }

    /// Juilland's D, size-weighted variant over the densities p_i
    pub fn juilland_d(&self) -> Option<f64> {
        if self.n <= 1 {
            return Some(if self.f > FREQ_EPS { 1.0 } else { 0.0 });
        }
        if self.f < FREQ_EPS {
            return Some(0.0);
        }

        let mean_p = Self::mean(&self.p);
        let sd_p = Self::population_sd(&self.p, mean_p);

        if mean_p.abs() < PROP_EPS {
            // All-zero densities are perfectly even; any spread around a
            // zero mean is maximal clumping.
            return Some(if sd_p.abs() < PROP_EPS { 1.0 } else { 0.0 });
        }

        let vc_p = sd_p / mean_p;
        Some(1.0 - vc_p / ((self.n as f64 - 1.0).sqrt()))
    }

    /// Carroll's D2: entropy of the normalized densities over log2(n)
    ///
    /// 0 for a single part (log2(1) = 0 guard) or a zero-frequency unit.
    pub fn carroll_d2(&self) -> Option<f64> {
        if self.n <= 1 || self.f < FREQ_EPS {
            return Some(0.0);
        }

        let p_sum: f64 = self.p.iter().sum();
        if p_sum.abs() < PROP_EPS {
            return Some(0.0);
        }

        let entropy: f64 = self
            .p
            .iter()
            .map(|&pi| pi / p_sum)
            .filter(|&norm| norm > PROP_EPS)
            .map(|norm| -norm * Self::log2_safe(norm))
            .sum();

        let log2_n = Self::log2_safe(self.n as f64);
        if log2_n.abs() < PROP_EPS {
            Some(0.0)
        } else {
            Some(entropy / log2_n)
        }
    }

    /// Rosengren's S_adj: (Σ sqrt(s_i · v_i))² / f
    pub fn rosengren_s_adj(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }
        let sqrt_sum: f64 = self
            .s
            .iter()
            .zip(&self.v)
            .map(|(&si, &vi)| (si * vi).sqrt())
            .sum();
        Some(sqrt_sum.powi(2) / self.f)
    }

    /// DP: deviation of the observed proportions from the expected shares
    pub fn dp(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }
        let abs_diff_sum: f64 = self
            .v
            .iter()
            .zip(&self.s)
            .map(|(&vi, &si)| (vi / self.f - si).abs())
            .sum();
        Some(0.5 * abs_diff_sum)
    }

    /// DP normalized by (1 - min s_i)
    pub fn dp_norm(&self) -> Option<f64> {
        let dp = self.dp()?;
        let min_s = self.s.iter().copied().fold(f64::INFINITY, f64::min);
        let denominator = 1.0 - min_s;

        if denominator.abs() < FREQ_EPS {
            // n = 1 (min_s = 1): DP is 0 or the unit is maximally clumped
            return Some(if dp.abs() < FREQ_EPS { 0.0 } else { 1.0 });
        }
        Some(dp / denominator)
    }

    /// Kullback-Leibler divergence D(P_obs || S), base 2
    ///
    /// +inf as soon as any part has observed mass where the expected share
    /// is ~0.
    pub fn kl_divergence(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }

        let mut kl_sum = 0.0;
        for (&vi, &si) in self.v.iter().zip(&self.s) {
            let term = Self::kl_term(vi / self.f, si);
            if term.is_infinite() {
                return Some(f64::INFINITY);
            }
            kl_sum += term;
        }
        Some(kl_sum)
    }

    /// JSD dispersion: 1 - JSD(P_obs || S) with the mixture M = (P_obs + S)/2
    ///
    /// A divergent one-sided term means maximal divergence, so dispersion 0.
    pub fn jsd_dispersion(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }

        let mut jsd = 0.0;
        for (&vi, &si) in self.v.iter().zip(&self.s) {
            let p_obs = vi / self.f;
            let mixture = 0.5 * (p_obs + si);

            let obs_term = Self::kl_term(p_obs, mixture);
            if obs_term.is_infinite() {
                return Some(0.0);
            }
            let expected_term = Self::kl_term(si, mixture);
            if expected_term.is_infinite() {
                return Some(0.0);
            }
            jsd += 0.5 * (obs_term + expected_term);
        }

        // JSD with log2 lives in [0, 1]; clamp away float residue
        Some(1.0 - jsd.clamp(0.0, 1.0))
    }

    /// Hellinger dispersion: 1 - sqrt(1 - BC) with the Bhattacharyya
    /// coefficient clamped to [0, 1]
    pub fn hellinger_dispersion(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }

        let bc: f64 = self
            .v
            .iter()
            .zip(&self.s)
            .map(|(&vi, &si)| (vi / self.f * si).sqrt())
            .sum();
        let bc = bc.clamp(0.0, 1.0);

        Some(1.0 - (1.0 - bc).sqrt())
    }

    /// Mean text frequency FT: mean of the per-part densities p_i
    pub fn mean_text_frequency_ft(&self) -> Option<f64> {
        Some(Self::mean(&self.p))
    }

    /// Pervasiveness PT: proportion of parts containing the unit
    pub fn pervasiveness_pt(&self) -> Option<f64> {
        Some(self.range() as f64 / self.n as f64)
    }

    /// Evenness DA per Egbert & Burch (2023) / Burch et al. (2016)
    ///
    /// `1 − meanPairwise|p_i − p_j| / (2 · mean(p))`, clamped to [0, 1].
    /// 1 for a single part; 0 for a zero-frequency unit.
    pub fn evenness_da(&self) -> Option<f64> {
        if self.f < FREQ_EPS {
            return Some(0.0);
        }
        if self.n == 1 {
            return Some(1.0);
        }

        let mean_p = Self::mean(&self.p);
        if mean_p.abs() < PROP_EPS {
            // Densities all at the same (zero) level are perfectly even
            let all_level = self.p.iter().all(|&pi| (pi - mean_p).abs() < PROP_EPS);
            return Some(if all_level { 1.0 } else { 0.0 });
        }

        let avg_pairwise_diff = mean_abs_pairwise_diff(&self.p);
        let da = 1.0 - avg_pairwise_diff / (2.0 * mean_p);
        Some(da.clamp(0.0, 1.0))
    }

    /// FT adjusted by pervasiveness (FT · PT)
    pub fn ft_adjusted_by_pt(&self) -> Option<f64> {
        let ft = self.mean_text_frequency_ft()?;
        let pt = self.pervasiveness_pt()?;
        Some(ft * pt)
    }

    /// FT adjusted by evenness (FT · DA)
    pub fn ft_adjusted_by_da(&self) -> Option<f64> {
        let ft = self.mean_text_frequency_ft()?;
        let da = self.evenness_da()?;
        Some(ft * da)
    }

    /// Compute all 16 metrics as one immutable record
    pub fn calculate_all_metrics(&self) -> DispersionMetrics {
        DispersionMetrics {
            range: self.range(),
            sd_population: self.sd_population(),
            vc_population: self.vc_population(),
            juilland_d: self.juilland_d(),
            carroll_d2: self.carroll_d2(),
            rosengren_s_adj: self.rosengren_s_adj(),
            dp: self.dp(),
            dp_norm: self.dp_norm(),
            kl_divergence: self.kl_divergence(),
            jsd_dispersion: self.jsd_dispersion(),
            hellinger_dispersion: self.hellinger_dispersion(),
            mean_text_frequency_ft: self.mean_text_frequency_ft(),
            pervasiveness_pt: self.pervasiveness_pt(),
            evenness_da: self.evenness_da(),
            ft_adjusted_by_pt: self.ft_adjusted_by_pt(),
            ft_adjusted_by_da: self.ft_adjusted_by_da(),
        }
    }

    /// Part count
    pub fn part_count(&self) -> usize {
        self.n
    }

    /// Total frequency of the unit
    pub fn total_frequency(&self) -> f64 {
        self.f
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64, what: &str) {
        let actual = actual.unwrap_or_else(|| panic!("{what} unexpectedly undefined"));
        assert!(
            (actual - expected).abs() < 1e-6,
            "{what}: expected {expected}, got {actual}"
        );
    }

    fn even_thirds() -> DispersionAnalyzer {
        // 3 parts of 10 tokens, unit in the first and last part only
        DispersionAnalyzer::new(vec![5.0, 0.0, 5.0], vec![10.0, 10.0, 10.0], 30.0).unwrap()
    }

    #[test]
    fn test_three_part_scenario() {
        let analyzer = even_thirds();

        assert_eq!(analyzer.range(), 2);
        assert_close(analyzer.pervasiveness_pt(), 2.0 / 3.0, "PT");
        assert_close(analyzer.mean_text_frequency_ft(), 1.0 / 3.0, "FT");
        assert_close(analyzer.evenness_da(), 0.5, "DA");
        assert_close(analyzer.juilland_d(), 0.5, "Juilland D");
        assert_close(analyzer.dp(), 1.0 / 3.0, "DP");
        assert_close(analyzer.dp_norm(), 0.5, "DP_norm");
        assert_close(analyzer.sd_population(), 2.357023, "SD");
        assert_close(analyzer.vc_population(), 0.707107, "VC");
        assert_close(analyzer.carroll_d2(), 0.630930, "Carroll D2");
        assert_close(analyzer.rosengren_s_adj(), 2.0 / 3.0, "Rosengren S_adj");
        assert_close(analyzer.kl_divergence(), 0.584963, "KL");
        assert_close(analyzer.jsd_dispersion(), 0.809126, "JSD dispersion");
        assert_close(analyzer.hellinger_dispersion(), 0.571627, "Hellinger");
    }

    #[test]
    fn test_single_part_scenario() {
        let analyzer = DispersionAnalyzer::new(vec![4.0], vec![8.0], 8.0).unwrap();

        assert_eq!(analyzer.range(), 1);
        assert_close(analyzer.juilland_d(), 1.0, "Juilland D");
        assert_close(analyzer.evenness_da(), 1.0, "DA");
        assert_close(analyzer.carroll_d2(), 0.0, "Carroll D2");
        assert_close(analyzer.pervasiveness_pt(), 1.0, "PT");
        assert_close(analyzer.dp(), 0.0, "DP");
        assert_close(analyzer.dp_norm(), 0.0, "DP_norm");
        assert_close(analyzer.kl_divergence(), 0.0, "KL");
    }

    #[test]
    fn test_zero_frequency_unit() {
        // Cannot occur via the pipeline, but constructible directly
        let analyzer = DispersionAnalyzer::new(vec![0.0, 0.0], vec![5.0, 5.0], 10.0).unwrap();

        assert_eq!(analyzer.range(), 0);
        assert_close(analyzer.pervasiveness_pt(), 0.0, "PT");
        assert_close(analyzer.evenness_da(), 0.0, "DA");
        assert_close(analyzer.dp(), 0.0, "DP");
        assert_close(analyzer.kl_divergence(), 0.0, "KL");
        assert_close(analyzer.sd_population(), 0.0, "SD");
        assert_close(analyzer.vc_population(), 0.0, "VC");
        assert_close(analyzer.juilland_d(), 0.0, "Juilland D");
        assert_close(analyzer.jsd_dispersion(), 0.0, "JSD dispersion");
    }

    #[test]
    fn test_kl_zero_iff_matching_distributions() {
        let analyzer = DispersionAnalyzer::new(vec![2.0, 2.0], vec![10.0, 10.0], 20.0).unwrap();
        assert_close(analyzer.kl_divergence(), 0.0, "KL at p_obs == s");

        let skewed = DispersionAnalyzer::new(vec![3.0, 1.0], vec![10.0, 10.0], 20.0).unwrap();
        assert!(skewed.kl_divergence().unwrap() > 0.0);
    }

    #[test]
    fn test_kl_infinite_on_zero_size_part() {
        // Observed mass in a part with no expected share
        let analyzer = DispersionAnalyzer::new(vec![1.0, 1.0], vec![0.0, 10.0], 10.0).unwrap();
        assert!(analyzer.kl_divergence().unwrap().is_infinite());
        // JSD handles the same shape without diverging
        let jsd = analyzer.jsd_dispersion().unwrap();
        assert!((0.0..=1.0).contains(&jsd));
    }

    #[test]
    fn test_bounds_hold_for_uneven_corpus() {
        let analyzer =
            DispersionAnalyzer::new(vec![7.0, 0.0, 1.0, 2.0], vec![20.0, 5.0, 10.0, 65.0], 100.0)
                .unwrap();
        let metrics = analyzer.calculate_all_metrics();

        assert!(metrics.range <= 4);
        assert!((0.0..=1.0).contains(&metrics.pervasiveness_pt.unwrap()));
        assert!((0.0..=1.0).contains(&metrics.evenness_da.unwrap()));
        assert!((0.0..=1.0).contains(&metrics.jsd_dispersion.unwrap()));
        assert!((0.0..=1.0).contains(&metrics.hellinger_dispersion.unwrap()));
        assert!(metrics.kl_divergence.unwrap() >= 0.0);
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        assert!(DispersionAnalyzer::new(vec![1.0], vec![1.0, 2.0], 3.0).is_err());
        assert!(DispersionAnalyzer::new(vec![], vec![], 1.0).is_err());
        assert!(DispersionAnalyzer::new(vec![1.0], vec![1.0], 0.0).is_err());
        assert!(DispersionAnalyzer::new(vec![-1.0], vec![1.0], 1.0).is_err());
        assert!(DispersionAnalyzer::new(vec![1.0], vec![-1.0], 1.0).is_err());
    }

    #[test]
    fn test_density_zero_for_empty_part() {
        // Middle part has size 0; its density must be 0, not a division blowup
        let analyzer = DispersionAnalyzer::new(vec![2.0, 0.0, 2.0], vec![8.0, 0.0, 8.0], 16.0)
            .unwrap();
        // p = [0.25, 0, 0.25] -> mean 1/6
        assert_close(analyzer.mean_text_frequency_ft(), 1.0 / 6.0, "FT");
    }

    #[test]
    fn test_all_metrics_record_is_complete() {
        let metrics = even_thirds().calculate_all_metrics();
        assert!(metrics.sd_population.is_some());
        assert!(metrics.vc_population.is_some());
        assert!(metrics.ft_adjusted_by_pt.is_some());
        assert!(metrics.ft_adjusted_by_da.is_some());
        // Composites are the products of their factors
        let ft = metrics.mean_text_frequency_ft.unwrap();
        let pt = metrics.pervasiveness_pt.unwrap();
        let da = metrics.evenness_da.unwrap();
        assert!((metrics.ft_adjusted_by_pt.unwrap() - ft * pt).abs() < 1e-12);
        assert!((metrics.ft_adjusted_by_da.unwrap() - ft * da).abs() < 1e-12);
    }
}
