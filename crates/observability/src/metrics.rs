//! Run metrics collection
//!
//! Records pipeline counters to the metrics facade and aggregates key
//! metric distributions in memory for the end-of-run summary.

use contracts::{RunStats, UnitResult};
use metrics::{counter, gauge};

/// Record run counters from pipeline statistics
///
/// Call once after a pipeline run completes.
pub fn record_run_metrics(stats: &RunStats) {
    counter!("corpus_runs_total").increment(1);

    gauge!("corpus_documents").set(stats.documents_total as f64);
    gauge!("corpus_documents_empty").set(stats.documents_empty as f64);
    gauge!("corpus_tokens").set(stats.corpus_tokens);
    gauge!("corpus_units").set(stats.units_total as f64);
    gauge!("corpus_units_analyzed").set(stats.units_analyzed as f64);

    if stats.unit_errors > 0 {
        counter!("corpus_run_unit_errors_total").increment(stats.unit_errors as u64);
    }
    if stats.warnings > 0 {
        counter!("corpus_run_warnings_total").increment(stats.warnings as u64);
    }
    if stats.cancelled {
        counter!("corpus_runs_cancelled_total").increment(1);
    }
}

/// Vocabulary-wide aggregation of key dispersion metrics
///
/// Collects distribution summaries (DP, evenness, KL) across all analyzed
/// units so a host can report corpus-level tendencies without re-reading
/// the result table.
#[derive(Debug, Clone, Default)]
pub struct RunSummaryAggregator {
    /// Units observed
    pub units: u64,

    /// Units whose KL divergence diverged to +inf
    pub infinite_kl_units: u64,

    /// DP distribution
    pub dp_stats: RunningStats,

    /// Evenness (DA) distribution
    pub evenness_stats: RunningStats,

    /// Finite KL divergence distribution
    pub kl_stats: RunningStats,
}

impl RunSummaryAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result row into the aggregate
    pub fn update(&mut self, row: &UnitResult) {
        self.units += 1;

        if let Some(dp) = row.metrics.dp {
            self.dp_stats.push(dp);
        }
        if let Some(da) = row.metrics.evenness_da {
            self.evenness_stats.push(da);
        }
        if let Some(kl) = row.metrics.kl_divergence {
            if kl.is_infinite() {
                self.infinite_kl_units += 1;
            } else {
                self.kl_stats.push(kl);
            }
        }
    }

    /// Produce the summary report
    pub fn summary(&self) -> SummaryReport {
        SummaryReport {
            units: self.units,
            infinite_kl_units: self.infinite_kl_units,
            dp: MetricSummary::from(&self.dp_stats),
            evenness_da: MetricSummary::from(&self.evenness_stats),
            kl_divergence: MetricSummary::from(&self.kl_stats),
        }
    }

    /// Reset the aggregate
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Corpus-level metric summary
#[derive(Debug, Clone, Default)]
pub struct SummaryReport {
    pub units: u64,
    pub infinite_kl_units: u64,
    pub dp: MetricSummary,
    pub evenness_da: MetricSummary,
    pub kl_divergence: MetricSummary,
}

impl std::fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispersion Summary ===")?;
        writeln!(f, "Units analyzed: {}", self.units)?;
        writeln!(f, "DP: {}", self.dp)?;
        writeln!(f, "Evenness DA: {}", self.evenness_da)?;
        writeln!(f, "KL divergence (finite): {}", self.kl_divergence)?;
        if self.infinite_kl_units > 0 {
            writeln!(f, "Units with infinite KL: {}", self.infinite_kl_units)?;
        }
        Ok(())
    }
}

/// Distribution summary for one metric
#[derive(Debug, Clone, Default)]
pub struct MetricSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for MetricSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for MetricSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics accumulator (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a new value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean value
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum observed value
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum observed value
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::DispersionMetrics;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(value);
        }

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = RunSummaryAggregator::new();

        aggregator.update(&UnitResult {
            word: "a".to_string(),
            pos: "word".to_string(),
            total_frequency: 3.0,
            metrics: DispersionMetrics {
                dp: Some(0.2),
                evenness_da: Some(0.8),
                kl_divergence: Some(0.5),
                ..Default::default()
            },
        });
        aggregator.update(&UnitResult {
            word: "b".to_string(),
            pos: "word".to_string(),
            total_frequency: 1.0,
            metrics: DispersionMetrics {
                dp: Some(0.6),
                evenness_da: Some(0.1),
                kl_divergence: Some(f64::INFINITY),
                ..Default::default()
            },
        });

        let summary = aggregator.summary();
        assert_eq!(summary.units, 2);
        assert_eq!(summary.infinite_kl_units, 1);
        assert_eq!(summary.dp.count, 2);
        assert_eq!(summary.kl_divergence.count, 1);
        assert!((summary.dp.mean - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = RunSummaryAggregator::new();
        let output = aggregator.summary().to_string();
        assert!(output.contains("Units analyzed: 0"));
        assert!(output.contains("N/A"));

        aggregator.update(&UnitResult {
            word: "a".to_string(),
            pos: "word".to_string(),
            total_frequency: 1.0,
            metrics: DispersionMetrics {
                dp: Some(0.25),
                ..Default::default()
            },
        });
        let output = aggregator.summary().to_string();
        assert!(output.contains("mean=0.250"));
    }
}
