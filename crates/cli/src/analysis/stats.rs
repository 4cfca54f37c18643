//! Analysis statistics and summary output.

use std::time::Duration;

use contracts::RunStats;
use observability::RunSummaryAggregator;

/// Statistics from an analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalysisStats {
    /// Pipeline run counters
    pub run: RunStats,

    /// Total duration of the analysis
    pub duration: Duration,

    /// Rows handed to the exporter
    pub exported_rows: u64,

    /// Number of sinks that received data
    pub active_sinks: usize,

    /// Vocabulary-wide metric aggregation
    pub summary: RunSummaryAggregator,
}

impl AnalysisStats {
    /// Analyzed units per second throughput
    pub fn units_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.run.units_analyzed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Analysis Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Documents: {}", self.run.documents_total);
        println!("   ├─ Empty/unreadable documents: {}", self.run.documents_empty);
        println!("   ├─ Corpus tokens: {:.0}", self.run.corpus_tokens);
        println!("   ├─ Units analyzed: {}", self.run.units_analyzed);
        println!("   ├─ Units/s: {:.2}", self.units_per_second());
        println!("   ├─ Exported rows: {}", self.exported_rows);
        println!("   └─ Active sinks: {}", self.active_sinks);

        if self.run.cancelled {
            println!("\n⚠️  Run was cancelled before completion");
        }
        if self.run.unit_errors > 0 {
            println!("\n⚠️  Units excluded by validation: {}", self.run.unit_errors);
        }

        let summary = self.summary.summary();
        if summary.units > 0 {
            println!("\n📈 Dispersion Tendencies");
            println!("   ├─ DP: {}", summary.dp);
            println!("   ├─ Evenness DA: {}", summary.evenness_da);
            println!("   └─ KL divergence (finite): {}", summary.kl_divergence);
            if summary.infinite_kl_units > 0 {
                println!("   ⚠ Units with infinite KL: {}", summary.infinite_kl_units);
            }
        }

        println!();
    }
}
