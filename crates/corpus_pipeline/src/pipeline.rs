//! Corpus pipeline main entry

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use contracts::{
    AnalysisEvent, AnalysisSettings, CancellationToken, ContractError, CorpusSource,
    DocumentReader, EventCallback, RunStats, Tokenizer, UnitKey, UnitResult,
};
use dispersion::DispersionAnalyzer;
use tracing::{debug, info, instrument, warn};

use crate::discovery;
use crate::vocabulary::VocabularyAccumulator;

/// Totals at or below this count as an empty corpus / unit.
const FREQ_EPS: f64 = 1e-9;

/// Result of one pipeline invocation
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// One row per analyzed unit, sorted by (word, pos)
    pub results: Vec<UnitResult>,

    /// Run counters
    pub stats: RunStats,
}

/// Run-scoped mutable state, constructed fresh per invocation
///
/// Keeping all per-run state here (instead of on the pipeline) makes the
/// pipeline reentrant across independent runs.
struct RunContext {
    part_sizes: Vec<f64>,
    part_counts: Vec<HashMap<UnitKey, f64>>,
}

impl RunContext {
    fn new(num_parts: usize) -> Self {
        Self {
            part_sizes: vec![0.0; num_parts],
            part_counts: vec![HashMap::new(); num_parts],
        }
    }
}

/// Corpus aggregation pipeline
///
/// Drives the tokenizer and reader collaborators through the three phases
/// and feeds each vocabulary unit into the dispersion engine. Stateless
/// between runs; collaborators are injected at construction.
pub struct CorpusPipeline {
    tokenizer: Arc<dyn Tokenizer>,
    reader: Arc<dyn DocumentReader>,
    settings: AnalysisSettings,
}

impl CorpusPipeline {
    /// Create a pipeline with the given collaborators and settings
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        reader: Arc<dyn DocumentReader>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            tokenizer,
            reader,
            settings,
        }
    }

    /// Run the full analysis over the given corpus source
    ///
    /// Emits the `AnalysisEvent` stream on `events` (ending with exactly one
    /// `FinalResults`) and returns the same rows plus run counters.
    ///
    /// # Errors
    /// Run-fatal only: unusable tokenizer, tokenizer processing failures,
    /// or an invalid corpus source. Per-document and per-unit problems are
    /// recovered and surfaced as `Warning` / `Error` events.
    #[instrument(name = "corpus_pipeline_run", skip_all)]
    pub fn run(
        &self,
        source: &CorpusSource,
        events: &EventCallback,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, ContractError> {
        if !self.tokenizer.is_ready() {
            return Err(ContractError::TokenizerUnavailable {
                name: self.tokenizer.name().to_string(),
            });
        }

        let parts = discovery::resolve_parts(source)?;
        let mut stats = RunStats {
            documents_total: parts.len(),
            ..Default::default()
        };

        if parts.is_empty() {
            events(AnalysisEvent::status("no .txt documents found to process"));
            return Ok(Self::finish_empty(events, stats));
        }

        let mut context = RunContext::new(parts.len());

        // ----- Phase 1: per-document counting -----
        events(AnalysisEvent::status(format!(
            "pass 1: processing {} documents (tokenize, tag, count)",
            parts.len()
        )));

        for (index, path) in parts.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(document = index, "cancellation requested during pass 1");
                stats.cancelled = true;
                events(AnalysisEvent::status("analysis cancelled"));
                return Ok(Self::finish_empty(events, stats));
            }

            let label = file_label(path);
            events(AnalysisEvent::Pass1Progress {
                current: index + 1,
                total: parts.len(),
                label: label.clone(),
            });

            let text = match self.reader.read(path) {
                Ok(text) => text,
                Err(e) => {
                    stats.documents_empty += 1;
                    stats.warnings += 1;
                    metrics::counter!("corpus_documents_total", "status" => "unreadable")
                        .increment(1);
                    events(AnalysisEvent::warning(format!(
                        "document '{label}' unreadable, treated as empty: {e}"
                    )));
                    continue;
                }
            };

            if text.trim().is_empty() {
                stats.documents_empty += 1;
                stats.warnings += 1;
                metrics::counter!("corpus_documents_total", "status" => "empty").increment(1);
                events(AnalysisEvent::warning(format!(
                    "document '{label}' is empty, skipped"
                )));
                continue;
            }

            let tokenized = self
                .tokenizer
                .tokenize(&text, self.settings.exclude_stopwords)?;

            context.part_sizes[index] = tokenized.valid_token_count as f64;

            let mut counts: HashMap<UnitKey, f64> = HashMap::new();
            for unit in tokenized.units {
                *counts.entry(unit).or_insert(0.0) += 1.0;
            }
            debug!(
                document = %label,
                tokens = tokenized.valid_token_count,
                distinct_units = counts.len(),
                "document counted"
            );
            context.part_counts[index] = counts;

            metrics::counter!("corpus_documents_total", "status" => "ok").increment(1);
        }

        events(AnalysisEvent::Pass1Complete);

        let total_size: f64 = context.part_sizes.iter().sum();
        stats.corpus_tokens = total_size;

        if total_size < FREQ_EPS {
            warn!("total corpus token count is zero after pass 1");
            events(AnalysisEvent::status(
                "total corpus token count is zero; dispersion analysis is not possible",
            ));
            return Ok(Self::finish_empty(events, stats));
        }

        // ----- Phase 2: vocabulary merge -----
        events(AnalysisEvent::status(
            "pass 2: aggregating frequencies for all unique (word, pos) units",
        ));

        let mut vocabulary = VocabularyAccumulator::new(parts.len());
        for (index, counts) in context.part_counts.iter().enumerate() {
            vocabulary.merge_part(index, counts);
        }
        stats.units_total = vocabulary.unit_count();

        events(AnalysisEvent::Pass2Complete);

        // ----- Phase 3: metric computation -----
        events(AnalysisEvent::status(format!(
            "pass 3: computing dispersion metrics for {} units",
            stats.units_total
        )));

        let progress_every = self.settings.progress_every.max(1);
        let sorted_units = vocabulary.into_sorted_units();
        let total_units = sorted_units.len();
        let mut results = Vec::with_capacity(total_units);

        for (processed, (key, entry)) in sorted_units.into_iter().enumerate() {
            let current = processed + 1;

            // Batch boundary: progress report + cancellation poll
            if current % progress_every == 0 || current == total_units {
                if cancel.is_cancelled() {
                    info!(unit = current, "cancellation requested during pass 3");
                    stats.cancelled = true;
                    events(AnalysisEvent::status("analysis cancelled"));
                    return Ok(Self::finish_empty(events, stats));
                }
                events(AnalysisEvent::Pass3Progress {
                    current,
                    total: total_units,
                    unit: key.clone(),
                });
            }

            let total_frequency = entry.total_frequency();
            if total_frequency < FREQ_EPS {
                // Cannot occur if pass 2 built the vocabulary correctly
                continue;
            }

            let v = entry.dense_vector(parts.len());
            match DispersionAnalyzer::new(v, context.part_sizes.clone(), total_size) {
                Ok(analyzer) => {
                    let metrics_record = analyzer.calculate_all_metrics();
                    stats.units_analyzed += 1;
                    results.push(UnitResult {
                        word: key.word,
                        pos: key.pos,
                        total_frequency,
                        metrics: metrics_record,
                    });
                }
                Err(e) => {
                    stats.unit_errors += 1;
                    metrics::counter!("corpus_unit_errors_total").increment(1);
                    events(AnalysisEvent::error(format!(
                        "could not analyze unit {key} (total frequency {total_frequency}): {e}"
                    )));
                }
            }
        }

        metrics::counter!("corpus_units_analyzed_total").increment(stats.units_analyzed as u64);

        info!(
            documents = stats.documents_total,
            corpus_tokens = stats.corpus_tokens,
            units = stats.units_analyzed,
            unit_errors = stats.unit_errors,
            "corpus analysis complete"
        );

        events(AnalysisEvent::AnalysisComplete);
        events(AnalysisEvent::FinalResults {
            results: results.clone(),
        });

        Ok(RunOutcome { results, stats })
    }

    /// Terminate with no results while keeping the event-stream invariant:
    /// exactly one terminal `FinalResults`, always last.
    fn finish_empty(events: &EventCallback, stats: RunStats) -> RunOutcome {
        events(AnalysisEvent::FinalResults {
            results: Vec::new(),
        });
        RunOutcome {
            results: Vec::new(),
            stats,
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
