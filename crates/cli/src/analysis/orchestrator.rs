//! Analysis orchestrator - coordinates all components.
//!
//! Runs the (synchronous) corpus pipeline on a blocking worker, drains its
//! event stream asynchronously, and forwards the final result rows to the
//! exporter fan-out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{AnalysisEvent, AnalysisPlan, CancellationToken, Tokenizer, TokenizerKind};
use corpus_pipeline::{channel_events, CorpusPipeline, FsDocumentReader, WhitespaceTokenizer};
use observability::{record_run_metrics, RunSummaryAggregator};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::AnalysisStats;

/// Analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// The analysis plan
    pub plan: AnalysisPlan,

    /// Channel buffer size
    pub buffer_size: usize,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main analysis orchestrator
pub struct Analysis {
    config: AnalysisConfig,
}

impl Analysis {
    /// Create a new analysis with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Run the analysis to completion
    pub async fn run(self, cancel: CancellationToken) -> Result<AnalysisStats> {
        let start_time = Instant::now();

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let plan = self.config.plan;

        // Build collaborators
        let tokenizer = build_tokenizer(&plan)?;
        info!(tokenizer = tokenizer.name(), "Tokenizer ready");

        let source = plan
            .corpus_source()
            .context("No corpus source configured")?;

        // Setup Exporter
        info!("Setting up exporter...");
        if plan.sinks.is_empty() {
            warn!("No sinks configured - results will only be summarized");
        }
        let (row_tx, row_rx) = mpsc::channel(self.config.buffer_size);
        let exporter =
            export::create_exporter(&plan.sinks, row_rx).context("Failed to create exporter")?;
        let active_sinks = plan.sinks.len();
        let exporter_handle = exporter.spawn();
        info!(active_sinks, "Exporter started");

        // Setup Pipeline on a blocking worker
        let (events, event_rx) = channel_events(self.config.buffer_size);
        let pipeline = CorpusPipeline::new(
            tokenizer,
            Arc::new(FsDocumentReader),
            plan.analysis.clone(),
        );

        info!("Starting corpus pipeline...");
        let worker_cancel = cancel.clone();
        let pipeline_task =
            tokio::task::spawn_blocking(move || pipeline.run(&source, &events, &worker_cancel));

        // Drain the event stream until the pipeline drops its callback
        let mut summary = RunSummaryAggregator::new();
        let mut exported_rows: u64 = 0;

        while let Ok(event) = event_rx.recv().await {
            match event {
                AnalysisEvent::Status { message } => info!(%message, "status"),
                AnalysisEvent::Pass1Progress {
                    current,
                    total,
                    label,
                } => info!(current, total, document = %label, "pass 1"),
                AnalysisEvent::Pass1Complete => info!("pass 1 complete"),
                AnalysisEvent::Pass2Complete => info!("pass 2 complete"),
                AnalysisEvent::Pass3Progress {
                    current,
                    total,
                    unit,
                } => debug!(current, total, unit = %unit, "pass 3"),
                AnalysisEvent::Warning { message } => warn!(%message),
                AnalysisEvent::Error { message } => error!(%message),
                AnalysisEvent::AnalysisComplete => info!("analysis complete"),
                AnalysisEvent::FinalResults { results } => {
                    for row in results {
                        summary.update(&row);
                        exported_rows += 1;
                        if row_tx.send(row).await.is_err() {
                            warn!("Exporter channel closed");
                            break;
                        }
                    }
                }
            }
        }

        // Close the exporter input and wait for sinks to flush
        drop(row_tx);

        let outcome = pipeline_task
            .await
            .context("Pipeline worker panicked")?
            .context("Pipeline execution failed")?;

        let _ = tokio::time::timeout(Duration::from_secs(30), exporter_handle).await;

        record_run_metrics(&outcome.stats);

        let stats = AnalysisStats {
            run: outcome.stats,
            duration: start_time.elapsed(),
            exported_rows,
            active_sinks,
            summary,
        };

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            units = stats.run.units_analyzed,
            "Analysis shutdown complete"
        );

        Ok(stats)
    }
}

/// Construct the tokenizer collaborator from the plan
fn build_tokenizer(plan: &AnalysisPlan) -> Result<Arc<dyn Tokenizer>> {
    match plan.tokenizer.kind {
        TokenizerKind::Whitespace => {
            let mut tokenizer = WhitespaceTokenizer::new();
            if let Some(ref path) = plan.tokenizer.stopwords_path {
                let count = tokenizer
                    .load_stopwords(path)
                    .with_context(|| format!("Failed to load stopwords from {}", path.display()))?;
                info!(count, path = %path.display(), "Stopword list loaded");
            }
            Ok(Arc::new(tokenizer))
        }
    }
}
