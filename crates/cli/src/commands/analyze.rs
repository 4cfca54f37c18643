//! `analyze` command implementation.

use anyhow::{Context, Result};
use contracts::{CancellationToken, CorpusConfig};
use tracing::{info, warn};

use crate::analysis::{Analysis, AnalysisConfig};
use crate::cli::AnalyzeArgs;

/// Execute the `analyze` command
pub async fn run_analysis(args: &AnalyzeArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut plan = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref dir) = args.corpus_dir {
        info!(dir = %dir.display(), "Overriding corpus directory from CLI");
        plan.corpus = CorpusConfig {
            dir: Some(dir.clone()),
            files: vec![],
        };
    }
    if args.include_stopwords {
        info!("Stopword exclusion disabled from CLI");
        plan.analysis.exclude_stopwords = false;
    }

    info!(
        corpus_dir = ?plan.corpus.dir,
        corpus_files = plan.corpus.files.len(),
        exclude_stopwords = plan.analysis.exclude_stopwords,
        sinks = plan.sinks.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_plan_summary(&plan);
        return Ok(());
    }

    // Build analysis configuration
    let analysis_config = AnalysisConfig {
        plan,
        buffer_size: args.buffer_size,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    let analysis = Analysis::new(analysis_config);

    // Wire graceful shutdown to the cancellation token
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Received shutdown signal, cancelling analysis...");
        signal_cancel.cancel();
    });

    info!("Starting analysis...");

    let stats = analysis.run(cancel).await.context("Analysis failed")?;

    info!(
        units = stats.run.units_analyzed,
        duration_secs = stats.duration.as_secs_f64(),
        cancelled = stats.run.cancelled,
        "Analysis completed"
    );

    stats.print_summary();

    info!("Corpus Dispersion finished");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print plan summary for dry-run mode
fn print_plan_summary(plan: &contracts::AnalysisPlan) {
    println!("\n=== Analysis Plan Summary ===\n");
    println!("Corpus:");
    match (&plan.corpus.dir, plan.corpus.files.len()) {
        (_, n) if n > 0 => println!("  Files: {n} explicit paths"),
        (Some(dir), _) => println!("  Directory: {}", dir.display()),
        (None, _) => println!("  (no source configured)"),
    }

    println!("\nTokenizer:");
    println!("  Kind: {:?}", plan.tokenizer.kind);
    match &plan.tokenizer.stopwords_path {
        Some(path) => println!("  Stopwords: {}", path.display()),
        None => println!("  Stopwords: (none)"),
    }

    println!("\nAnalysis:");
    println!("  Exclude stopwords: {}", plan.analysis.exclude_stopwords);
    println!("  Progress cadence: every {} units", plan.analysis.progress_every);

    if !plan.sinks.is_empty() {
        println!("\nSinks ({}):", plan.sinks.len());
        for sink in &plan.sinks {
            println!("  - {} ({:?})", sink.name, sink.sink_type);
        }
    }

    println!();
}
