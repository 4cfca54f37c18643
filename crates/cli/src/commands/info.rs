//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    corpus: CorpusInfo,
    tokenizer: TokenizerInfo,
    analysis: AnalysisInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
}

#[derive(Serialize)]
struct CorpusInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<String>,
    file_count: usize,
}

#[derive(Serialize)]
struct TokenizerInfo {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stopwords_path: Option<String>,
}

#[derive(Serialize)]
struct AnalysisInfo {
    exclude_stopwords: bool,
    progress_every: usize,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty")]
    params: std::collections::HashMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let plan = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&plan, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&plan, args);
    }

    Ok(())
}

fn build_config_info(plan: &contracts::AnalysisPlan, args: &InfoArgs) -> ConfigInfo {
    let sinks = if args.sinks {
        plan.sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
                params: s.params.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", plan.version),
        corpus: CorpusInfo {
            dir: plan.corpus.dir.as_ref().map(|d| d.display().to_string()),
            file_count: plan.corpus.files.len(),
        },
        tokenizer: TokenizerInfo {
            kind: format!("{:?}", plan.tokenizer.kind),
            stopwords_path: plan
                .tokenizer
                .stopwords_path
                .as_ref()
                .map(|p| p.display().to_string()),
        },
        analysis: AnalysisInfo {
            exclude_stopwords: plan.analysis.exclude_stopwords,
            progress_every: plan.analysis.progress_every,
        },
        sinks,
    }
}

fn print_config_info(plan: &contracts::AnalysisPlan, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║             Corpus Dispersion Configuration                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Corpus info
    println!("📚 Corpus");
    println!("   ├─ Version: {:?}", plan.version);
    match &plan.corpus.dir {
        Some(dir) => println!("   ├─ Directory: {}", dir.display()),
        None => println!("   ├─ Directory: (none)"),
    }
    println!("   └─ Explicit files: {}", plan.corpus.files.len());

    // Tokenizer
    println!("\n🔤 Tokenizer");
    println!("   ├─ Kind: {:?}", plan.tokenizer.kind);
    match &plan.tokenizer.stopwords_path {
        Some(path) => println!("   └─ Stopwords: {}", path.display()),
        None => println!("   └─ Stopwords: (none)"),
    }

    // Analysis settings
    println!("\n⚙️  Analysis Settings");
    println!(
        "   ├─ Exclude stopwords: {}",
        plan.analysis.exclude_stopwords
    );
    println!(
        "   └─ Progress cadence: every {} units",
        plan.analysis.progress_every
    );

    // Sinks
    if !plan.sinks.is_empty() {
        println!("\n📤 Sinks ({})", plan.sinks.len());
        for (i, sink) in plan.sinks.iter().enumerate() {
            let is_last = i == plan.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            println!("   {} {} ({:?})", prefix, sink.name, sink.sink_type);

            if args.sinks && !sink.params.is_empty() {
                let child_prefix = if is_last { "   " } else { "│  " };
                for (key, value) in &sink.params {
                    println!("   {}     {} = {}", child_prefix, key, value);
                }
            }
        }
    }

    println!();
}
