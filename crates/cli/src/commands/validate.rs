//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PlanSummary>,
}

#[derive(Serialize)]
struct PlanSummary {
    version: String,
    corpus: String,
    tokenizer: String,
    exclude_stopwords: bool,
    sink_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(plan) => {
            let warnings = collect_warnings(&plan);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(PlanSummary {
                    version: format!("{:?}", plan.version),
                    corpus: describe_corpus(&plan),
                    tokenizer: format!("{:?}", plan.tokenizer.kind),
                    exclude_stopwords: plan.analysis.exclude_stopwords,
                    sink_count: plan.sinks.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(plan: &contracts::AnalysisPlan) -> Vec<String> {
    let mut warnings = Vec::new();

    // Check for empty sinks
    if plan.sinks.is_empty() {
        warnings.push("No sinks configured - results will only be summarized".to_string());
    }

    // Corpus source existence is a runtime error; flag it early here
    if let Some(ref dir) = plan.corpus.dir {
        if plan.corpus.files.is_empty() && !dir.is_dir() {
            warnings.push(format!("Corpus directory '{}' does not exist", dir.display()));
        }
    }
    for path in &plan.corpus.files {
        if !path.is_file() {
            warnings.push(format!("Corpus file '{}' does not exist", path.display()));
        }
    }

    // Stopword list is optional but should exist when configured
    if let Some(ref path) = plan.tokenizer.stopwords_path {
        if !path.is_file() {
            warnings.push(format!(
                "Stopword list '{}' does not exist; exclusion will have no effect",
                path.display()
            ));
        }
    }

    warnings
}

fn describe_corpus(plan: &contracts::AnalysisPlan) -> String {
    if !plan.corpus.files.is_empty() {
        format!("{} explicit files", plan.corpus.files.len())
    } else if let Some(ref dir) = plan.corpus.dir {
        format!("directory {}", dir.display())
    } else {
        "(none)".to_string()
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Corpus: {}", summary.corpus);
            println!("  Tokenizer: {}", summary.tokenizer);
            println!("  Exclude stopwords: {}", summary.exclude_stopwords);
            println!("  Sinks: {}", summary.sink_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
