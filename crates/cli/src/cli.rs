//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Corpus Dispersion - lexical dispersion statistics for text corpora
#[derive(Parser, Debug)]
#[command(
    name = "corpus-dispersion",
    author,
    version,
    about = "Corpus-wide lexical dispersion analysis",
    long_about = "Computes 16 dispersion metrics for every (word, part-of-speech) unit\n\
                  in a collection of text documents.\n\n\
                  Tokenizes each document, aggregates per-part frequencies into a\n\
                  corpus-wide vocabulary, runs the dispersion metric engine per unit,\n\
                  and exports one result row per unit to the configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CORPUS_DISPERSION_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "CORPUS_DISPERSION_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dispersion analysis
    Analyze(AnalyzeArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "analysis.toml",
        env = "CORPUS_DISPERSION_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the corpus directory from configuration
    #[arg(long, env = "CORPUS_DISPERSION_CORPUS_DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Keep stopwords in the analysis (overrides configuration)
    #[arg(long)]
    pub include_stopwords: bool,

    /// Validate configuration and exit without running the analysis
    #[arg(long)]
    pub dry_run: bool,

    /// Channel buffer size for internal queues
    #[arg(long, default_value = "100", env = "CORPUS_DISPERSION_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "CORPUS_DISPERSION_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "analysis.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "analysis.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show sink configuration details
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
