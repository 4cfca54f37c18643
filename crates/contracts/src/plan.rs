//! AnalysisPlan - Config Loader output
//!
//! Describes a complete analysis run: corpus source, tokenizer selection,
//! analysis policy, output routing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete analysis run blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPlan {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Corpus input selection
    pub corpus: CorpusConfig,

    /// Tokenizer collaborator settings
    #[serde(default)]
    pub tokenizer: TokenizerSettings,

    /// Analysis policy
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Output routing configuration
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Corpus input: a directory of `.txt` files or an explicit file list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory whose immediate `.txt` children form the corpus
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Explicit file list, filtered to existing `.txt` files
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

/// Resolved corpus input handed to the pipeline
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// All immediate `.txt` children of a directory, sorted by file name
    Directory(PathBuf),
    /// Explicit paths in caller order
    Files(Vec<PathBuf>),
}

/// Tokenizer selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizerSettings {
    /// Which built-in tokenizer to construct
    #[serde(default)]
    pub kind: TokenizerKind,

    /// Optional stopword list file (one word per line, `#` comments)
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
}

/// Built-in tokenizer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Deterministic whitespace segmenter with coarse POS classes
    #[default]
    Whitespace,
}

/// Analysis policy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Exclude stopwords from frequency counts and dispersion analysis.
    /// Part sizes for normalization stay based on the pre-filter count.
    #[serde(default = "default_exclude_stopwords")]
    pub exclude_stopwords: bool,

    /// Phase 3 progress/cancellation cadence in units, must be > 0
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

fn default_exclude_stopwords() -> bool {
    true
}

fn default_progress_every() -> usize {
    50
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            exclude_stopwords: default_exclude_stopwords(),
            progress_every: default_progress_every(),
        }
    }
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Type-specific parameters (e.g. `path`, `precision`)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    100
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Tabular CSV output
    Csv,
    /// One JSON object per row
    Jsonl,
    /// Log output
    Log,
}

impl AnalysisPlan {
    /// Build the corpus source from the configured input selection
    ///
    /// An explicit file list takes precedence over a directory when both
    /// are present.
    pub fn corpus_source(&self) -> Option<CorpusSource> {
        if !self.corpus.files.is_empty() {
            return Some(CorpusSource::Files(self.corpus.files.clone()));
        }
        self.corpus
            .dir
            .as_ref()
            .map(|dir| CorpusSource::Directory(dir.clone()))
    }
}
