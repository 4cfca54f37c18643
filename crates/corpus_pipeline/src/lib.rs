//! # Corpus Pipeline
//!
//! Corpus aggregation pipeline: discovery, per-document counting, vocabulary
//! merge, per-unit metric computation.
//!
//! ## Phases
//!
//! 1. Per-document counting (tokenize + count, sizes before stopword removal)
//! 2. Vocabulary merge (union of units, absent from a part ⇒ 0)
//! 3. Metric computation per unit via the dispersion engine
//!
//! Phases are strictly sequential; Phase 2 needs every part size final, and
//! Phase 3 needs the whole vocabulary. Progress is reported through the
//! `AnalysisEvent` stream; cancellation is cooperative.
//!
//! ## Usage Example
//!
//! ```ignore
//! use corpus_pipeline::{CorpusPipeline, FsDocumentReader, WhitespaceTokenizer};
//! use contracts::{AnalysisSettings, CancellationToken, CorpusSource};
//! use std::sync::Arc;
//!
//! let pipeline = CorpusPipeline::new(
//!     Arc::new(WhitespaceTokenizer::new()),
//!     Arc::new(FsDocumentReader),
//!     AnalysisSettings::default(),
//! );
//!
//! let (events, rx) = corpus_pipeline::channel_events(64);
//! let outcome = pipeline.run(
//!     &CorpusSource::Directory("corpus/".into()),
//!     &events,
//!     &CancellationToken::new(),
//! )?;
//! ```

mod discovery;
mod events;
mod pipeline;
mod reader;
mod tokenizer;
mod vocabulary;

pub use discovery::resolve_parts;
pub use events::channel_events;
pub use pipeline::{CorpusPipeline, RunOutcome};
pub use reader::FsDocumentReader;
pub use tokenizer::WhitespaceTokenizer;
pub use vocabulary::{UnitEntry, VocabularyAccumulator};

// Re-export contract types
pub use contracts::{
    AnalysisEvent, AnalysisSettings, CancellationToken, ContractError, CorpusSource,
    EventCallback, RunStats, TokenizedText, Tokenizer, UnitKey, UnitResult,
};
