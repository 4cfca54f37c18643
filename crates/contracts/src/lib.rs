//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Corpus Model
//! - A run analyzes a fixed, ordered list of corpus parts (0..N-1)
//! - A vocabulary unit is a (word, part-of-speech) pair, both opaque strings
//! - Part sizes count valid tokens BEFORE stopword filtering

mod cancel;
mod error;
mod event;
mod metrics_record;
mod plan;
mod reader;
mod run;
mod sink;
mod tokenizer;
mod unit;

pub use cancel::CancellationToken;
pub use error::*;
pub use event::{AnalysisEvent, EventCallback};
pub use metrics_record::DispersionMetrics;
pub use plan::*;
pub use reader::DocumentReader;
pub use run::RunStats;
pub use sink::*;
pub use tokenizer::{TokenizedText, Tokenizer};
pub use unit::{UnitKey, UnitResult};
