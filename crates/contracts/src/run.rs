//! RunStats - Corpus Pipeline output counters

use serde::{Deserialize, Serialize};

/// Counters describing one pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Eligible documents discovered
    pub documents_total: usize,

    /// Documents that contributed nothing (unreadable or blank)
    pub documents_empty: usize,

    /// Total corpus size in tokens (before stopword filtering)
    pub corpus_tokens: f64,

    /// Distinct units in the merged vocabulary
    pub units_total: usize,

    /// Units with a computed metrics record
    pub units_analyzed: usize,

    /// Units excluded by per-unit validation failures
    pub unit_errors: usize,

    /// Warnings emitted (per-document problems)
    pub warnings: usize,

    /// Whether cancellation cut the run short
    pub cancelled: bool,
}

impl RunStats {
    /// Share of documents that contributed tokens
    pub fn readable_ratio(&self) -> f64 {
        if self.documents_total == 0 {
            return 0.0;
        }
        (self.documents_total - self.documents_empty) as f64 / self.documents_total as f64
    }
}
