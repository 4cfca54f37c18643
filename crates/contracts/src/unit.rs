//! Vocabulary unit identity and per-unit result row.

use serde::{Deserialize, Serialize};

use crate::DispersionMetrics;

/// A vocabulary unit: (surface form, part-of-speech tag)
///
/// Both components are opaque strings assigned by the tokenizer collaborator.
/// Ordering is lexicographic on (word, pos) and gives runs a deterministic
/// output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitKey {
    /// Surface form
    pub word: String,

    /// Part-of-speech tag
    pub pos: String,
}

impl UnitKey {
    /// Create a new unit key
    pub fn new(word: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos: pos.into(),
        }
    }
}

impl std::fmt::Display for UnitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.word, self.pos)
    }
}

/// One output row: a unit, its corpus-wide frequency, and its metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitResult {
    /// Surface form
    pub word: String,

    /// Part-of-speech tag
    pub pos: String,

    /// Total frequency across all corpus parts (after stopword policy)
    pub total_frequency: f64,

    /// Computed dispersion metrics
    pub metrics: DispersionMetrics,
}

impl UnitResult {
    /// Unit key of this row
    pub fn key(&self) -> UnitKey {
        UnitKey::new(self.word.clone(), self.pos.clone())
    }
}
