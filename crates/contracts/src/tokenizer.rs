//! Tokenizer trait - segmentation/tagging collaborator abstraction
//!
//! Defines a unified interface for the external NLP collaborator, decoupling
//! the pipeline from concrete segmenter implementations.

use crate::{ContractError, UnitKey};

/// Output of a single tokenize call
#[derive(Debug, Clone, Default)]
pub struct TokenizedText {
    /// (word, pos) units in document order, AFTER stopword removal when the
    /// exclusion flag was set
    pub units: Vec<UnitKey>,

    /// Valid token count BEFORE stopword removal; this is the part size
    /// used for normalization so the filtering policy cannot distort
    /// denominators
    pub valid_token_count: usize,
}

/// Tokenizer collaborator trait
///
/// Any object implementing this trait can drive Phase 1; implementations
/// are injected rather than probed for.
///
/// # Contract
///
/// - Deterministic: identical input text yields identical output
/// - `tokenize` on a collaborator that is not ready must return an error;
///   the pipeline treats that as run-fatal, unlike per-document read
///   failures
pub trait Tokenizer: Send + Sync {
    /// Collaborator name (used for logging/errors)
    fn name(&self) -> &str;

    /// Whether the collaborator is initialized and usable
    fn is_ready(&self) -> bool;

    /// Segment and tag `text`, returning units and the pre-filter token count
    ///
    /// # Errors
    /// Returns `TokenizerUnavailable` / `TokenizeFailed`; both are run-fatal.
    fn tokenize(&self, text: &str, exclude_stopwords: bool)
        -> Result<TokenizedText, ContractError>;
}
