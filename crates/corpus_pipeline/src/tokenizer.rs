//! Whitespace tokenizer
//!
//! Deterministic built-in collaborator for plain-text corpora. Real
//! segmentation/tagging services implement the same `Tokenizer` trait and
//! are injected in place of this one.

use std::collections::HashSet;
use std::path::Path;

use contracts::{ContractError, TokenizedText, Tokenizer, UnitKey};
use tracing::info;

/// Whitespace segmenter with coarse part-of-speech classes
///
/// Splits on Unicode whitespace, trims surrounding punctuation, and tags
/// each token as `word`, `num`, `mixed`, or `punct`. The valid token count
/// is taken after cleaning and BEFORE stopword filtering, so part sizes are
/// not distorted by the exclusion policy.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer {
    stop_words: HashSet<String>,
}

impl WhitespaceTokenizer {
    /// Create a tokenizer with no stopword list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with the given stopword set
    pub fn with_stopwords(stop_words: HashSet<String>) -> Self {
        Self { stop_words }
    }

    /// Load a stopword list file, replacing any previous set
    ///
    /// One word per line; blank lines and `#` comments are skipped.
    /// Returns the number of stopwords loaded.
    pub fn load_stopwords(&mut self, path: &Path) -> Result<usize, ContractError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ContractError::config_validation(
                "tokenizer.stopwords_path",
                format!("cannot read '{}': {e}", path.display()),
            )
        })?;

        let stop_words: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        info!(path = %path.display(), count = stop_words.len(), "stopword list loaded");
        self.stop_words = stop_words;
        Ok(self.stop_words.len())
    }

    /// Number of stopwords currently loaded
    pub fn stopword_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Clean one raw token into (surface form, pos class)
    fn clean(raw: &str) -> (String, &'static str) {
        let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if trimmed.is_empty() {
            // Pure punctuation token; keep the raw form
            return (raw.to_string(), "punct");
        }
        (trimmed.to_string(), Self::classify(trimmed))
    }

    fn classify(word: &str) -> &'static str {
        if word.chars().all(|c| c.is_numeric()) {
            "num"
        } else if word.chars().all(|c| c.is_alphabetic()) {
            "word"
        } else {
            "mixed"
        }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn tokenize(
        &self,
        text: &str,
        exclude_stopwords: bool,
    ) -> Result<TokenizedText, ContractError> {
        let mut units = Vec::new();
        let mut valid_token_count = 0usize;

        for raw in text.split_whitespace() {
            let (word, pos) = Self::clean(raw);
            valid_token_count += 1;

            if exclude_stopwords && !self.stop_words.is_empty() && self.stop_words.contains(&word)
            {
                continue;
            }
            units.push(UnitKey::new(word, pos));
        }

        Ok(TokenizedText {
            units,
            valid_token_count,
        })
    }
}
