//! # Text Normalizer Module
//!
//! Shared string utilities for ingredient matching and parsing:
//! - Case and whitespace normalization
//! - Word tokenization with trivial-token filtering ("of", "a", ...)

use tracing::trace;

/// Tokens at or below this length are treated as noise words
pub const MIN_TOKEN_LENGTH: usize = 3;

/// A normalized ingredient string together with its significant words
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientToken {
    /// The text as supplied by the caller
    pub raw: String,
    /// Trimmed, lowercased form of `raw`
    pub normalized: String,
    /// Significant words of `normalized`, in order
    pub words: Vec<String>,
}

impl IngredientToken {
    /// Build a token from raw ingredient text
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookify::text_normalizer::IngredientToken;
    ///
    /// let token = IngredientToken::new("  Olive Oil of Spain ");
    /// assert_eq!(token.normalized, "olive oil of spain");
    /// assert_eq!(token.words, vec!["olive", "oil", "spain"]);
    /// ```
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let words = tokenize(&normalized);
        Self {
            raw: raw.to_string(),
            normalized,
            words,
        }
    }

    /// True when nothing is left after normalization
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Trim surrounding whitespace and lowercase
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Split on whitespace, dropping tokens of two characters or fewer
pub fn tokenize(s: &str) -> Vec<String> {
    let words: Vec<String> = s
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_LENGTH)
        .map(str::to_string)
        .collect();
    trace!("Tokenized '{}' into {:?}", s, words);
    words
}
