//! # Recipe Corpus Module
//!
//! Loads the recipe collection the ranker reads from.
//!
//! The corpus file is a JSON array of recipe documents. Individual documents are
//! never rejected; see [`Recipe::from_document`].

use crate::engine_errors::EngineError;
use crate::recipe_model::Recipe;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse a corpus from JSON text
///
/// # Errors
///
/// Returns `EngineError::Corpus` if the text is not JSON or the top level is
/// not an array.
///
/// # Examples
///
/// ```rust
/// use cookify::recipe_corpus::parse_corpus;
///
/// let corpus = parse_corpus(r#"[{"title": "Toast", "ingredients": ["bread"]}, "junk"]"#)?;
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus[0].title(), Some("Toast"));
/// assert!(corpus[1].ingredient_list().is_empty());
/// # Ok::<(), cookify::engine_errors::EngineError>(())
/// ```
pub fn parse_corpus(json: &str) -> Result<Vec<Recipe>, EngineError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| EngineError::Corpus(format!("Invalid recipe JSON: {e}")))?;
    let Value::Array(documents) = document else {
        return Err(EngineError::Corpus(
            "Recipe corpus must be a JSON array".to_string(),
        ));
    };
    Ok(documents.into_iter().map(Recipe::from_document).collect())
}

/// Read and parse a corpus file
pub fn load_corpus(path: &Path) -> Result<Vec<Recipe>, EngineError> {
    let json = fs::read_to_string(path).map_err(|e| {
        EngineError::Corpus(format!("Failed to read recipes {}: {}", path.display(), e))
    })?;
    let corpus = parse_corpus(&json)?;
    info!("Loaded {} recipes from {}", corpus.len(), path.display());
    Ok(corpus)
}
