//! # Input Validation Module
//!
//! Checks the shape of ingredient lists arriving from outside the engine.
//!
//! Both operations take a list of ingredient strings. Anything that is not a
//! non-empty list of strings is rejected up front with `EngineError::Validation`.

use crate::engine_errors::EngineError;
use serde_json::Value;

pub const MISSING_INGREDIENTS: &str = "Please provide an array of ingredients";

/// Extract an ingredient list from a JSON value
///
/// # Examples
///
/// ```rust
/// use cookify::input_validation::ingredients_from_json;
/// use serde_json::json;
///
/// assert_eq!(ingredients_from_json(&json!(["egg", "milk"]))?, vec!["egg", "milk"]);
/// assert!(ingredients_from_json(&json!("egg")).is_err());
/// # Ok::<(), cookify::engine_errors::EngineError>(())
/// ```
pub fn ingredients_from_json(value: &Value) -> Result<Vec<String>, EngineError> {
    let Value::Array(items) = value else {
        return Err(EngineError::Validation(MISSING_INGREDIENTS.to_string()));
    };

    let ingredients = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                EngineError::Validation(format!("Ingredient at position {} is not a string", index))
            })
        })
        .collect::<Result<Vec<String>, EngineError>>()?;

    require_ingredients(&ingredients)?;
    Ok(ingredients)
}

/// Extract the `ingredients` field of a request body
pub fn request_ingredients(body: &Value) -> Result<Vec<String>, EngineError> {
    match body.get("ingredients") {
        Some(value) => ingredients_from_json(value),
        None => Err(EngineError::Validation(MISSING_INGREDIENTS.to_string())),
    }
}

/// Reject an empty ingredient list
pub fn require_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Result<(), EngineError> {
    if ingredients.is_empty() {
        return Err(EngineError::Validation(MISSING_INGREDIENTS.to_string()));
    }
    Ok(())
}
