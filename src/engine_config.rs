//! # Engine Configuration Module
//!
//! This module defines configuration structures for the matching and nutrition
//! engine, including result composition limits and reference data locations.
//! Values can be overridden through environment variables (a `.env` file is
//! honoured).

use crate::engine_errors::EngineError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

// Constants for engine configuration
pub const DEFAULT_TARGET_SIZE: usize = 15;
pub const DEFAULT_SUGGESTION_FLOOR: usize = 3;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
pub const DEFAULT_SERVING_DIVISOR: f64 = 4.0;
pub const DEFAULT_NUTRITION_DATA_PATH: &str = "data/nutrition_data.json";
pub const DEFAULT_RECIPES_PATH: &str = "data/recipes.json";

/// Result composition settings for recipe ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    /// `other`-tier recipes are only added while perfect+high+good is below this size
    pub target_size: usize,
    /// Rating-based suggestions are appended while the result count is below this floor
    pub suggestion_floor: usize,
    /// Maximum number of rating-based suggestions
    pub suggestion_limit: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            suggestion_floor: DEFAULT_SUGGESTION_FLOOR,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// Nutrition calculation settings
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionConfig {
    /// Number of servings totals are divided by for the per-serving view
    pub serving_divisor: f64,
    /// Location of the reference nutrition table
    pub reference_data_path: PathBuf,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            serving_divisor: DEFAULT_SERVING_DIVISOR,
            reference_data_path: PathBuf::from(DEFAULT_NUTRITION_DATA_PATH),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub ranker: RankerConfig,
    pub nutrition: NutritionConfig,
    /// Location of the recipe corpus snapshot
    pub recipes_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ranker: RankerConfig::default(),
            nutrition: NutritionConfig::default(),
            recipes_path: PathBuf::from(DEFAULT_RECIPES_PATH),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the process environment
    ///
    /// Reads `.env` if present, then applies any of:
    /// `COOKIFY_SEARCH_TARGET_SIZE`, `COOKIFY_SUGGESTION_FLOOR`,
    /// `COOKIFY_SUGGESTION_LIMIT`, `COOKIFY_SERVING_DIVISOR`,
    /// `COOKIFY_NUTRITION_DATA`, `COOKIFY_RECIPES`.
    pub fn from_env() -> Result<Self, EngineError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var(&lookup, "COOKIFY_SEARCH_TARGET_SIZE")? {
            config.ranker.target_size = value;
        }
        if let Some(value) = parse_var(&lookup, "COOKIFY_SUGGESTION_FLOOR")? {
            config.ranker.suggestion_floor = value;
        }
        if let Some(value) = parse_var(&lookup, "COOKIFY_SUGGESTION_LIMIT")? {
            config.ranker.suggestion_limit = value;
        }
        if let Some(value) = parse_var::<f64, _>(&lookup, "COOKIFY_SERVING_DIVISOR")? {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EngineError::Config(format!(
                    "COOKIFY_SERVING_DIVISOR must be a positive number, got {value}"
                )));
            }
            config.nutrition.serving_divisor = value;
        }
        if let Some(path) = lookup("COOKIFY_NUTRITION_DATA") {
            config.nutrition.reference_data_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("COOKIFY_RECIPES") {
            config.recipes_path = PathBuf::from(path);
        }

        debug!("Loaded engine configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, EngineError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| EngineError::Config(format!("{key} has invalid value '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.ranker.target_size, 15);
        assert_eq!(config.ranker.suggestion_floor, 3);
        assert_eq!(config.ranker.suggestion_limit, 5);
        assert_eq!(config.nutrition.serving_divisor, 4.0);
        assert_eq!(
            config.nutrition.reference_data_path,
            PathBuf::from("data/nutrition_data.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("COOKIFY_SEARCH_TARGET_SIZE", "20"),
            ("COOKIFY_SUGGESTION_FLOOR", " 1 "),
            ("COOKIFY_SERVING_DIVISOR", "2"),
            ("COOKIFY_RECIPES", "/tmp/recipes.json"),
        ]))
        .unwrap();

        assert_eq!(config.ranker.target_size, 20);
        assert_eq!(config.ranker.suggestion_floor, 1);
        assert_eq!(config.ranker.suggestion_limit, 5);
        assert_eq!(config.nutrition.serving_divisor, 2.0);
        assert_eq!(config.recipes_path, PathBuf::from("/tmp/recipes.json"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_lookup(lookup_from(&[("COOKIFY_SEARCH_TARGET_SIZE", "many")]))
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));

        let err = EngineConfig::from_lookup(lookup_from(&[("COOKIFY_SERVING_DIVISOR", "0")]))
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
