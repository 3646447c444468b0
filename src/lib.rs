//! # Cookify
//!
//! Ingredient matching and nutrition engine for a recipe service.
//!
//! Ranks a recipe corpus against the ingredients a user has on hand, and turns
//! free-text ingredient lines into nutrient totals using a reference table.
//!
//! ```rust
//! use cookify::recipe_model::Recipe;
//! use cookify::recipe_ranker::rank;
//!
//! let corpus = vec![Recipe::new("Omelette", &["eggs", "butter"])];
//! let ranked = rank(&["Eggs", "butter"], &corpus)?;
//! assert_eq!(ranked.results[0].recipe.title(), Some("Omelette"));
//! # Ok::<(), cookify::engine_errors::EngineError>(())
//! ```

pub mod api_response;
pub mod engine_config;
pub mod engine_errors;
pub mod ingredient_matcher;
pub mod ingredient_parser;
pub mod ingredient_patterns;
pub mod input_validation;
pub mod nutrition_aggregator;
pub mod nutrition_model;
pub mod observability;
pub mod recipe_corpus;
pub mod recipe_model;
pub mod recipe_ranker;
pub mod reference_data;
pub mod text_normalizer;
