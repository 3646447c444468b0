//! # Recipe and Match Data Model
//!
//! This module defines the recipe document consumed by the ranker and the
//! per-request records it produces.
//!
//! ## Core Concepts
//!
//! - **Recipe**: a stored recipe document. Only `ingredients` and `averageRating`
//!   are interpreted; every field, those two included, is carried through as stored.
//! - **MatchTier**: discrete match-quality bucket used to order and cap results
//! - **RecipeMatchRecord**: a recipe plus its computed scores for one search
//! - **RankedResult**: the ordered result list with summary counts
//!
//! ## Usage
//!
//! ```rust
//! use cookify::recipe_model::Recipe;
//! use serde_json::json;
//!
//! let recipe = Recipe::from_document(json!({
//!     "title": "Pancakes",
//!     "ingredients": ["Egg", "flour", 42],
//!     "averageRating": 4.5
//! }));
//!
//! assert_eq!(recipe.title(), Some("Pancakes"));
//! assert_eq!(recipe.ingredient_list(), vec!["Egg", "flour"]);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const PERFECT_USER_COVERAGE: f64 = 0.9;
pub const PERFECT_RECIPE_COVERAGE: f64 = 0.7;
pub const HIGH_USER_COVERAGE: f64 = 0.8;
pub const GOOD_USER_COVERAGE: f64 = 0.6;

const AVERAGE_RATING_FIELD: &str = "averageRating";

/// Keys computed per search; stale copies in stored documents are dropped
const COMPUTED_FIELDS: [&str; 3] = ["similarityScore", "matchCount", "isSuggested"];

/// A stored recipe document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Raw ingredient field; may be absent, a string, an array, or anything else
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub ingredients: Value,

    /// All remaining document fields, preserved as-is
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Recipe {
    /// Create a recipe with a title and ingredient list
    pub fn new(title: &str, ingredients: &[&str]) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.to_string()));
        Self {
            ingredients: Value::Array(
                ingredients
                    .iter()
                    .map(|ingredient| Value::String(ingredient.to_string()))
                    .collect(),
            ),
            fields,
        }
    }

    /// Set the average rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.fields
            .insert(AVERAGE_RATING_FIELD.to_string(), Value::from(rating));
        self
    }

    /// Build a recipe from an arbitrary JSON document
    ///
    /// Never fails: a document that is not an object becomes an empty recipe.
    pub fn from_document(document: Value) -> Self {
        match serde_json::from_value(document) {
            Ok(recipe) => recipe,
            Err(e) => {
                warn!("Malformed recipe document treated as empty recipe: {}", e);
                Self::default()
            }
        }
    }

    /// Average review rating; absent or non-numeric values read as 0
    pub fn average_rating(&self) -> f64 {
        self.fields
            .get(AVERAGE_RATING_FIELD)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// The recipe title, if the document has a string title
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// The recipe's ingredients as an ordered list of strings
    ///
    /// Only an array is accepted; non-string elements are skipped. Any other
    /// shape (absent, string, object, number) yields an empty list.
    pub fn ingredient_list(&self) -> Vec<String> {
        match &self.ingredients {
            Value::Array(items) => {
                let list: Vec<String> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                if list.len() != items.len() {
                    warn!(
                        "Recipe {:?} has {} non-string ingredient entries, skipping them",
                        self.title(),
                        items.len() - list.len()
                    );
                }
                list
            }
            Value::Null => Vec::new(),
            other => {
                warn!(
                    "Recipe {:?} has a non-list ingredient field ({}), treating as empty",
                    self.title(),
                    json_type_name(other)
                );
                Vec::new()
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Match-quality bucket, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Perfect,
    High,
    Good,
    Other,
    Suggested,
}

impl MatchTier {
    /// Classify a scored recipe; `None` when nothing matched
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookify::recipe_model::MatchTier;
    ///
    /// assert_eq!(MatchTier::classify(1.0, 1.0, 2.0), Some(MatchTier::Perfect));
    /// assert_eq!(MatchTier::classify(1.0, 0.5, 2.0), Some(MatchTier::High));
    /// assert_eq!(MatchTier::classify(0.0, 0.0, 0.0), None);
    /// ```
    pub fn classify(coverage_user: f64, coverage_recipe: f64, match_count: f64) -> Option<Self> {
        if coverage_user >= PERFECT_USER_COVERAGE && coverage_recipe >= PERFECT_RECIPE_COVERAGE {
            Some(MatchTier::Perfect)
        } else if coverage_user >= HIGH_USER_COVERAGE {
            Some(MatchTier::High)
        } else if coverage_user >= GOOD_USER_COVERAGE {
            Some(MatchTier::Good)
        } else if match_count > 0.0 {
            Some(MatchTier::Other)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Perfect => "perfect",
            MatchTier::High => "high",
            MatchTier::Good => "good",
            MatchTier::Other => "other",
            MatchTier::Suggested => "suggested",
        }
    }
}

/// A recipe with the scores computed for one search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatchRecord {
    #[serde(flatten)]
    pub recipe: Recipe,

    pub similarity_score: f64,

    pub match_count: f64,

    #[serde(skip)]
    pub coverage_user: f64,

    #[serde(skip)]
    pub coverage_recipe: f64,

    #[serde(skip)]
    pub tier: Option<MatchTier>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_suggested: bool,
}

impl RecipeMatchRecord {
    /// Score a recipe from its coverage figures
    pub fn new(mut recipe: Recipe, match_count: f64, coverage_user: f64, coverage_recipe: f64) -> Self {
        recipe
            .fields
            .retain(|key, _| !COMPUTED_FIELDS.contains(&key.as_str()));
        Self {
            recipe,
            similarity_score: similarity_score(coverage_user, coverage_recipe),
            match_count,
            coverage_user,
            coverage_recipe,
            tier: MatchTier::classify(coverage_user, coverage_recipe, match_count),
            is_suggested: false,
        }
    }

    /// Retag a non-matching recipe as a rating-based suggestion
    pub fn into_suggested(mut self) -> Self {
        self.tier = Some(MatchTier::Suggested);
        self.is_suggested = true;
        self
    }
}

/// Weighted combination of user and recipe coverage
pub fn similarity_score(coverage_user: f64, coverage_recipe: f64) -> f64 {
    0.7 * coverage_user + 0.3 * coverage_recipe
}

/// Number of returned results in each tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    #[serde(rename = "perfectMatches")]
    pub perfect: usize,
    #[serde(rename = "highMatches")]
    pub high: usize,
    #[serde(rename = "goodMatches")]
    pub good: usize,
    #[serde(rename = "otherMatches")]
    pub other: usize,
    #[serde(rename = "suggestedRecipes")]
    pub suggested: usize,
}

impl TierCounts {
    /// Count the tiers of an assembled result list
    pub fn from_results(results: &[RecipeMatchRecord]) -> Self {
        let mut counts = Self::default();
        for record in results {
            match record.tier {
                Some(MatchTier::Perfect) => counts.perfect += 1,
                Some(MatchTier::High) => counts.high += 1,
                Some(MatchTier::Good) => counts.good += 1,
                Some(MatchTier::Other) => counts.other += 1,
                Some(MatchTier::Suggested) => counts.suggested += 1,
                None => {}
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.perfect + self.high + self.good + self.other + self.suggested
    }
}

/// Outcome of ranking a corpus against a user's ingredients
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Ordered results: perfect, high, good, other, then suggestions
    pub results: Vec<RecipeMatchRecord>,
    /// Recipes in the corpus with any match
    pub total_matches: usize,
    /// Size of the corpus
    pub total_recipes: usize,
    pub tier_counts: TierCounts,
}
