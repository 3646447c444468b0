//! # API Response Module
//!
//! JSON envelopes returned to callers of the engine.
//!
//! Every response carries a `success` flag. Successful responses wrap their
//! payload in `data`; failures carry a human-readable `error` message.

use crate::engine_errors::EngineError;
use crate::nutrition_model::{NutritionTotals, ReferenceTable};
use crate::recipe_model::{RankedResult, RecipeMatchRecord, TierCounts};
use serde::Serialize;

/// Response to a recipe search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<'a> {
    pub success: bool,
    pub count: usize,
    pub total_matches: usize,
    pub total_recipes: usize,
    pub categories: TierCounts,
    pub data: &'a [RecipeMatchRecord],
}

impl<'a> From<&'a RankedResult> for SearchResponse<'a> {
    fn from(ranked: &'a RankedResult) -> Self {
        Self {
            success: true,
            count: ranked.results.len(),
            total_matches: ranked.total_matches,
            total_recipes: ranked.total_recipes,
            categories: ranked.tier_counts,
            data: &ranked.results,
        }
    }
}

/// Total and per-serving nutrition for an ingredient list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    pub total: NutritionTotals,
    pub per_serving: NutritionTotals,
}

impl NutritionSummary {
    pub fn new(total: NutritionTotals, servings: f64) -> Self {
        let per_serving = total.per_serving(servings);
        Self { total, per_serving }
    }
}

/// Response to a nutrition calculation
#[derive(Debug, Serialize)]
pub struct NutritionResponse {
    pub success: bool,
    pub data: NutritionSummary,
}

impl From<NutritionSummary> for NutritionResponse {
    fn from(data: NutritionSummary) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response listing the reference ingredients
#[derive(Debug, Serialize)]
pub struct ReferenceListResponse<'a> {
    pub success: bool,
    pub count: usize,
    pub data: &'a ReferenceTable,
}

impl<'a> From<&'a ReferenceTable> for ReferenceListResponse<'a> {
    fn from(table: &'a ReferenceTable) -> Self {
        Self {
            success: true,
            count: table.len(),
            data: table,
        }
    }
}

/// Response for a failed request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

impl From<&EngineError> for ErrorResponse {
    fn from(err: &EngineError) -> Self {
        match err {
            // Validation messages are written for the caller; report them bare
            EngineError::Validation(message) => Self::new(message.clone()),
            other => Self::new(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Recipe;
    use crate::recipe_ranker::rank;
    use serde_json::json;

    #[test]
    fn test_search_envelope() {
        let corpus = vec![
            Recipe::new("Crepes", &["egg", "flour", "milk"]),
            Recipe::new("Steak", &["beef"]).with_rating(4.8),
        ];
        let ranked = rank(&["egg", "flour", "milk"], &corpus).unwrap();
        let value = serde_json::to_value(SearchResponse::from(&ranked)).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["count"], json!(2));
        assert_eq!(value["totalMatches"], json!(1));
        assert_eq!(value["totalRecipes"], json!(2));
        assert_eq!(
            value["categories"],
            json!({
                "perfectMatches": 1,
                "highMatches": 0,
                "goodMatches": 0,
                "otherMatches": 0,
                "suggestedRecipes": 1
            })
        );
        assert_eq!(value["data"][0]["title"], json!("Crepes"));
        assert_eq!(value["data"][0]["similarityScore"], json!(1.0));
        assert!(value["data"][0].get("isSuggested").is_none());
        assert_eq!(value["data"][1]["isSuggested"], json!(true));
    }

    #[test]
    fn test_nutrition_envelope() {
        let mut total = NutritionTotals::default();
        total.calories.value = 1000.0;
        let value = serde_json::to_value(NutritionResponse::from(NutritionSummary::new(total, 4.0)))
            .unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["total"]["calories"], json!({"value": 1000.0, "unit": "kcal"}));
        assert_eq!(value["data"]["perServing"]["calories"]["value"], json!(250.0));
        assert_eq!(value["data"]["perServing"]["fiber"]["unit"], json!("g"));
    }

    #[test]
    fn test_error_envelope() {
        let err = EngineError::Validation("Please provide an array of ingredients".to_string());
        assert_eq!(
            serde_json::to_value(ErrorResponse::from(&err)).unwrap(),
            json!({"success": false, "error": "Please provide an array of ingredients"})
        );

        let err = EngineError::Corpus("bad".to_string());
        assert_eq!(ErrorResponse::from(&err).error, "Corpus error: bad");
    }

    #[test]
    fn test_reference_listing() {
        let table = ReferenceTable::from_json_str(
            r#"{"ingredients": {"rice": {"unit": "cup", "calories_per_unit": 206}}}"#,
        )
        .unwrap();
        let value = serde_json::to_value(ReferenceListResponse::from(&table)).unwrap();
        assert_eq!(value["count"], json!(1));
        assert_eq!(value["data"]["rice"]["unit"], json!("cup"));
    }
}
