//! # Recipe Ranker Module
//!
//! Ranks a recipe corpus against the ingredients a user has on hand.
//!
//! ## Pipeline
//!
//! 1. Normalize the user's ingredients (empty input is the only hard failure)
//! 2. Score every recipe with [`IngredientMatcher`]
//! 3. Bucket matching recipes into tiers, ordered by similarity within each tier
//! 4. Assemble perfect, high and good matches, topping up from `other` until the
//!    target size, then from top-rated non-matching recipes below the floor

use crate::engine_config::RankerConfig;
use crate::engine_errors::EngineError;
use crate::ingredient_matcher::IngredientMatcher;
use crate::recipe_model::{MatchTier, RankedResult, Recipe, RecipeMatchRecord, TierCounts};
use crate::text_normalizer::IngredientToken;
use tracing::{debug, info, trace};

/// Ranks recipes by ingredient coverage
#[derive(Debug, Clone, Default)]
pub struct RecipeRanker {
    config: RankerConfig,
}

impl RecipeRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank `corpus` against `user_ingredients`
    ///
    /// # Arguments
    ///
    /// * `user_ingredients` - Free-text ingredients the user has on hand
    /// * `corpus` - Read-only snapshot of recipes to rank
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if `user_ingredients` is empty or every
    /// entry is blank. Malformed recipes never fail the ranking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookify::recipe_model::{MatchTier, Recipe};
    /// use cookify::recipe_ranker::RecipeRanker;
    ///
    /// let corpus = vec![Recipe::new("Crepes", &["egg", "flour", "milk"])];
    /// let ranked = RecipeRanker::default().rank(&["egg", "flour"], &corpus)?;
    ///
    /// assert_eq!(ranked.total_matches, 1);
    /// assert_eq!(ranked.results[0].tier, Some(MatchTier::High));
    /// # Ok::<(), cookify::engine_errors::EngineError>(())
    /// ```
    pub fn rank<S: AsRef<str>>(
        &self,
        user_ingredients: &[S],
        corpus: &[Recipe],
    ) -> Result<RankedResult, EngineError> {
        let users = normalize_user_ingredients(user_ingredients)?;
        info!(
            "Ranking {} recipes against {} user ingredients",
            corpus.len(),
            users.len()
        );

        let scored: Vec<RecipeMatchRecord> = corpus
            .iter()
            .map(|recipe| self.score_recipe(&users, recipe))
            .collect();

        let (mut matching, unmatched): (Vec<_>, Vec<_>) =
            scored.into_iter().partition(|record| record.tier.is_some());
        let total_matches = matching.len();

        // sort_by is stable: equal scores keep corpus order
        matching.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

        let mut perfect = Vec::new();
        let mut high = Vec::new();
        let mut good = Vec::new();
        let mut other = Vec::new();
        for record in matching {
            match record.tier {
                Some(MatchTier::Perfect) => perfect.push(record),
                Some(MatchTier::High) => high.push(record),
                Some(MatchTier::Good) => good.push(record),
                _ => other.push(record),
            }
        }
        debug!(
            "Tiers: {} perfect, {} high, {} good, {} other, {} unmatched",
            perfect.len(),
            high.len(),
            good.len(),
            other.len(),
            unmatched.len()
        );

        let mut results = perfect;
        results.append(&mut high);
        results.append(&mut good);

        if results.len() < self.config.target_size {
            let remaining = self.config.target_size - results.len();
            results.extend(other.into_iter().take(remaining));
        }

        if results.len() < self.config.suggestion_floor {
            let suggestions = self.top_rated(unmatched);
            debug!("Appending {} rating-based suggestions", suggestions.len());
            results.extend(suggestions);
        }

        let tier_counts = TierCounts::from_results(&results);
        info!(
            "Ranked {} results ({} matching recipes of {})",
            results.len(),
            total_matches,
            corpus.len()
        );

        Ok(RankedResult {
            results,
            total_matches,
            total_recipes: corpus.len(),
            tier_counts,
        })
    }

    /// Score one recipe against already-normalized user ingredients
    pub fn score_recipe(&self, users: &[IngredientToken], recipe: &Recipe) -> RecipeMatchRecord {
        let matcher = IngredientMatcher::new(&recipe.ingredient_list());
        let summary = matcher.summarize(users);
        let record = RecipeMatchRecord::new(
            recipe.clone(),
            summary.match_count,
            summary.coverage_user(),
            summary.coverage_recipe(),
        );
        trace!(
            "Scored {:?}: match_count={:.2} coverage_user={:.2} coverage_recipe={:.2} score={:.3}",
            recipe.title(),
            record.match_count,
            record.coverage_user,
            record.coverage_recipe,
            record.similarity_score
        );
        record
    }

    fn top_rated(&self, mut unmatched: Vec<RecipeMatchRecord>) -> Vec<RecipeMatchRecord> {
        unmatched.sort_by(|a, b| {
            b.recipe
                .average_rating()
                .total_cmp(&a.recipe.average_rating())
        });
        unmatched
            .into_iter()
            .take(self.config.suggestion_limit)
            .map(RecipeMatchRecord::into_suggested)
            .collect()
    }
}

/// Rank with the default configuration
pub fn rank<S: AsRef<str>>(user_ingredients: &[S], corpus: &[Recipe]) -> Result<RankedResult, EngineError> {
    RecipeRanker::default().rank(user_ingredients, corpus)
}

/// Normalize user ingredients, dropping blank entries
pub fn normalize_user_ingredients<S: AsRef<str>>(
    user_ingredients: &[S],
) -> Result<Vec<IngredientToken>, EngineError> {
    if user_ingredients.is_empty() {
        return Err(EngineError::Validation(
            "Please provide an array of ingredients".to_string(),
        ));
    }

    let tokens: Vec<IngredientToken> = user_ingredients
        .iter()
        .map(|ingredient| IngredientToken::new(ingredient.as_ref()))
        .filter(|token| !token.is_blank())
        .collect();

    if tokens.is_empty() {
        return Err(EngineError::Validation(
            "Ingredient list contains only blank entries".to_string(),
        ));
    }
    Ok(tokens)
}
