//! # Ingredient Matcher Module
//!
//! Scores how well a user's ingredients are covered by one recipe's ingredient list.
//!
//! Each user ingredient is matched against the recipe using three tiers, evaluated
//! in order with the first hit winning:
//!
//! 1. **Exact**: normalized strings are equal (weight 1.0)
//! 2. **Substring**: one string contains the other (weight 0.8)
//! 3. **Word overlap**: significant words overlap with the first recipe ingredient
//!    that shares any word (weight 0.5, scaled by the fraction of user words matched)
//!
//! The reverse direction (how many recipe ingredients are covered by the user's
//! list) only considers equality and substring containment.

use crate::text_normalizer::IngredientToken;
use tracing::trace;

pub const EXACT_MATCH_WEIGHT: f64 = 1.0;
pub const SUBSTRING_MATCH_WEIGHT: f64 = 0.8;
pub const WORD_OVERLAP_WEIGHT: f64 = 0.5;

/// Which tier produced a match for a single user ingredient
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Substring,
    WordOverlap {
        /// User words found in the recipe ingredient
        overlapping: usize,
        /// Significant words in the user ingredient
        total: usize,
    },
    NoMatch,
}

/// Result of matching one user ingredient against a recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub kind: MatchKind,
    /// Contribution to the recipe's match count, in [0, 1]
    pub weight: f64,
    /// Index of the recipe ingredient that produced the match
    pub recipe_index: Option<usize>,
}

impl MatchOutcome {
    fn no_match() -> Self {
        Self {
            kind: MatchKind::NoMatch,
            weight: 0.0,
            recipe_index: None,
        }
    }

    /// Whether any tier matched
    pub fn is_match(&self) -> bool {
        !matches!(self.kind, MatchKind::NoMatch)
    }
}

/// Aggregate match figures for one recipe against a full user ingredient list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSummary {
    /// Sum of per-user-ingredient weights; fractional for partial matches
    pub match_count: f64,
    /// Recipe ingredients covered by at least one user ingredient
    pub recipe_match_count: usize,
    pub user_len: usize,
    pub recipe_len: usize,
    /// True when at least one user ingredient matched
    pub any_match: bool,
}

impl MatchSummary {
    /// Fraction of the user's list that matched, denominator floored at 1
    pub fn coverage_user(&self) -> f64 {
        (self.match_count / self.user_len.max(1) as f64).clamp(0.0, 1.0)
    }

    /// Fraction of the recipe's list satisfied by the user, denominator floored at 1
    pub fn coverage_recipe(&self) -> f64 {
        (self.recipe_match_count as f64 / self.recipe_len.max(1) as f64).clamp(0.0, 1.0)
    }
}

/// Matcher bound to one recipe's normalized ingredient list
#[derive(Debug, Clone)]
pub struct IngredientMatcher {
    recipe: Vec<IngredientToken>,
}

impl IngredientMatcher {
    /// Create a matcher for a recipe's ingredients
    ///
    /// Ingredients that are blank after normalization are dropped: an empty string
    /// is a substring of everything and would otherwise match any user ingredient.
    pub fn new<S: AsRef<str>>(recipe_ingredients: &[S]) -> Self {
        let recipe = recipe_ingredients
            .iter()
            .map(|ingredient| IngredientToken::new(ingredient.as_ref()))
            .filter(|token| !token.is_blank())
            .collect();
        Self { recipe }
    }

    /// Number of usable recipe ingredients
    pub fn recipe_len(&self) -> usize {
        self.recipe.len()
    }

    /// Match a single user ingredient against the recipe
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookify::ingredient_matcher::{IngredientMatcher, MatchKind};
    /// use cookify::text_normalizer::IngredientToken;
    ///
    /// let matcher = IngredientMatcher::new(&["Egg", "all-purpose flour"]);
    ///
    /// let exact = matcher.match_ingredient(&IngredientToken::new("egg"));
    /// assert_eq!(exact.kind, MatchKind::Exact);
    ///
    /// let partial = matcher.match_ingredient(&IngredientToken::new("flour"));
    /// assert_eq!(partial.kind, MatchKind::Substring);
    /// assert_eq!(partial.weight, 0.8);
    /// ```
    pub fn match_ingredient(&self, user: &IngredientToken) -> MatchOutcome {
        if user.is_blank() {
            return MatchOutcome::no_match();
        }

        if let Some(index) = self
            .recipe
            .iter()
            .position(|recipe| recipe.normalized == user.normalized)
        {
            return MatchOutcome {
                kind: MatchKind::Exact,
                weight: EXACT_MATCH_WEIGHT,
                recipe_index: Some(index),
            };
        }

        if let Some(index) = self
            .recipe
            .iter()
            .position(|recipe| contains_either(&recipe.normalized, &user.normalized))
        {
            return MatchOutcome {
                kind: MatchKind::Substring,
                weight: SUBSTRING_MATCH_WEIGHT,
                recipe_index: Some(index),
            };
        }

        if user.words.is_empty() {
            return MatchOutcome::no_match();
        }

        // Only the first recipe ingredient sharing any word counts
        for (index, recipe) in self.recipe.iter().enumerate() {
            let overlapping = user
                .words
                .iter()
                .filter(|user_word| {
                    recipe
                        .words
                        .iter()
                        .any(|recipe_word| contains_either(recipe_word, user_word))
                })
                .count();

            if overlapping > 0 {
                let total = user.words.len();
                trace!(
                    "Word overlap '{}' ~ '{}': {}/{} words",
                    user.normalized,
                    recipe.normalized,
                    overlapping,
                    total
                );
                return MatchOutcome {
                    kind: MatchKind::WordOverlap { overlapping, total },
                    weight: WORD_OVERLAP_WEIGHT * (overlapping as f64 / total as f64),
                    recipe_index: Some(index),
                };
            }
        }

        MatchOutcome::no_match()
    }

    /// Whether a recipe ingredient is matched by any user ingredient via
    /// equality or substring containment in either direction
    pub fn is_recipe_ingredient_covered(&self, index: usize, users: &[IngredientToken]) -> bool {
        let Some(recipe) = self.recipe.get(index) else {
            return false;
        };
        users
            .iter()
            .filter(|user| !user.is_blank())
            .any(|user| contains_either(&recipe.normalized, &user.normalized))
    }

    /// Score a full user ingredient list against the recipe
    pub fn summarize(&self, users: &[IngredientToken]) -> MatchSummary {
        let mut match_count = 0.0;
        let mut any_match = false;

        for user in users {
            let outcome = self.match_ingredient(user);
            if outcome.is_match() {
                any_match = true;
                match_count += outcome.weight;
            }
        }

        let recipe_match_count = (0..self.recipe.len())
            .filter(|&index| self.is_recipe_ingredient_covered(index, users))
            .count();

        MatchSummary {
            match_count,
            recipe_match_count,
            user_len: users.len(),
            recipe_len: self.recipe.len(),
            any_match,
        }
    }
}

/// Match score of one user ingredient against a recipe ingredient list, in [0, 1]
pub fn match_score<S: AsRef<str>>(user_ingredient: &str, recipe_ingredients: &[S]) -> f64 {
    IngredientMatcher::new(recipe_ingredients)
        .match_ingredient(&IngredientToken::new(user_ingredient))
        .weight
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}
