use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::PetFoodError;
use crate::normalize::{normalize_token, parse_ingredient_list};
use crate::reference::{RecipeRecord, RecipeTable};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecipeSuggestion {
    pub name: String,
    pub notes: String,
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub match_ratio: f32, // |present| / |required|, always in (0, 1]
}

impl RecipeSuggestion {
    pub fn match_percent(&self) -> f32 {
        self.match_ratio * 100.0
    }
}

/// Scores one recipe against the available ingredient keys.
///
/// Returns `Ok(None)` when no required ingredient is available and
/// `Err(MalformedRecipe)` when the recipe requires nothing at all.
/// `present` and `missing` follow the recipe's own ingredient order.
pub fn score_recipe(
    recipe: &RecipeRecord,
    available: &HashSet<&str>,
) -> Result<Option<RecipeSuggestion>, PetFoodError> {
    let mut seen = HashSet::new();
    let mut present = Vec::new();
    let mut missing = Vec::new();

    for ingredient in &recipe.required_ingredients {
        let key = normalize_token(ingredient);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if available.contains(key.as_str()) {
            present.push(key);
        } else {
            missing.push(key);
        }
    }

    let required = present.len() + missing.len();
    if required == 0 {
        return Err(PetFoodError::MalformedRecipe {
            recipe_name: recipe.name.clone(),
            reason: "no required ingredients".to_string(),
        });
    }
    if present.is_empty() {
        return Ok(None);
    }

    let match_ratio = present.len() as f32 / required as f32;
    Ok(Some(RecipeSuggestion {
        name: recipe.name.clone(),
        notes: recipe.notes.clone(),
        present,
        missing,
        match_ratio,
    }))
}

/// Ranking of one query plus the recipes left out because they are malformed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionReport {
    pub suggestions: Vec<RecipeSuggestion>,
    pub skipped: Vec<PetFoodError>,
}

/// Ranks every recipe sharing at least one ingredient with `user_ingredients`,
/// best match first. Equal ratios keep table order. Malformed recipes are
/// logged as warnings and listed in `skipped`.
pub fn rank_recipes(user_ingredients: &[String], recipes: &RecipeTable) -> SuggestionReport {
    let normalized: Vec<String> = user_ingredients
        .iter()
        .map(|i| normalize_token(i))
        .filter(|i| !i.is_empty())
        .collect();
    if normalized.is_empty() {
        return SuggestionReport::default();
    }
    let available: HashSet<&str> = normalized.iter().map(String::as_str).collect();

    let mut report = SuggestionReport::default();
    for recipe in recipes.records() {
        match score_recipe(recipe, &available) {
            Ok(Some(suggestion)) => report.suggestions.push(suggestion),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "skipping recipe");
                report.skipped.push(e);
            }
        }
    }

    // sort_by is stable
    report
        .suggestions
        .sort_by(|a, b| b.match_ratio.total_cmp(&a.match_ratio));
    debug!(
        matched = report.suggestions.len(),
        skipped = report.skipped.len(),
        total = recipes.len(),
        "scored recipes"
    );
    report
}

pub fn suggest(user_ingredients: &[String], recipes: &RecipeTable) -> Vec<RecipeSuggestion> {
    rank_recipes(user_ingredients, recipes).suggestions
}

pub fn suggest_text(raw_ingredients: &str, recipes: &RecipeTable) -> Vec<RecipeSuggestion> {
    suggest(&parse_ingredient_list(raw_ingredients), recipes)
}
