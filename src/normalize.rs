//! Ingredient token normalization shared by the classifier and the recipe matcher.

use crate::error::PetFoodError;

/// Normalizes an ingredient name into its join key: surrounding whitespace
/// trimmed, lowercased.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits comma-separated free text into normalized tokens.
///
/// Empty tokens are dropped. Input order is preserved and duplicates are kept;
/// deduplicating for display is left to the caller.
pub fn parse_ingredient_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Same as [`parse_ingredient_list`] but reports an input with no usable token.
pub fn require_ingredients(raw: &str) -> Result<Vec<String>, PetFoodError> {
    let tokens = parse_ingredient_list(raw);
    if tokens.is_empty() {
        return Err(PetFoodError::EmptyIngredientList);
    }
    Ok(tokens)
}
