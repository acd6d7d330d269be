//! Partitions user ingredients into safe, unsafe and unknown for one species.
//!
//! A token matches a food row when its normalized form equals the row's
//! `ingredient_key`. When several rows share a key, any row marked `no` for the
//! species makes the token unsafe; otherwise the first row marked `yes` makes it
//! safe. A token whose rows are all blank or unknown for the species is unknown,
//! exactly like a token with no row at all.

use serde::Serialize;
use tracing::debug;

use crate::error::PetFoodError;
use crate::normalize::{normalize_token, parse_ingredient_list};
use crate::reference::{FoodRecord, FoodTable, SafetyValue, Species};

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ClassificationResult {
    pub safe: Vec<FoodRecord>,
    pub r#unsafe: Vec<FoodRecord>,
    pub unknown: Vec<String>,
}

impl ClassificationResult {
    pub fn total(&self) -> usize {
        self.safe.len() + self.r#unsafe.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenVerdict<'a> {
    Safe(&'a FoodRecord),
    Unsafe(&'a FoodRecord),
    Unknown,
}

pub fn resolve_token<'a>(token: &str, species: Species, foods: &'a FoodTable) -> TokenVerdict<'a> {
    let mut first_safe = None;
    for record in foods.lookup(token) {
        match record.safety_for(species) {
            SafetyValue::No => return TokenVerdict::Unsafe(record),
            SafetyValue::Yes if first_safe.is_none() => first_safe = Some(record),
            _ => {}
        }
    }
    first_safe.map_or(TokenVerdict::Unknown, TokenVerdict::Safe)
}

/// Classifies each token independently, in input order.
pub fn classify(species: Species, tokens: &[String], foods: &FoodTable) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for token in tokens {
        let key = normalize_token(token);
        if key.is_empty() {
            continue;
        }
        match resolve_token(&key, species, foods) {
            TokenVerdict::Safe(record) => result.safe.push(record.clone()),
            TokenVerdict::Unsafe(record) => result.r#unsafe.push(record.clone()),
            TokenVerdict::Unknown => result.unknown.push(key),
        }
    }

    debug!(
        %species,
        safe_count = result.safe.len(),
        unsafe_count = result.r#unsafe.len(),
        unknown_count = result.unknown.len(),
        "classified ingredients"
    );
    result
}

/// String surface: species name plus comma-separated ingredients.
pub fn classify_text(
    species: &str,
    raw_ingredients: &str,
    foods: &FoodTable,
) -> Result<ClassificationResult, PetFoodError> {
    let species: Species = species.parse()?;
    Ok(classify(species, &parse_ingredient_list(raw_ingredients), foods))
}
