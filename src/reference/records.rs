use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PetFoodError;
use crate::normalize::{normalize_token, parse_ingredient_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn label(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = PetFoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "dog" => Ok(Species::Dog),
            "cat" => Ok(Species::Cat),
            _ => Err(PetFoodError::InvalidSpecies(s.to_string())),
        }
    }
}

/// Tri-state safety value of one species column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyValue {
    Yes,
    No,
    #[default]
    Unknown,
}

impl SafetyValue {
    /// Reads a free-text cell. Only `yes` and `no` (any case, any padding)
    /// are meaningful; blanks and anything else are unknown.
    pub fn from_cell(cell: &str) -> Self {
        match normalize_token(cell).as_str() {
            "yes" => SafetyValue::Yes,
            "no" => SafetyValue::No,
            _ => SafetyValue::Unknown,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FoodRecord {
    pub ingredient: String,
    pub ingredient_key: String,
    pub safe_for_dog: SafetyValue,
    pub safe_for_cat: SafetyValue,
    pub notes: String,
}

impl FoodRecord {
    pub fn new(
        ingredient: &str,
        safe_for_dog: SafetyValue,
        safe_for_cat: SafetyValue,
        notes: &str,
    ) -> Self {
        Self {
            ingredient: ingredient.trim().to_string(),
            ingredient_key: normalize_token(ingredient),
            safe_for_dog,
            safe_for_cat,
            notes: notes.trim().to_string(),
        }
    }

    pub fn safety_for(&self, species: Species) -> SafetyValue {
        match species {
            Species::Dog => self.safe_for_dog,
            Species::Cat => self.safe_for_cat,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeRecord {
    pub name: String,
    pub notes: String,
    pub required_ingredients: Vec<String>, // normalized keys, no repeats
}

impl RecipeRecord {
    /// Builds a recipe from its comma-separated ingredients cell.
    /// Repeated keys collapse onto their first occurrence.
    pub fn from_ingredient_list(
        name: &str,
        ingredients: &str,
        notes: &str,
    ) -> Result<Self, PetFoodError> {
        let mut required_ingredients: Vec<String> = Vec::new();
        for token in parse_ingredient_list(ingredients) {
            if !required_ingredients.contains(&token) {
                required_ingredients.push(token);
            }
        }

        if required_ingredients.is_empty() {
            return Err(PetFoodError::MalformedRecipe {
                recipe_name: name.trim().to_string(),
                reason: "no required ingredients".to_string(),
            });
        }

        Ok(Self {
            name: name.trim().to_string(),
            notes: notes.trim().to_string(),
            required_ingredients,
        })
    }
}

/// Read-only snapshot of the foods table, indexed by ingredient key.
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    records: Vec<FoodRecord>,
    by_key: HashMap<String, Vec<usize>>,
}

impl FoodTable {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_key.entry(record.ingredient_key.clone()).or_default().push(idx);
        }
        Self { records, by_key }
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows whose key equals `key`, in table order.
    pub fn lookup<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a FoodRecord> + 'a {
        self.by_key
            .get(key)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.records[idx])
    }
}

impl FromIterator<FoodRecord> for FoodTable {
    fn from_iter<I: IntoIterator<Item = FoodRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    records: Vec<RecipeRecord>,
}

impl RecipeTable {
    pub fn new(records: Vec<RecipeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RecipeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<RecipeRecord> for RecipeTable {
    fn from_iter<I: IntoIterator<Item = RecipeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
