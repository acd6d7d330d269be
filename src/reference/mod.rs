pub mod data_loader;
pub mod records;

pub use data_loader::{load_food_records, load_recipe_records, parse_food_records, parse_recipe_records};
pub use records::{FoodRecord, FoodTable, RecipeRecord, RecipeTable, SafetyValue, Species};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

use crate::config::AppConfig;

/// Both reference tables, loaded once and handed to every query.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub foods: FoodTable,
    pub recipes: RecipeTable,
}

impl ReferenceData {
    pub fn new(foods: FoodTable, recipes: RecipeTable) -> Self {
        Self { foods, recipes }
    }

    pub async fn load(config: &AppConfig) -> Result<Self> {
        let foods_csv = fs::read_to_string(&config.foods_path)
            .await
            .with_context(|| format!("Failed to read foods CSV file '{}'", config.foods_path.display()))?;
        let foods = parse_food_records(foods_csv.as_bytes())
            .with_context(|| format!("Failed to parse foods CSV file '{}'", config.foods_path.display()))?;

        let recipes_csv = fs::read_to_string(&config.recipes_path)
            .await
            .with_context(|| format!("Failed to read recipes CSV file '{}'", config.recipes_path.display()))?;
        let recipes = parse_recipe_records(recipes_csv.as_bytes())
            .with_context(|| format!("Failed to parse recipes CSV file '{}'", config.recipes_path.display()))?;

        info!(foods = foods.len(), recipes = recipes.len(), "reference data loaded");
        Ok(Self::new(foods, recipes))
    }
}
