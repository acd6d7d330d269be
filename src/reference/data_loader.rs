use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use super::records::{FoodRecord, FoodTable, RecipeRecord, RecipeTable, SafetyValue};

// Expected column headers
pub const INGREDIENT_COL: &str = "ingredient";
pub const DOG_SAFETY_COL: &str = "is_safe_for_dogs";
pub const CAT_SAFETY_COL: &str = "is_safe_for_cats";
pub const NOTES_COL: &str = "notes";
pub const RECIPE_NAME_COL: &str = "recipe_name";
pub const RECIPE_INGREDIENTS_COL: &str = "ingredients";

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

pub fn parse_food_records<R: Read>(reader: R) -> Result<FoodTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let ingredient_idx = column_index(&headers, INGREDIENT_COL)?;
    let dog_idx = column_index(&headers, DOG_SAFETY_COL)?;
    let cat_idx = column_index(&headers, CAT_SAFETY_COL)?;
    let notes_idx = column_index(&headers, NOTES_COL)?;

    let mut foods = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read food record at row index {}", row_index))?;

        let ingredient = cell(&record, ingredient_idx);
        if ingredient.trim().is_empty() {
            debug!(row_index, "skipping food row with empty ingredient");
            continue;
        }

        foods.push(FoodRecord::new(
            ingredient,
            SafetyValue::from_cell(cell(&record, dog_idx)),
            SafetyValue::from_cell(cell(&record, cat_idx)),
            cell(&record, notes_idx),
        ));
    }

    if foods.is_empty() {
        return Err(anyhow::anyhow!("No valid food records loaded"));
    }

    Ok(FoodTable::new(foods))
}

pub fn parse_recipe_records<R: Read>(reader: R) -> Result<RecipeTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let name_idx = column_index(&headers, RECIPE_NAME_COL)?;
    let ingredients_idx = column_index(&headers, RECIPE_INGREDIENTS_COL)?;
    let notes_idx = column_index(&headers, NOTES_COL)?;

    let mut recipes = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read recipe record at row index {}", row_index))?;

        let name = cell(&record, name_idx);
        if name.trim().is_empty() {
            debug!(row_index, "skipping recipe row with empty name");
            continue;
        }

        match RecipeRecord::from_ingredient_list(
            name,
            cell(&record, ingredients_idx),
            cell(&record, notes_idx),
        ) {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => warn!(row_index, error = %e, "skipping recipe row"),
        }
    }

    if recipes.is_empty() {
        return Err(anyhow::anyhow!("No valid recipe records loaded"));
    }

    Ok(RecipeTable::new(recipes))
}

pub fn load_food_records(csv_path: &Path) -> Result<FoodTable> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Foods CSV file not found at: {:?}", csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open foods CSV file at {:?}", csv_path))?;
    parse_food_records(file).with_context(|| format!("Failed to parse foods CSV file at {:?}", csv_path))
}

pub fn load_recipe_records(csv_path: &Path) -> Result<RecipeTable> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Recipes CSV file not found at: {:?}", csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open recipes CSV file at {:?}", csv_path))?;
    parse_recipe_records(file).with_context(|| format!("Failed to parse recipes CSV file at {:?}", csv_path))
}
