//! Plain-text rendering of query results for the terminal.

use std::fmt::{self, Write};

use crate::history::SessionHistory;
use crate::recipe_matcher::RecipeSuggestion;
use crate::reference::{FoodRecord, Species};
use crate::safety_classifier::ClassificationResult;
use crate::safety_overview::{SafetyCategory, SafetyOverview};

pub const EMPTY_CHECK_PROMPT: &str = "Please enter at least one ingredient.";
pub const EMPTY_SUGGEST_PROMPT: &str = "Enter ingredients first to get recipes.";
pub const NO_RECIPES_MESSAGE: &str = "No recipes matched your ingredients.";
pub const NO_HISTORY_MESSAGE: &str = "No history yet. Try searching some foods!";

fn write_food_table(out: &mut String, records: &[FoodRecord], notes_header: &str) -> fmt::Result {
    let width = records
        .iter()
        .map(|r| r.ingredient.chars().count())
        .chain(std::iter::once("Ingredient".len()))
        .max()
        .unwrap_or(0);

    writeln!(out, "  {:<width$}  {}", "Ingredient", notes_header, width = width)?;
    for record in records {
        writeln!(out, "  {:<width$}  {}", record.ingredient, record.notes, width = width)?;
    }
    Ok(())
}

pub fn render_classification(species: Species, result: &ClassificationResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Results for your {}:", species.label().to_lowercase())?;

    if !result.safe.is_empty() {
        writeln!(out, "\nSafe Ingredients - these foods are safe for your pet.")?;
        write_food_table(&mut out, &result.safe, "Notes")?;
    }
    if !result.r#unsafe.is_empty() {
        writeln!(out, "\nUnsafe Ingredients - these foods are unsafe and should be avoided.")?;
        write_food_table(&mut out, &result.r#unsafe, "Why")?;
    }
    if !result.unknown.is_empty() {
        writeln!(out, "\nUnknown Ingredients - these items aren't in our dataset yet.")?;
        writeln!(out, "  {}", result.unknown.join(", "))?;
    }

    let overview = SafetyOverview::from_result(result);
    let shares: Vec<String> = SafetyCategory::ALL
        .iter()
        .filter_map(|&category| {
            overview
                .percent(category)
                .map(|pct| format!("{} {:.0}%", category.label(), pct))
        })
        .collect();
    if !shares.is_empty() {
        writeln!(out, "\nOverview: {}", shares.join(" | "))?;
    }

    Ok(out)
}

pub fn render_suggestions(suggestions: &[RecipeSuggestion]) -> Result<String, fmt::Error> {
    if suggestions.is_empty() {
        return Ok(format!("{}\n", NO_RECIPES_MESSAGE));
    }

    let mut out = String::from("Recipe Suggestions\n");
    for suggestion in suggestions {
        writeln!(
            out,
            "\n{} ({:.0}% match) - {}",
            suggestion.name,
            suggestion.match_percent(),
            suggestion.notes
        )?;
        writeln!(out, "  You have: {}", suggestion.present.join(", "))?;
        if !suggestion.missing.is_empty() {
            writeln!(out, "  Missing: {}", suggestion.missing.join(", "))?;
        }
    }
    Ok(out)
}

pub fn render_history(history: &SessionHistory) -> Result<String, fmt::Error> {
    if history.is_empty() {
        return Ok(format!("{}\n", NO_HISTORY_MESSAGE));
    }

    let mut out = String::from("Your Search History\n");
    for (i, entry) in history.entries().iter().enumerate() {
        writeln!(out, "{}. {} - {}", i + 1, entry.species, entry.ingredients.join(", "))?;
        if !entry.safe.is_empty() {
            writeln!(out, "   Safe: {}", entry.safe.join(", "))?;
        }
        if !entry.r#unsafe.is_empty() {
            writeln!(out, "   Unsafe: {}", entry.r#unsafe.join(", "))?;
        }
        if !entry.unknown.is_empty() {
            writeln!(out, "   Unknown: {}", entry.unknown.join(", "))?;
        }
    }
    Ok(out)
}
