//! Append-only log of the checks made during one session.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::reference::Species;
use crate::safety_classifier::ClassificationResult;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    pub species: Species,
    pub ingredients: Vec<String>,
    pub safe: Vec<String>, // display names
    pub r#unsafe: Vec<String>,
    pub unknown: Vec<String>,
}

impl HistoryEntry {
    pub fn from_classification(
        species: Species,
        ingredients: &[String],
        result: &ClassificationResult,
    ) -> Self {
        Self {
            species,
            ingredients: ingredients.to_vec(),
            safe: result.safe.iter().map(|r| r.ingredient.clone()).collect(),
            r#unsafe: result.r#unsafe.iter().map(|r| r.ingredient.clone()).collect(),
            unknown: result.unknown.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{FoodRecord, SafetyValue};

    fn entry(species: Species) -> HistoryEntry {
        let result = ClassificationResult {
            safe: vec![FoodRecord::new("Chicken", SafetyValue::Yes, SafetyValue::Yes, "")],
            r#unsafe: vec![FoodRecord::new("Chocolate", SafetyValue::No, SafetyValue::No, "")],
            unknown: vec!["kale".to_string()],
        };
        let ingredients = vec!["chicken".to_string(), "chocolate".to_string(), "kale".to_string()];
        HistoryEntry::from_classification(species, &ingredients, &result)
    }

    #[test]
    fn test_entry_uses_display_names() {
        let e = entry(Species::Dog);
        assert_eq!(e.safe, vec!["Chicken"]);
        assert_eq!(e.r#unsafe, vec!["Chocolate"]);
        assert_eq!(e.unknown, vec!["kale"]);
    }

    #[test]
    fn test_append_keeps_order_and_clear_empties() {
        let mut history = SessionHistory::new();
        history.append(entry(Species::Dog));
        history.append(entry(Species::Cat));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].species, Species::Dog);
        assert_eq!(history.entries()[1].species, Species::Cat);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_to_json_uses_plain_field_names() -> Result<()> {
        let mut history = SessionHistory::new();
        history.append(entry(Species::Cat));

        let json = history.to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value[0]["species"], "Cat");
        assert_eq!(value[0]["unsafe"][0], "Chocolate");
        Ok(())
    }
}
