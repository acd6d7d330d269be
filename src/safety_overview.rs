use serde::Serialize;

use crate::safety_classifier::ClassificationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SafetyCategory {
    Safe,
    Unsafe,
    Unknown,
}

impl SafetyCategory {
    pub const ALL: [SafetyCategory; 3] = [SafetyCategory::Safe, SafetyCategory::Unsafe, SafetyCategory::Unknown];

    pub fn label(&self) -> &'static str {
        match self {
            SafetyCategory::Safe => "Safe",
            SafetyCategory::Unsafe => "Unsafe",
            SafetyCategory::Unknown => "Unknown",
        }
    }
}

/// Per-category counts of one classification, with their shares of the total.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct SafetyOverview {
    pub safe: usize,
    pub r#unsafe: usize,
    pub unknown: usize,
}

impl SafetyOverview {
    pub fn from_result(result: &ClassificationResult) -> Self {
        Self {
            safe: result.safe.len(),
            r#unsafe: result.r#unsafe.len(),
            unknown: result.unknown.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.r#unsafe + self.unknown
    }

    pub fn count(&self, category: SafetyCategory) -> usize {
        match category {
            SafetyCategory::Safe => self.safe,
            SafetyCategory::Unsafe => self.r#unsafe,
            SafetyCategory::Unknown => self.unknown,
        }
    }

    /// Share of `category` in percent, or `None` for an empty overview.
    pub fn percent(&self, category: SafetyCategory) -> Option<f32> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.count(category) as f32 * 100.0 / total as f32)
    }
}
