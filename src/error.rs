use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetFoodError {
    InvalidSpecies(String),
    EmptyIngredientList,
    MalformedRecipe { recipe_name: String, reason: String },
}

impl fmt::Display for PetFoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetFoodError::InvalidSpecies(value) => {
                write!(f, "Invalid species '{}': expected Dog or Cat", value)
            }
            PetFoodError::EmptyIngredientList => {
                write!(f, "No ingredients left after normalization")
            }
            PetFoodError::MalformedRecipe { recipe_name, reason } => {
                write!(f, "Malformed recipe '{}': {}", recipe_name, reason)
            }
        }
    }
}

impl Error for PetFoodError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_offending_value() {
        let err = PetFoodError::InvalidSpecies("hamster".to_string());
        assert_eq!(err.to_string(), "Invalid species 'hamster': expected Dog or Cat");

        let err = PetFoodError::MalformedRecipe {
            recipe_name: "Empty Bowl".to_string(),
            reason: "no required ingredients".to_string(),
        };
        assert!(err.to_string().contains("Empty Bowl"));
        assert!(err.to_string().contains("no required ingredients"));
    }
}
