use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::normalize::parse_ingredient_list;
use crate::reference::Species;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check which foods are safe for dogs or cats and get recipe ideas", long_about = None)]
pub struct Cli {
    /// Path to the foods CSV file (overrides PET_NUTRITION_FOODS_CSV)
    #[arg(long, global = true)]
    pub foods: Option<PathBuf>,

    /// Path to the recipes CSV file (overrides PET_NUTRITION_RECIPES_CSV)
    #[arg(long, global = true)]
    pub recipes: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify ingredients as safe, unsafe or unknown for a pet
    Check {
        /// Dog or Cat (any case)
        #[arg(short, long)]
        species: Species,
        /// Ingredients, comma-separated or one per argument; quote names with spaces
        ingredients: Vec<String>,
    },
    /// Suggest recipes ranked by how many of their ingredients you have
    Suggest {
        /// Ingredients, comma-separated or one per argument; quote names with spaces
        ingredients: Vec<String>,
    },
    /// Start an interactive session with search history
    Session,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Each positional argument is its own comma-separated list, so
/// `chicken rice` and `"chicken, rice"` both give two ingredients while
/// `"sweet potato"` stays one.
pub fn ingredient_tokens(args: &[String]) -> Vec<String> {
    args.iter().flat_map(|arg| parse_ingredient_list(arg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::try_parse_from(["pet_nutrition", "check", "--species", "CAT", "tuna,", "onion"]).unwrap();
        match cli.command {
            Command::Check { species, ingredients } => {
                assert_eq!(species, Species::Cat);
                assert_eq!(ingredient_tokens(&ingredients), vec!["tuna", "onion"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_invalid_species_is_rejected() {
        let result = Cli::try_parse_from(["pet_nutrition", "check", "--species", "parrot", "seeds"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "pet_nutrition",
            "suggest",
            "--json",
            "--recipes",
            "custom.csv",
            "chicken",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.recipes, Some(PathBuf::from("custom.csv")));
        assert!(matches!(cli.command, Command::Suggest { .. }));
    }

    #[test]
    fn test_separate_arguments_are_separate_ingredients() {
        let cli = Cli::try_parse_from(["pet_nutrition", "check", "-s", "dog", "chicken", "rice"]).unwrap();
        let Command::Check { ingredients, .. } = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(ingredient_tokens(&ingredients), vec!["chicken", "rice"]);
    }

    #[test]
    fn test_ingredient_tokens_mixes_commas_and_arguments() {
        let args: Vec<String> = ["Sweet Potato, rice", "EGG,", ",", "pumpkin"]
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(ingredient_tokens(&args), vec!["sweet potato", "rice", "egg", "pumpkin"]);
        assert!(ingredient_tokens(&[]).is_empty());
    }
}
