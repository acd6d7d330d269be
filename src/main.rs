use anyhow::{Context, Result};
use pet_nutrition::cli::{ingredient_tokens, parse_args, Command};
use pet_nutrition::config::AppConfig;
use pet_nutrition::recipe_matcher::suggest;
use pet_nutrition::reference::ReferenceData;
use pet_nutrition::report::{render_classification, render_suggestions, EMPTY_CHECK_PROMPT, EMPTY_SUGGEST_PROMPT};
use pet_nutrition::safety_classifier::classify;
use pet_nutrition::safety_overview::SafetyOverview;
use pet_nutrition::session::Session;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();
    let config = AppConfig::from_env().with_overrides(cli_args.foods.clone(), cli_args.recipes.clone());
    config.init_logging();

    // Loaded once; every query below reads this snapshot.
    let data = ReferenceData::load(&config)
        .await
        .context("Failed to load reference data")?;

    match cli_args.command {
        Command::Check { species, ingredients } => {
            let ingredients = ingredient_tokens(&ingredients);
            if ingredients.is_empty() {
                println!("{}", EMPTY_CHECK_PROMPT);
                return Ok(());
            }

            let result = classify(species, &ingredients, &data.foods);
            if cli_args.json {
                let payload = json!({
                    "species": species,
                    "result": result,
                    "overview": SafetyOverview::from_result(&result),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", render_classification(species, &result)?);
            }
        }
        Command::Suggest { ingredients } => {
            let ingredients = ingredient_tokens(&ingredients);
            if ingredients.is_empty() {
                println!("{}", EMPTY_SUGGEST_PROMPT);
                return Ok(());
            }

            let suggestions = suggest(&ingredients, &data.recipes);
            if cli_args.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                print!("{}", render_suggestions(&suggestions)?);
            }
        }
        Command::Session => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session = Session::new(&data);
            session.run(stdin.lock(), stdout.lock())?;
            if cli_args.json && !session.history().is_empty() {
                println!("{}", session.history().to_json()?);
            }
        }
    }

    Ok(())
}
