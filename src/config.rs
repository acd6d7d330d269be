use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

pub const FOODS_CSV_ENV_VAR: &str = "PET_NUTRITION_FOODS_CSV";
pub const RECIPES_CSV_ENV_VAR: &str = "PET_NUTRITION_RECIPES_CSV";
pub const LOG_LEVEL_ENV_VAR: &str = "PET_NUTRITION_LOG";

pub const DEFAULT_FOODS_CSV_PATH: &str = "data/foods.csv";
pub const DEFAULT_RECIPES_CSV_PATH: &str = "data/recipes.csv";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub foods_path: PathBuf,
    pub recipes_path: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            foods_path: PathBuf::from(DEFAULT_FOODS_CSV_PATH),
            recipes_path: PathBuf::from(DEFAULT_RECIPES_CSV_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            foods_path: non_blank(FOODS_CSV_ENV_VAR).map(PathBuf::from).unwrap_or(defaults.foods_path),
            recipes_path: non_blank(RECIPES_CSV_ENV_VAR).map(PathBuf::from).unwrap_or(defaults.recipes_path),
            log_level: non_blank(LOG_LEVEL_ENV_VAR).unwrap_or(defaults.log_level),
        }
    }

    pub fn with_overrides(mut self, foods_path: Option<PathBuf>, recipes_path: Option<PathBuf>) -> Self {
        if let Some(path) = foods_path {
            self.foods_path = path;
        }
        if let Some(path) = recipes_path {
            self.recipes_path = path;
        }
        self
    }

    /// Logs go to stderr; `RUST_LOG` takes precedence over the configured level.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.foods_path, PathBuf::from("data/foods.csv"));
    }

    #[test]
    fn test_environment_values_and_blank_fallback() {
        let vars: HashMap<&str, &str> = [
            (FOODS_CSV_ENV_VAR, "/srv/pets/foods.csv"),
            (RECIPES_CSV_ENV_VAR, "  "),
            (LOG_LEVEL_ENV_VAR, "debug"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.foods_path, PathBuf::from("/srv/pets/foods.csv"));
        assert_eq!(config.recipes_path, PathBuf::from(DEFAULT_RECIPES_CSV_PATH));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = AppConfig::default().with_overrides(Some(PathBuf::from("foods.csv")), None);
        assert_eq!(config.foods_path, PathBuf::from("foods.csv"));
        assert_eq!(config.recipes_path, PathBuf::from(DEFAULT_RECIPES_CSV_PATH));
    }
}
