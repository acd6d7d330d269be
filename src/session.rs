//! Line-oriented interactive session: checks, recipe suggestions and the
//! per-session history log.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::history::{HistoryEntry, SessionHistory};
use crate::normalize::require_ingredients;
use crate::recipe_matcher::suggest;
use crate::reference::{ReferenceData, Species};
use crate::report::{
    render_classification, render_history, render_suggestions, EMPTY_CHECK_PROMPT,
    EMPTY_SUGGEST_PROMPT,
};
use crate::safety_classifier::classify;

pub const HELP_TEXT: &str = "Commands:
  check <dog|cat> <ingredients>   classify comma-separated ingredients
  suggest <ingredients>           suggest recipes using these ingredients
  history [json]                  show this session's checks
  clear                           clear the history
  help                            show this message
  quit                            leave the session";

pub const INVALID_UTF8_REPLY: &str = "Error: input is not valid UTF-8";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    Output(String),
    Quit,
}

pub struct Session<'a> {
    data: &'a ReferenceData,
    history: SessionHistory,
}

impl<'a> Session<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self {
            data,
            history: SessionHistory::new(),
        }
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Classifies and records the check. Empty input is answered with a
    /// prompt and leaves the history untouched.
    pub fn check(&mut self, species: Species, raw_ingredients: &str) -> Result<String> {
        let ingredients = match require_ingredients(raw_ingredients) {
            Ok(ingredients) => ingredients,
            Err(_) => return Ok(EMPTY_CHECK_PROMPT.to_string()),
        };

        let result = classify(species, &ingredients, &self.data.foods);
        self.history
            .append(HistoryEntry::from_classification(species, &ingredients, &result));
        Ok(render_classification(species, &result)?)
    }

    pub fn suggest(&self, raw_ingredients: &str) -> Result<String> {
        match require_ingredients(raw_ingredients) {
            Ok(ingredients) => Ok(render_suggestions(&suggest(&ingredients, &self.data.recipes))?),
            Err(_) => Ok(EMPTY_SUGGEST_PROMPT.to_string()),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Result<SessionReply> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        debug!(command, "session command");

        let output = match command.to_lowercase().as_str() {
            "" => String::new(),
            "quit" | "exit" => return Ok(SessionReply::Quit),
            "help" => HELP_TEXT.to_string(),
            "check" => {
                let (species, ingredients) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match species.parse::<Species>() {
                    Ok(species) => self.check(species, ingredients)?,
                    Err(e) => format!("Error: {}", e),
                }
            }
            "suggest" => self.suggest(rest)?,
            "history" if rest.eq_ignore_ascii_case("json") => self.history.to_json()?,
            "history" => render_history(&self.history)?,
            "clear" => {
                self.history.clear();
                "History cleared.".to_string()
            }
            other => format!("Unknown command '{}'. Type 'help' for the list of commands.", other),
        };
        Ok(SessionReply::Output(output))
    }

    /// Drives the session until `quit` or end of input. A line that is not
    /// valid UTF-8 is answered with an error and the session goes on.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", HELP_TEXT)?;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let reply = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line)?,
                Err(e) => {
                    warn!(error = %e, "rejecting session input line");
                    SessionReply::Output(INVALID_UTF8_REPLY.to_string())
                }
            };
            match reply {
                SessionReply::Quit => break,
                SessionReply::Output(text) if text.is_empty() => {}
                SessionReply::Output(text) => writeln!(output, "{}", text.trim_end())?,
            }
            output.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{FoodRecord, FoodTable, RecipeRecord, RecipeTable, SafetyValue};

    fn sample_data() -> ReferenceData {
        let foods: FoodTable = vec![
            FoodRecord::new("Chicken", SafetyValue::Yes, SafetyValue::Yes, "Cooked"),
            FoodRecord::new("Chocolate", SafetyValue::No, SafetyValue::No, "Theobromine"),
        ]
        .into_iter()
        .collect();
        let recipes: RecipeTable = vec![RecipeRecord::from_ingredient_list(
            "Chicken Rice Bowl",
            "chicken, rice",
            "Simple dinner",
        )
        .unwrap()]
        .into_iter()
        .collect();
        ReferenceData::new(foods, recipes)
    }

    fn output(reply: SessionReply) -> String {
        match reply {
            SessionReply::Output(text) => text,
            SessionReply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_check_records_history() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);

        let text = output(session.handle_line("check Dog chicken, chocolate, kale")?);
        assert!(text.contains("Safe Ingredients"));
        assert!(text.contains("Unsafe Ingredients"));
        assert!(text.contains("kale"));

        assert_eq!(session.history().len(), 1);
        let entry = &session.history().entries()[0];
        assert_eq!(entry.species, Species::Dog);
        assert_eq!(entry.ingredients, vec!["chicken", "chocolate", "kale"]);
        Ok(())
    }

    #[test]
    fn test_empty_check_prompts_and_records_nothing() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);

        assert_eq!(output(session.handle_line("check cat  , ")?), EMPTY_CHECK_PROMPT);
        assert_eq!(output(session.handle_line("check cat")?), EMPTY_CHECK_PROMPT);
        assert!(session.history().is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_species_is_reported_and_session_continues() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);

        let text = output(session.handle_line("check hamster chicken")?);
        assert!(text.starts_with("Error: Invalid species 'hamster'"));
        assert!(session.history().is_empty());

        let text = output(session.handle_line("check cat chicken")?);
        assert!(text.contains("Chicken"));
        Ok(())
    }

    #[test]
    fn test_suggest_does_not_touch_history() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);

        let text = output(session.handle_line("suggest chicken")?);
        assert!(text.contains("Chicken Rice Bowl (50% match)"));
        assert_eq!(output(session.handle_line("suggest")?), EMPTY_SUGGEST_PROMPT);
        assert!(session.history().is_empty());
        Ok(())
    }

    #[test]
    fn test_history_clear_and_quit() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);

        session.handle_line("check dog chicken")?;
        assert!(output(session.handle_line("history")?).contains("1. Dog - chicken"));
        assert!(output(session.handle_line("HISTORY json")?).contains("\"species\": \"Dog\""));
        assert_eq!(output(session.handle_line("clear")?), "History cleared.");
        assert!(session.history().is_empty());
        assert_eq!(session.handle_line("quit")?, SessionReply::Quit);
        Ok(())
    }

    #[test]
    fn test_run_stops_at_quit() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);
        let input = "check dog chicken\n\nbogus\nquit\ncheck dog chocolate\n";
        let mut out = Vec::new();

        session.run(input.as_bytes(), &mut out)?;

        let printed = String::from_utf8(out)?;
        assert!(printed.contains("Unknown command 'bogus'"));
        assert_eq!(session.history().len(), 1);
        Ok(())
    }
    #[test]
    fn test_invalid_utf8_line_does_not_end_session() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);
        let input: &[u8] = b"check dog chicken\ncheck dog \xff\xfe\nhistory\nquit\n";
        let mut out = Vec::new();

        session.run(input, &mut out)?;

        let printed = String::from_utf8(out)?;
        assert!(printed.contains(INVALID_UTF8_REPLY));
        assert!(printed.contains("Your Search History"));
        assert!(printed.contains("1. Dog - chicken"));
        assert_eq!(session.history().len(), 1);
        Ok(())
    }

    #[test]
    fn test_run_handles_crlf_and_missing_final_newline() -> Result<()> {
        let data = sample_data();
        let mut session = Session::new(&data);
        let mut out = Vec::new();

        session.run("check cat chicken\r\nhistory".as_bytes(), &mut out)?;

        let printed = String::from_utf8(out)?;
        assert!(printed.contains("1. Cat - chicken"));
        Ok(())
    }
}
