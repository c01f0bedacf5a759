//! Command implementations

pub mod admin;
pub mod config;
pub mod health;
pub mod pending;
pub mod take;

use chatsurvey_core::{SurveyError, SurveyResult};
use console::Term;

/// Terminal prompt failures (closed stdin, no tty)
pub(crate) fn prompt_error(error: dialoguer::Error) -> SurveyError {
    SurveyError::io(format!("Prompt failed: {}", error))
}

/// Prompting commands need a terminal on both ends
pub(crate) fn require_terminal() -> SurveyResult<()> {
    if Term::stdout().is_term() && Term::stderr().is_term() {
        Ok(())
    } else {
        Err(SurveyError::invalid_input(
            "This command is interactive and needs a terminal",
        ))
    }
}
