//! Survey builder
//!
//! Drafts come from an interactive editor or from a JSON, TOML or YAML file.
//! Either way the draft is validated before anything is sent, and field
//! errors are listed by path (`questions[1].options[0]`).

use std::path::{Path, PathBuf};

use chatsurvey_core::survey::{DraftQuestion, MAX_CHAT_CONTEXT_CHARS, ValidationError};
use chatsurvey_core::{QuestionKind, SurveyDraft, SurveyError, SurveyResult};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use super::require_session;
use crate::commands::{prompt_error, require_terminal};
use crate::console::CliConsole;
use crate::context::AppContext;

pub async fn create(ctx: &AppContext, from_file: Option<PathBuf>) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let session = require_session(ctx).await?;

    let draft = match from_file {
        Some(path) => {
            let mut draft = load_draft(&path)?;
            draft.created_by = session.username.clone();
            if let Err(errors) = draft.validate() {
                print_validation(&console, &errors);
                return Err(errors.into());
            }
            draft
        }
        None => {
            require_terminal()?;
            let draft = SurveyDraft::new(session.username.clone());
            match DraftEditor::new(draft, &console).run()? {
                Some(draft) => draft,
                None => {
                    console.note("Survey discarded");
                    return Ok(());
                }
            }
        }
    };

    let payload = draft.to_submission_payload()?;
    let api = ctx.api_client()?;

    let spinner = console.spinner("Creating survey...");
    let result = api.create_survey(&session, &payload).await;
    spinner.finish_and_clear();

    let survey_id = result?;
    console.success(&format!("Created survey #{}: {}", survey_id, payload.title));
    console.note(&format!("Respondents can take it with: chatsurvey take {}", survey_id));
    Ok(())
}

/// Read a draft, picking the format from the file extension
pub fn load_draft(path: &Path) -> SurveyResult<SurveyDraft> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SurveyError::io_with_path(format!("Failed to read survey file: {}", e), path.display().to_string())
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let draft = match extension.as_deref() {
        Some("toml") => toml::from_str(&content)
            .map_err(|e| SurveyError::invalid_input(format!("Invalid TOML survey: {}", e)))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .map_err(|e| SurveyError::invalid_input(format!("Invalid YAML survey: {}", e)))?,
        _ => serde_json::from_str(&content)
            .map_err(|e| SurveyError::invalid_input(format!("Invalid JSON survey: {}", e)))?,
    };
    Ok(draft)
}

fn print_validation(console: &CliConsole, errors: &ValidationError) {
    console.error(errors.summary());
    for line in errors.all_errors() {
        println!("    {} {}", "-".red(), line);
    }
}

const MENU: [&str; 7] = [
    "Edit title, subtitle and chat context",
    "Add a question",
    "Edit a question",
    "Remove a question",
    "Preview",
    "Create survey",
    "Discard",
];

struct DraftEditor<'a> {
    draft: SurveyDraft,
    console: &'a CliConsole,
    theme: ColorfulTheme,
}

impl<'a> DraftEditor<'a> {
    fn new(draft: SurveyDraft, console: &'a CliConsole) -> Self {
        Self {
            draft,
            console,
            theme: ColorfulTheme::default(),
        }
    }

    /// Returns the finished draft, or None when discarded
    fn run(&mut self) -> SurveyResult<Option<SurveyDraft>> {
        self.console.print_header("New survey");
        self.edit_details()?;
        self.edit_question(0)?;

        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Survey builder")
                .items(&MENU)
                .default(1)
                .interact()
                .map_err(prompt_error)?;

            match choice {
                0 => self.edit_details()?,
                1 => {
                    let index = self.draft.add_question();
                    self.edit_question(index)?;
                }
                2 => {
                    if let Some(index) = self.pick_question("Edit which question?")? {
                        self.edit_question(index)?;
                    }
                }
                3 => self.remove_question()?,
                4 => self.preview(),
                5 => match self.draft.validate() {
                    Ok(()) => return Ok(Some(self.draft.clone())),
                    Err(errors) => print_validation(self.console, &errors),
                },
                _ => {
                    let discard = Confirm::with_theme(&self.theme)
                        .with_prompt("Discard this survey?")
                        .default(false)
                        .interact()
                        .map_err(prompt_error)?;
                    if discard {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn text(&self, prompt: &str, current: &str) -> SurveyResult<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn edit_details(&mut self) -> SurveyResult<()> {
        self.draft.title = self.text("Title", &self.draft.title)?;
        self.draft.subtitle = self.text("Subtitle", &self.draft.subtitle)?;
        self.draft.name = self.text("Internal name (optional)", &self.draft.name)?;
        self.draft.description = self.text("Description (optional)", &self.draft.description)?;
        self.console.note(&format!(
            "The chat context guides the follow-up conversation (up to {} characters)",
            MAX_CHAT_CONTEXT_CHARS
        ));
        self.draft.chat_context = self.text("Chat context", &self.draft.chat_context)?;
        Ok(())
    }

    fn pick_question(&self, prompt: &str) -> SurveyResult<Option<usize>> {
        let labels: Vec<String> = self
            .draft
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| question_label(i, q))
            .collect();
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)
    }

    fn remove_question(&mut self) -> SurveyResult<()> {
        let Some(index) = self.pick_question("Remove which question?")? else {
            return Ok(());
        };
        match self.draft.remove_question(index) {
            Ok(_) => self.console.success("Question removed"),
            Err(e) => self.console.warn(&e.to_string()),
        }
        Ok(())
    }

    fn edit_question(&mut self, index: usize) -> SurveyResult<()> {
        let current = self.draft.question(index)?.clone();
        let text = self.text(&format!("Question {}", index + 1), &current.text)?;
        self.draft.set_question_text(index, text)?;

        let labels: Vec<&str> = QuestionKind::ALL.iter().map(|k| k.label()).collect();
        let selected = QuestionKind::ALL
            .iter()
            .position(|k| *k == current.kind)
            .unwrap_or(0);
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Type")
            .items(&labels)
            .default(selected)
            .interact()
            .map_err(prompt_error)?;
        let kind = QuestionKind::ALL[choice];
        self.draft.set_question_type(index, kind)?;

        if kind.needs_options() {
            self.edit_options(index)?;
        }
        Ok(())
    }

    fn edit_options(&mut self, index: usize) -> SurveyResult<()> {
        // Fill blanks first so a new question reads naturally
        let options = self.draft.question(index)?.options.clone();
        for (i, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                let text = self.text(&format!("Option {}", i + 1), option)?;
                self.draft.set_option(index, i, text)?;
            }
        }

        loop {
            let options = self.draft.question(index)?.options.clone();
            let mut items: Vec<String> = options
                .iter()
                .enumerate()
                .map(|(i, o)| format!("Edit option {}: {}", i + 1, o))
                .collect();
            items.push("Add an option".to_string());
            items.push("Remove an option".to_string());
            items.push("Done".to_string());

            let choice = Select::with_theme(&self.theme)
                .with_prompt("Options")
                .items(&items)
                .default(options.len())
                .interact()
                .map_err(prompt_error)?;

            if choice < options.len() {
                let text = self.text(&format!("Option {}", choice + 1), &options[choice])?;
                self.draft.set_option(index, choice, text)?;
            } else if choice == options.len() {
                let at = self.draft.add_option(index, options.len() - 1)?;
                let text = self.text(&format!("Option {}", at + 1), "")?;
                self.draft.set_option(index, at, text)?;
            } else if choice == options.len() + 1 {
                let pick = Select::with_theme(&self.theme)
                    .with_prompt("Remove which option?")
                    .items(&options)
                    .default(0)
                    .interact_opt()
                    .map_err(prompt_error)?;
                if let Some(option_index) = pick {
                    if let Err(e) = self.draft.remove_option(index, option_index) {
                        self.console.warn(&e.to_string());
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    fn preview(&self) {
        let draft = &self.draft;
        self.console.print_header(if draft.title.is_empty() {
            "(untitled)"
        } else {
            &draft.title
        });
        if !draft.subtitle.is_empty() {
            println!("{}", draft.subtitle.dimmed());
        }
        for (i, question) in draft.questions().iter().enumerate() {
            println!("{}", question_label(i, question));
            for option in question.submitted_options() {
                println!("    {} {}", "•".dimmed(), option);
            }
        }
        println!();
    }
}

fn question_label(index: usize, question: &DraftQuestion) -> String {
    let text = if question.text.trim().is_empty() {
        "(no text)"
    } else {
        question.text.as_str()
    };
    format!("{}. {} [{}]", index + 1, text, question.kind.label())
}
