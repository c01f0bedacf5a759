//! Survey and response management

use chatsurvey_core::survey::{AnswerRecord, SurveyResponse};
use chatsurvey_core::{ResponseId, Survey, SurveyId, SurveyResult};
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};

use super::require_session;
use crate::commands::prompt_error;
use crate::console::CliConsole;
use crate::context::AppContext;

/// Surveys created by the logged-in admin
pub async fn list(ctx: &AppContext) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let session = require_session(ctx).await?;
    let api = ctx.api_client()?;

    let spinner = console.spinner("Fetching surveys...");
    let result = api.list_surveys(&session).await;
    spinner.finish_and_clear();
    let surveys = result?;

    if surveys.is_empty() {
        console.note("No surveys yet. Create one with: chatsurvey admin create");
        return Ok(());
    }

    console.print_header(&format!("Surveys by {}", session.username));
    for survey in &surveys {
        let id = survey
            .id()
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "#?".to_string());
        println!(
            "  {} {} {}",
            id.cyan().bold(),
            survey.title,
            format!("({} questions, created {})", survey.len(), survey.metadata.created_at).dimmed()
        );
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, survey_id: SurveyId) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let api = ctx.api_client()?;

    let spinner = console.spinner("Fetching survey...");
    let result = api.get_survey_by_id(survey_id).await;
    spinner.finish_and_clear();

    print_survey(&console, &result?);
    Ok(())
}

pub async fn delete(ctx: &AppContext, survey_id: SurveyId, force: bool) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let session = require_session(ctx).await?;

    if !force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete survey #{} and all of its responses?",
                survey_id
            ))
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if !confirmed {
            console.note("Nothing deleted");
            return Ok(());
        }
    }

    let api = ctx.api_client()?;
    let message = api.delete_survey(&session, survey_id).await?;
    console.success(&message);
    Ok(())
}

pub async fn responses(ctx: &AppContext, survey_id: SurveyId) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let session = require_session(ctx).await?;
    let api = ctx.api_client()?;

    let spinner = console.spinner("Fetching responses...");
    let result = api.get_responses(&session, survey_id).await;
    spinner.finish_and_clear();
    let responses = result?;

    if responses.is_empty() {
        console.note(&format!("Survey #{} has no responses yet", survey_id));
        return Ok(());
    }

    console.print_header(&format!("Responses to survey #{}", survey_id));
    for response in &responses {
        print_response(&console, response);
    }
    Ok(())
}

pub async fn response(
    ctx: &AppContext,
    survey_id: SurveyId,
    response_id: ResponseId,
) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let session = require_session(ctx).await?;
    let api = ctx.api_client()?;

    let found = api.get_response(&session, survey_id, response_id).await?;
    for response in &found {
        print_response(&console, response);
    }
    Ok(())
}

fn print_survey(console: &CliConsole, survey: &Survey) {
    console.print_header(&survey.title);
    if !survey.subtitle.is_empty() {
        println!("{}", survey.subtitle.dimmed());
    }
    println!();

    let meta = &survey.metadata;
    if let Some(id) = meta.survey_id {
        console.field("Survey", &format!("#{}", id));
    }
    if !meta.name.is_empty() {
        console.field("Name", &meta.name);
    }
    if !meta.description.is_empty() {
        console.field("Description", &meta.description);
    }
    console.field("Created by", &meta.created_by);
    console.field("Created at", &meta.created_at);
    console.field("Chat context", &survey.chat_context);
    console.print_separator();

    for question in &survey.questions {
        println!(
            "{} {} {}",
            format!("{}.", question.question_id).bold(),
            question.question,
            format!("[{}]", question.kind.label()).dimmed()
        );
        for option in &question.options {
            println!("    {} {}", "•".dimmed(), option);
        }
    }
}

fn print_response(console: &CliConsole, response: &SurveyResponse) {
    console.print_separator();
    println!(
        "{} {}",
        format!("Response #{}", response.metadata.response_id).cyan().bold(),
        response.metadata.submitted_at.dimmed()
    );
    for record in &response.answers {
        println!("  {} {}", format!("{}.", record.question_id).bold(), record.question);
        println!("     {}", format_answer(record).green());
    }
    if !response.messages.is_empty() {
        println!("  {}", "Follow-up chat".underline());
        for entry in &response.messages {
            println!("    {} {}", format!("{}:", entry.role).dimmed(), entry.content);
        }
    }
}

fn format_answer(record: &AnswerRecord) -> String {
    if record.answer.is_empty() {
        "(no answer)".to_string()
    } else {
        record.answer.join(", ")
    }
}
