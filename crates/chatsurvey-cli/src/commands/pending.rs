//! Saved conversations that can be resumed

use chatsurvey_core::SurveyResult;
use chatsurvey_session::{ConversationStore, ConversationSummary};
use chrono::{DateTime, Local, Utc};
use colored::*;

use crate::console::CliConsole;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let store = ctx.conversation_store();

    let conversations = store.list().await?;
    if conversations.is_empty() {
        console.note("No saved conversations.");
        return Ok(());
    }

    console.print_header("Saved conversations");
    for summary in &conversations {
        println!("{}", format_summary(summary));
    }
    println!();
    console.note("Continue one with: chatsurvey take <SURVEY_ID>");
    Ok(())
}

fn format_summary(summary: &ConversationSummary) -> String {
    let progress = if summary.submitted {
        "submitted, chatting".green().to_string()
    } else {
        format!("{}/{} answered", summary.answered, summary.total)
            .yellow()
            .to_string()
    };
    let title = if summary.title.is_empty() {
        "(untitled)"
    } else {
        summary.title.as_str()
    };
    format!(
        "  {} {} [{}] saved {}, kept until {}",
        format!("#{}", summary.survey_id).cyan().bold(),
        title,
        progress,
        local_time(summary.saved_at),
        local_time(summary.expires_at),
    )
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
