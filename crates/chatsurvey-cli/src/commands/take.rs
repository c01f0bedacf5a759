//! Respondent chat
//!
//! Questions are asked one at a time with prompts that fit their type. Once
//! every question has an answer the respondent confirms, and the session
//! turns into a free chat until the backend ends it.

use chatsurvey_core::conversation::{CLOSING_MESSAGE, SequencerPhase, TranscriptQuestion, TurnOutcome};
use chatsurvey_core::{Answer, QuestionKind, SurveyApi, SurveyError, SurveyId, SurveyResult};
use chatsurvey_session::RespondentSession;
use colored::*;
use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};

use super::{prompt_error, require_terminal};
use crate::console::CliConsole;
use crate::context::AppContext;

/// Typed by the respondent to leave the chat; progress stays saved
const EXIT_COMMAND: &str = "/exit";

pub async fn run(ctx: &AppContext, survey_id: SurveyId, fresh: bool) -> SurveyResult<()> {
    require_terminal()?;
    let console = CliConsole::new(ctx.verbose);
    let api = ctx.api_client()?;

    let spinner = console.spinner("Loading survey...");
    let opened = RespondentSession::open(survey_id, &api, ctx.conversation_store(), fresh).await;
    spinner.finish_and_clear();
    let mut session = opened?;

    let state = session.sequencer().state();
    console.print_header(&state.title);
    if !state.subtitle.is_empty() {
        println!("{}", state.subtitle.dimmed());
    }
    if session.was_resumed() {
        console.note("Resumed from where you left off.");
    }
    println!();

    let mut chat = ChatView::new(console);
    chat.render_new(&session);
    chat.converse(&mut session, &api).await
}

struct ChatView {
    console: CliConsole,
    printed: usize,
    theme: ColorfulTheme,
}

impl ChatView {
    fn new(console: CliConsole) -> Self {
        Self {
            console,
            printed: 0,
            theme: ColorfulTheme::default(),
        }
    }

    /// Print visible messages not shown yet
    fn render_new(&mut self, session: &RespondentSession) {
        let visible = session.sequencer().visible_messages();
        for message in visible.iter().skip(self.printed) {
            self.console.print_message(message);
        }
        self.printed = self.printed.max(visible.len());
    }

    async fn converse(&mut self, session: &mut RespondentSession, api: &dyn SurveyApi) -> SurveyResult<()> {
        loop {
            match session.phase() {
                SequencerPhase::Answering => self.answer_current(session).await?,
                SequencerPhase::ConfirmPending => {
                    if !self.confirm_or_edit(session, api).await? {
                        self.console.note("Your answers are saved. Run the same command to continue.");
                        return Ok(());
                    }
                }
                SequencerPhase::Submitted => {
                    if !self.chat_turn(session, api).await? {
                        self.console.note("Conversation saved. Run the same command to continue.");
                        return Ok(());
                    }
                }
                SequencerPhase::Closed => {
                    println!();
                    self.console.success(CLOSING_MESSAGE);
                    return Ok(());
                }
                SequencerPhase::Hydrating => {
                    return Err(SurveyError::other("Survey was not loaded"));
                }
            }
        }
    }

    async fn answer_current(&mut self, session: &mut RespondentSession) -> SurveyResult<()> {
        let question = session
            .sequencer()
            .current_question()
            .cloned()
            .ok_or_else(|| SurveyError::other("No question is waiting for an answer"))?;

        let answer = self.ask(&question)?;
        if answer.is_empty() {
            self.console.warn("Please enter an answer to continue.");
            return Ok(());
        }

        let echo = answer.to_string();
        session.answer(question.question.question_id, answer).await?;
        self.console.print_user(&echo);
        self.render_new(session);
        Ok(())
    }

    fn ask(&self, question: &TranscriptQuestion) -> SurveyResult<Answer> {
        let q = &question.question;
        let answer = match q.kind {
            QuestionKind::SingleChoice => {
                let default = question
                    .answer
                    .as_ref()
                    .and_then(|a| a.values().first().and_then(|v| q.options.iter().position(|o| o == v)))
                    .unwrap_or(0);
                let choice = Select::with_theme(&self.theme)
                    .with_prompt("Pick one")
                    .items(&q.options)
                    .default(default)
                    .interact()
                    .map_err(prompt_error)?;
                Answer::single(q.options[choice].clone())
            }
            QuestionKind::MultiChoice => {
                let previous = question.answer.as_ref().map(|a| a.values()).unwrap_or_default();
                let checked: Vec<bool> = q
                    .options
                    .iter()
                    .map(|o| previous.contains(&o.as_str()))
                    .collect();
                let picked = MultiSelect::with_theme(&self.theme)
                    .with_prompt("Pick all that apply (space to select, enter to confirm)")
                    .items(&q.options)
                    .defaults(&checked)
                    .interact()
                    .map_err(prompt_error)?;
                Answer::multiple(picked.into_iter().map(|i| q.options[i].clone()))
            }
            QuestionKind::FreeResponse => {
                let text: String = Input::with_theme(&self.theme)
                    .with_prompt("Your answer")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                Answer::single(text.trim())
            }
        };
        Ok(answer)
    }

    /// Returns false when the respondent chose to stop for now
    async fn confirm_or_edit(
        &mut self,
        session: &mut RespondentSession,
        api: &dyn SurveyApi,
    ) -> SurveyResult<bool> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Ready to submit?")
            .items(&["Confirm answers", "Change an answer", "Stop for now"])
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match choice {
            0 => {
                if !session.sequencer().can_confirm() {
                    self.console.warn("Every question needs an answer before confirming.");
                    self.edit_answer(session).await?;
                    return Ok(true);
                }
                let spinner = self.console.spinner("Submitting answers...");
                let outcome = session.submit(api).await;
                spinner.finish_and_clear();
                if outcome? == TurnOutcome::Failed {
                    self.console.warn("Submission failed. You can try again.");
                }
                self.render_new(session);
                Ok(true)
            }
            1 => {
                self.edit_answer(session).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn edit_answer(&mut self, session: &mut RespondentSession) -> SurveyResult<()> {
        let questions: Vec<TranscriptQuestion> = session
            .sequencer()
            .transcript()
            .iter()
            .filter_map(|m| m.as_question())
            .cloned()
            .collect();
        let labels: Vec<String> = questions
            .iter()
            .map(|q| {
                let answer = q
                    .answer
                    .as_ref()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "(unanswered)".to_string());
                format!("{} - {}", q.question.question, answer)
            })
            .collect();

        let index = Select::with_theme(&self.theme)
            .with_prompt("Which answer?")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let question = &questions[index];
        self.console.print_bot(&question.question.question);
        let answer = self.ask(question)?;
        let echo = answer.to_string();
        session.answer(question.question.question_id, answer).await?;
        if !echo.is_empty() {
            self.console.print_user(&echo);
        }
        Ok(())
    }

    /// Returns false when the respondent leaves the chat
    async fn chat_turn(&mut self, session: &mut RespondentSession, api: &dyn SurveyApi) -> SurveyResult<bool> {
        let text: String = Input::with_theme(&self.theme)
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        let text = text.trim();

        if text == EXIT_COMMAND {
            return Ok(false);
        }
        if text.is_empty() {
            return Ok(true);
        }

        // The typed line is already on screen
        self.printed = session.sequencer().transcript().len() + 1;

        let spinner = self.console.spinner("Thinking...");
        let outcome = session.send_message(api, text).await;
        spinner.finish_and_clear();
        outcome?;

        self.render_new(session);
        Ok(true)
    }
}
