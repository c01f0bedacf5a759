//! The conversational survey state machine

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::message::{ConversationMessage, TranscriptQuestion};
use super::state::{RespondentState, SequencerPhase};
use super::SequencerError;
use crate::api::SurveyApi;
use crate::survey::{
    Answer, AnswerBatch, AnswerRecord, BatchMetadata, QuestionId, ResponseId, Survey, SurveyId,
};

/// Result of a turn that reached the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The backend replied and the chat continues
    Replied,
    /// The backend replied and ended the conversation
    Finished,
    /// The call failed; an error message was appended to the transcript
    Failed,
}

/// Drives one respondent through one survey
///
/// Every mutating operation takes `&mut self`, so a conversation never has
/// more than one backend call in flight.
#[derive(Debug, Clone)]
pub struct Sequencer {
    survey_id: SurveyId,
    transcript: Vec<ConversationMessage>,
    state: RespondentState,
}

impl Sequencer {
    pub fn new(survey_id: SurveyId) -> Self {
        Self {
            survey_id,
            transcript: Vec::new(),
            state: RespondentState::default(),
        }
    }

    /// Rebuild a sequencer from a saved transcript and state
    pub fn from_parts(
        survey_id: SurveyId,
        transcript: Vec<ConversationMessage>,
        state: RespondentState,
    ) -> Self {
        Self {
            survey_id,
            transcript,
            state,
        }
    }

    pub fn survey_id(&self) -> SurveyId {
        self.survey_id
    }

    pub fn transcript(&self) -> &[ConversationMessage] {
        &self.transcript
    }

    pub fn state(&self) -> &RespondentState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed
    }

    pub fn phase(&self) -> SequencerPhase {
        if self.state.closed {
            SequencerPhase::Closed
        } else if self.state.submitted {
            SequencerPhase::Submitted
        } else if self.transcript.is_empty() {
            SequencerPhase::Hydrating
        } else if self.prompt_disclosed() {
            SequencerPhase::ConfirmPending
        } else {
            SequencerPhase::Answering
        }
    }

    /// Fetch the survey and hydrate from it
    ///
    /// A failed fetch leaves the sequencer untouched in `Hydrating`.
    pub async fn load(&mut self, api: &dyn SurveyApi) -> Result<(), SequencerError> {
        if !self.transcript.is_empty() {
            return Err(SequencerError::AlreadyHydrated);
        }
        debug!("Fetching survey {}", self.survey_id);
        let survey = api.fetch_survey(self.survey_id).await.map_err(|e| {
            warn!("Failed to load survey {}: {}", self.survey_id, e);
            SequencerError::SurveyUnavailable(e.to_string())
        })?;
        self.hydrate(&survey)
    }

    /// Build the transcript: one bot message per question, then the submit prompt
    pub fn hydrate(&mut self, survey: &Survey) -> Result<(), SequencerError> {
        if !self.transcript.is_empty() {
            return Err(SequencerError::AlreadyHydrated);
        }
        if survey.is_empty() {
            return Err(SequencerError::EmptySurvey);
        }
        check_questions(survey)?;

        self.transcript = survey
            .questions
            .iter()
            .cloned()
            .map(ConversationMessage::question)
            .collect();
        self.transcript.push(ConversationMessage::submit_prompt());
        self.state = RespondentState {
            display_index: 0,
            submitted: false,
            title: survey.title.clone(),
            subtitle: survey.subtitle.clone(),
            response_id: None,
            closed: false,
        };

        info!(
            "Survey {} hydrated with {} questions",
            self.survey_id,
            survey.len()
        );
        Ok(())
    }

    fn prompt_position(&self) -> Option<usize> {
        self.transcript.iter().position(|m| m.is_submit_prompt())
    }

    fn prompt_disclosed(&self) -> bool {
        self.prompt_position()
            .is_some_and(|p| self.state.display_index >= p)
    }

    fn question_position(&self, question_id: QuestionId) -> Option<usize> {
        self.transcript.iter().position(|m| {
            m.as_question()
                .is_some_and(|q| q.question.question_id == question_id)
        })
    }

    fn questions(&self) -> impl Iterator<Item = &TranscriptQuestion> {
        self.transcript.iter().filter_map(|m| m.as_question())
    }

    /// Messages the respondent can currently see
    pub fn visible_messages(&self) -> &[ConversationMessage] {
        if self.state.submitted || self.prompt_disclosed() {
            &self.transcript
        } else {
            let end = (self.state.display_index + 1).min(self.transcript.len());
            &self.transcript[..end]
        }
    }

    /// The question waiting for a first answer, if any
    pub fn current_question(&self) -> Option<&TranscriptQuestion> {
        if self.phase() != SequencerPhase::Answering {
            return None;
        }
        self.transcript
            .get(self.state.display_index)
            .and_then(|m| m.as_question())
    }

    /// Record an answer for a disclosed question
    ///
    /// An empty answer clears the slot and never advances disclosure. A
    /// non-empty answer discloses the next entry.
    pub fn handle_question_response(
        &mut self,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<(), SequencerError> {
        let phase = self.phase();
        if phase.is_terminal() {
            return Err(SequencerError::Closed);
        }
        if !phase.accepts_answers() {
            return Err(if phase.accepts_chat() {
                SequencerError::AlreadySubmitted
            } else {
                SequencerError::NotHydrated
            });
        }

        let position = self
            .question_position(question_id)
            .ok_or(SequencerError::UnknownQuestion(question_id))?;
        if position > self.state.display_index {
            return Err(SequencerError::NotDisclosed(question_id));
        }

        let slot = self.transcript[position]
            .as_question_mut()
            .ok_or(SequencerError::UnknownQuestion(question_id))?;

        if answer.is_empty() {
            slot.answer = None;
            debug!("Cleared answer for question {}", question_id);
            return Ok(());
        }

        let question = &slot.question;
        if !answer.fits(question.kind) {
            return Err(SequencerError::CardinalityMismatch {
                question_id,
                expected: question.kind,
            });
        }
        if question.kind.needs_options() {
            if let Some(unknown) = answer.values().into_iter().find(|v| !question.has_option(v)) {
                return Err(SequencerError::UnknownOption {
                    question_id,
                    option: unknown.to_string(),
                });
            }
        }

        slot.answer = Some(answer);
        self.state.display_index = self.state.display_index.max(position + 1);
        debug!(
            "Answered question {}, display index {}",
            question_id, self.state.display_index
        );
        Ok(())
    }

    /// Every question is answered and the submit prompt is showing
    pub fn can_confirm(&self) -> bool {
        self.phase() == SequencerPhase::ConfirmPending && self.questions().all(|q| q.is_answered())
    }

    /// One record per question, answers normalized to lists
    pub fn build_answer_batch(&self) -> Result<AnswerBatch, SequencerError> {
        let answers = self
            .questions()
            .map(|tq| {
                let question = &tq.question;
                match &tq.answer {
                    Some(answer) if !answer.is_empty() => Ok(AnswerRecord {
                        question_id: question.question_id,
                        kind: question.kind,
                        question: question.question.clone(),
                        options: question.options.clone(),
                        answer: answer.clone().into_values(),
                    }),
                    _ => Err(SequencerError::Unanswered(question.question_id)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnswerBatch {
            metadata: BatchMetadata {
                survey_id: self.survey_id,
            },
            answers,
        })
    }

    /// Confirm the answers and open the chat
    ///
    /// Posts the batch (unless an earlier attempt already stored it), then
    /// asks for the first bot turn with empty content. The conversation is
    /// marked submitted only once both calls succeed.
    pub async fn submit(&mut self, api: &dyn SurveyApi) -> Result<TurnOutcome, SequencerError> {
        match self.phase() {
            SequencerPhase::Hydrating => return Err(SequencerError::NotHydrated),
            SequencerPhase::Answering => return Err(SequencerError::NotReadyToConfirm),
            SequencerPhase::Submitted => return Err(SequencerError::AlreadySubmitted),
            SequencerPhase::Closed => return Err(SequencerError::Closed),
            SequencerPhase::ConfirmPending => {}
        }
        let batch = self.build_answer_batch()?;

        let response_id = match self.state.response_id {
            Some(id) => {
                debug!("Reusing response {} from an earlier attempt", id);
                id
            }
            None => match api.submit_answers(self.survey_id, &batch).await {
                Ok(id) => {
                    info!("Answers for survey {} stored as response {}", self.survey_id, id);
                    self.state.response_id = Some(id);
                    id
                }
                Err(e) => {
                    warn!("Submitting answers failed: {}", e);
                    self.transcript.push(ConversationMessage::error());
                    return Ok(TurnOutcome::Failed);
                }
            },
        };

        let outcome = self.chat_turn(api, response_id, "").await;
        if outcome != TurnOutcome::Failed {
            self.state.submitted = true;
            info!("Survey {} submitted", self.survey_id);
        }
        Ok(outcome)
    }

    /// Send a free text turn after submission
    pub async fn send_message(
        &mut self,
        api: &dyn SurveyApi,
        text: &str,
    ) -> Result<TurnOutcome, SequencerError> {
        let phase = self.phase();
        if phase.is_terminal() {
            return Err(SequencerError::Closed);
        }
        if !phase.accepts_chat() {
            return Err(SequencerError::NotSubmitted);
        }
        if text.trim().is_empty() {
            return Err(SequencerError::EmptyMessage);
        }
        let response_id = self.response_id().ok_or(SequencerError::NotSubmitted)?;

        self.transcript.push(ConversationMessage::user(text));
        Ok(self.chat_turn(api, response_id, text).await)
    }

    fn response_id(&self) -> Option<ResponseId> {
        self.state.response_id
    }

    async fn chat_turn(
        &mut self,
        api: &dyn SurveyApi,
        response_id: ResponseId,
        content: &str,
    ) -> TurnOutcome {
        match api
            .post_chat_turn(response_id, self.survey_id, content)
            .await
        {
            Ok(reply) => {
                self.transcript.push(ConversationMessage::bot(reply.content));
                if reply.is_last {
                    self.state.closed = true;
                    info!("Conversation for survey {} closed", self.survey_id);
                    TurnOutcome::Finished
                } else {
                    TurnOutcome::Replied
                }
            }
            Err(e) => {
                warn!("Chat turn for response {} failed: {}", response_id, e);
                self.transcript.push(ConversationMessage::error());
                TurnOutcome::Failed
            }
        }
    }
}

/// Reject surveys the chat could not walk through
///
/// Answers are routed by `question_id`, so ids must be unique. Every prompt
/// needs text and every choice question needs something to pick.
fn check_questions(survey: &Survey) -> Result<(), SequencerError> {
    let mut seen = HashSet::new();
    for question in &survey.questions {
        let id = question.question_id;
        if !seen.insert(id) {
            return Err(SequencerError::InvalidSurvey(format!(
                "question id {} appears more than once",
                id
            )));
        }
        if question.question.trim().is_empty() {
            return Err(SequencerError::InvalidSurvey(format!(
                "question {} has no text",
                id
            )));
        }
        if question.kind.needs_options() && question.options.iter().all(|o| o.trim().is_empty()) {
            return Err(SequencerError::InvalidSurvey(format!(
                "question {} has no options to choose from",
                id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatReply, MockSurveyApi};
    use crate::conversation::{MessageKind, Sender, ERROR_MESSAGE};
    use crate::error::SurveyError;
    use crate::survey::{Question, QuestionKind, SurveyMetadata};

    fn colour_survey() -> Survey {
        Survey {
            title: "Colours".into(),
            subtitle: "Tell us".into(),
            chat_context: "why colours".into(),
            questions: vec![
                Question::new(1, "Favourite colour?", QuestionKind::SingleChoice)
                    .with_options(["Red", "Blue"]),
                Question::new(2, "How are you?", QuestionKind::FreeResponse),
            ],
            metadata: SurveyMetadata {
                survey_id: Some(5),
                ..Default::default()
            },
        }
    }

    fn hydrated() -> Sequencer {
        let mut seq = Sequencer::new(5);
        seq.hydrate(&colour_survey()).unwrap();
        seq
    }

    fn answered() -> Sequencer {
        let mut seq = hydrated();
        seq.handle_question_response(1, Answer::single("Red")).unwrap();
        seq.handle_question_response(2, Answer::single("fine")).unwrap();
        seq
    }

    fn reply(content: &str, is_last: bool) -> ChatReply {
        ChatReply {
            content: content.to_string(),
            is_last,
        }
    }

    #[test]
    fn test_hydrate_builds_transcript() {
        let seq = hydrated();
        assert_eq!(seq.transcript().len(), 3);
        assert!(seq.transcript()[2].is_submit_prompt());
        assert_eq!(seq.state().display_index, 0);
        assert_eq!(seq.state().title, "Colours");
        assert_eq!(seq.phase(), SequencerPhase::Answering);
        assert_eq!(seq.visible_messages().len(), 1);
        assert_eq!(seq.current_question().unwrap().question.question_id, 1);
    }

    #[test]
    fn test_hydrate_rejects_empty_survey() {
        let mut survey = colour_survey();
        survey.questions.clear();
        let mut seq = Sequencer::new(5);
        assert_eq!(seq.hydrate(&survey), Err(SequencerError::EmptySurvey));
        assert_eq!(seq.phase(), SequencerPhase::Hydrating);
    }

    fn assert_invalid(survey: &Survey) {
        let mut seq = Sequencer::new(5);
        assert!(matches!(
            seq.hydrate(survey),
            Err(SequencerError::InvalidSurvey(_))
        ));
        assert!(seq.transcript().is_empty());
        assert_eq!(seq.phase(), SequencerPhase::Hydrating);
    }

    #[test]
    fn test_hydrate_rejects_duplicate_question_ids() {
        let mut survey = colour_survey();
        survey.questions[1].question_id = 1;
        assert_invalid(&survey);
    }

    #[test]
    fn test_hydrate_rejects_choice_without_options() {
        let mut survey = colour_survey();
        survey.questions[0].options.clear();
        assert_invalid(&survey);

        let mut survey = colour_survey();
        survey.questions[0].options = vec![" ".into()];
        assert_invalid(&survey);
    }

    #[test]
    fn test_hydrate_rejects_blank_question_text() {
        let mut survey = colour_survey();
        survey.questions[1].question = "   ".into();
        assert_invalid(&survey);
    }

    #[test]
    fn test_free_response_needs_no_options() {
        let mut survey = colour_survey();
        survey.questions[1].options.clear();
        let mut seq = Sequencer::new(5);
        assert!(seq.hydrate(&survey).is_ok());
    }

    #[test]
    fn test_answers_advance_disclosure() {
        let mut seq = hydrated();
        seq.handle_question_response(1, Answer::single("Red")).unwrap();
        assert_eq!(seq.state().display_index, 1);
        assert_eq!(seq.visible_messages().len(), 2);

        seq.handle_question_response(2, Answer::single("fine")).unwrap();
        assert_eq!(seq.state().display_index, 2);
        assert_eq!(seq.phase(), SequencerPhase::ConfirmPending);
        assert_eq!(seq.visible_messages().len(), 3);
        assert!(seq.can_confirm());
    }

    #[test]
    fn test_changing_earlier_answer_does_not_regress() {
        let mut seq = answered();
        seq.handle_question_response(1, Answer::single("Blue")).unwrap();
        assert_eq!(seq.state().display_index, 2);
    }

    #[test]
    fn test_empty_answer_clears_without_advancing() {
        let mut seq = hydrated();
        seq.handle_question_response(1, Answer::single("")).unwrap();
        assert_eq!(seq.state().display_index, 0);

        let mut seq = answered();
        seq.handle_question_response(2, Answer::single("  ")).unwrap();
        assert_eq!(seq.state().display_index, 2);
        assert!(!seq.can_confirm());
        assert_eq!(
            seq.build_answer_batch(),
            Err(SequencerError::Unanswered(2))
        );
    }

    #[test]
    fn test_undisclosed_question_cannot_be_answered() {
        let mut seq = hydrated();
        assert_eq!(
            seq.handle_question_response(2, Answer::single("fine")),
            Err(SequencerError::NotDisclosed(2))
        );
        assert_eq!(
            seq.handle_question_response(9, Answer::single("x")),
            Err(SequencerError::UnknownQuestion(9))
        );
    }

    #[test]
    fn test_answer_must_match_question() {
        let mut seq = hydrated();
        assert!(matches!(
            seq.handle_question_response(1, Answer::multiple(["Red"])),
            Err(SequencerError::CardinalityMismatch { question_id: 1, .. })
        ));
        assert_eq!(
            seq.handle_question_response(1, Answer::single("Green")),
            Err(SequencerError::UnknownOption {
                question_id: 1,
                option: "Green".into()
            })
        );
        assert_eq!(seq.state().display_index, 0);
    }

    #[test]
    fn test_multi_choice_submitted_as_list() {
        let mut survey = colour_survey();
        survey.questions[0].kind = QuestionKind::MultiChoice;
        let mut seq = Sequencer::new(5);
        seq.hydrate(&survey).unwrap();
        seq.handle_question_response(1, Answer::multiple(["Red", "Blue"]))
            .unwrap();
        seq.handle_question_response(2, Answer::single("fine")).unwrap();

        let batch = seq.build_answer_batch().unwrap();
        assert_eq!(batch.answers[0].answer, vec!["Red", "Blue"]);
        assert_eq!(batch.answers[1].answer, vec!["fine"]);
        assert_eq!(batch.metadata.survey_id, 5);
    }

    #[test]
    fn test_answering_before_hydration() {
        let mut seq = Sequencer::new(5);
        assert_eq!(
            seq.handle_question_response(1, Answer::single("Red")),
            Err(SequencerError::NotHydrated)
        );
    }

    #[tokio::test]
    async fn test_submit_and_chat_flow() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers()
            .withf(|sid, batch| {
                *sid == 5
                    && batch.answers.len() == 2
                    && batch.answers[0].question_id == 1
                    && batch.answers[0].answer == vec!["Red".to_string()]
                    && batch.answers[1].question_id == 2
                    && batch.answers[1].answer == vec!["fine".to_string()]
            })
            .times(1)
            .returning(|_, _| Ok(42));
        api.expect_post_chat_turn()
            .withf(|rid, sid, content| *rid == 42 && *sid == 5 && content.is_empty())
            .times(1)
            .returning(|_, _, _| Ok(reply("Why red?", false)));

        let mut seq = answered();
        let outcome = seq.submit(&api).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Replied);
        assert_eq!(seq.phase(), SequencerPhase::Submitted);
        assert_eq!(seq.state().response_id, Some(42));
        assert_eq!(seq.transcript().last().unwrap().text, "Why red?");
        assert_eq!(
            seq.handle_question_response(1, Answer::single("Blue")),
            Err(SequencerError::AlreadySubmitted)
        );
    }

    #[tokio::test]
    async fn test_submit_requires_confirm_pending() {
        let api = MockSurveyApi::new();
        let mut seq = hydrated();
        assert_eq!(
            seq.submit(&api).await,
            Err(SequencerError::NotReadyToConfirm)
        );
    }

    #[tokio::test]
    async fn test_submit_with_cleared_answer_posts_nothing() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers().times(0);
        api.expect_post_chat_turn().times(0);

        let mut seq = answered();
        seq.handle_question_response(1, Answer::single("")).unwrap();
        assert_eq!(seq.phase(), SequencerPhase::ConfirmPending);

        assert_eq!(seq.submit(&api).await, Err(SequencerError::Unanswered(1)));
        assert!(!seq.state().submitted);
        assert_eq!(seq.state().response_id, None);
        assert_eq!(seq.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_state() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers()
            .returning(|_, _| Err(SurveyError::http("connection refused")));

        let mut seq = answered();
        let outcome = seq.submit(&api).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Failed);
        assert_eq!(seq.phase(), SequencerPhase::ConfirmPending);
        assert!(!seq.state().submitted);
        let last = seq.transcript().last().unwrap();
        assert_eq!(last.text, ERROR_MESSAGE);
        assert_eq!(last.kind, MessageKind::Error);
    }

    #[tokio::test]
    async fn test_retry_reuses_response_id() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers().times(1).returning(|_, _| Ok(7));
        let mut calls = 0;
        api.expect_post_chat_turn()
            .times(2)
            .returning(move |_, _, _| {
                calls += 1;
                if calls == 1 {
                    Err(SurveyError::http_status("upstream", 502, None))
                } else {
                    Ok(reply("Hello", false))
                }
            });

        let mut seq = answered();
        assert_eq!(seq.submit(&api).await.unwrap(), TurnOutcome::Failed);
        assert!(!seq.state().submitted);
        assert_eq!(seq.state().response_id, Some(7));

        assert_eq!(seq.submit(&api).await.unwrap(), TurnOutcome::Replied);
        assert!(seq.state().submitted);
    }

    #[tokio::test]
    async fn test_send_message_before_submission() {
        let api = MockSurveyApi::new();
        let mut seq = answered();
        assert_eq!(
            seq.send_message(&api, "hi").await,
            Err(SequencerError::NotSubmitted)
        );
    }

    #[tokio::test]
    async fn test_last_reply_closes_conversation() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers().returning(|_, _| Ok(42));
        api.expect_post_chat_turn()
            .withf(|_, _, content| content.is_empty())
            .returning(|_, _, _| Ok(reply("Why red?", false)));
        api.expect_post_chat_turn()
            .withf(|rid, _, content| *rid == 42 && content == "it is warm")
            .returning(|_, _, _| Ok(reply("Thanks", true)));

        let mut seq = answered();
        seq.submit(&api).await.unwrap();

        assert_eq!(
            seq.send_message(&api, "   ").await,
            Err(SequencerError::EmptyMessage)
        );

        let outcome = seq.send_message(&api, "it is warm").await.unwrap();
        assert_eq!(outcome, TurnOutcome::Finished);
        assert_eq!(seq.phase(), SequencerPhase::Closed);

        let tail = &seq.transcript()[seq.transcript().len() - 2..];
        assert_eq!(tail[0].sender, Sender::User);
        assert_eq!(tail[1].text, "Thanks");
        assert_eq!(
            seq.send_message(&api, "more").await,
            Err(SequencerError::Closed)
        );
    }

    #[tokio::test]
    async fn test_chat_failure_is_inline() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers().returning(|_, _| Ok(42));
        api.expect_post_chat_turn()
            .withf(|_, _, content| content.is_empty())
            .returning(|_, _, _| Ok(reply("Why red?", false)));
        api.expect_post_chat_turn()
            .withf(|_, _, content| !content.is_empty())
            .returning(|_, _, _| Err(SurveyError::http("timeout")));

        let mut seq = answered();
        seq.submit(&api).await.unwrap();
        let outcome = seq.send_message(&api, "hello").await.unwrap();

        assert_eq!(outcome, TurnOutcome::Failed);
        assert_eq!(seq.phase(), SequencerPhase::Submitted);
        assert!(seq.transcript().last().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_transcript() {
        let mut api = MockSurveyApi::new();
        api.expect_fetch_survey()
            .returning(|_| Err(SurveyError::not_found("Survey not found")));

        let mut seq = Sequencer::new(5);
        let err = seq.load(&api).await.unwrap_err();

        assert!(matches!(err, SequencerError::SurveyUnavailable(_)));
        assert_eq!(seq.phase(), SequencerPhase::Hydrating);
        assert!(seq.transcript().is_empty());
        assert!(seq.visible_messages().is_empty());
    }

    #[tokio::test]
    async fn test_load_hydrates() {
        let mut api = MockSurveyApi::new();
        api.expect_fetch_survey()
            .withf(|id| *id == 5)
            .returning(|_| Ok(colour_survey()));

        let mut seq = Sequencer::new(5);
        seq.load(&api).await.unwrap();
        assert_eq!(seq.phase(), SequencerPhase::Answering);
        assert_eq!(
            seq.load(&api).await,
            Err(SequencerError::AlreadyHydrated)
        );
    }

    #[test]
    fn test_restore_from_parts() {
        let mut seq = hydrated();
        seq.handle_question_response(1, Answer::single("Red")).unwrap();

        let restored =
            Sequencer::from_parts(5, seq.transcript().to_vec(), seq.state().clone());
        assert_eq!(restored.state().display_index, 1);
        assert_eq!(restored.transcript(), seq.transcript());
        assert_eq!(restored.phase(), SequencerPhase::Answering);
    }

    #[tokio::test]
    async fn test_closed_flag_survives_restore() {
        let mut api = MockSurveyApi::new();
        api.expect_submit_answers().returning(|_, _| Ok(3));
        api.expect_post_chat_turn()
            .returning(|_, _, _| Ok(reply("Bye", true)));

        let mut seq = answered();
        assert_eq!(seq.submit(&api).await.unwrap(), TurnOutcome::Finished);
        assert!(seq.state().closed);

        let restored =
            Sequencer::from_parts(5, seq.transcript().to_vec(), seq.state().clone());
        assert!(restored.is_closed());
        assert_eq!(restored.phase(), SequencerPhase::Closed);
    }
}
