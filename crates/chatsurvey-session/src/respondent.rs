//! A conversation that survives restarts
//!
//! `RespondentSession` wraps a [`Sequencer`] and writes it to a
//! [`ConversationStore`] after every change. A closed conversation is removed
//! from the store. Storage problems are logged and never interrupt the
//! respondent.

use std::sync::Arc;

use chatsurvey_core::conversation::{Sequencer, SequencerError, SequencerPhase, TurnOutcome};
use chatsurvey_core::{Answer, QuestionId, SurveyApi, SurveyId};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::snapshot::SavedConversation;
use crate::storage::ConversationStore;

pub struct RespondentSession {
    sequencer: Sequencer,
    store: Arc<dyn ConversationStore>,
    resumed: bool,
}

impl RespondentSession {
    /// Resume the saved conversation for `survey_id`, or fetch the survey
    ///
    /// With `fresh` any saved progress is discarded first. A fetch failure is
    /// returned; nothing is saved in that case.
    pub async fn open(
        survey_id: SurveyId,
        api: &dyn SurveyApi,
        store: Arc<dyn ConversationStore>,
        fresh: bool,
    ) -> Result<Self, SequencerError> {
        if fresh {
            match store.delete(survey_id).await {
                Ok(true) => info!("Discarded saved progress for survey {}", survey_id),
                Ok(false) => {}
                Err(e) => warn!("Failed to discard saved progress for survey {}: {}", survey_id, e),
            }
        } else {
            match store.load(survey_id).await {
                Ok(Some(saved)) if saved.is_resumable() => {
                    info!("Resuming survey {} from saved progress", survey_id);
                    return Ok(Self {
                        sequencer: saved.into_sequencer(),
                        store,
                        resumed: true,
                    });
                }
                Ok(_) => {}
                Err(e) => warn!("Failed to read saved progress for survey {}: {}", survey_id, e),
            }
        }

        let mut sequencer = Sequencer::new(survey_id);
        sequencer.load(api).await?;

        let session = Self {
            sequencer,
            store,
            resumed: false,
        };
        session.persist().await;
        Ok(session)
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn phase(&self) -> SequencerPhase {
        self.sequencer.phase()
    }

    /// The conversation came from saved progress rather than a fresh fetch
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    pub async fn answer(&mut self, question_id: QuestionId, answer: Answer) -> Result<(), SequencerError> {
        self.sequencer.handle_question_response(question_id, answer)?;
        self.persist().await;
        Ok(())
    }

    pub async fn submit(&mut self, api: &dyn SurveyApi) -> Result<TurnOutcome, SequencerError> {
        let outcome = self.sequencer.submit(api).await?;
        self.persist().await;
        Ok(outcome)
    }

    pub async fn send_message(&mut self, api: &dyn SurveyApi, text: &str) -> Result<TurnOutcome, SequencerError> {
        let outcome = self.sequencer.send_message(api, text).await?;
        self.persist().await;
        Ok(outcome)
    }

    async fn persist(&self) {
        let survey_id = self.sequencer.survey_id();

        if self.sequencer.is_closed() {
            match self.store.delete(survey_id).await {
                Ok(_) => {
                    debug!("Cleared saved progress for closed survey {}", survey_id);
                    return;
                }
                // Fall through and save the closed state so it is never resumed
                Err(e) => warn!("Failed to clear saved progress for survey {}: {}", survey_id, e),
            }
        }

        let saved = SavedConversation::capture(&self.sequencer, self.store.ttl(), Utc::now());
        if let Err(e) = self.store.save(&saved).await {
            warn!("Failed to save progress for survey {}: {}", survey_id, e);
        }
    }
}
