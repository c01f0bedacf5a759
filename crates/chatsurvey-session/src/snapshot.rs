//! Saved conversation data
//!
//! A saved conversation is the transcript plus the respondent state, with
//! the time it stops being resumable.

use chatsurvey_core::conversation::{ConversationMessage, RespondentState, Sequencer};
use chatsurvey_core::SurveyId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One survey's saved progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConversation {
    pub survey_id: SurveyId,

    #[serde(default)]
    pub transcript: Vec<ConversationMessage>,

    #[serde(default)]
    pub state: RespondentState,

    pub saved_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl SavedConversation {
    /// Capture the sequencer's current progress
    pub fn capture(sequencer: &Sequencer, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            survey_id: sequencer.survey_id(),
            transcript: sequencer.transcript().to_vec(),
            state: sequencer.state().clone(),
            saved_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Worth resuming: there is something to show and the chat is not over
    pub fn is_resumable(&self) -> bool {
        !self.transcript.is_empty() && !self.state.closed
    }

    pub fn into_sequencer(self) -> Sequencer {
        Sequencer::from_parts(self.survey_id, self.transcript, self.state)
    }

    pub fn summary(&self) -> ConversationSummary {
        let questions = self.transcript.iter().filter_map(|m| m.as_question());
        let (answered, total) = questions.fold((0, 0), |(answered, total), q| {
            (answered + usize::from(q.is_answered()), total + 1)
        });

        ConversationSummary {
            survey_id: self.survey_id,
            title: self.state.title.clone(),
            answered,
            total,
            submitted: self.state.submitted,
            saved_at: self.saved_at,
            expires_at: self.expires_at,
        }
    }
}

/// Listing entry for `pending`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub survey_id: SurveyId,
    pub title: String,
    pub answered: usize,
    pub total: usize,
    pub submitted: bool,
    pub saved_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
