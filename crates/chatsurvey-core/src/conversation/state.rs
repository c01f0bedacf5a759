//! Respondent progress and the sequencer lifecycle

use serde::{Deserialize, Serialize};

use crate::survey::ResponseId;

/// Lifecycle of a survey conversation
///
/// - `Hydrating`: waiting for the survey to load
/// - `Answering`: questions are being disclosed and answered
/// - `ConfirmPending`: every question was reached, awaiting confirmation
/// - `Submitted`: answers accepted, free chat with the backend
/// - `Closed`: the backend ended the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SequencerPhase {
    #[default]
    Hydrating,
    Answering,
    ConfirmPending,
    Submitted,
    Closed,
}

impl SequencerPhase {
    /// Question answers can still be changed
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::Answering | Self::ConfirmPending)
    }

    /// Free text can be sent to the backend
    pub fn accepts_chat(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Progress saved alongside the transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentState {
    /// Highest disclosed transcript position
    #[serde(default)]
    pub display_index: usize,

    /// Set once the backend accepted the answers and opened the chat
    #[serde(default)]
    pub submitted: bool,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    /// Assigned by the backend when the answer batch is stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<ResponseId>,

    /// The backend ended the chat
    #[serde(default)]
    pub closed: bool,
}
