//! Conversational survey taking
//!
//! A [`Sequencer`] turns a fetched [`crate::Survey`] into a chat transcript,
//! discloses one question at a time as the respondent answers, submits the
//! answers once confirmed and then relays free chat turns to the backend.

mod error;
mod message;
mod sequencer;
mod state;

pub use error::SequencerError;
pub use message::{ConversationMessage, MessageKind, Sender, TranscriptQuestion};
pub use sequencer::{Sequencer, TurnOutcome};
pub use state::{RespondentState, SequencerPhase};

/// Bot text shown once every question has been answered
pub const SUBMIT_PROMPT: &str = "Thank you for your responses. Please confirm your answers now, \
as they can't be changed later. Once confirmed, we'll continue with our discussion.";

/// Inline placeholder for a failed backend turn
pub const ERROR_MESSAGE: &str = "Error generating response";

/// Shown after the backend ends the conversation
pub const CLOSING_MESSAGE: &str = "The survey is over. Thank you for your responses. You can close the session.";
