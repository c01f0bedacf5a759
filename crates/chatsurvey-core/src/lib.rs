//! Core library for chatsurvey
//!
//! This crate provides:
//! - The survey model shared by authoring and answering (`survey`)
//! - The draft builder admins edit before a survey is created (`survey::draft`)
//! - The conversational sequencer that turns a survey into a chat (`conversation`)
//! - The backend contract and its HTTP implementation (`api`)
//! - Configuration loading and the unified error type

// Allow common clippy lints that are stylistic preferences
#![allow(clippy::collapsible_if)]
#![allow(clippy::new_without_default)]

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod survey;

pub use api::{AdminSession, ApiClient, ChatReply, SurveyApi};
pub use config::Config;
pub use conversation::{
    ConversationMessage, MessageKind, RespondentState, Sender, Sequencer, SequencerError,
    SequencerPhase, TurnOutcome,
};
pub use error::{SurveyError, SurveyResult};
pub use survey::{
    Answer, AnswerBatch, Question, QuestionId, QuestionKind, ResponseId, Survey, SurveyDraft,
    SurveyId,
};

#[cfg(any(test, feature = "test-utils"))]
pub use api::MockSurveyApi;
