//! Sequencer precondition errors

use thiserror::Error;

use crate::survey::{QuestionId, QuestionKind};

/// An operation the sequencer refused in its current state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    #[error("The survey has not been loaded yet")]
    NotHydrated,

    #[error("The survey is already loaded")]
    AlreadyHydrated,

    #[error("Survey could not be loaded: {0}")]
    SurveyUnavailable(String),

    #[error("The survey has no questions")]
    EmptySurvey,

    #[error("The survey cannot be answered: {0}")]
    InvalidSurvey(String),

    #[error("Question {0} is not part of this survey")]
    UnknownQuestion(QuestionId),

    #[error("Question {0} has not been asked yet")]
    NotDisclosed(QuestionId),

    #[error("Question {question_id} is {expected}")]
    CardinalityMismatch {
        question_id: QuestionId,
        expected: QuestionKind,
    },

    #[error("\"{option}\" is not an option of question {question_id}")]
    UnknownOption {
        question_id: QuestionId,
        option: String,
    },

    #[error("Question {0} has not been answered")]
    Unanswered(QuestionId),

    #[error("Answer every question before confirming")]
    NotReadyToConfirm,

    #[error("Answers were already submitted")]
    AlreadySubmitted,

    #[error("Answers must be confirmed before chatting")]
    NotSubmitted,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("The conversation is over")]
    Closed,
}
