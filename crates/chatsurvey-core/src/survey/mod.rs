//! Survey model
//!
//! Types shared by the authoring side (admins building a survey) and the
//! answering side (respondents walking through it in a chat):
//! - `Question` / `QuestionKind`: one survey item and its input shape
//! - `Answer`: a respondent's value, carrying its cardinality
//! - `Survey`: the full definition as exchanged with the backend
//! - `SurveyDraft`: the editable form an admin fills in before creating a survey
//! - `AnswerBatch` / `SurveyResponse`: submitted answers and their stored record

pub mod draft;
mod model;
mod question;
mod response;
mod validation;

pub use draft::{DraftError, DraftQuestion, MAX_CHAT_CONTEXT_CHARS, SurveyDraft};
pub use model::{Survey, SurveyMetadata};
pub use question::{Answer, Question, QuestionKind};
pub use response::{AnswerBatch, AnswerRecord, BatchMetadata, ChatLogEntry, ResponseMetadata, SurveyResponse};
pub use validation::{FieldError, ValidationError};

/// Server-assigned survey identifier
pub type SurveyId = u64;

/// Server-assigned identifier of one respondent's submission
pub type ResponseId = u64;

/// Position-derived question identifier, 1-based within a survey
pub type QuestionId = u32;
