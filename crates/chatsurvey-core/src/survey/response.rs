//! Submitted answers and stored responses

use serde::{Deserialize, Serialize};

use super::{QuestionId, QuestionKind, ResponseId, SurveyId};

/// Metadata sent with an answer batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    pub survey_id: SurveyId,
}

/// One answered question, in the shape the backend validates
///
/// The backend checks type, text and options against its copy of the survey,
/// so the whole question travels with the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,

    #[serde(rename = "type")]
    pub kind: QuestionKind,

    pub question: String,

    #[serde(default)]
    pub options: Vec<String>,

    /// Always a list, even for single-valued questions
    pub answer: Vec<String>,
}

/// Every answer of one respondent, posted in a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBatch {
    pub metadata: BatchMetadata,
    pub answers: Vec<AnswerRecord>,
}

/// Stored response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub survey_id: SurveyId,
    pub response_id: ResponseId,
    #[serde(default)]
    pub submitted_at: String,
}

/// One line of the follow-up chat log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub content: String,
    pub role: String,
}

/// A respondent's stored submission, as admins see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub metadata: ResponseMetadata,
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub messages: Vec<ChatLogEntry>,
}
