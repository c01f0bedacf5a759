//! Backend contract and its HTTP implementation

mod auth;
mod client;
mod types;

pub use auth::{AdminSession, JWT_EXP_FORMAT};
pub use client::{ApiClient, RequestKind, classify_response};
pub use types::{ChatReply, LoginResponse, MessageBody, ResponseCreated, SurveyCreated};

use async_trait::async_trait;

use crate::error::SurveyResult;
use crate::survey::{AnswerBatch, ResponseId, Survey, SurveyId};

/// The three calls a respondent's conversation makes
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait SurveyApi: Send + Sync {
    /// Load a survey by id
    async fn fetch_survey(&self, survey_id: SurveyId) -> SurveyResult<Survey>;

    /// Store the respondent's answers; returns the new response id
    async fn submit_answers(&self, survey_id: SurveyId, batch: &AnswerBatch) -> SurveyResult<ResponseId>;

    /// Send one chat turn; empty `content` asks for the opening bot turn
    async fn post_chat_turn(
        &self,
        response_id: ResponseId,
        survey_id: SurveyId,
        content: &str,
    ) -> SurveyResult<ChatReply>;
}
