//! Request and response bodies that only exist on the wire

use serde::{Deserialize, Serialize};

use crate::survey::{ResponseId, SurveyId};

/// Bot reply to a chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,

    /// The backend has nothing more to ask
    #[serde(default)]
    pub is_last: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatTurn<'a> {
    pub content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseCreated {
    pub response_id: ResponseId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyCreated {
    pub survey_id: SurveyId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub jwt: String,
    pub jwt_exp: String,
}

/// `{message}` bodies used for errors and acknowledgements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
}
