//! reqwest implementation of the backend contract

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::auth::AdminSession;
use super::types::{
    ChatReply, ChatTurn, Credentials, LoginResponse, MessageBody, ResponseCreated, SurveyCreated,
};
use super::SurveyApi;
use crate::config::ApiConfig;
use crate::error::{SurveyError, SurveyResult};
use crate::survey::{AnswerBatch, ResponseId, Survey, SurveyId, SurveyResponse};

/// Which call produced a non-success status
///
/// Login and signup give some statuses a specific meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    Signup,
    Other,
}

/// Map a non-success response to an error
pub fn classify_response(kind: RequestKind, status: u16, body: &str, url: &str) -> SurveyError {
    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("Request failed with status {}", status)
            } else {
                trimmed.to_string()
            }
        });

    match (kind, status) {
        (RequestKind::Login, 401) => SurveyError::invalid_credentials(message),
        (RequestKind::Signup, 400) if message.contains("already exists") => {
            SurveyError::conflict(message)
        }
        (_, 401) | (_, 403) => SurveyError::unauthorized(message),
        (_, 404) => match resource_for(url) {
            Some(resource) => SurveyError::not_found_resource(message, resource),
            None => SurveyError::not_found(message),
        },
        _ => SurveyError::http_status(message, status, Some(url.to_string())),
    }
}

/// What a missing URL referred to, for error titles
fn resource_for(url: &str) -> Option<&'static str> {
    if url.contains("/responses") {
        Some("Response")
    } else if url.contains("/surveys") {
        Some("Survey")
    } else {
        None
    }
}

/// HTTP client for the survey backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> SurveyResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| SurveyError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        kind: RequestKind,
        url: &str,
    ) -> SurveyResult<T> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} -> {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify_response(kind, status.as_u16(), &body, url);
            if status.is_server_error() {
                warn!("Backend error from {}: {}", url, error);
            }
            return Err(error);
        }

        response.json::<T>().await.map_err(|e| {
            SurveyError::json(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    pub async fn signup(&self, username: &str, password: &str) -> SurveyResult<String> {
        let url = self.url("admins");
        let request = self
            .http_client
            .post(&url)
            .json(&Credentials { username, password });
        let body: MessageBody = self.send(request, RequestKind::Signup, &url).await?;
        Ok(body.message)
    }

    #[instrument(skip(self, password), level = "debug")]
    pub async fn login(&self, username: &str, password: &str) -> SurveyResult<AdminSession> {
        let url = self.url("admins/login");
        let request = self
            .http_client
            .post(&url)
            .json(&Credentials { username, password });
        let login: LoginResponse = self.send(request, RequestKind::Login, &url).await?;
        AdminSession::from_login(username, login)
    }

    pub async fn create_survey(&self, session: &AdminSession, survey: &Survey) -> SurveyResult<SurveyId> {
        let url = self.url("surveys");
        let request = self
            .http_client
            .post(&url)
            .bearer_auth(&session.token)
            .json(survey);
        let created: SurveyCreated = self.send(request, RequestKind::Other, &url).await?;
        Ok(created.survey_id)
    }

    /// Surveys created by the session's admin
    pub async fn list_surveys(&self, session: &AdminSession) -> SurveyResult<Vec<Survey>> {
        let url = self.url("surveys");
        let request = self
            .http_client
            .get(&url)
            .query(&[("admin", session.username.as_str())])
            .bearer_auth(&session.token);
        self.send(request, RequestKind::Other, &url).await
    }

    pub async fn get_survey_by_id(&self, survey_id: SurveyId) -> SurveyResult<Survey> {
        let url = self.url(&format!("surveys/{}", survey_id));
        let request = self.http_client.get(&url);
        self.send(request, RequestKind::Other, &url).await
    }

    pub async fn delete_survey(&self, session: &AdminSession, survey_id: SurveyId) -> SurveyResult<String> {
        let url = self.url(&format!("surveys/{}", survey_id));
        let request = self.http_client.delete(&url).bearer_auth(&session.token);
        let body: MessageBody = self.send(request, RequestKind::Other, &url).await?;
        Ok(body.message)
    }

    pub async fn get_responses(
        &self,
        session: &AdminSession,
        survey_id: SurveyId,
    ) -> SurveyResult<Vec<SurveyResponse>> {
        let url = self.url(&format!("surveys/{}/responses", survey_id));
        let request = self.http_client.get(&url).bearer_auth(&session.token);
        self.send(request, RequestKind::Other, &url).await
    }

    /// A single response; the backend wraps it in a list
    pub async fn get_response(
        &self,
        session: &AdminSession,
        survey_id: SurveyId,
        response_id: ResponseId,
    ) -> SurveyResult<Vec<SurveyResponse>> {
        let url = self.url(&format!("surveys/{}/responses/{}", survey_id, response_id));
        let request = self.http_client.get(&url).bearer_auth(&session.token);
        self.send(request, RequestKind::Other, &url).await
    }

    pub async fn health(&self) -> SurveyResult<String> {
        let url = self.url("health");
        let body: MessageBody = self
            .send(self.http_client.get(&url), RequestKind::Other, &url)
            .await?;
        Ok(body.message)
    }
}

#[async_trait]
impl SurveyApi for ApiClient {
    async fn fetch_survey(&self, survey_id: SurveyId) -> SurveyResult<Survey> {
        self.get_survey_by_id(survey_id).await
    }

    #[instrument(skip(self, batch), level = "debug")]
    async fn submit_answers(&self, survey_id: SurveyId, batch: &AnswerBatch) -> SurveyResult<ResponseId> {
        let url = self.url(&format!("surveys/{}/responses", survey_id));
        let request = self.http_client.post(&url).json(batch);
        let created: ResponseCreated = self.send(request, RequestKind::Other, &url).await?;
        Ok(created.response_id)
    }

    #[instrument(skip(self, content), level = "debug")]
    async fn post_chat_turn(
        &self,
        response_id: ResponseId,
        survey_id: SurveyId,
        content: &str,
    ) -> SurveyResult<ChatReply> {
        let url = self.url(&format!("surveys/{}/responses/{}/chat", survey_id, response_id));
        let request = self.http_client.post(&url).json(&ChatTurn { content });
        self.send(request, RequestKind::Other, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:5000/api/v1/x";

    #[test]
    fn test_login_401_is_invalid_credentials() {
        let err = classify_response(RequestKind::Login, 401, r#"{"message":"Invalid credentials"}"#, URL);
        assert!(matches!(err, SurveyError::InvalidCredentials { .. }));
    }

    #[test]
    fn test_signup_conflict() {
        let err = classify_response(RequestKind::Signup, 400, r#"{"message":"Admin already exists"}"#, URL);
        assert!(matches!(err, SurveyError::Conflict { .. }));

        let err = classify_response(RequestKind::Signup, 400, r#"{"message":"Missing data"}"#, URL);
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_token_and_missing_resources() {
        let err = classify_response(RequestKind::Other, 401, r#"{"message":"Token is invalid!"}"#, URL);
        assert!(matches!(err, SurveyError::Unauthorized { .. }));

        let err = classify_response(RequestKind::Other, 403, "", URL);
        assert!(matches!(err, SurveyError::Unauthorized { .. }));

        let err = classify_response(RequestKind::Other, 404, r#"{"message":"Survey not found"}"#, URL);
        assert!(matches!(err, SurveyError::NotFound { .. }));
        assert!(err.to_string().contains("Survey not found"));
    }

    #[test]
    fn test_not_found_names_the_resource() {
        let survey_url = "http://localhost:5000/api/v1/surveys/9";
        let err = classify_response(RequestKind::Other, 404, "", survey_url);
        assert!(matches!(
            err,
            SurveyError::NotFound { resource_type: Some(ref rt), .. } if rt == "Survey"
        ));

        let response_url = "http://localhost:5000/api/v1/surveys/9/responses/3";
        let err = classify_response(RequestKind::Other, 404, "", response_url);
        assert!(matches!(
            err,
            SurveyError::NotFound { resource_type: Some(ref rt), .. } if rt == "Response"
        ));

        let err = classify_response(RequestKind::Other, 404, "", URL);
        assert!(matches!(err, SurveyError::NotFound { resource_type: None, .. }));
    }

    #[test]
    fn test_unstructured_body_is_kept() {
        let err = classify_response(RequestKind::Other, 500, "upstream exploded", URL);
        assert!(err.to_string().contains("upstream exploded"));
        assert!(err.is_retryable());

        let err = classify_response(RequestKind::Other, 502, "", URL);
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_url_join() {
        let config = ApiConfig {
            base_url: "http://localhost:5000/api/v1/".into(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api/v1");
        assert_eq!(client.url("/surveys/3"), "http://localhost:5000/api/v1/surveys/3");
    }
}
