//! Admin authentication state

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::LoginResponse;
use crate::error::{SurveyError, SurveyResult};

/// Format of `jwt_exp` in login responses, always UTC
pub const JWT_EXP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A logged-in admin
///
/// Passed explicitly to every admin call and attached as a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn new(username: impl Into<String>, token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            expires_at,
        }
    }

    /// Build a session from the login response body
    pub fn from_login(username: impl Into<String>, login: LoginResponse) -> SurveyResult<Self> {
        let expires_at = parse_jwt_exp(&login.jwt_exp)?;
        Ok(Self::new(username, login.jwt, expires_at))
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the admin has to log in again
    pub fn should_logout(session: Option<&Self>) -> bool {
        session.is_none_or(|s| s.token.is_empty() || s.is_expired())
    }
}

fn parse_jwt_exp(value: &str) -> SurveyResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), JWT_EXP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| SurveyError::invalid_input_field(format!("Unreadable token expiry '{}': {}", value, e), "jwt_exp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_from_login_parses_expiry() {
        let session = AdminSession::from_login(
            "ana",
            LoginResponse {
                jwt: "tok".into(),
                jwt_exp: "2024-03-01 10:00:00".into(),
            },
        )
        .unwrap();

        assert_eq!(session.username, "ana");
        assert_eq!(
            session.expires_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_bad_expiry_is_rejected() {
        let result = AdminSession::from_login(
            "ana",
            LoginResponse {
                jwt: "tok".into(),
                jwt_exp: "tomorrow".into(),
            },
        );
        assert!(matches!(result, Err(SurveyError::InvalidInput { .. })));
    }

    #[test]
    fn test_should_logout() {
        assert!(AdminSession::should_logout(None));

        let live = AdminSession::new("ana", "tok", Utc::now() + Duration::hours(1));
        assert!(!AdminSession::should_logout(Some(&live)));

        let expired = AdminSession::new("ana", "tok", Utc::now() - Duration::seconds(1));
        assert!(AdminSession::should_logout(Some(&expired)));

        let blank = AdminSession::new("ana", "", Utc::now() + Duration::hours(1));
        assert!(AdminSession::should_logout(Some(&blank)));
    }
}
