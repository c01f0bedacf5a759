//! From trait implementations for SurveyError conversions

use super::types::SurveyError;
use crate::conversation::SequencerError;
use crate::survey::{DraftError, ValidationError};

impl From<anyhow::Error> for SurveyError {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for SurveyError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for SurveyError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::Http {
            message: error.to_string(),
            url,
            status_code,
        }
    }
}

impl From<ValidationError> for SurveyError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<DraftError> for SurveyError {
    fn from(error: DraftError) -> Self {
        Self::invalid_input(error.to_string())
    }
}

impl From<SequencerError> for SurveyError {
    fn from(error: SequencerError) -> Self {
        Self::Sequencer(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SurveyError = io.into();
        assert_eq!(err.error_code(), "SURVEY_IO");
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SurveyError = parse.into();
        assert!(matches!(err, SurveyError::Json { .. }));
    }

    #[test]
    fn test_sequencer_error_conversion() {
        let err: SurveyError = SequencerError::AlreadySubmitted.into();
        assert_eq!(err.error_code(), "SURVEY_SEQUENCER");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(SurveyError::http("connection reset").is_retryable());
        assert!(SurveyError::http_status("boom", 502, None).is_retryable());
        assert!(!SurveyError::http_status("bad request", 400, None).is_retryable());
        assert!(!SurveyError::conflict("Admin already exists").is_retryable());
    }
}
