//! Core error type for chatsurvey

use crate::conversation::SequencerError;
use crate::survey::ValidationError;
use thiserror::Error;

/// Result type alias for chatsurvey operations
pub type SurveyResult<T> = Result<T, SurveyError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> SurveyResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> SurveyResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> SurveyResult<T> {
        self.map_err(|e| SurveyError::other(format!("{}: {}", context, e)))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> SurveyResult<T> {
        self.map_err(|e| SurveyError::other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with context message
    fn context<C: std::fmt::Display>(self, context: C) -> SurveyResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> SurveyResult<T> {
        self.ok_or_else(|| SurveyError::other(context.to_string()))
    }
}

/// Main error type for chatsurvey
#[derive(Error, Debug, Clone)]
pub enum SurveyError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// HTTP transport errors and unclassified non-success responses
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// Login rejected by the backend
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// Admin token missing, invalid or not allowed to touch the resource
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend refused to create something that already exists
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
    },

    /// Survey draft failed client-side validation
    #[error("{0}")]
    Validation(ValidationError),

    /// Conversation operation not allowed in the current phase
    #[error("Conversation error: {0}")]
    Sequencer(SequencerError),

    /// Persistence errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}

impl SurveyError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "SURVEY_CONFIG",
            Self::Http { .. } => "SURVEY_HTTP",
            Self::InvalidCredentials { .. } => "SURVEY_INVALID_CREDENTIALS",
            Self::Unauthorized { .. } => "SURVEY_UNAUTHORIZED",
            Self::Conflict { .. } => "SURVEY_CONFLICT",
            Self::NotFound { .. } => "SURVEY_NOT_FOUND",
            Self::Validation(_) => "SURVEY_VALIDATION",
            Self::Sequencer(_) => "SURVEY_SEQUENCER",
            Self::Storage { .. } => "SURVEY_STORAGE",
            Self::Io { .. } => "SURVEY_IO",
            Self::Json { .. } => "SURVEY_JSON",
            Self::InvalidInput { .. } => "SURVEY_INVALID_INPUT",
            Self::Other { .. } => "SURVEY_OTHER",
        }
    }

    /// HTTP status attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => *status_code,
            Self::InvalidCredentials { .. } | Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Transport failures and 5xx answers may succeed when the user tries again.
    /// Nothing retries automatically.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status_code, .. } => status_code.is_none_or(|code| code >= 500),
            _ => false,
        }
    }
}
