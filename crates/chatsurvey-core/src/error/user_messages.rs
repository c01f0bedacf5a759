//! User-friendly error messages and classification
//!
//! Turns a `SurveyError` into the wording shown to admins and respondents.

use super::types::SurveyError;

/// Error category for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration issues
    Configuration,
    /// Authentication/authorization failures
    Authentication,
    /// Network connectivity issues or server failures
    Network,
    /// Invalid user input
    UserInput,
    /// Resource not available
    ResourceUnavailable,
    /// Local files
    FileSystem,
    /// Internal system errors
    Internal,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration Error",
            Self::Authentication => "Authentication Error",
            Self::Network => "Network Error",
            Self::UserInput => "Invalid Input",
            Self::ResourceUnavailable => "Not Found",
            Self::FileSystem => "File System Error",
            Self::Internal => "Internal Error",
        }
    }
}

/// User-friendly error information
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    /// The error category
    pub category: ErrorCategory,
    /// User-friendly title/summary
    pub title: String,
    /// Detailed user-friendly message
    pub message: String,
    /// Suggested actions to resolve the error
    pub suggestions: Vec<String>,
    /// Original technical error code
    pub error_code: String,
}

impl UserFriendlyError {
    /// Create a new user-friendly error
    pub fn new(
        category: ErrorCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
            suggestions: Vec::new(),
            error_code: String::new(),
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the technical error code
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Format the error for display
    pub fn format_display(&self) -> String {
        let mut output = format!(
            "{}: {}\n\n{}",
            self.category.display_name(),
            self.title,
            self.message
        );

        if !self.suggestions.is_empty() {
            output.push_str("\n\nSuggested actions:");
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("\n  {}. {}", i + 1, suggestion));
            }
        }

        output
    }
}

/// Convert SurveyError to user-friendly error
impl From<&SurveyError> for UserFriendlyError {
    fn from(error: &SurveyError) -> Self {
        let friendly = match error {
            SurveyError::Config { message, .. } => {
                UserFriendlyError::new(ErrorCategory::Configuration, "Invalid configuration", message.clone())
                    .with_suggestion("Run `chatsurvey config validate` to see every problem")
            }

            SurveyError::InvalidCredentials { .. } => UserFriendlyError::new(
                ErrorCategory::Authentication,
                "Login failed",
                "Your username or password is incorrect. Please try again.",
            ),

            SurveyError::Unauthorized { message } => UserFriendlyError::new(
                ErrorCategory::Authentication,
                "Not authorized",
                message.clone(),
            )
            .with_suggestion("Log in again with `chatsurvey admin login`"),

            SurveyError::Conflict { .. } => UserFriendlyError::new(
                ErrorCategory::UserInput,
                "Username unavailable",
                "Your username has been taken. Please choose another username.",
            ),

            SurveyError::NotFound {
                message,
                resource_type,
            } => {
                let title = match resource_type {
                    Some(rt) => format!("{} not found", rt),
                    None => "Resource not found".to_string(),
                };
                UserFriendlyError::new(ErrorCategory::ResourceUnavailable, title, message.clone())
                    .with_suggestion("Verify the identifier is correct")
            }

            SurveyError::Http {
                message,
                status_code,
                ..
            } => {
                let title = match status_code {
                    Some(code) if *code >= 500 => "The server failed to handle the request",
                    Some(_) => "The server rejected the request",
                    None => "Could not reach the server",
                };
                UserFriendlyError::new(ErrorCategory::Network, title, message.clone())
                    .with_suggestion("Check the base URL with `chatsurvey config show`")
                    .with_suggestion("Try again in a moment")
            }

            SurveyError::Validation(validation) => UserFriendlyError::new(
                ErrorCategory::UserInput,
                validation.summary(),
                validation.all_errors().join("\n"),
            ),

            SurveyError::Sequencer(err) => UserFriendlyError::new(
                ErrorCategory::UserInput,
                "Action not available right now",
                err.to_string(),
            ),

            SurveyError::InvalidInput { message, field } => {
                let title = match field {
                    Some(f) => format!("Invalid value for '{}'", f),
                    None => "Invalid input".to_string(),
                };
                UserFriendlyError::new(ErrorCategory::UserInput, title, message.clone())
            }

            SurveyError::Storage { message } | SurveyError::Io { message, .. } => {
                UserFriendlyError::new(ErrorCategory::FileSystem, "Local state unavailable", message.clone())
                    .with_suggestion("Check permissions of the state directory")
            }

            SurveyError::Json { message } => UserFriendlyError::new(
                ErrorCategory::Internal,
                "Data format error",
                message.clone(),
            ),

            SurveyError::Other { message, .. } => UserFriendlyError::new(
                ErrorCategory::Internal,
                "Something went wrong",
                message.clone(),
            ),
        };

        friendly.with_error_code(error.error_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message() {
        let err = SurveyError::invalid_credentials("Invalid credentials");
        let friendly = UserFriendlyError::from(&err);
        assert_eq!(friendly.category, ErrorCategory::Authentication);
        assert_eq!(
            friendly.message,
            "Your username or password is incorrect. Please try again."
        );
        assert_eq!(friendly.error_code, "SURVEY_INVALID_CREDENTIALS");
    }

    #[test]
    fn test_conflict_message() {
        let err = SurveyError::conflict("Admin already exists");
        let friendly = UserFriendlyError::from(&err);
        assert!(friendly.message.contains("username has been taken"));
    }

    #[test]
    fn test_format_display_lists_suggestions() {
        let err = SurveyError::http("connection refused");
        let text = UserFriendlyError::from(&err).format_display();
        assert!(text.starts_with("Network Error: Could not reach the server"));
        assert!(text.contains("Suggested actions:"));
        assert!(text.contains("1. Check the base URL"));
    }
}
