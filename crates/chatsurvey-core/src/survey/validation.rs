//! Validation errors for the survey builder

use std::fmt;

/// Summary shown when the chat context is over the limit
pub const CHAT_CONTEXT_TOO_LONG: &str = "Please keep chatbot context less than 1000 characters";

/// Summary shown for any other failure
pub const FILL_ALL_FIELDS: &str = "Please fill all fields";

/// Error for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Error code
    pub code: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    /// Create new field error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create "required" error
    pub fn required() -> Self {
        Self::new("required", "Field is required")
    }

    /// Create "max_length" error
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new(
            "max_length",
            format!("Must be at most {} characters, got {}", max, actual),
        )
    }

    /// Create "min_items" error
    pub fn min_items(what: &str) -> Self {
        Self::new("min_items", format!("At least one {} is required", what))
    }
}

/// Validation error containing all field errors
///
/// Field paths look like `title`, `questions[0].question` or
/// `questions[1].options[2]`, in the order the form shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Errors by field path, in form order
    pub field_errors: Vec<(String, FieldError)>,

    /// General errors not related to specific fields
    pub general_errors: Vec<String>,
}

impl ValidationError {
    /// Create empty validation error
    pub fn new() -> Self {
        Self::default()
    }

    /// Add field error
    pub fn add_field_error(&mut self, field: impl Into<String>, error: FieldError) {
        self.field_errors.push((field.into(), error));
    }

    /// Add general error
    pub fn add_general_error(&mut self, error: impl Into<String>) {
        self.general_errors.push(error.into());
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || !self.general_errors.is_empty()
    }

    /// Get total error count
    pub fn error_count(&self) -> usize {
        self.field_errors.len() + self.general_errors.len()
    }

    /// Whether a field path has any error
    pub fn has_error_for(&self, field: &str) -> bool {
        self.field_errors.iter().any(|(f, _)| f == field)
    }

    /// One-line notification for the whole form
    pub fn summary(&self) -> &'static str {
        let context_too_long = self
            .field_errors
            .iter()
            .any(|(f, e)| f == "chat_context" && e.code == "max_length");
        if context_too_long {
            CHAT_CONTEXT_TOO_LONG
        } else {
            FILL_ALL_FIELDS
        }
    }

    /// Get all errors as strings
    pub fn all_errors(&self) -> Vec<String> {
        let mut errors = self.general_errors.clone();
        for (field, error) in &self.field_errors {
            errors.push(format!("{}: {}", field, error.message));
        }
        errors
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.all_errors().join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prefers_chat_context_length() {
        let mut err = ValidationError::new();
        err.add_field_error("title", FieldError::required());
        err.add_field_error("chat_context", FieldError::max_length(1000, 1001));
        assert_eq!(err.summary(), CHAT_CONTEXT_TOO_LONG);
    }

    #[test]
    fn test_summary_for_blank_fields() {
        let mut err = ValidationError::new();
        err.add_field_error("questions[0].question", FieldError::required());
        assert_eq!(err.summary(), FILL_ALL_FIELDS);
        assert!(err.has_error_for("questions[0].question"));
        assert_eq!(err.error_count(), 1);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationError::new().into_result().is_ok());
        let mut err = ValidationError::new();
        err.add_general_error("nope");
        assert!(err.into_result().is_err());
    }
}
