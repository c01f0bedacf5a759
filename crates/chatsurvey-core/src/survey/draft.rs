//! Survey builder
//!
//! `SurveyDraft` is the in-progress survey an admin edits. It keeps the
//! structural rules at all times (at least one question, at least one option
//! per choice question) and checks text content only when asked to, through
//! [`SurveyDraft::validate`]. Question identifiers are assigned when the
//! submission payload is built.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::validation::{FieldError, ValidationError};
use super::{Question, QuestionId, QuestionKind, Survey, SurveyMetadata};

/// Upper bound on the chat context, in characters
pub const MAX_CHAT_CONTEXT_CHARS: usize = 1000;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Structural edits the builder refuses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("A survey must keep at least one question")]
    LastQuestion,

    #[error("Question {question} must keep at least one option")]
    LastOption { question: usize },

    #[error("No question at index {index} (survey has {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("No option at index {index} in question {question} (question has {len})")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },
}

/// A question being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftQuestion {
    #[serde(default)]
    pub text: String,

    #[serde(default, rename = "type")]
    pub kind: QuestionKind,

    /// Kept while the question is free response so switching back restores them
    #[serde(default)]
    pub options: Vec<String>,
}

impl DraftQuestion {
    /// A blank single-choice question with one empty option
    pub fn new() -> Self {
        Self {
            text: String::new(),
            kind: QuestionKind::SingleChoice,
            options: vec![String::new()],
        }
    }

    /// Options as they will be submitted
    pub fn submitted_options(&self) -> Vec<String> {
        if self.kind.needs_options() {
            self.options.clone()
        } else {
            Vec::new()
        }
    }
}

impl Default for DraftQuestion {
    fn default() -> Self {
        Self::new()
    }
}

/// The survey an admin is building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub chat_context: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    questions: Vec<DraftQuestion>,
}

impl SurveyDraft {
    /// Start a draft with one blank question
    pub fn new(created_by: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            chat_context: String::new(),
            name: String::new(),
            description: String::new(),
            created_by: created_by.into(),
            questions: vec![DraftQuestion::new()],
        }
    }

    /// Questions in form order
    pub fn questions(&self) -> &[DraftQuestion] {
        &self.questions
    }

    /// Get a question
    pub fn question(&self, index: usize) -> Result<&DraftQuestion, DraftError> {
        let len = self.questions.len();
        self.questions
            .get(index)
            .ok_or(DraftError::QuestionOutOfRange { index, len })
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut DraftQuestion, DraftError> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(DraftError::QuestionOutOfRange { index, len })
    }

    /// Number of questions
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Append a blank question and return its index
    pub fn add_question(&mut self) -> usize {
        self.questions.push(DraftQuestion::new());
        self.questions.len() - 1
    }

    /// Remove a question; later questions shift down by one
    pub fn remove_question(&mut self, index: usize) -> Result<DraftQuestion, DraftError> {
        self.question(index)?;
        if self.questions.len() <= 1 {
            return Err(DraftError::LastQuestion);
        }
        Ok(self.questions.remove(index))
    }

    /// Replace the prompt text of a question
    pub fn set_question_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DraftError> {
        self.question_mut(index)?.text = text.into();
        Ok(())
    }

    /// Change a question's type
    ///
    /// Moving to a choice type guarantees at least one option. Moving to free
    /// response keeps the options in memory; they are left out of the payload.
    pub fn set_question_type(&mut self, index: usize, kind: QuestionKind) -> Result<(), DraftError> {
        let question = self.question_mut(index)?;
        question.kind = kind;
        if kind.needs_options() && question.options.is_empty() {
            question.options.push(String::new());
        }
        Ok(())
    }

    /// Insert an empty option right after `after_option_index`; returns the new index
    pub fn add_option(&mut self, index: usize, after_option_index: usize) -> Result<usize, DraftError> {
        let question = self.question_mut(index)?;
        let len = question.options.len();
        if after_option_index >= len {
            return Err(DraftError::OptionOutOfRange {
                question: index,
                index: after_option_index,
                len,
            });
        }
        question.options.insert(after_option_index + 1, String::new());
        Ok(after_option_index + 1)
    }

    /// Append an option with text; returns its index
    pub fn push_option(&mut self, index: usize, text: impl Into<String>) -> Result<usize, DraftError> {
        let question = self.question_mut(index)?;
        question.options.push(text.into());
        Ok(question.options.len() - 1)
    }

    /// Replace an option's text
    pub fn set_option(
        &mut self,
        index: usize,
        option_index: usize,
        text: impl Into<String>,
    ) -> Result<(), DraftError> {
        let question = self.question_mut(index)?;
        let len = question.options.len();
        let option = question
            .options
            .get_mut(option_index)
            .ok_or(DraftError::OptionOutOfRange {
                question: index,
                index: option_index,
                len,
            })?;
        *option = text.into();
        Ok(())
    }

    /// Remove an option; the last one stays
    pub fn remove_option(&mut self, index: usize, option_index: usize) -> Result<String, DraftError> {
        let question = self.question_mut(index)?;
        let len = question.options.len();
        if option_index >= len {
            return Err(DraftError::OptionOutOfRange {
                question: index,
                index: option_index,
                len,
            });
        }
        if len <= 1 {
            return Err(DraftError::LastOption { question: index });
        }
        Ok(question.options.remove(option_index))
    }

    /// Check every text field
    ///
    /// Title, subtitle, chat context, each question text and each option of a
    /// choice question must be non-blank after trimming. The chat context is
    /// limited to [`MAX_CHAT_CONTEXT_CHARS`] characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        for (field, value) in [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("chat_context", &self.chat_context),
        ] {
            if is_blank(value) {
                errors.add_field_error(field, FieldError::required());
            }
        }

        let context_len = self.chat_context.chars().count();
        if context_len > MAX_CHAT_CONTEXT_CHARS {
            errors.add_field_error(
                "chat_context",
                FieldError::max_length(MAX_CHAT_CONTEXT_CHARS, context_len),
            );
        }

        if self.questions.is_empty() {
            errors.add_general_error("A survey needs at least one question");
        }

        for (i, question) in self.questions.iter().enumerate() {
            if is_blank(&question.text) {
                errors.add_field_error(format!("questions[{}].question", i), FieldError::required());
            }
            if !question.kind.needs_options() {
                continue;
            }
            if question.options.is_empty() {
                errors.add_field_error(format!("questions[{}].options", i), FieldError::min_items("option"));
            }
            for (j, option) in question.options.iter().enumerate() {
                if is_blank(option) {
                    errors.add_field_error(
                        format!("questions[{}].options[{}]", i, j),
                        FieldError::required(),
                    );
                }
            }
        }

        errors.into_result()
    }

    /// Validate and build the payload, stamped with the current local time
    pub fn to_submission_payload(&self) -> Result<Survey, ValidationError> {
        self.to_submission_payload_at(Local::now().naive_local())
    }

    /// Validate and build the payload with an explicit creation time
    ///
    /// Questions are numbered from 1 in form order.
    pub fn to_submission_payload_at(&self, created_at: NaiveDateTime) -> Result<Survey, ValidationError> {
        self.validate()?;

        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| Question {
                question_id: (i + 1) as QuestionId,
                question: q.text.trim().to_string(),
                kind: q.kind,
                options: q
                    .submitted_options()
                    .into_iter()
                    .map(|o| o.trim().to_string())
                    .collect(),
            })
            .collect::<Vec<_>>();

        debug!("Built survey payload with {} questions", questions.len());

        Ok(Survey {
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            chat_context: self.chat_context.trim().to_string(),
            questions,
            metadata: SurveyMetadata {
                survey_id: None,
                name: self.name.clone(),
                description: self.description.clone(),
                created_by: self.created_by.clone(),
                created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
            },
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::validation::{CHAT_CONTEXT_TOO_LONG, FILL_ALL_FIELDS};
    use chrono::NaiveDate;

    fn filled_draft() -> SurveyDraft {
        let mut draft = SurveyDraft::new("ana");
        draft.title = "Colours".into();
        draft.subtitle = "A short survey".into();
        draft.chat_context = "Dig into why people like colours".into();
        draft.set_question_text(0, "Favourite colour?").unwrap();
        draft.set_option(0, 0, "Red").unwrap();
        draft.push_option(0, "Blue").unwrap();
        let q = draft.add_question();
        draft.set_question_text(q, "How are you?").unwrap();
        draft.set_question_type(q, QuestionKind::FreeResponse).unwrap();
        draft
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_new_draft_has_one_blank_question() {
        let draft = SurveyDraft::new("ana");
        assert_eq!(draft.question_count(), 1);
        let q = draft.question(0).unwrap();
        assert_eq!(q.kind, QuestionKind::SingleChoice);
        assert_eq!(q.options, vec![String::new()]);
    }

    #[test]
    fn test_cannot_remove_last_question() {
        let mut draft = SurveyDraft::new("ana");
        assert_eq!(draft.remove_question(0), Err(DraftError::LastQuestion));

        draft.add_question();
        draft.set_question_text(1, "second").unwrap();
        draft.remove_question(0).unwrap();
        assert_eq!(draft.question_count(), 1);
        assert_eq!(draft.question(0).unwrap().text, "second");
        assert_eq!(draft.remove_question(0), Err(DraftError::LastQuestion));
    }

    #[test]
    fn test_remove_question_out_of_range() {
        let mut draft = SurveyDraft::new("ana");
        draft.add_question();
        assert_eq!(
            draft.remove_question(5),
            Err(DraftError::QuestionOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_cannot_remove_last_option() {
        let mut draft = SurveyDraft::new("ana");
        assert_eq!(
            draft.remove_option(0, 0),
            Err(DraftError::LastOption { question: 0 })
        );
        draft.add_option(0, 0).unwrap();
        assert_eq!(draft.question(0).unwrap().options.len(), 2);
        draft.remove_option(0, 1).unwrap();
        assert!(draft.remove_option(0, 0).is_err());
    }

    #[test]
    fn test_add_option_inserts_after() {
        let mut draft = SurveyDraft::new("ana");
        draft.set_option(0, 0, "first").unwrap();
        draft.push_option(0, "last").unwrap();
        let idx = draft.add_option(0, 0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(
            draft.question(0).unwrap().options,
            vec!["first".to_string(), String::new(), "last".to_string()]
        );
        assert!(matches!(
            draft.add_option(0, 9),
            Err(DraftError::OptionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_type_switch_keeps_options_in_memory() {
        let mut draft = filled_draft();
        draft.set_question_type(0, QuestionKind::FreeResponse).unwrap();
        assert_eq!(draft.question(0).unwrap().options.len(), 2);
        assert!(draft.question(0).unwrap().submitted_options().is_empty());

        draft.set_question_type(0, QuestionKind::MultiChoice).unwrap();
        assert_eq!(draft.question(0).unwrap().submitted_options().len(), 2);
    }

    #[test]
    fn test_switch_into_choice_adds_option() {
        let mut draft = filled_draft();
        draft.questions[1].options.clear();
        draft.set_question_type(1, QuestionKind::SingleChoice).unwrap();
        assert_eq!(draft.question(1).unwrap().options, vec![String::new()]);
    }

    #[test]
    fn test_validate_accepts_filled_draft() {
        assert!(filled_draft().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut draft = filled_draft();
        draft.subtitle = "   ".into();
        draft.set_option(0, 1, "").unwrap();
        draft.set_question_text(1, "\t").unwrap();

        let err = draft.validate().unwrap_err();
        assert!(err.has_error_for("subtitle"));
        assert!(err.has_error_for("questions[0].options[1]"));
        assert!(err.has_error_for("questions[1].question"));
        assert_eq!(err.error_count(), 3);
        assert_eq!(err.summary(), FILL_ALL_FIELDS);
    }

    #[test]
    fn test_free_response_options_are_not_validated() {
        let mut draft = filled_draft();
        // the hidden option of the free response question is blank
        assert_eq!(draft.question(1).unwrap().options, vec![String::new()]);
        assert!(draft.validate().is_ok());
        draft.set_question_type(1, QuestionKind::MultiChoice).unwrap();
        assert!(draft.validate().unwrap_err().has_error_for("questions[1].options[0]"));
    }

    #[test]
    fn test_chat_context_limit() {
        let mut draft = filled_draft();
        draft.chat_context = "x".repeat(MAX_CHAT_CONTEXT_CHARS);
        assert!(draft.validate().is_ok());

        draft.chat_context = "x".repeat(MAX_CHAT_CONTEXT_CHARS + 1);
        let err = draft.validate().unwrap_err();
        assert_eq!(err.summary(), CHAT_CONTEXT_TOO_LONG);
    }

    #[test]
    fn test_chat_context_counts_characters_not_bytes() {
        let mut draft = filled_draft();
        draft.chat_context = "é".repeat(MAX_CHAT_CONTEXT_CHARS);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_payload_numbers_questions_from_one() {
        let survey = filled_draft().to_submission_payload_at(timestamp()).unwrap();
        let ids: Vec<_> = survey.questions.iter().map(|q| q.question_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(survey.questions[0].options, vec!["Red", "Blue"]);
        assert!(survey.questions[1].options.is_empty());
        assert_eq!(survey.metadata.created_at, "2024-03-01 09:30:00");
        assert_eq!(survey.metadata.created_by, "ana");
        assert_eq!(survey.metadata.survey_id, None);
    }

    #[test]
    fn test_payload_not_built_when_invalid() {
        let draft = SurveyDraft::new("ana");
        assert!(draft.to_submission_payload_at(timestamp()).is_err());
    }

    #[test]
    fn test_draft_from_yaml() {
        let yaml = r#"
title: Colours
subtitle: Quick one
chat_context: Ask why
questions:
  - text: Pick one
    type: multiple_choice
    options: [Red, Blue]
  - text: Anything else?
    type: free_response
"#;
        let draft: SurveyDraft = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(draft.question_count(), 2);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_loaded_draft_without_questions_fails_validation() {
        let draft: SurveyDraft =
            serde_json::from_str(r#"{"title":"a","subtitle":"b","chat_context":"c"}"#).unwrap();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.general_errors.len(), 1);
    }
}
