//! Questions and answers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::QuestionId;

/// The input shape of a question
///
/// Wire names follow the backend: a single-choice question is
/// `multiple_choice`, a multi-choice question is `multiple_response`.
/// Older surveys used short/long free-text variants; they all read as
/// `FreeResponse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuestionKind {
    /// Pick exactly one option
    #[default]
    #[serde(rename = "multiple_choice")]
    SingleChoice,

    /// Pick any number of options
    #[serde(rename = "multiple_response")]
    MultiChoice,

    /// Free text
    #[serde(
        rename = "free_response",
        alias = "short_answer",
        alias = "long_answer",
        alias = "short_response",
        alias = "long_response"
    )]
    FreeResponse,
}

impl QuestionKind {
    /// All kinds, in the order the builder offers them
    pub const ALL: [QuestionKind; 3] = [Self::SingleChoice, Self::MultiChoice, Self::FreeResponse];

    /// Whether questions of this kind carry an options list
    pub fn needs_options(&self) -> bool {
        match self {
            Self::SingleChoice | Self::MultiChoice => true,
            Self::FreeResponse => false,
        }
    }

    /// Whether answers of this kind hold several values
    pub fn is_multi(&self) -> bool {
        match self {
            Self::MultiChoice => true,
            Self::SingleChoice | Self::FreeResponse => false,
        }
    }

    /// The backend's name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => "multiple_choice",
            Self::MultiChoice => "multiple_response",
            Self::FreeResponse => "free_response",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleChoice => "Multiple choice (pick one)",
            Self::MultiChoice => "Multiple response (pick any)",
            Self::FreeResponse => "Free response",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiple_choice" | "single_choice" | "single" => Ok(Self::SingleChoice),
            "multiple_response" | "multi_choice" | "multi" => Ok(Self::MultiChoice),
            "free_response" | "short_answer" | "long_answer" | "short_response"
            | "long_response" | "free" | "text" => Ok(Self::FreeResponse),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

/// One survey item as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position within the survey
    pub question_id: QuestionId,

    /// Prompt text
    pub question: String,

    /// Input shape
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// Choices, empty for free response
    #[serde(default)]
    pub options: Vec<String>,
}

impl Question {
    /// Create a new question
    pub fn new(question_id: QuestionId, question: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            question_id,
            question: question.into(),
            kind,
            options: Vec::new(),
        }
    }

    /// Set the options list
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `value` is one of this question's options
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// A respondent's answer to one question
///
/// Single-choice and free-response questions take `Single`, multi-choice
/// questions take `Multiple`. The value is turned into a list exactly once,
/// when the answers are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// Create a single-valued answer
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// Create a multi-valued answer
    pub fn multiple<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multiple(values.into_iter().map(Into::into).collect())
    }

    /// Blank text and empty selections both count as "not answered"
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.trim().is_empty(),
            Self::Multiple(values) => values.is_empty(),
        }
    }

    /// Whether this answer's cardinality matches the question kind
    pub fn fits(&self, kind: QuestionKind) -> bool {
        matches!(
            (self, kind.is_multi()),
            (Self::Single(_), false) | (Self::Multiple(_), true)
        )
    }

    /// The chosen values, in order
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Normalize into the list form the backend stores
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value],
            Self::Multiple(values) => values,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_string(&QuestionKind::SingleChoice).unwrap();
        assert_eq!(json, "\"multiple_choice\"");
        let json = serde_json::to_string(&QuestionKind::MultiChoice).unwrap();
        assert_eq!(json, "\"multiple_response\"");
    }

    #[test]
    fn test_legacy_kinds_read_as_free_response() {
        for legacy in ["short_answer", "long_answer", "short_response", "long_response"] {
            let kind: QuestionKind = serde_json::from_str(&format!("\"{}\"", legacy)).unwrap();
            assert_eq!(kind, QuestionKind::FreeResponse);
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("multi".parse::<QuestionKind>().unwrap(), QuestionKind::MultiChoice);
        assert!("rating".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn test_question_missing_options_defaults_to_empty() {
        let q: Question =
            serde_json::from_str(r#"{"question_id":2,"question":"Why?","type":"free_response"}"#)
                .unwrap();
        assert!(q.options.is_empty());
        assert_eq!(q.kind, QuestionKind::FreeResponse);
    }

    #[test]
    fn test_answer_emptiness() {
        assert!(Answer::single("").is_empty());
        assert!(Answer::single("   ").is_empty());
        assert!(Answer::multiple(Vec::<String>::new()).is_empty());
        assert!(!Answer::single("Red").is_empty());
        assert!(!Answer::multiple(["Red"]).is_empty());
    }

    #[test]
    fn test_answer_fits_kind() {
        assert!(Answer::single("Red").fits(QuestionKind::SingleChoice));
        assert!(Answer::single("fine").fits(QuestionKind::FreeResponse));
        assert!(Answer::multiple(["a", "b"]).fits(QuestionKind::MultiChoice));
        assert!(!Answer::single("a").fits(QuestionKind::MultiChoice));
        assert!(!Answer::multiple(["a"]).fits(QuestionKind::SingleChoice));
    }

    #[test]
    fn test_answer_normalization_keeps_lists() {
        assert_eq!(Answer::single("Red").into_values(), vec!["Red".to_string()]);
        assert_eq!(
            Answer::multiple(["Red", "Blue"]).into_values(),
            vec!["Red".to_string(), "Blue".to_string()]
        );
    }

    #[test]
    fn test_answer_untagged_serde() {
        let single: Answer = serde_json::from_str("\"Red\"").unwrap();
        assert_eq!(single, Answer::single("Red"));
        let multi: Answer = serde_json::from_str("[\"Red\",\"Blue\"]").unwrap();
        assert_eq!(multi, Answer::multiple(["Red", "Blue"]));
    }
}
