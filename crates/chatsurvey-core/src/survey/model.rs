//! Survey definition as exchanged with the backend

use serde::{Deserialize, Serialize};

use super::{Question, SurveyId};

/// Authoring metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyMetadata {
    /// Assigned by the backend; absent on a survey that has not been created yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<SurveyId>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Admin username
    #[serde(default)]
    pub created_by: String,

    /// `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub created_at: String,
}

/// A complete survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub title: String,

    pub subtitle: String,

    /// Guidance for the follow-up chat generator
    #[serde(default)]
    pub chat_context: String,

    pub questions: Vec<Question>,

    #[serde(default)]
    pub metadata: SurveyMetadata,
}

impl Survey {
    /// Backend identifier, once the survey exists
    pub fn id(&self) -> Option<SurveyId> {
        self.metadata.survey_id
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// A survey without questions cannot be answered
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::QuestionKind;

    #[test]
    fn test_deserialize_backend_survey() {
        let json = r#"{
            "metadata": {"survey_id": 7, "created_by": "ana", "created_at": "2024-03-01 10:00:00"},
            "title": "Colours",
            "subtitle": "Tell us",
            "questions": [
                {"question_id": 1, "type": "multiple_choice", "question": "Pick", "options": ["Red", "Blue"]},
                {"question_id": 2, "type": "free_response", "question": "Why?", "options": []}
            ],
            "chat_context": "Ask about colours"
        }"#;

        let survey: Survey = serde_json::from_str(json).unwrap();
        assert_eq!(survey.id(), Some(7));
        assert_eq!(survey.len(), 2);
        assert_eq!(survey.questions[0].kind, QuestionKind::SingleChoice);
        assert_eq!(survey.questions[1].options.len(), 0);
        assert_eq!(survey.metadata.name, "");
    }

    #[test]
    fn test_new_survey_omits_id() {
        let survey = Survey {
            title: "t".into(),
            subtitle: "s".into(),
            chat_context: "c".into(),
            questions: Vec::new(),
            metadata: SurveyMetadata::default(),
        };
        let value = serde_json::to_value(&survey).unwrap();
        assert!(value["metadata"].get("survey_id").is_none());
    }
}
