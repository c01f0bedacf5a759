//! Transcript entries

use serde::{Deserialize, Serialize};

use super::{ERROR_MESSAGE, SUBMIT_PROMPT};
use crate::survey::{Answer, Question};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A survey question placed in the transcript, with the respondent's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptQuestion {
    pub question: Question,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
}

impl TranscriptQuestion {
    pub fn is_answered(&self) -> bool {
        self.answer.as_ref().is_some_and(|a| !a.is_empty())
    }
}

/// What a transcript entry represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MessageKind {
    /// Free text turn
    Chat,
    /// A survey question awaiting or holding an answer
    Question(TranscriptQuestion),
    /// Confirmation prompt after the last question
    SubmitPrompt,
    /// A backend call failed
    Error,
}

/// One entry of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub sender: Sender,
    pub text: String,
    pub kind: MessageKind,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            kind: MessageKind::Chat,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            kind: MessageKind::Chat,
        }
    }

    /// Bot message asking `question`
    pub fn question(question: Question) -> Self {
        Self {
            sender: Sender::Bot,
            text: question.question.clone(),
            kind: MessageKind::Question(TranscriptQuestion {
                question,
                answer: None,
            }),
        }
    }

    pub fn submit_prompt() -> Self {
        Self {
            sender: Sender::Bot,
            text: SUBMIT_PROMPT.to_string(),
            kind: MessageKind::SubmitPrompt,
        }
    }

    pub fn error() -> Self {
        Self {
            sender: Sender::Bot,
            text: ERROR_MESSAGE.to_string(),
            kind: MessageKind::Error,
        }
    }

    pub fn as_question(&self) -> Option<&TranscriptQuestion> {
        match &self.kind {
            MessageKind::Question(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_question_mut(&mut self) -> Option<&mut TranscriptQuestion> {
        match &mut self.kind {
            MessageKind::Question(q) => Some(q),
            _ => None,
        }
    }

    pub fn is_submit_prompt(&self) -> bool {
        matches!(self.kind, MessageKind::SubmitPrompt)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, MessageKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::QuestionKind;

    #[test]
    fn test_question_message_serialization() {
        let q = Question::new(1, "Favourite colour?", QuestionKind::SingleChoice)
            .with_options(["Red", "Blue"]);
        let mut msg = ConversationMessage::question(q);
        msg.as_question_mut().unwrap().answer = Some(Answer::single("Red"));

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["kind"]["type"], "question");
        assert_eq!(json["kind"]["data"]["answer"], "Red");
        assert_eq!(json["kind"]["data"]["question"]["type"], "multiple_choice");

        let back: ConversationMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_unit_kinds_serialize_by_tag() {
        let json = serde_json::to_value(ConversationMessage::submit_prompt()).unwrap();
        assert_eq!(json["kind"]["type"], "submit_prompt");

        let json = serde_json::to_value(ConversationMessage::user("hi")).unwrap();
        assert_eq!(json["kind"]["type"], "chat");
        assert_eq!(json["sender"], "user");
    }

    #[test]
    fn test_blank_answer_is_not_answered() {
        let q = Question::new(2, "How are you?", QuestionKind::FreeResponse);
        let mut tq = TranscriptQuestion {
            question: q,
            answer: Some(Answer::single("  ")),
        };
        assert!(!tq.is_answered());
        tq.answer = Some(Answer::single("fine"));
        assert!(tq.is_answered());
    }
}
