//! Conversation storage abstraction and implementations
//!
//! One entry per survey id. Entries carry their own expiry; an expired
//! entry is treated as absent and removed when it is found.

mod local;

pub use local::LocalConversationStore;

use crate::{ConversationSummary, SavedConversation};
use async_trait::async_trait;
use chatsurvey_core::{SurveyError, SurveyId};
use chrono::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid saved data: {0}")]
    InvalidData(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for SurveyError {
    fn from(error: StorageError) -> Self {
        SurveyError::storage(error.to_string())
    }
}

/// Where conversations are kept between runs
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// How long a saved entry stays resumable
    fn ttl(&self) -> Duration;

    /// Save, replacing any earlier entry for the same survey
    async fn save(&self, conversation: &SavedConversation) -> StorageResult<()>;

    /// Load an unexpired entry; expired entries are deleted
    async fn load(&self, survey_id: SurveyId) -> StorageResult<Option<SavedConversation>>;

    /// Remove an entry; returns whether one existed
    async fn delete(&self, survey_id: SurveyId) -> StorageResult<bool>;

    /// Unexpired entries, most recently saved first
    async fn list(&self) -> StorageResult<Vec<ConversationSummary>>;

    async fn exists(&self, survey_id: SurveyId) -> StorageResult<bool> {
        Ok(self.load(survey_id).await?.is_some())
    }
}
