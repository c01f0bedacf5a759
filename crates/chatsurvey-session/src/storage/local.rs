//! Local filesystem conversation storage
//!
//! Stores each conversation as a JSON file named after its survey id.

use super::{ConversationStore, StorageError, StorageResult};
use crate::{ConversationSummary, SavedConversation};
use async_trait::async_trait;
use chatsurvey_core::SurveyId;
use chrono::{Duration, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

const DEFAULT_TTL_DAYS: i64 = 7;

/// Local filesystem conversation storage
///
/// The CLI points it at `<state dir>/conversations`.
pub struct LocalConversationStore {
    base_path: PathBuf,
    ttl: Duration,
}

impl LocalConversationStore {
    /// Create storage with custom base path
    pub fn with_path(base_path: PathBuf) -> Self {
        Self {
            base_path,
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn entry_path(&self, survey_id: SurveyId) -> PathBuf {
        self.base_path.join(format!("survey-{}.json", survey_id))
    }

    async fn read_entry(&self, path: &Path) -> StorageResult<SavedConversation> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn remove_expired(&self, path: &Path, conversation: &SavedConversation) {
        debug!(
            "Saved conversation for survey {} expired at {}",
            conversation.survey_id, conversation.expires_at
        );
        if let Err(e) = fs::remove_file(path).await {
            warn!("Failed to remove expired entry {:?}: {}", path, e);
        }
    }
}

#[async_trait]
impl ConversationStore for LocalConversationStore {
    fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn save(&self, conversation: &SavedConversation) -> StorageResult<()> {
        self.ensure_dir().await?;

        let path = self.entry_path(conversation.survey_id);
        let content = serde_json::to_string_pretty(conversation)?;

        fs::write(&path, content).await?;
        debug!(
            "Saved conversation for survey {} to {:?}",
            conversation.survey_id, path
        );

        Ok(())
    }

    async fn load(&self, survey_id: SurveyId) -> StorageResult<Option<SavedConversation>> {
        let path = self.entry_path(survey_id);

        if !path.exists() {
            return Ok(None);
        }

        let conversation = self.read_entry(&path).await?;
        if conversation.survey_id != survey_id {
            return Err(StorageError::InvalidData(format!(
                "{:?} holds survey {} instead of {}",
                path, conversation.survey_id, survey_id
            )));
        }
        if conversation.is_expired_at(Utc::now()) {
            self.remove_expired(&path, &conversation).await;
            return Ok(None);
        }

        debug!("Loaded conversation for survey {} from {:?}", survey_id, path);
        Ok(Some(conversation))
    }

    async fn delete(&self, survey_id: SurveyId) -> StorageResult<bool> {
        let path = self.entry_path(survey_id);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).await?;
        debug!("Deleted conversation for survey {} at {:?}", survey_id, path);

        Ok(true)
    }

    async fn list(&self) -> StorageResult<Vec<ConversationSummary>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path).await?;
        let mut conversations = Vec::new();
        let now = Utc::now();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            // Only process .json files
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match self.read_entry(&path).await {
                Ok(conversation) if conversation.is_expired_at(now) => {
                    self.remove_expired(&path, &conversation).await;
                }
                Ok(conversation) => conversations.push(conversation.summary()),
                Err(e) => {
                    warn!("Failed to read saved conversation from {:?}: {}", path, e);
                }
            }
        }

        conversations.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(conversations)
    }
}
