//! Persistence for chatsurvey
//!
//! This crate keeps local state between runs:
//! - In-progress conversations, so a respondent can resume a survey
//! - Expiry of saved conversations
//! - The logged-in admin's session

pub mod credentials;
pub mod respondent;
pub mod snapshot;
pub mod storage;

pub use credentials::CredentialStore;
pub use respondent::RespondentSession;
pub use snapshot::{ConversationSummary, SavedConversation};
pub use storage::{ConversationStore, LocalConversationStore, StorageError, StorageResult};
