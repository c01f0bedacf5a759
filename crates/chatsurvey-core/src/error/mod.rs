//! Error types for chatsurvey
//!
//! A single error enum is shared by every crate in the workspace. Each
//! variant maps to one failure family the user can act on:
//! - validation failures caught before anything is sent
//! - authentication and conflict answers from the backend
//! - transport and server failures
//! - local configuration, storage and I/O problems

mod constructors;
mod conversions;
mod types;
mod user_messages;

pub use types::{OptionExt, ResultExt, SurveyError, SurveyResult};
pub use user_messages::{ErrorCategory, UserFriendlyError};
