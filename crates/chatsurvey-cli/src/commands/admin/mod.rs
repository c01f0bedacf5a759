//! Admin commands: account, survey management and the survey builder

pub mod auth;
pub mod builder;
pub mod surveys;

use chatsurvey_core::{AdminSession, SurveyError, SurveyResult};

use crate::context::AppContext;

/// The saved admin session, or an error telling the user to log in
pub(crate) async fn require_session(ctx: &AppContext) -> SurveyResult<AdminSession> {
    ctx.credential_store().active().await?.ok_or_else(|| {
        SurveyError::unauthorized(
            "Not logged in or session expired. Run `chatsurvey admin login` first",
        )
    })
}
