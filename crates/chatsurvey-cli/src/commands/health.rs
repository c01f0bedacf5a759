//! Backend reachability check

use chatsurvey_core::SurveyResult;

use crate::console::CliConsole;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let api = ctx.api_client()?;

    console.info(&format!("Checking {}", api.base_url()));
    let spinner = console.spinner("Contacting backend...");
    let result = api.health().await;
    spinner.finish_and_clear();

    let message = match result {
        Ok(message) => message,
        Err(e) => {
            if let Some(code) = e.status_code() {
                console.warn(&format!("{} answered with HTTP {}", api.base_url(), code));
            } else if e.is_retryable() {
                console.warn("The backend could not be reached. Check api.base_url or try again shortly.");
            }
            return Err(e);
        }
    };
    console.success(&format!("{} is up: {}", api.base_url(), message));
    Ok(())
}
