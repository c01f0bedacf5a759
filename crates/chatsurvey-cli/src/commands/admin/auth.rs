//! Admin signup, login and logout

use chatsurvey_core::{SurveyError, SurveyResult};
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::commands::prompt_error;
use crate::console::CliConsole;
use crate::context::AppContext;

fn ask_username(theme: &ColorfulTheme, given: Option<String>) -> SurveyResult<String> {
    let username = match given {
        Some(name) => name,
        None => Input::<String>::with_theme(theme)
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_error)?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(SurveyError::invalid_input_field("Username is required", "username"));
    }
    Ok(username)
}

pub async fn signup(ctx: &AppContext, username: Option<String>) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let theme = ColorfulTheme::default();

    let username = ask_username(&theme, username)?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()
        .map_err(prompt_error)?;

    let api = ctx.api_client()?;
    let spinner = console.spinner("Creating account...");
    let result = api.signup(&username, &password).await;
    spinner.finish_and_clear();

    let message = result?;
    console.success(&message);
    console.note(&format!("Log in with: chatsurvey admin login {}", username));
    Ok(())
}

pub async fn login(ctx: &AppContext, username: Option<String>) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    let theme = ColorfulTheme::default();

    let username = ask_username(&theme, username)?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)?;

    let api = ctx.api_client()?;
    let spinner = console.spinner("Logging in...");
    let result = api.login(&username, &password).await;
    spinner.finish_and_clear();

    let session = result?;
    let store = ctx.credential_store();
    store.save(&session).await?;
    console.info(&format!("Session stored in {}", store.path().display()));
    console.success(&format!(
        "Logged in as {} (session valid until {} UTC)",
        session.username,
        session.expires_at.format("%Y-%m-%d %H:%M")
    ));
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> SurveyResult<()> {
    let console = CliConsole::new(ctx.verbose);
    if ctx.credential_store().clear().await? {
        console.success("Logged out");
    } else {
        console.note("No admin session was saved");
    }
    Ok(())
}
