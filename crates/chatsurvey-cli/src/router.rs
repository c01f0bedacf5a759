//! Command routing logic for CLI

use crate::args::{AdminAction, Cli, Commands, ConfigAction};
use crate::commands;
use crate::context::AppContext;
use crate::logging;
use chatsurvey_core::SurveyResult;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> SurveyResult<()> {
    // Config commands report bad configuration themselves
    let validate = !matches!(cli.command, Commands::Config { .. });
    let ctx = AppContext::load(&cli, validate)?;
    logging::init(&ctx.config.logging, ctx.verbose);
    tracing::debug!("Using backend {}", ctx.config.api.base_url);

    match cli.command {
        Commands::Take { survey_id, fresh } => commands::take::run(&ctx, survey_id, fresh).await,
        Commands::Pending => commands::pending::run(&ctx).await,
        Commands::Admin { action } => route_admin(&ctx, action).await,
        Commands::Config { action } => route_config(&ctx, action).await,
        Commands::Health => commands::health::run(&ctx).await,
    }
}

async fn route_admin(ctx: &AppContext, action: AdminAction) -> SurveyResult<()> {
    use commands::admin;

    match action {
        AdminAction::Signup { username } => admin::auth::signup(ctx, username).await,
        AdminAction::Login { username } => admin::auth::login(ctx, username).await,
        AdminAction::Logout => admin::auth::logout(ctx).await,
        AdminAction::Surveys => admin::surveys::list(ctx).await,
        AdminAction::Show { survey_id } => admin::surveys::show(ctx, survey_id).await,
        AdminAction::Delete { survey_id, force } => {
            admin::surveys::delete(ctx, survey_id, force).await
        }
        AdminAction::Responses { survey_id } => admin::surveys::responses(ctx, survey_id).await,
        AdminAction::Response {
            survey_id,
            response_id,
        } => admin::surveys::response(ctx, survey_id, response_id).await,
        AdminAction::Create { from_file } => admin::builder::create(ctx, from_file).await,
    }
}

async fn route_config(ctx: &AppContext, action: ConfigAction) -> SurveyResult<()> {
    match action {
        ConfigAction::Show => commands::config::show(ctx).await,
        ConfigAction::Validate => commands::config::validate(ctx).await,
        ConfigAction::Init { force } => commands::config::init(&ctx.config_file, force).await,
    }
}
