//! Configuration management commands

use std::path::Path;

use chatsurvey_core::config::{Config, load_from_file, write_to_file};
use chatsurvey_core::{SurveyError, SurveyResult};

use crate::console::CliConsole;
use crate::context::AppContext;

/// Show the effective configuration
pub async fn show(ctx: &AppContext) -> SurveyResult<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    if ctx.config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", ctx.config_file.display()));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            ctx.config_file.display()
        ));
        console.note("Using defaults with environment overrides");
    }

    print_config(&console, &ctx.config);
    Ok(())
}

/// Validate the configuration file and the effective configuration
pub async fn validate(ctx: &AppContext) -> SurveyResult<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Validation");

    if ctx.config_file.exists() {
        console.note(&format!("Validating configuration file: {}", ctx.config_file.display()));
        if let Err(e) = load_from_file(&ctx.config_file) {
            console.error(&format!("Failed to load configuration: {e}"));
            return Err(e);
        }
    } else {
        console.note("No configuration file; validating defaults with environment overrides");
    }

    match ctx.config.validate() {
        Ok(()) => {
            console.success("Configuration is valid");
            console.print_separator();
            print_config(&console, &ctx.config);
            Ok(())
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            Err(e)
        }
    }
}

/// Write a configuration file with default values
pub async fn init(config_file: &Path, force: bool) -> SurveyResult<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.error(&format!(
            "Configuration file already exists: {}",
            config_file.display()
        ));
        console.note("Use --force to overwrite");
        return Err(SurveyError::config("Configuration file already exists"));
    }

    write_to_file(&Config::default(), config_file)?;

    console.success(&format!("Created configuration file: {}", config_file.display()));
    console.note("Edit api.base_url to point at your survey backend");
    Ok(())
}

fn print_config(console: &CliConsole, config: &Config) {
    console.field("Backend", &config.api.base_url);
    console.field("Request timeout", &format!("{}s", config.api.timeout_secs));
    console.field("Connect timeout", &format!("{}s", config.api.connect_timeout_secs));
    console.field("State directory", &config.storage.directory.display().to_string());
    console.field("Saved progress kept for", &format!("{} days", config.storage.ttl_days));
    console.field(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
}
