//! chatsurvey command-line interface
//!
//! Respondents take surveys as a chat:
//!
//! ```bash
//! chatsurvey take 12          # answer survey 12, resuming saved progress
//! chatsurvey pending          # list surveys left half-answered
//! ```
//!
//! Admins build and manage surveys:
//!
//! ```bash
//! chatsurvey admin login
//! chatsurvey admin create
//! chatsurvey admin responses 12
//! ```

// Allow common clippy lints that are stylistic preferences
#![allow(clippy::collapsible_if)]

mod args;
mod commands;
mod console;
mod context;
mod logging;
mod router;

use clap::Parser;
use chatsurvey_core::error::UserFriendlyError;

use crate::args::Cli;
use crate::console::CliConsole;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = router::route(cli).await {
        tracing::debug!("Command failed: {:?}", e);
        let console = CliConsole::new(false);
        console.error(&UserFriendlyError::from(&e).format_display());
        std::process::exit(1);
    }
}
