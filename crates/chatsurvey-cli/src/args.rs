//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatsurvey")]
#[command(about = "Build surveys and answer them as a conversation")]
#[command(
    long_about = r#"chatsurvey - build surveys and answer them as a conversation

USAGE:
  chatsurvey take <survey_id>        # Answer a survey in the terminal
  chatsurvey pending                 # Surveys with saved progress
  chatsurvey admin login             # Log in as an admin
  chatsurvey admin create            # Build and publish a survey

UTILITY COMMANDS:
  chatsurvey config init             # Create config file
  chatsurvey config show             # Show effective config
  chatsurvey health                  # Check the backend"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: ~/.chatsurvey/config.toml)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Backend base URL, including the /api/v1 prefix
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a survey as a chat
    Take {
        /// Survey to answer
        survey_id: u64,

        /// Ignore saved progress and start over
        #[arg(long)]
        fresh: bool,
    },

    /// List surveys with saved progress
    Pending,

    /// Manage surveys as an admin
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand, Clone)]
pub enum AdminAction {
    /// Create an admin account
    Signup {
        #[arg(long, short)]
        username: Option<String>,
    },

    /// Log in and store the session
    Login {
        #[arg(long, short)]
        username: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// List your surveys
    Surveys,

    /// Show one survey
    Show { survey_id: u64 },

    /// Delete a survey
    Delete {
        survey_id: u64,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List responses to a survey
    Responses { survey_id: u64 },

    /// Show a single response
    Response { survey_id: u64, response_id: u64 },

    /// Build a survey and publish it
    Create {
        /// Read the draft from a JSON, TOML or YAML file instead of prompting
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Validate configuration for errors
    Validate,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file without prompting
        #[arg(long)]
        force: bool,
    },
}
