//! Resolved configuration and the services built from it

use std::path::PathBuf;
use std::sync::Arc;

use chatsurvey_core::config::{Config, ConfigLoader, ConfigOverrides, default_state_dir};
use chatsurvey_core::{ApiClient, SurveyResult};
use chatsurvey_session::{CredentialStore, LocalConversationStore};

use crate::args::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

pub struct AppContext {
    pub config: Config,
    pub config_file: PathBuf,
    pub verbose: bool,
}

impl AppContext {
    /// Where the config file is read from when `--config-file` is absent
    pub fn default_config_file() -> PathBuf {
        default_state_dir().join(DEFAULT_CONFIG_FILE)
    }

    pub fn config_file_from(cli: &Cli) -> PathBuf {
        cli.config_file
            .clone()
            .unwrap_or_else(Self::default_config_file)
    }

    pub fn overrides_from(cli: &Cli) -> ConfigOverrides {
        ConfigOverrides {
            base_url: cli.base_url.clone(),
            ..Default::default()
        }
    }

    pub fn loader(cli: &Cli) -> ConfigLoader {
        ConfigLoader::new()
            .with_file(Self::config_file_from(cli))
            .with_env()
            .with_overrides(Self::overrides_from(cli))
    }

    /// Load configuration, validating it unless `validate` is false
    pub fn load(cli: &Cli, validate: bool) -> SurveyResult<Self> {
        let loader = Self::loader(cli);
        let config = if validate {
            loader.load()?
        } else {
            loader.load_unchecked()?
        };
        Ok(Self {
            config,
            config_file: Self::config_file_from(cli),
            verbose: cli.verbose,
        })
    }

    pub fn api_client(&self) -> SurveyResult<ApiClient> {
        ApiClient::new(&self.config.api)
    }

    pub fn conversation_store(&self) -> Arc<LocalConversationStore> {
        Arc::new(
            LocalConversationStore::with_path(self.config.storage.conversations_dir())
                .with_ttl(self.config.storage.ttl()),
        )
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(self.config.storage.credentials_path())
    }
}
