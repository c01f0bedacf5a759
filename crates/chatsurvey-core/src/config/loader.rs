//! Configuration loader with layered sources

use super::env_loader::load_from_env;
use super::file_loader::load_from_file;
use super::model::{Config, ConfigOverrides};
use crate::error::SurveyResult;
use std::path::{Path, PathBuf};

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// A config file; replaces everything loaded before it
    File(PathBuf),
    /// `CHATSURVEY_*` environment variables
    Environment,
    /// Values given on the command line
    Overrides(ConfigOverrides),
}

/// Loads configuration from sources in the order they were added
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Load, then validate, the configuration
    pub fn load(self) -> SurveyResult<Config> {
        let config = self.load_unchecked()?;
        config.validate()?;
        Ok(config)
    }

    /// Load without validating, for commands that report problems themselves
    pub fn load_unchecked(self) -> SurveyResult<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config file {}", path.display());
                    config = load_from_file(&path)?;
                }
                ConfigSource::Environment => {
                    let overrides = load_from_env()?;
                    if !overrides.is_empty() {
                        tracing::debug!("Applying environment overrides: {:?}", overrides);
                    }
                    config.apply(overrides);
                }
                ConfigSource::Overrides(overrides) => {
                    config.apply(overrides);
                }
            }
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chatsurvey.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"https://file.example.com/api/v1\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_overrides(ConfigOverrides {
                base_url: Some("https://cli.example.com/api/v1".into()),
                ..Default::default()
            })
            .load()
            .unwrap();

        assert_eq!(config.api.base_url, "https://cli.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let result = ConfigLoader::new()
            .with_overrides(ConfigOverrides {
                ttl_days: Some(0),
                ..Default::default()
            })
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_unchecked_keeps_invalid_values() {
        let config = ConfigLoader::new()
            .with_overrides(ConfigOverrides {
                timeout_secs: Some(0),
                ..Default::default()
            })
            .load_unchecked()
            .unwrap();
        assert_eq!(config.api.timeout_secs, 0);
    }
}
