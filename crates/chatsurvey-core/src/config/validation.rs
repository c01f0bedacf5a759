//! Configuration validation

use crate::config::model::Config;
use crate::error::{SurveyError, SurveyResult};

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Upper bound on how long saved progress is kept (100 years)
pub const MAX_TTL_DAYS: u32 = 36_500;

impl Config {
    /// Reject values the client cannot work with
    pub fn validate(&self) -> SurveyResult<()> {
        validate_api(self)?;
        validate_storage(self)?;
        validate_logging(self)
    }
}

fn validate_api(config: &Config) -> SurveyResult<()> {
    let url = reqwest::Url::parse(&config.api.base_url).map_err(|e| {
        SurveyError::config_with_context(
            format!("Invalid base URL '{}': {}", config.api.base_url, e),
            "api.base_url",
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SurveyError::config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.api.timeout_secs == 0 {
        return Err(SurveyError::config("api.timeout_secs must be greater than 0"));
    }
    if config.api.connect_timeout_secs == 0 {
        return Err(SurveyError::config(
            "api.connect_timeout_secs must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_storage(config: &Config) -> SurveyResult<()> {
    if config.storage.ttl_days == 0 {
        return Err(SurveyError::config("storage.ttl_days must be greater than 0"));
    }
    if config.storage.ttl_days > MAX_TTL_DAYS {
        return Err(SurveyError::config(format!(
            "storage.ttl_days must be at most {}, got {}",
            MAX_TTL_DAYS, config.storage.ttl_days
        )));
    }
    if config.storage.directory.as_os_str().is_empty() {
        return Err(SurveyError::config("storage.directory must not be empty"));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> SurveyResult<()> {
    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        return Err(SurveyError::config(format!(
            "Invalid log level '{}'. Valid levels are: {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }
    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(SurveyError::config(format!(
            "Invalid log format '{}'. Valid formats are: {}",
            config.logging.format,
            LOG_FORMATS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.api.base_url = "ftp://example.com/api/v1".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_values() {
        let mut config = Config::default();
        config.api.connect_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.storage.ttl_days = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ttl_days"));
    }

    #[test]
    fn test_rejects_oversized_ttl() {
        let mut config = Config::default();
        config.apply(ConfigOverrides {
            ttl_days: Some(u32::MAX),
            ..Default::default()
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ttl_days"));

        config.storage.ttl_days = MAX_TTL_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_logging_values() {
        let mut config = Config::default();
        config.logging.level = "loud".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "DEBUG".into();
        assert!(config.validate().is_ok());
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }
}
