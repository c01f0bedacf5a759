//! File-based configuration loading

use crate::config::model::Config;
use crate::error::{SurveyError, SurveyResult};
use std::fs;
use std::path::Path;

enum Format {
    Json,
    Toml,
    Yaml,
}

fn format_of(path: &Path) -> Format {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => Format::Toml,
        Some("yaml") | Some("yml") => Format::Yaml,
        _ => Format::Json,
    }
}

/// Load configuration from a file
///
/// The format follows the extension; anything unknown is read as JSON.
/// A missing file yields the defaults.
pub fn load_from_file(path: &Path) -> SurveyResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        SurveyError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let parsed = match format_of(path) {
        Format::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|e| {
        SurveyError::config_with_context(
            format!("Failed to parse config file: {}", e),
            format!("Deserializing configuration from '{}'", path.display()),
        )
    })
}

/// Write a configuration, creating parent directories
pub fn write_to_file(config: &Config, path: &Path) -> SurveyResult<()> {
    let content = match format_of(path) {
        Format::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
    }
    .map_err(|e| SurveyError::config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| SurveyError::io_with_path(e.to_string(), parent.display().to_string()))?;
        }
    }
    fs::write(path, content)
        .map_err(|e| SurveyError::io_with_path(e.to_string(), path.display().to_string()))
}
