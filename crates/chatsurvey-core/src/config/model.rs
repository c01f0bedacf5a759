//! Configuration model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TTL_DAYS: u32 = 7;

/// `~/.chatsurvey`, or `.chatsurvey` in the working directory without a home
pub fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".chatsurvey"))
        .unwrap_or_else(|| PathBuf::from(".chatsurvey"))
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api/v1` prefix
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Local state: saved conversations and admin credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub directory: PathBuf,

    /// Days a saved conversation stays resumable
    pub ttl_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_state_dir(),
            ttl_days: DEFAULT_TTL_DAYS,
        }
    }
}

impl StorageConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.ttl_days))
    }

    pub fn conversations_dir(&self) -> PathBuf {
        self.directory.join("conversations")
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.directory.join("credentials.json")
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Values from the environment or the command line; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub state_dir: Option<PathBuf>,
    pub ttl_days: Option<u32>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Config {
    /// Apply overrides on top of this configuration
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.api.timeout_secs = timeout;
        }
        if let Some(timeout) = overrides.connect_timeout_secs {
            self.api.connect_timeout_secs = timeout;
        }
        if let Some(dir) = overrides.state_dir {
            self.storage.directory = dir;
        }
        if let Some(ttl) = overrides.ttl_days {
            self.storage.ttl_days = ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }
}
