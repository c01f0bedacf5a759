//! Configuration for chatsurvey
//!
//! Sources are layered, later ones winning: built-in defaults, a config
//! file (JSON, TOML or YAML), `CHATSURVEY_*` environment variables and
//! command line overrides.

mod env_loader;
mod file_loader;
mod loader;
mod model;
mod validation;

pub use env_loader::{ENV_PREFIX, load_from_env, overrides_from_lookup};
pub use file_loader::{load_from_file, write_to_file};
pub use loader::{ConfigLoader, ConfigSource};
pub use model::{
    ApiConfig, Config, ConfigOverrides, DEFAULT_BASE_URL, LoggingConfig, StorageConfig,
    default_state_dir,
};
pub use validation::{LOG_FORMATS, LOG_LEVELS, MAX_TTL_DAYS};
