//! Environment variable-based configuration loading

use crate::config::model::ConfigOverrides;
use crate::error::{SurveyError, SurveyResult};
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix shared by every variable
pub const ENV_PREFIX: &str = "CHATSURVEY_";

/// Read `CHATSURVEY_*` variables from the process environment
pub fn load_from_env() -> SurveyResult<ConfigOverrides> {
    overrides_from_lookup(|name| std::env::var(name).ok())
}

/// Build overrides from any variable lookup
///
/// Recognized: `BASE_URL`, `TIMEOUT_SECS`, `CONNECT_TIMEOUT_SECS`,
/// `STATE_DIR`, `TTL_DAYS`, `LOG_LEVEL`, `LOG_FORMAT`. Empty values are
/// ignored.
pub fn overrides_from_lookup<F>(lookup: F) -> SurveyResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(&format!("{}{}", ENV_PREFIX, key)).filter(|v| !v.trim().is_empty())
    };

    Ok(ConfigOverrides {
        base_url: get("BASE_URL"),
        timeout_secs: parse_var("TIMEOUT_SECS", get("TIMEOUT_SECS"))?,
        connect_timeout_secs: parse_var("CONNECT_TIMEOUT_SECS", get("CONNECT_TIMEOUT_SECS"))?,
        state_dir: get("STATE_DIR").map(PathBuf::from),
        ttl_days: parse_var("TTL_DAYS", get("TTL_DAYS"))?,
        log_level: get("LOG_LEVEL"),
        log_format: get("LOG_FORMAT"),
    })
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> SurveyResult<Option<T>> {
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| {
                SurveyError::config_with_context(
                    format!("Invalid {}{} value", ENV_PREFIX, key),
                    format!("Parsing '{}' as a number", v),
                )
            })
        })
        .transpose()
}
