pub mod mongo_conf;
pub mod email_conf;
pub mod admin_conf;
pub mod app_conf;

use std::str::FromStr;
use tracing::error;

pub use mongo_conf::MongoConfig;
pub use email_conf::EmailConfig;
pub use admin_conf::AdminConfig;
pub use app_conf::{AppConfig, StoreBackend};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Non-blank value for `key`, trimmed.
pub(crate) fn lookup_var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub(crate) fn required_var<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup_var(lookup, key).ok_or_else(|| {
        error!("{} environment variable not found", key);
        ConfigError::EnvVarNotFound(key.to_string())
    })
}

/// Parses `key` when set, otherwise returns `default`.
pub(crate) fn parsed_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup_var(lookup, key) {
        Some(raw) => raw.parse().map_err(|_| {
            error!("Invalid {} value: {}", key, raw);
            ConfigError::InvalidValue(format!("Invalid {} value", key))
        }),
        None => Ok(default),
    }
}
