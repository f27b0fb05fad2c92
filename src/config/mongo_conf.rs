use std::env;
use tracing::{error, info};

use super::{lookup_var, parsed_var, required_var, ConfigError};

pub const DEFAULT_QUOTE_COLLECTION: &str = "quote_requests";

/// Connection settings for the MongoDB quote store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Only applied when both username and password are set.
    pub username: Option<String>,
    pub password: Option<String>,
    pub quote_collection: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads `MONGO_URI` and `MONGO_DATABASE` (required), `MONGO_USERNAME`,
    /// `MONGO_PASSWORD`, `MONGO_QUOTE_COLLECTION`, `MONGO_POOL_SIZE` and
    /// `MONGO_CONNECTION_TIMEOUT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = MongoConfig {
            uri: required_var(&lookup, "MONGO_URI")?,
            database: required_var(&lookup, "MONGO_DATABASE")?,
            username: lookup_var(&lookup, "MONGO_USERNAME"),
            password: lookup_var(&lookup, "MONGO_PASSWORD"),
            quote_collection: lookup_var(&lookup, "MONGO_QUOTE_COLLECTION")
                .unwrap_or_else(|| DEFAULT_QUOTE_COLLECTION.to_string()),
            pool_size: parsed_var(&lookup, "MONGO_POOL_SIZE", 10)?,
            connection_timeout_secs: parsed_var(&lookup, "MONGO_CONNECTION_TIMEOUT", 5)?,
        };
        config.validate()?;
        info!(
            database = %config.database,
            collection = %config.quote_collection,
            "MongoDB configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            error!("MongoDB pool size is 0");
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }
        if self.connection_timeout_secs == 0 {
            error!("MongoDB connection timeout is 0");
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}
