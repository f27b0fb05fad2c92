use super::ConfigError;
use std::env;

/// Which quote store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::ParseError(format!("APP_PORT is not a port number: {raw}")))?,
            Err(_) => 8080,
        };
        let store = match env::var("QUOTE_STORE").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            _ => StoreBackend::Mongo,
        };
        Ok(AppConfig { host, port, store })
    }
}
