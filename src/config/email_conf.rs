use std::env;
use tracing::{error, info};

use super::{lookup_var, parsed_var, required_var, ConfigError};

pub const DEFAULT_FROM_NAME: &str = "Budeba Quotes";

/// SMTP transport settings plus the staff inbox for new-quote alerts.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub use_tls: bool,
    /// STARTTLS on the plain port instead of implicit TLS.
    pub use_starttls: bool,
    pub from_email: String,
    pub from_name: String,
    pub connection_timeout_secs: u64,
    pub staff_email: String,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = EmailConfig {
            smtp_host: required_var(&lookup, "SMTP_HOST")?,
            smtp_port: parsed_var(&lookup, "SMTP_PORT", 587)?,
            smtp_username: required_var(&lookup, "SMTP_USERNAME")?,
            smtp_password: required_var(&lookup, "SMTP_PASSWORD")?,
            use_tls: parsed_var(&lookup, "SMTP_USE_TLS", true)?,
            use_starttls: parsed_var(&lookup, "SMTP_USE_STARTTLS", true)?,
            from_email: required_var(&lookup, "SMTP_FROM_EMAIL")?,
            from_name: lookup_var(&lookup, "SMTP_FROM_NAME")
                .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            connection_timeout_secs: parsed_var(&lookup, "SMTP_CONNECTION_TIMEOUT", 30)?,
            staff_email: required_var(&lookup, "STAFF_EMAIL")?,
        };
        config.validate()?;
        info!(host = %config.smtp_host, port = config.smtp_port, "Email configuration loaded");
        Ok(config)
    }

    /// Local relay without TLS, as used by the test suite.
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "test".to_string(),
            smtp_password: "test".to_string(),
            use_tls: false,
            use_starttls: false,
            from_email: "quotes@example.com".to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            connection_timeout_secs: 10,
            staff_email: "staff@example.com".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }
        if !self.from_email.contains('@') {
            error!("Invalid from email format");
            return Err(ConfigError::ValidationError("Invalid from email format".to_string()));
        }
        if !self.staff_email.contains('@') {
            error!("Invalid staff email");
            return Err(ConfigError::ValidationError("Staff email must be a valid address".to_string()));
        }
        if self.connection_timeout_secs == 0 {
            error!("Connection timeout is 0");
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(extra: &[(&str, &str)]) -> Result<EmailConfig, ConfigError> {
        let mut vars: HashMap<String, String> = [
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USERNAME", "mailer"),
            ("SMTP_PASSWORD", "secret"),
            ("SMTP_FROM_EMAIL", "quotes@example.com"),
            ("STAFF_EMAIL", "sales@example.com"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        EmailConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.smtp_port, 587);
        assert!(config.use_tls);
        assert!(config.use_starttls);
        assert_eq!(config.from_name, "Budeba Quotes");
        assert_eq!(config.connection_timeout_secs, 30);
        assert_eq!(config.staff_email, "sales@example.com");
    }

    #[test]
    fn test_staff_email_required() {
        let err = load(&[("STAFF_EMAIL", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound(key) if key == "STAFF_EMAIL"));

        assert!(matches!(load(&[("STAFF_EMAIL", "sales")]), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_flag_rejected() {
        assert!(matches!(load(&[("SMTP_USE_TLS", "sometimes")]), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = EmailConfig::from_test_env();
        assert!(config.validate().is_ok());
        assert!(!config.use_tls);
    }

    #[test]
    fn test_validate_missing_staff_email() {
        let mut config = EmailConfig::from_test_env();
        config.staff_email = String::new();
        assert!(config.validate().is_err());
    }
}
