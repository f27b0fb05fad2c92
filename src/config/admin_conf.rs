use std::env;
use tracing::warn;

/// Shared-secret admin access. The password is optional at startup; a missing
/// value is reported by the login endpoint instead of aborting the server.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub password: Option<String>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        let password = env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());
        if password.is_none() {
            warn!("ADMIN_PASSWORD not set, admin login will be refused");
        }
        AdminConfig { password }
    }

    pub fn with_password<T: Into<String>>(password: T) -> Self {
        AdminConfig { password: Some(password.into()) }
    }
}
