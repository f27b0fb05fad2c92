use crate::config::AdminConfig;
use crate::util::error::ServiceError;
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::Cookie;
use tracing::{error, info, warn};

pub const SESSION_COOKIE: &str = "budeba_admin";
/// Literal marker stored in the session cookie. It is not a signed token.
pub const SESSION_VALUE: &str = "true";
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Single shared-secret admin login.
pub struct AdminAuthService {
    config: AdminConfig,
}

impl AdminAuthService {
    pub fn new(config: AdminConfig) -> Self {
        Self { config }
    }

    /// Checks `password` against the configured secret by exact equality.
    pub fn login(&self, password: &str) -> Result<(), ServiceError> {
        let Some(expected) = self.config.password.as_deref() else {
            error!("Admin login attempted but ADMIN_PASSWORD is not set");
            return Err(ServiceError::Configuration("ADMIN_PASSWORD is not set".to_string()));
        };
        if password != expected {
            warn!("Admin login rejected");
            return Err(ServiceError::Unauthorized("Invalid password".to_string()));
        }
        info!("Admin logged in");
        Ok(())
    }
}

pub fn is_valid_session(value: Option<&str>) -> bool {
    value == Some(SESSION_VALUE)
}

pub fn session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, SESSION_VALUE))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

/// Cookie identity used to ask the client to drop the session.
pub fn session_cookie_removal() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_without_secret_is_configuration_error() {
        let service = AdminAuthService::new(AdminConfig::default());
        assert!(matches!(service.login("anything"), Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn test_login_exact_match_only() {
        let service = AdminAuthService::new(AdminConfig::with_password("s3cret"));
        assert!(service.login("s3cret").is_ok());
        assert!(matches!(service.login("s3cret "), Err(ServiceError::Unauthorized(_))));
        assert!(matches!(service.login(""), Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), SESSION_VALUE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
    }

    #[test]
    fn test_session_value_must_match_sentinel() {
        assert!(is_valid_session(Some("true")));
        assert!(!is_valid_session(Some("false")));
        assert!(!is_valid_session(None));
    }
}
