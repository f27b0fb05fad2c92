use axum::{http::Request, middleware::Next, response::{IntoResponse, Redirect, Response}, body::Body};
use tower_cookies::Cookies;
use tracing::{debug, warn};
use crate::service::auth_service::{is_valid_session, SESSION_COOKIE};
use crate::util::error::{HandlerError, HandlerErrorKind};

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/login";

pub fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with("/admin/")
}

fn has_session(cookies: &Cookies) -> bool {
    let cookie = cookies.get(SESSION_COOKIE);
    is_valid_session(cookie.as_ref().map(|c| c.value()))
}

/// Location of the login page that returns to `path` afterwards.
pub fn login_redirect_target(path: &str) -> String {
    format!("{}?next={}", LOGIN_PATH, urlencoding::encode(path))
}

/// Applied to the whole app: any `/admin` path without the session cookie is
/// redirected to the login page, other paths pass through untouched.
pub async fn admin_gate(
    cookies: Cookies,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if !is_admin_path(&path) || has_session(&cookies) {
        return next.run(req).await;
    }
    debug!(path = %path, "No admin session, redirecting to login");
    Redirect::temporary(&login_redirect_target(&path)).into_response()
}

/// For admin-only API routes outside `/admin`: refuse with 401 instead of redirecting.
pub async fn require_admin_session(
    cookies: Cookies,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    if !has_session(&cookies) {
        warn!(path = %req.uri().path(), "Admin API call without session");
        return Err(HandlerError::new(HandlerErrorKind::Unauthorized, "Admin session required"));
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_path_prefix_is_segment_aware() {
        assert!(is_admin_path("/admin"));
        assert!(is_admin_path("/admin/quotes"));
        assert!(!is_admin_path("/administrator"));
        assert!(!is_admin_path("/quote"));
    }

    #[test]
    fn test_login_redirect_preserves_path() {
        assert_eq!(login_redirect_target("/admin/quotes"), "/login?next=%2Fadmin%2Fquotes");
    }
}
