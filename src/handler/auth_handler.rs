use axum::{extract::{State, rejection::JsonRejection}, response::{IntoResponse, Redirect}, Json};
use crate::dto::auth_dto::{LoginRequest, OkResponse};
use crate::middlewares::admin_middleware::LOGIN_PATH;
use crate::service::auth_service::{session_cookie, session_cookie_removal, AdminAuthService};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};
use std::sync::Arc;
use tower_cookies::Cookies;

// Login
pub async fn login_handler(
    State(service): State<Arc<AdminAuthService>>,
    cookies: Cookies,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    // An unreadable body is treated as an empty password.
    let password = payload.map(|Json(p)| p.password).unwrap_or_default();

    service.login(&password).map_err(|e| match e {
        ServiceError::Configuration(msg) => HandlerError::new(HandlerErrorKind::Configuration, msg),
        _ => HandlerError::new(HandlerErrorKind::Unauthorized, "Invalid password"),
    })?;

    cookies.add(session_cookie());
    Ok(Json(OkResponse { ok: true }))
}

// Logout
pub async fn logout_handler(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(session_cookie_removal());
    Redirect::to(LOGIN_PATH)
}
