use axum::{Router, routing::post};
use crate::handler::auth_handler::{login_handler, logout_handler};
use crate::service::auth_service::AdminAuthService;
use std::sync::Arc;

pub fn auth_router(service: Arc<AdminAuthService>) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .with_state(service)
}
