use axum::{Router, routing::{post, get}, middleware};
use crate::handler::quote_handler::{
    create_quote_handler,
    list_quotes_handler,
    update_quote_status_handler,
};
use std::sync::Arc;
use crate::service::quote_service::QuoteServiceImpl;
use crate::middlewares::admin_middleware::require_admin_session;


pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    // Public route
    let public = Router::new()
        .route("/quote", post(create_quote_handler));

    // Gated by the app-wide /admin prefix check
    let admin = Router::new()
        .route("/admin/quotes", get(list_quotes_handler));

    // Admin API outside the prefix
    let status = Router::new()
        .route("/quote/status", post(update_quote_status_handler))
        .route_layer(middleware::from_fn(require_admin_session));

    public
        .merge(admin)
        .merge(status)
        .with_state(service)
}
