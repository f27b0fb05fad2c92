pub mod quote_router;
pub mod auth_router;
