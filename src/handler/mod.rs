pub mod quote_handler;
pub mod auth_handler;
