pub mod quote_service;
pub mod auth_service;
