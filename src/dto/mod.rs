pub mod quote_dto;
pub mod auth_dto;
