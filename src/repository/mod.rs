pub mod repository_error;
pub mod quote_repo;
pub mod memory_quote_repo;
