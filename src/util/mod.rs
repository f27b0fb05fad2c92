pub mod email;
pub mod error;
pub mod links;
pub mod logger;
pub mod phone;
