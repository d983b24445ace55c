pub mod token_usage_service;

pub use token_usage_service::*;
