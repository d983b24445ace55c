pub mod token_usage_repository;

pub use token_usage_repository::*;
