pub mod rate_limit_repository;

pub use rate_limit_repository::*;
