pub mod ip_restriction_service;

pub use ip_restriction_service::*;
