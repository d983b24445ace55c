pub mod access_list_repository;

pub use access_list_repository::*;
