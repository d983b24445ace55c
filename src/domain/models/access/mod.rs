pub mod access_list;

pub use access_list::*;
