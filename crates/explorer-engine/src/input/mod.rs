pub mod keys;
pub mod mapper;
