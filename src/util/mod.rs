pub mod env;
pub mod mapper;
