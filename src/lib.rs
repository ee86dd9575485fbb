use std::env;

pub mod backend;
pub mod frontend;
pub mod meta;
pub mod util;

/// get key from environment variable, or default if it's not defined (or not valid unicode)
pub fn parse_env(key: &str, default: &str) -> String {
    env::var_os(key)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| String::from(default))
}
