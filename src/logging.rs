use env_logger::{Builder, Env};
use log::LevelFilter;

/// log to stderr, level is taken from MINI_LOG unless verbose output was requested
pub fn init(verbose: bool) {
    let mut builder = Builder::from_env(Env::new().filter_or("MINI_LOG", "warn"));
    builder.format_timestamp(None);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}
