use env_logger::{Builder, Env};
use std::env;

/// Installs the global logger. `RUST_LOG` wins over the `verbose` switch.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let level = env::var("RUST_LOG").unwrap_or_else(|_| default.to_string());
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
