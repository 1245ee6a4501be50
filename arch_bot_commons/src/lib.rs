//! This create houses common for me functions, because some things
//! are just boilerplate and aaAAAAAAAAA

use std::{future::Future, process::ExitCode};

pub mod useful_methods;
pub use useful_methods::*;

/// Initialize logging and run the `closure` to completion in an async runtime,
/// returning whatever exit code it settles on.
///
/// Logging uses `default_filter` unless overridden by environment variable
/// `RUST_LOG`. This uses the crate [pretty_env_logger][] internally, see its
/// documentation for more details.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
pub fn start_everything(default_filter: &str, closure: impl Future<Output = ExitCode>) -> ExitCode {
    let log_level = std::env::var_os("RUST_LOG")
        .and_then(|x| x.into_string().ok())
        .unwrap_or_else(|| default_filter.to_string());

    // journald timestamps lines on its own.
    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = match running_as_systemd_service {
        true => pretty_env_logger::formatted_builder(),
        false => pretty_env_logger::formatted_timed_builder(),
    };

    builder.parse_filters(&log_level);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }

    log::info!("hi");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Could not build the async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(closure)
}

/// Find the bot token. Looks at the environment variable `env_var` first,
/// then falls back to a file named `key` (or `key_debug` in debug builds)
/// in the working directory.
///
/// Returns `None` if neither has a non-empty token.
pub fn read_bot_key(env_var: &str) -> Option<String> {
    if let Some(key) = std::env::var(env_var)
        .ok()
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
    {
        return Some(key);
    }

    let key_file = match cfg!(debug_assertions) {
        true => "key_debug",
        false => "key",
    };

    match std::fs::read_to_string(key_file) {
        Ok(key) => Some(key.trim().to_string()).filter(|x| !x.is_empty()),
        Err(e) => {
            log::debug!("No {env_var} and could not read \"{key_file}\": {e}");
            None
        }
    }
}
